/*
 * File: /util.rs
 * Created Date: Monday October 19th 2026
 * Author: fast_als developers
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: fast_als developers
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

//! Conversions between ndarray storage and nalgebra solvers.
extern crate nalgebra as na;
use na::{DMatrix, DVector};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Copy a 2-D ndarray view into a column-major `DMatrix`
pub fn clone_to_dmatrix<T>(array_view: ArrayView2<T>) -> DMatrix<T>
where
    T: na::Scalar + Copy,
{
    let (nrows, ncols) = array_view.dim();
    DMatrix::from_fn(nrows, ncols, |i, j| array_view[(i, j)])
}

pub fn clone_to_dvector<T>(array_view: ArrayView1<T>) -> DVector<T>
where
    T: na::Scalar + Copy,
{
    DVector::from_iterator(array_view.len(), array_view.iter().copied())
}

pub fn dvector_to_array1<T>(vector: &DVector<T>) -> Array1<T>
where
    T: na::Scalar + Copy,
{
    vector.iter().copied().collect()
}
