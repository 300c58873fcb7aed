//! Tensor-product stencil application. The 3D interpolation is separable:
//! the outer loop runs the k-axis stencil, each tap of which evaluates a
//! 2D interpolation over j and i, terminating in a plain buffer read. Each
//! axis carries its own offset parity, so there are eight monomorphized
//! kernel variants per order; `variant` hands out the matching function
//! pointer so callers can bind it once per traversal row instead of
//! branching per cell.

use crate::coefficients;
use crate::num::Real;

/// Read-only strided view of a flat source buffer. The three element
/// strides step one coarse cell along each grid axis; a degenerate
/// (extent-1) axis uses stride zero so its taps collapse onto the same
/// cells and the weights sum away. Taps are addressed relative to a base
/// element passed per evaluation, and every access goes through checked
/// slice indexing.
///
pub struct SrcView<'a, T> {
    pub data: &'a [T],
    pub d1: isize,
    pub d2: isize,
    pub d3: isize,
}

/// 0D "interpolation"
#[inline]
fn interp0<T: Real>(src: &SrcView<T>, base: isize) -> T {
    src.data[base as usize]
}

/// 1D interpolation
#[inline]
pub(crate) fn interp1<T: Real, const ORDER: usize, const DI: usize>(
    src: &SrcView<T>,
    base: isize) -> T
{
    let mut result = T::zero();
    for i in coefficients::support(ORDER, DI) {
        result = result + coefficients::get::<T>(ORDER, DI, i) * interp0(src, base + i as isize * src.d1);
    }
    result
}

/// 2D interpolation
#[inline]
pub(crate) fn interp2<T: Real, const ORDER: usize, const DI: usize, const DJ: usize>(
    src: &SrcView<T>,
    base: isize) -> T
{
    let mut result = T::zero();
    for j in coefficients::support(ORDER, DJ) {
        result = result
            + coefficients::get::<T>(ORDER, DJ, j) * interp1::<T, ORDER, DI>(src, base + j as isize * src.d2);
    }
    result
}

/// 3D interpolation
#[inline]
pub(crate) fn interp3<T: Real, const ORDER: usize, const DI: usize, const DJ: usize, const DK: usize>(
    src: &SrcView<T>,
    base: isize) -> T
{
    let mut result = T::zero();
    for k in coefficients::support(ORDER, DK) {
        result = result
            + coefficients::get::<T>(ORDER, DK, k) * interp2::<T, ORDER, DI, DJ>(src, base + k as isize * src.d3);
    }
    result
}

/// Return the monomorphized 3D kernel for the given parity triple.
///
pub fn variant<T: Real, const ORDER: usize>(
    di: usize,
    dj: usize,
    dk: usize) -> fn(&SrcView<T>, isize) -> T
{
    match (di, dj, dk) {
        (0, 0, 0) => interp3::<T, ORDER, 0, 0, 0>,
        (1, 0, 0) => interp3::<T, ORDER, 1, 0, 0>,
        (0, 1, 0) => interp3::<T, ORDER, 0, 1, 0>,
        (1, 1, 0) => interp3::<T, ORDER, 1, 1, 0>,
        (0, 0, 1) => interp3::<T, ORDER, 0, 0, 1>,
        (1, 0, 1) => interp3::<T, ORDER, 1, 0, 1>,
        (0, 1, 1) => interp3::<T, ORDER, 0, 1, 1>,
        (1, 1, 1) => interp3::<T, ORDER, 1, 1, 1>,
        _ => panic!("parity flags must be 0 or 1, got ({}, {}, {})", di, dj, dk),
    }
}
