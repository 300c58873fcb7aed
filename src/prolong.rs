//! The traversal engine for conservative cell-centered prolongation with a
//! 2:1 refinement ratio.
//!
//! The engine walks a fine-grid target region in memory order and emits
//! one interpolated value per fine cell. Along an axis, consecutive fine
//! cells alternate between the offset-zero and offset-one stencil
//! variants, and the coarse source index advances only on the odd-to-even
//! transition: two fine cells share one coarse column per crossing. The
//! starting parity of each axis is fixed by the box offsets, so the
//! traversal binds the pair of monomorphized kernel variants for a row
//! once, then walks the row as an optional leading odd cell, pairs of
//! (even, odd) cells sharing a coarse index, and an optional trailing even
//! cell. No branch or modulo runs inside the innermost loop.

use crate::coefficients;
use crate::index_space::IndexSpace;
use crate::interp::{self, SrcView};
use crate::num::Real;

/// Prolongate one field component from a coarse buffer onto the target
/// sub-region of a fine buffer.
///
/// - `dst` / `dst_alloc`: fine buffer and the index space it is allocated
///   for; `dst_target`: the sub-region to fill (must be contained in
///   `dst_alloc`).
/// - `src` / `src_alloc`: coarse buffer and its allocated index space. It
///   must cover the stencil footprint of every target cell; sizing it with
///   `meshing::required_coarse_space` guarantees this.
/// - `chunk`: number of interleaved fields per cell in both buffers (1 for
///   planar data); `src_field` / `dst_field`: which field to read and
///   write.
///
/// Fine index f maps to coarse parent floor(f / 2); the per-axis offset
/// parity is the remainder. Cells are centered, so the interpolation
/// target sits 1/4 (parity 0) or 3/4 (parity 1) past the parent's lower
/// edge, which is exactly what the coefficient tables are built for.
///
pub fn prolongate_rf2<T: Real, const ORDER: usize>(
    dst: &mut [T],
    dst_alloc: &IndexSpace,
    dst_target: &IndexSpace,
    src: &[T],
    src_alloc: &IndexSpace,
    chunk: usize,
    src_field: usize,
    dst_field: usize)
{
    coefficients::verify::<T>(ORDER);

    assert!(
        dst_alloc.contains_space(dst_target),
        "target region is not contained in the fine buffer extent");
    assert!(chunk >= 1 && src_field < chunk && dst_field < chunk);
    assert!(dst.len() == dst_alloc.len() * chunk, "fine buffer has wrong size");
    assert!(src.len() == src_alloc.len() * chunk, "coarse buffer has wrong size");

    let flo = dst_alloc.start();
    let fblo = dst_target.start();
    let clo = src_alloc.start();

    let regext = dst_target.dim();
    let srcext = src_alloc.dim();
    let dstext = dst_alloc.dim();

    // Offset of the first target cell from the coarse box origin, in fine
    // (half-coarse-cell) units: fine index = 2 * coarse index.
    let srcoff = (fblo.0 - 2 * clo.0, fblo.1 - 2 * clo.1, fblo.2 - 2 * clo.2);

    assert!(
        srcoff.0 >= 0 && srcoff.1 >= 0 && srcoff.2 >= 0,
        "target region starts below the coarse buffer extent");

    // Offset of the target region from the fine buffer origin.
    let dstoff = (fblo.0 - flo.0, fblo.1 - flo.1, fblo.2 - flo.2);

    // Starting parity and coarse base index per axis.
    let (fi, fj, fk) = (srcoff.0 % 2, srcoff.1 % 2, srcoff.2 % 2);
    let (i0, j0, k0) = (srcoff.0 / 2, srcoff.1 / 2, srcoff.2 / 2);

    // Element strides; degenerate (extent-1) axes use stride zero so flat
    // boxes interpolate in the remaining axes only.
    let srcd1 = chunk as isize;
    let srcd2 = if srcext.1 > 1 { (srcext.0 * chunk) as isize } else { 0 };
    let srcd3 = if srcext.2 > 1 { (srcext.0 * srcext.1 * chunk) as isize } else { 0 };

    let view = SrcView { data: src, d1: srcd1, d2: srcd2, d3: srcd3 };

    let c = chunk as i64;

    for k in 0..regext.2 as i64 {
        let dk = ((fk + k) % 2) as usize;
        let ks = k0 + (fk + k) / 2;
        let kd = dstoff.2 + k;

        for j in 0..regext.1 as i64 {
            let dj = ((fj + j) % 2) as usize;
            let js = j0 + (fj + j) / 2;
            let jd = dstoff.1 + j;

            // Stencil variant selection is hoisted to row level: the two
            // kernels below cover the even and odd i-parity of this row.
            let kernel_even = interp::variant::<T, ORDER>(0, dj, dk);
            let kernel_odd = interp::variant::<T, ORDER>(1, dj, dk);

            let src_row = (srcext.0 as i64 * (js + srcext.1 as i64 * ks)) * c + src_field as i64;
            let dst_row = (dstext.0 as i64 * (jd + dstext.1 as i64 * kd)) * c + dst_field as i64;

            let mut i = 0;
            let mut is = i0;
            let mut id = dst_row + dstoff.0 * c;

            if fi == 1 && i < regext.0 as i64 {
                check_footprint::<ORDER>((is, js, ks), (1, dj, dk), srcext);
                dst[id as usize] = kernel_odd(&view, (src_row + is * c) as isize);
                is += 1;
                id += c;
                i += 1;
            }
            while i + 1 < regext.0 as i64 {
                check_footprint::<ORDER>((is, js, ks), (0, dj, dk), srcext);
                check_footprint::<ORDER>((is, js, ks), (1, dj, dk), srcext);
                dst[id as usize] = kernel_even(&view, (src_row + is * c) as isize);
                dst[(id + c) as usize] = kernel_odd(&view, (src_row + is * c) as isize);
                is += 1;
                id += 2 * c;
                i += 2;
            }
            if i < regext.0 as i64 {
                check_footprint::<ORDER>((is, js, ks), (0, dj, dk), srcext);
                dst[id as usize] = kernel_even(&view, (src_row + is * c) as isize);
            }
        }
    }
}

/// Runtime-order entry point: dispatch onto the monomorphized engine.
/// Orders outside 0..=5 are a configuration error and fatal.
///
pub fn prolongate<T: Real>(
    order: usize,
    dst: &mut [T],
    dst_alloc: &IndexSpace,
    dst_target: &IndexSpace,
    src: &[T],
    src_alloc: &IndexSpace,
    chunk: usize,
    src_field: usize,
    dst_field: usize)
{
    match order {
        0 => prolongate_rf2::<T, 0>(dst, dst_alloc, dst_target, src, src_alloc, chunk, src_field, dst_field),
        1 => prolongate_rf2::<T, 1>(dst, dst_alloc, dst_target, src, src_alloc, chunk, src_field, dst_field),
        2 => prolongate_rf2::<T, 2>(dst, dst_alloc, dst_target, src, src_alloc, chunk, src_field, dst_field),
        3 => prolongate_rf2::<T, 3>(dst, dst_alloc, dst_target, src, src_alloc, chunk, src_field, dst_field),
        4 => prolongate_rf2::<T, 4>(dst, dst_alloc, dst_target, src, src_alloc, chunk, src_field, dst_field),
        5 => prolongate_rf2::<T, 5>(dst, dst_alloc, dst_target, src, src_alloc, chunk, src_field, dst_field),
        _ => panic!("unsupported interpolation order {}", order),
    }
}

/// Assert that the full stencil footprint of one evaluation lies inside
/// the coarse buffer extents. Degenerate stride-zero axes read the base
/// cell only and are skipped. Debug builds only; release builds still
/// stop on a violation through checked slice indexing, just without the
/// per-axis diagnostic.
///
#[cfg(debug_assertions)]
fn check_footprint<const ORDER: usize>(
    s: (i64, i64, i64),
    parity: (usize, usize, usize),
    srcext: (usize, usize, usize))
{
    let axes = [
        (s.0, parity.0, srcext.0),
        (s.1, parity.1, srcext.1),
        (s.2, parity.2, srcext.2),
    ];
    for &(s, parity, ext) in axes.iter() {
        if ext > 1 {
            let support = coefficients::support(ORDER, parity);
            assert!(
                s + support.start >= 0 && s + support.end <= ext as i64,
                "stencil footprint {}..{} around coarse index {} escapes the buffer extent {}",
                s + support.start, s + support.end, s, ext);
        }
    }
}

#[cfg(not(debug_assertions))]
fn check_footprint<const ORDER: usize>(
    _s: (i64, i64, i64),
    _parity: (usize, usize, usize),
    _srcext: (usize, usize, usize))
{
}

// ============================================================================
#[cfg(test)]
mod test {

    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use crate::index_space::{range3d, IndexSpace};
    use super::{prolongate, prolongate_rf2};

    fn coarse_field<F: Fn(i64, i64, i64) -> f64>(space: &IndexSpace, f: F) -> Vec<f64> {
        space.iter().map(|(i, j, k)| f(i, j, k)).collect()
    }

    #[test]
    fn constant_fields_are_reproduced_at_every_order() {
        let fine = range3d(0..8, 0..8, 0..8);
        let coarse = fine.coarsen_by(2).extend_all(3);
        let src = vec![7.25; coarse.len()];

        for order in 0..=5 {
            let mut dst = vec![0.0; fine.len()];
            prolongate(order, &mut dst, &fine, &fine, &src, &coarse, 1, 0, 0);
            assert!(dst.iter().all(|&x| x == 7.25), "order {}", order);
        }
    }

    #[test]
    fn linear_interpolation_along_one_axis_matches_the_quarter_weights() {
        // Coarse values 0, 1, 2, 3 along i; fine cells aligned with coarse
        // cell n get 0.25 c[n-1] + 0.75 c[n], offset cells get
        // 0.75 c[n] + 0.25 c[n+1].
        let fine = range3d(2..6, 0..1, 0..1);
        let coarse = range3d(0..4, 0..1, 0..1);
        let src = vec![0.0, 1.0, 2.0, 3.0];
        let mut dst = vec![0.0; fine.len()];

        prolongate(1, &mut dst, &fine, &fine, &src, &coarse, 1, 0, 0);
        assert_eq!(dst, vec![0.75, 1.25, 1.75, 2.25]);
    }

    #[test]
    fn polynomial_fields_are_interpolated_exactly() {
        // Separable product of one-axis polynomials with degree <= 4; the
        // order-4 tensor-product stencil reproduces it exactly at the fine
        // cell centers. The target offsets are chosen so all starting
        // parities occur.
        let g = |x: f64| 1.0 + x + 0.1 * x.powi(3);
        let h = |y: f64| 2.0 - 0.5 * y + 0.25 * y.powi(2);
        let l = |z: f64| 0.5 + 0.2 * z + 0.01 * z.powi(4);

        let fine = range3d(1..9, 3..9, 2..8);
        let coarse = fine.coarsen_by(2).extend_all(3);
        let src = coarse_field(&coarse, |i, j, k| {
            g(i as f64 + 0.5) * h(j as f64 + 0.5) * l(k as f64 + 0.5)
        });
        let mut dst = vec![0.0; fine.len()];

        prolongate_rf2::<f64, 4>(&mut dst, &fine, &fine, &src, &coarse, 1, 0, 0);

        for ((i, j, k), value) in fine.iter().zip(&dst) {
            let x = (i as f64 + 0.5) / 2.0;
            let y = (j as f64 + 0.5) / 2.0;
            let z = (k as f64 + 0.5) / 2.0;
            assert_relative_eq!(*value, g(x) * h(y) * l(z), max_relative = 1e-12);
        }
    }

    #[test]
    fn partitioned_regions_give_identical_values() {
        // Interpolating a fine box in two disjoint halves along any axis
        // must emit exactly the values of the single full-box call.
        let mut rng = StdRng::seed_from_u64(12);
        let fine = range3d(0..8, 0..8, 0..8);
        let coarse = fine.coarsen_by(2).extend_all(3);
        let src: Vec<f64> = (0..coarse.len()).map(|_| rng.gen::<f64>()).collect();

        let mut whole = vec![0.0; fine.len()];
        prolongate_rf2::<f64, 4>(&mut whole, &fine, &fine, &src, &coarse, 1, 0, 0);

        for (lower, upper) in &[
            (range3d(0..3, 0..8, 0..8), range3d(3..8, 0..8, 0..8)),
            (range3d(0..8, 0..5, 0..8), range3d(0..8, 5..8, 0..8)),
            (range3d(0..8, 0..8, 0..1), range3d(0..8, 0..8, 1..8)),
        ] {
            let mut split = vec![0.0; fine.len()];
            prolongate_rf2::<f64, 4>(&mut split, &fine, lower, &src, &coarse, 1, 0, 0);
            prolongate_rf2::<f64, 4>(&mut split, &fine, upper, &src, &coarse, 1, 0, 0);
            assert_eq!(whole, split);
        }
    }

    #[test]
    fn interleaved_fields_are_prolongated_independently() {
        let fine = range3d(0..4, 0..4, 0..4);
        let coarse = fine.coarsen_by(2).extend_all(3);

        let mut src = vec![0.0; coarse.len() * 2];
        for (n, chunk) in src.chunks_exact_mut(2).enumerate() {
            chunk[0] = 1.5;
            chunk[1] = n as f64;
        }

        let mut dst = vec![0.0; fine.len() * 2];
        prolongate_rf2::<f64, 2>(&mut dst, &fine, &fine, &src, &coarse, 2, 0, 0);
        assert!(dst.chunks_exact(2).all(|c| c[0] == 1.5 && c[1] == 0.0));

        // Cross-field transfer: read field 1, write field 0.
        let src_constant = vec![3.0; coarse.len() * 2];
        prolongate_rf2::<f64, 2>(&mut dst, &fine, &fine, &src_constant, &coarse, 2, 1, 0);
        assert!(dst.chunks_exact(2).all(|c| c[0] == 3.0 && c[1] == 0.0));
    }

    #[test]
    #[should_panic]
    fn unsupported_orders_are_rejected() {
        let fine = range3d(0..2, 0..2, 0..2);
        let coarse = fine.coarsen_by(2).extend_all(4);
        let src = vec![0.0; coarse.len()];
        let mut dst = vec![0.0; fine.len()];
        prolongate(6, &mut dst, &fine, &fine, &src, &coarse, 1, 0, 0);
    }

    #[test]
    #[should_panic]
    fn uncovered_target_regions_are_rejected() {
        // The coarse box starts too high to cover the target region.
        let fine = range3d(0..4, 0..4, 0..4);
        let coarse = range3d(1..6, 0..6, 0..6);
        let src = vec![0.0; coarse.len()];
        let mut dst = vec![0.0; fine.len()];
        prolongate_rf2::<f64, 0>(&mut dst, &fine, &fine, &src, &coarse, 1, 0, 0);
    }
}
