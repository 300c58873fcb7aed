//! 1D interpolation coefficients for conservative cell-centered
//! prolongation with a 2:1 refinement ratio.
//!
//! One axis of coarse cells and their two fine children each:
//!
//! ```text
//! coarse  |    0    |    1    |    2    |    3    |
//! fine    | 0  | 1  | 2  | 3  | 4  | 5  | 6  | 7  |
//! parity    0    1    0    1    0    1    0    1
//! ```
//!
//! A fine cell either sits on the lower half of its coarse parent (offset
//! parity 0, interpolation target 1/4 past the parent's lower edge in
//! coarse units) or on the upper half (parity 1, target 3/4). Only the
//! parity-0 weights are stored; the parity-1 stencil is the left-right
//! reflection of the parity-0 stencil, so lookups for parity 1 mirror the
//! tap index. Weights are derived from polynomial-exactness conditions and
//! are dyadic rationals, exactly representable in both supported scalar
//! types.

use core::ops::Range;
use crate::num::Real;

/// Largest supported interpolation order.
pub const MAX_ORDER: usize = 5;

const COEFFS_0: [f64; 1] = [1.0];

const COEFFS_1: [f64; 2] = [1.0 / 4.0, 3.0 / 4.0];

const COEFFS_2: [f64; 3] = [5.0 / 32.0, 30.0 / 32.0, -3.0 / 32.0];

const COEFFS_3: [f64; 4] = [-5.0 / 128.0, 35.0 / 128.0, 105.0 / 128.0, -7.0 / 128.0];

const COEFFS_4: [f64; 5] = [
    -45.0 / 2048.0,
    420.0 / 2048.0,
    1890.0 / 2048.0,
    -252.0 / 2048.0,
    35.0 / 2048.0,
];

const COEFFS_5: [f64; 6] = [
    63.0 / 8192.0,
    -495.0 / 8192.0,
    2310.0 / 8192.0,
    6930.0 / 8192.0,
    -693.0 / 8192.0,
    77.0 / 8192.0,
];

fn table(order: usize) -> &'static [f64] {
    match order {
        0 => &COEFFS_0,
        1 => &COEFFS_1,
        2 => &COEFFS_2,
        3 => &COEFFS_3,
        4 => &COEFFS_4,
        5 => &COEFFS_5,
        _ => panic!("unsupported interpolation order {}", order),
    }
}

/// Return the range of tap indexes for the stencil of the given order and
/// offset parity. The taps are coarse-cell offsets relative to the fine
/// cell's reference coarse cell; odd orders shift their support by the
/// parity.
///
pub fn support(order: usize, parity: usize) -> Range<i64> {
    debug_assert!(order <= MAX_ORDER);
    debug_assert!(parity == 0 || parity == 1);

    let ncoeffs = (order + 1) as i64;
    let imin = -(ncoeffs / 2) + if order % 2 != 0 { parity as i64 } else { 0 };
    imin .. imin + ncoeffs
}

/// Return the weight for tap `i` of the stencil with the given order and
/// offset parity. Parity 1 looks up the mirrored tap of the stored
/// parity-0 half-stencil.
///
#[inline]
pub fn get<T: Real>(order: usize, parity: usize, i: i64) -> T {
    let support = support(order, parity);
    debug_assert!(
        support.contains(&i),
        "tap {} outside stencil support {}..{} (order {}, parity {})",
        i, support.start, support.end, order, parity);

    let j = if parity == 0 {
        i - support.start
    } else {
        order as i64 - (i - support.start)
    };
    T::from_f64(table(order)[j as usize])
}

/// Check that the stencils of the given order reproduce exact values of
/// polynomials up to the design degree at the interpolation target, for
/// both offset parities. The check runs at most once per process per
/// (scalar type, order, parity) combination and is a deployment sanity
/// guard, not a per-call error path: any mismatch is logged and then
/// fatal.
///
pub fn verify<T: Real>(order: usize) {
    verify_parity::<T>(order, 0);
    verify_parity::<T>(order, 1);
}

/// Eagerly run the coefficient self-test for every supported order, e.g.
/// during a startup phase instead of on first interpolation.
///
pub fn verify_all<T: Real>() {
    for order in 0..=MAX_ORDER {
        verify::<T>(order);
    }
}

fn verify_parity<T: Real>(order: usize, parity: usize) {
    T::verify_latch(order * 2 + parity).call_once(|| {
        let support = support(order, parity);
        let mut error = false;

        for degree in 0..=order {
            let mut computed = T::zero();
            for i in support.clone() {
                let x = T::from_f64(i as f64 + 0.5);
                computed = computed + get::<T>(order, parity, i) * x.powi(degree as i32);
            }
            let x0 = T::from_f64(0.25 + 0.5 * parity as f64);
            let expected = x0.powi(degree as i32);

            // Allow losing 3 digits
            let eps = T::from_f64(1.0e3) * T::epsilon();

            if !((computed - expected).abs() < eps) {
                log::error!(
                    "interpolation coefficient self-test failed: type={} order={} parity={} degree={} expected={} computed={}",
                    T::type_name(), order, parity, degree, expected, computed);
                error = true;
            }
        }
        if error {
            panic!(
                "invalid interpolation coefficients for order {} parity {}; aborting",
                order, parity);
        }
    })
}
