use core::fmt;
use std::sync::Once;




/**
 * Marker trait for the scalar types the interpolation kernels operate on.
 * The bounds pull in the floating point operations from `num_traits`
 * together with everything needed to share coefficient tables and their
 * self-test latches between threads.
 */
pub trait Real:
    num_traits::Float + fmt::Display + fmt::Debug + Send + Sync + 'static
{

    /// Name of the scalar type, quoted by coefficient self-test
    /// diagnostics.
    ///
    fn type_name() -> &'static str;

    /// One-shot latch guarding the coefficient self-test for one
    /// (order, parity) slot. Each scalar type owns its own latch array so
    /// the test runs at most once per process per distinct combination,
    /// even when first use happens on several threads at once.
    ///
    fn verify_latch(slot: usize) -> &'static Once;

    /// Lossless in practice: every coefficient is a dyadic rational that
    /// both supported types represent exactly.
    ///
    fn from_f64(x: f64) -> Self;
}




const NUM_LATCHES: usize = 12;
const VACANT: Once = Once::new();

static F32_LATCHES: [Once; NUM_LATCHES] = [VACANT; NUM_LATCHES];
static F64_LATCHES: [Once; NUM_LATCHES] = [VACANT; NUM_LATCHES];




// ============================================================================
impl Real for f32 {
    fn type_name() -> &'static str {
        "f32"
    }

    fn verify_latch(slot: usize) -> &'static Once {
        &F32_LATCHES[slot]
    }

    fn from_f64(x: f64) -> Self {
        x as f32
    }
}

impl Real for f64 {
    fn type_name() -> &'static str {
        "f64"
    }

    fn verify_latch(slot: usize) -> &'static Once {
        &F64_LATCHES[slot]
    }

    fn from_f64(x: f64) -> Self {
        x
    }
}
