use super::{EquationOfState, Error, ValidRange};




/**
 * Polytropic (one-parameter, barotropic) equation of state,
 *
 *   P = rho_p (rho / rho_p)^Gamma,   Gamma = 1 + 1/n,
 *
 * specified through the polytropic density scale rho_p rather than the
 * usual constant K = rho_p^(-1/n), because the density scale has simpler
 * units. The thermodynamic state is parameterized internally by
 * g - 1 = h - 1, where h is the specific enthalpy; the inherent methods
 * below convert between g - 1 and the other state variables.
 */
#[derive(Clone, Debug)]
pub struct Polytropic {
    n: f64,
    rho_p: f64,
    np1: f64,
    gamma: f64,
    invn: f64,
    density: ValidRange,
}




// ============================================================================
impl Polytropic {


    /**
     * Create a polytropic EOS with the given polytropic index n, density
     * scale rho_p and maximum valid density.
     */
    pub fn new(n: f64, rho_p: f64, max_density: f64) -> Self {
        assert!(n > 0.0, "polytropic index must be positive, got {}", n);
        assert!(rho_p > 0.0, "polytropic density scale must be positive, got {}", rho_p);

        Self {
            n,
            rho_p,
            np1: n + 1.0,
            gamma: 1.0 + 1.0 / n,
            invn: 1.0 / n,
            density: ValidRange::new(0.0, max_density),
        }
    }


    pub fn gamma(&self) -> f64 {
        self.gamma
    }


    /**
     * g - 1 = (n + 1) (rho / rho_p)^(1/n)
     */
    pub fn gm1_from_density(&self, rho: f64) -> f64 {
        self.np1 * (rho / self.rho_p).powf(self.invn)
    }


    /**
     * g - 1 = (n + 1) (P / rho_p)^(1/(n+1))
     */
    pub fn gm1_from_pressure(&self, p: f64) -> f64 {
        self.np1 * (p / self.rho_p).powf(1.0 / self.np1)
    }


    /**
     * Pressure P = rho_p ((g - 1) / (n + 1))^(n+1)
     */
    pub fn pressure_from_gm1(&self, gm1: f64) -> f64 {
        self.rho_p * (gm1 / self.np1).powf(self.np1)
    }


    /**
     * Rest mass density rho = rho_p ((g - 1) / (n + 1))^n
     */
    pub fn density_from_gm1(&self, gm1: f64) -> f64 {
        self.rho_p * (gm1 / self.np1).powf(self.n)
    }


    /**
     * Specific internal energy eps = (g - 1) / Gamma
     */
    pub fn specific_energy_from_gm1(&self, gm1: f64) -> f64 {
        gm1 / self.gamma
    }


    /**
     * Internal energy density rho_I = n rho_p ((g - 1) / (n + 1))^(n+1)
     */
    pub fn internal_energy_density_from_gm1(&self, gm1: f64) -> f64 {
        self.n * self.rho_p * (gm1 / self.np1).powf(self.np1)
    }


    /**
     * Specific enthalpy h - 1 = g - 1
     */
    pub fn specific_enthalpy_from_gm1(&self, gm1: f64) -> f64 {
        gm1
    }


    /**
     * Squared sound speed c_s^2 = (g - 1) / (n g)
     */
    pub fn sound_speed_squared_from_gm1(&self, gm1: f64) -> f64 {
        gm1 / (self.n * (gm1 + 1.0))
    }

    fn checked_gm1(&self, rho: f64) -> Result<f64, Error> {
        if !self.density.contains(rho) {
            return Err(Error::DensityOutOfRange(rho));
        }
        Ok(self.gm1_from_density(rho))
    }
}




// ============================================================================
impl EquationOfState for Polytropic {

    fn pressure(&self, rho: f64, _eps: f64, _ye: f64) -> Result<f64, Error> {
        Ok(self.pressure_from_gm1(self.checked_gm1(rho)?))
    }

    fn sound_speed_squared(&self, rho: f64, _eps: f64, _ye: f64) -> Result<f64, Error> {
        Ok(self.sound_speed_squared_from_gm1(self.checked_gm1(rho)?))
    }

    fn specific_internal_energy(&self, rho: f64, _ye: f64) -> Result<f64, Error> {
        Ok(self.specific_energy_from_gm1(self.checked_gm1(rho)?))
    }

    fn valid_density(&self) -> ValidRange {
        self.density
    }
}
