use super::{EquationOfState, Error, ValidRange};




/**
 * Gamma-law (ideal gas) equation of state, P = (Gamma - 1) rho eps, with
 * validity ranges on density, specific internal energy and electron
 * fraction. The sound speed uses the relativistic enthalpy
 * h = 1 + eps + P / rho, so c_s^2 = Gamma P / (rho h) stays below one.
 */
#[derive(Clone, Debug)]
pub struct IdealGas {
    gamma: f64,
    gm1: f64,
    density: ValidRange,
    energy: ValidRange,
    electron_fraction: ValidRange,
}




// ============================================================================
impl IdealGas {


    pub fn new(gamma: f64, density: ValidRange, energy: ValidRange, electron_fraction: ValidRange) -> Self {
        assert!(gamma > 1.0, "adiabatic index must exceed one, got {}", gamma);

        Self {
            gamma,
            gm1: gamma - 1.0,
            density,
            energy,
            electron_fraction,
        }
    }


    pub fn gamma(&self) -> f64 {
        self.gamma
    }


    pub fn valid_energy(&self) -> ValidRange {
        self.energy
    }

    fn check(&self, rho: f64, eps: f64, ye: f64) -> Result<(), Error> {
        if !self.density.contains(rho) {
            Err(Error::DensityOutOfRange(rho))
        } else if !self.energy.contains(eps) {
            Err(Error::EnergyOutOfRange(eps))
        } else if !self.electron_fraction.contains(ye) {
            Err(Error::ElectronFractionOutOfRange(ye))
        } else {
            Ok(())
        }
    }
}




// ============================================================================
impl EquationOfState for IdealGas {

    fn pressure(&self, rho: f64, eps: f64, ye: f64) -> Result<f64, Error> {
        self.check(rho, eps, ye)?;
        Ok(self.gm1 * rho * eps)
    }

    fn sound_speed_squared(&self, rho: f64, eps: f64, ye: f64) -> Result<f64, Error> {
        self.check(rho, eps, ye)?;
        let p = self.gm1 * rho * eps;
        let enthalpy = 1.0 + eps + p / rho;
        Ok(self.gamma * p / (rho * enthalpy))
    }

    fn specific_internal_energy(&self, rho: f64, ye: f64) -> Result<f64, Error> {
        if !self.density.contains(rho) {
            return Err(Error::DensityOutOfRange(rho));
        }
        if !self.electron_fraction.contains(ye) {
            return Err(Error::ElectronFractionOutOfRange(ye));
        }

        // The gamma-law gas has no cold pressure support; the reference
        // state sits at the lower edge of the valid energy interval.
        Ok(self.energy.min)
    }

    fn valid_density(&self) -> ValidRange {
        self.density
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use approx::assert_relative_eq;
    use super::super::{EquationOfState, Error, ValidRange};
    use super::IdealGas;

    fn gas() -> IdealGas {
        IdealGas::new(
            5.0 / 3.0,
            ValidRange::new(1e-12, 1e3),
            ValidRange::new(0.0, 100.0),
            ValidRange::new(0.0, 0.6))
    }

    #[test]
    fn pressure_follows_the_gamma_law() {
        let eos = gas();
        assert_relative_eq!(eos.pressure(1.5, 0.9, 0.1).unwrap(), (2.0 / 3.0) * 1.5 * 0.9, max_relative = 1e-14);
    }

    #[test]
    fn sound_speed_is_subluminal_and_consistent() {
        let eos = gas();
        let (rho, eps) = (2.0, 3.0);
        let p = eos.pressure(rho, eps, 0.2).unwrap();
        let cs2 = eos.sound_speed_squared(rho, eps, 0.2).unwrap();
        assert!(cs2 > 0.0 && cs2 < 1.0);
        assert_relative_eq!(cs2, eos.gamma() * p / (rho * (1.0 + eps + p / rho)), max_relative = 1e-14);
    }

    #[test]
    fn each_state_variable_is_range_checked() {
        let eos = gas();
        assert!(matches!(eos.pressure(1e9, 1.0, 0.1), Err(Error::DensityOutOfRange(_))));
        assert!(matches!(eos.pressure(1.0, -1.0, 0.1), Err(Error::EnergyOutOfRange(_))));
        assert!(matches!(eos.pressure(1.0, 1.0, 0.9), Err(Error::ElectronFractionOutOfRange(_))));
    }
}
