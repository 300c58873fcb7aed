pub mod polytropic;
pub mod ideal_gas;
pub mod tabulated;

use std::error;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use polytropic::Polytropic;
pub use ideal_gas::IdealGas;
pub use tabulated::{EosTable, TableAxis, Tabulated};




/**
 * Error to represent invalid thermodynamic state input or a failed
 * equation-of-state setup.
 */
#[derive(Debug)]
pub enum Error {
    UnknownEos(String),
    DensityOutOfRange(f64),
    EnergyOutOfRange(f64),
    ElectronFractionOutOfRange(f64),
    TableRead(String),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            UnknownEos(name) => writeln!(fmt, "unknown equation of state: {}", name),
            DensityOutOfRange(rho) => writeln!(fmt, "mass density out of range: {}", rho),
            EnergyOutOfRange(eps) => writeln!(fmt, "specific internal energy out of range: {}", eps),
            ElectronFractionOutOfRange(ye) => writeln!(fmt, "electron fraction out of range: {}", ye),
            TableRead(message) => writeln!(fmt, "failed to read EOS table: {}", message),
        }
    }
}

impl error::Error for Error {}




/**
 * Closed interval of validity for one thermodynamic variable.
 */
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidRange {
    pub min: f64,
    pub max: f64,
}

impl ValidRange {

    pub fn new(min: f64, max: f64) -> Self {
        assert!(min <= max, "invalid range: {} > {}", min, max);
        Self { min, max }
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}




/**
 * Defines the properties of an equation of state for the fluid solver. The
 * state is keyed on rest mass density, specific internal energy and
 * electron fraction; one-parameter (barotropic) implementations ignore the
 * latter two. Implementations are plain value objects owned by the calling
 * context and shared by reference, never process-global singletons.
 */
pub trait EquationOfState: Send + Sync {

    /// Gas pressure at the given state.
    ///
    fn pressure(&self, rho: f64, eps: f64, ye: f64) -> Result<f64, Error>;

    /// Squared sound speed at the given state, in units of the squared
    /// speed of light.
    ///
    fn sound_speed_squared(&self, rho: f64, eps: f64, ye: f64) -> Result<f64, Error>;

    /// Specific internal energy of the cold (reference) state at the given
    /// density.
    ///
    fn specific_internal_energy(&self, rho: f64, ye: f64) -> Result<f64, Error>;

    /// The density interval on which this equation of state is valid.
    ///
    fn valid_density(&self) -> ValidRange;
}




/**
 * Which equation of state family to construct. Selection names follow the
 * parameter-file vocabulary of the solver; families that are recognized
 * but not implemented are reported as unknown.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EosKind {
    Polytropic,
    IdealGas,
    Tabulated,
}

impl FromStr for EosKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "Polytropic" => Ok(Self::Polytropic),
            "IdealGas" => Ok(Self::IdealGas),
            "Tabulated3d" => Ok(Self::Tabulated),
            _ => Err(Error::UnknownEos(name.to_string())),
        }
    }
}




/**
 * Parameters for constructing an equation of state.
 */
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum EosConfig {
    Polytropic {
        index: f64,
        density_scale: f64,
        max_density: f64,
    },
    IdealGas {
        gamma: f64,
        density: ValidRange,
        energy: ValidRange,
        electron_fraction: ValidRange,
    },
    Tabulated {
        table_path: PathBuf,
    },
}




/**
 * Construct the equation of state described by the given configuration.
 * The result is an owned value for the calling context to keep.
 */
pub fn create(config: &EosConfig) -> Result<Box<dyn EquationOfState>, Error> {
    match config {
        EosConfig::Polytropic { index, density_scale, max_density } => {
            Ok(Box::new(Polytropic::new(*index, *density_scale, *max_density)))
        }
        EosConfig::IdealGas { gamma, density, energy, electron_fraction } => {
            Ok(Box::new(IdealGas::new(*gamma, *density, *energy, *electron_fraction)))
        }
        EosConfig::Tabulated { table_path } => {
            Ok(Box::new(Tabulated::from_file(table_path)?))
        }
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{create, EosConfig, EosKind, EquationOfState, Error, ValidRange};

    #[test]
    fn selection_names_are_recognized() {
        assert_eq!("Polytropic".parse::<EosKind>().unwrap(), EosKind::Polytropic);
        assert_eq!("IdealGas".parse::<EosKind>().unwrap(), EosKind::IdealGas);
        assert_eq!("Tabulated3d".parse::<EosKind>().unwrap(), EosKind::Tabulated);
    }

    #[test]
    fn unimplemented_families_are_reported_as_unknown() {
        for name in &["PWPolytropic", "Hybrid", "nonsense"] {
            match name.parse::<EosKind>() {
                Err(Error::UnknownEos(reported)) => assert_eq!(&reported, name),
                other => panic!("expected UnknownEos, got {:?}", other),
            }
        }
    }

    #[test]
    fn configs_build_owned_equations_of_state() {
        let config = EosConfig::IdealGas {
            gamma: 5.0 / 3.0,
            density: ValidRange::new(1e-12, 1e3),
            energy: ValidRange::new(0.0, 10.0),
            electron_fraction: ValidRange::new(0.0, 0.6),
        };
        let eos = create(&config).unwrap();
        assert!(eos.pressure(1.0, 1.5, 0.1).is_ok());
    }
}
