use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use super::{EquationOfState, Error, ValidRange};




/**
 * One regularly spaced table axis.
 */
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct TableAxis {
    pub start: f64,
    pub step: f64,
    pub count: usize,
}

impl TableAxis {

    pub fn new(start: f64, step: f64, count: usize) -> Self {
        assert!(step > 0.0 && count >= 2, "degenerate table axis");
        Self { start, step, count }
    }

    pub fn coord(&self, n: usize) -> f64 {
        self.start + self.step * n as f64
    }

    pub fn max(&self) -> f64 {
        self.coord(self.count - 1)
    }

    /**
     * Return the cell index and fractional position of a coordinate, or
     * None if it lies outside the axis.
     */
    fn locate(&self, x: f64) -> Option<(usize, f64)> {
        if x < self.start || x > self.max() {
            return None;
        }
        let cell = (((x - self.start) / self.step) as usize).min(self.count - 2);
        Some((cell, (x - self.coord(cell)) / self.step))
    }
}




/**
 * The raw table record: regular axes in log10 rest mass density, log10
 * specific internal energy and (linear) electron fraction, and the values
 * of log10 pressure with the density index increasing fastest. The record
 * is stored on disk as CBOR; converting from the upstream table format is
 * a collaborator's concern.
 */
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct EosTable {
    pub log_density: TableAxis,
    pub log_energy: TableAxis,
    pub electron_fraction: TableAxis,
    pub log_pressure: Vec<f64>,
}




// ============================================================================
impl EosTable {


    /**
     * Read a table record from a CBOR file.
     */
    pub fn read(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::TableRead(e.to_string()))?;
        let table: Self = ciborium::de::from_reader(BufReader::new(file))
            .map_err(|e| Error::TableRead(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }


    /**
     * Write this table record to a CBOR file.
     */
    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path).map_err(|e| Error::TableRead(e.to_string()))?;
        ciborium::ser::into_writer(self, BufWriter::new(file))
            .map_err(|e| Error::TableRead(e.to_string()))
    }

    fn validate(&self) -> Result<(), Error> {
        let expected = self.log_density.count * self.log_energy.count * self.electron_fraction.count;
        if self.log_pressure.len() != expected {
            return Err(Error::TableRead(format!(
                "table has {} values, expected {}",
                self.log_pressure.len(),
                expected)));
        }
        Ok(())
    }

    fn value(&self, i: usize, j: usize, k: usize) -> f64 {
        self.log_pressure[i + self.log_density.count * (j + self.log_energy.count * k)]
    }

    /**
     * Trilinear interpolation of log10 pressure at a point inside the
     * table.
     */
    fn sample(&self, lr: f64, le: f64, ye: f64) -> Option<f64> {
        let (i, u) = self.log_density.locate(lr)?;
        let (j, v) = self.log_energy.locate(le)?;
        let (k, w) = self.electron_fraction.locate(ye)?;

        let lerp = |a: f64, b: f64, t: f64| a * (1.0 - t) + b * t;

        let c00 = lerp(self.value(i, j, k), self.value(i + 1, j, k), u);
        let c10 = lerp(self.value(i, j + 1, k), self.value(i + 1, j + 1, k), u);
        let c01 = lerp(self.value(i, j, k + 1), self.value(i + 1, j, k + 1), u);
        let c11 = lerp(self.value(i, j + 1, k + 1), self.value(i + 1, j + 1, k + 1), u);

        Some(lerp(lerp(c00, c10, v), lerp(c01, c11, v), w))
    }
}




/**
 * Tabulated equation of state: thin lookup wrapper over an EosTable. The
 * validity ranges are the table extents.
 */
#[derive(Clone, Debug)]
pub struct Tabulated {
    table: EosTable,
    density: ValidRange,
    energy: ValidRange,
    electron_fraction: ValidRange,
}




// ============================================================================
impl Tabulated {


    pub fn new(table: EosTable) -> Result<Self, Error> {
        table.validate()?;

        let density = ValidRange::new(
            10f64.powf(table.log_density.start),
            10f64.powf(table.log_density.max()));
        let energy = ValidRange::new(
            10f64.powf(table.log_energy.start),
            10f64.powf(table.log_energy.max()));
        let electron_fraction = ValidRange::new(
            table.electron_fraction.start,
            table.electron_fraction.max());

        Ok(Self { table, density, energy, electron_fraction })
    }


    pub fn from_file(path: &Path) -> Result<Self, Error> {
        Self::new(EosTable::read(path)?)
    }

    fn checked_sample(&self, rho: f64, eps: f64, ye: f64) -> Result<f64, Error> {
        if !self.density.contains(rho) {
            return Err(Error::DensityOutOfRange(rho));
        }
        if !self.energy.contains(eps) {
            return Err(Error::EnergyOutOfRange(eps));
        }
        if !self.electron_fraction.contains(ye) {
            return Err(Error::ElectronFractionOutOfRange(ye));
        }
        self.table
            .sample(rho.log10(), eps.log10(), ye)
            .ok_or(Error::DensityOutOfRange(rho))
    }

    /**
     * First adiabatic-like exponent d log P / d log rho at constant energy
     * and electron fraction, by a centered difference of table samples
     * (one-sided at the table edges).
     */
    fn gamma1(&self, lr: f64, le: f64, ye: f64) -> Option<f64> {
        let d = 0.5 * self.table.log_density.step;
        let lo = (lr - d).max(self.table.log_density.start);
        let hi = (lr + d).min(self.table.log_density.max());

        let p_lo = self.table.sample(lo, le, ye)?;
        let p_hi = self.table.sample(hi, le, ye)?;
        Some((p_hi - p_lo) / (hi - lo))
    }
}




// ============================================================================
impl EquationOfState for Tabulated {

    fn pressure(&self, rho: f64, eps: f64, ye: f64) -> Result<f64, Error> {
        Ok(10f64.powf(self.checked_sample(rho, eps, ye)?))
    }

    fn sound_speed_squared(&self, rho: f64, eps: f64, ye: f64) -> Result<f64, Error> {
        let p = 10f64.powf(self.checked_sample(rho, eps, ye)?);
        let gamma1 = self
            .gamma1(rho.log10(), eps.log10(), ye)
            .ok_or(Error::DensityOutOfRange(rho))?;
        let enthalpy = 1.0 + eps + p / rho;
        Ok(gamma1 * p / (rho * enthalpy))
    }

    fn specific_internal_energy(&self, rho: f64, ye: f64) -> Result<f64, Error> {
        if !self.density.contains(rho) {
            return Err(Error::DensityOutOfRange(rho));
        }
        if !self.electron_fraction.contains(ye) {
            return Err(Error::ElectronFractionOutOfRange(ye));
        }

        // The cold reference state sits at the lower edge of the tabulated
        // energy interval.
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
    use super::super::{EquationOfState, Error};
    use super::{EosTable, TableAxis, Tabulated};

    // A synthetic gamma-law table: log P = log(Gamma - 1) + log rho +
    // log eps, exactly linear in both log axes, so trilinear sampling is
    // exact everywhere inside the table.
    fn gamma_law_table(gamma: f64) -> EosTable {
        let log_density = TableAxis::new(-8.0, 0.5, 21);
        let log_energy = TableAxis::new(-4.0, 0.25, 25);
        let electron_fraction = TableAxis::new(0.0, 0.1, 6);

        let mut log_pressure = Vec::new();
        for _ in 0..electron_fraction.count {
            for j in 0..log_energy.count {
                for i in 0..log_density.count {
                    log_pressure.push((gamma - 1.0).log10() + log_density.coord(i) + log_energy.coord(j));
                }
            }
        }
        EosTable { log_density, log_energy, electron_fraction, log_pressure }
    }

    #[test]
    fn sampling_between_nodes_matches_the_generating_law() {
        let gamma = 1.8;
        let eos = Tabulated::new(gamma_law_table(gamma)).unwrap();
        let (rho, eps, ye) = (3.7e-3, 0.021, 0.37);
        assert_relative_eq!(
            eos.pressure(rho, eps, ye).unwrap(),
            (gamma - 1.0) * rho * eps,
            max_relative = 1e-10);
    }

    #[test]
    fn sound_speed_uses_the_tabulated_stiffness() {
        // The synthetic table has d log P / d log rho = 1 everywhere.
        let gamma = 1.8;
        let eos = Tabulated::new(gamma_law_table(gamma)).unwrap();
        let (rho, eps, ye) = (1e-2, 0.1, 0.25);
        let p = eos.pressure(rho, eps, ye).unwrap();
        let enthalpy = 1.0 + eps + p / rho;
        assert_relative_eq!(
            eos.sound_speed_squared(rho, eps, ye).unwrap(),
            p / (rho * enthalpy),
            max_relative = 1e-8);
    }

    #[test]
    fn states_outside_the_table_are_errors() {
        let eos = Tabulated::new(gamma_law_table(1.8)).unwrap();
        assert!(matches!(eos.pressure(1e3, 0.1, 0.2), Err(Error::DensityOutOfRange(_))));
        assert!(matches!(eos.pressure(1e-2, 1e3, 0.2), Err(Error::EnergyOutOfRange(_))));
        assert!(matches!(eos.pressure(1e-2, 0.1, 0.9), Err(Error::ElectronFractionOutOfRange(_))));
    }

    #[test]
    fn malformed_tables_are_rejected() {
        let mut table = gamma_law_table(1.8);
        table.log_pressure.pop();
        assert!(matches!(Tabulated::new(table), Err(Error::TableRead(_))));
    }

    #[test]
    fn table_files_round_trip_through_cbor() {
        let table = gamma_law_table(1.4);
        let path = std::env::temp_dir().join("regrid_eos_table_test.cbor");

        table.write(&path).unwrap();
        let eos = Tabulated::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_relative_eq!(
            eos.pressure(1e-4, 0.5, 0.3).unwrap(),
            0.4 * 1e-4 * 0.5,
            max_relative = 1e-10);
    }
}
