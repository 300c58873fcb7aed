use clap::Parser;
use regrid::eos::{self, EosConfig, EquationOfState, ValidRange};
use regrid::index_space::range3d;
use regrid::meshing;
use regrid::patch::Patch;




#[derive(Parser)]
struct Opts {
    /// Number of fine cells per axis
    #[clap(short = 'n', long, default_value = "32")]
    num_cells: i64,

    /// Interpolation order (even, up to 4)
    #[clap(short = 'o', long, default_value = "4")]
    order: usize,

    /// Output filename for the prolongated state
    #[clap(long, default_value = "state.cbor")]
    outfile: String,
}




#[derive(serde::Serialize)]


/**
 * The prolongated solution state
 */
struct State {
    order: usize,
    fine: Patch,
}




/**
 * A smooth two-field profile standing in for primitive data handed over by
 * the coarse level: mass density and specific internal energy as functions
 * of position on the unit cube.
 */
fn profile(x: f64, y: f64, z: f64) -> [f64; 2] {
    use std::f64::consts::PI;
    let rho = 1.0 + 0.5 * (PI * x).sin() * (PI * y).cos();
    let eps = 0.1 + 0.05 * (PI * z).sin().powi(2);
    [rho, eps]
}




// ============================================================================
fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let opts = Opts::parse();
    let n = opts.num_cells;
    let dx = 1.0 / n as f64;

    let fine_space = range3d(0..n, 0..n, 0..n);
    let coarse_space = meshing::required_coarse_space(&fine_space, opts.order);

    // Fine cell f has center ((f + 0.5) / 2) * 2 dx on the unit cube;
    // coarse cells are twice as large.
    let coarse = Patch::from_slice_function(1, 2, coarse_space, |(i, j, k), s| {
        let x = (i as f64 + 0.5) * 2.0 * dx;
        let y = (j as f64 + 0.5) * 2.0 * dx;
        let z = (k as f64 + 0.5) * 2.0 * dx;
        s.copy_from_slice(&profile(x, y, z))
    });

    log::info!(
        "prolongating {} coarse cells onto {} fine cells at order {}",
        coarse.index_space().len(),
        fine_space.len(),
        opts.order);

    let fine = meshing::prolongate_patch(opts.order, &coarse, &fine_space);

    let mut max_error: f64 = 0.0;
    for (i, j, k) in fine_space.iter() {
        let x = (i as f64 + 0.5) * dx;
        let y = (j as f64 + 0.5) * dx;
        let z = (k as f64 + 0.5) * dx;
        let exact = profile(x, y, z);
        let cell = fine.get_slice((i, j, k));
        for (value, exact) in cell.iter().zip(&exact) {
            max_error = max_error.max((value - exact).abs());
        }
    }
    log::info!("max interpolation error against the profile: {:.3e}", max_error);

    // The fine level's fluid update would consume the prolongated state
    // through an EOS owned by the driver; report the sound speed at the
    // domain center as a sanity check.
    let eos = eos::create(&EosConfig::IdealGas {
        gamma: 5.0 / 3.0,
        density: ValidRange::new(1e-12, 1e3),
        energy: ValidRange::new(0.0, 10.0),
        electron_fraction: ValidRange::new(0.0, 0.6),
    })
    .unwrap();

    let center = fine.get_slice((n / 2, n / 2, n / 2));
    match eos.sound_speed_squared(center[0], center[1], 0.1) {
        Ok(cs2) => log::info!("sound speed at the domain center: {:.6}", cs2.sqrt()),
        Err(e) => log::error!("EOS rejected the central state: {}", e),
    }

    let state = State { order: opts.order, fine };
    let file = std::fs::File::create(&opts.outfile).unwrap();
    let mut buffer = std::io::BufWriter::new(file);
    ciborium::ser::into_writer(&state, &mut buffer).unwrap();
    log::info!("wrote {}", opts.outfile);
}
