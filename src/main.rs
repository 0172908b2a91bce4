use model::argparse::parse_args;
use model::calibration::{CalibrationCurve, HashCurve};
use model::observation::{self, ObservationSettings, Summary};
use model::{run_realizations, Parameters};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut p = Parameters::default();
    let mut o = ObservationSettings::default();
    let mut seed: Option<u64> = None;
    let mut calibration: Option<String> = None;

    {
        let mut parser = parse_args(&mut p, &mut o);
        parser.refer(&mut seed).add_option(
            &["--seed"],
            argparse::StoreOption,
            "seed for the random number generator (default: drawn at random)",
        );
        parser.refer(&mut calibration).add_option(
            &["--calibration"],
            argparse::StoreOption,
            "CSV table of tau,H(tau) samples for the theoretical isogloss density",
        );
        parser.parse_args_or_exit();
    }
    p.validate().map_err(|e| e.to_string())?;

    let curve = match calibration {
        None => {
            warn!("No calibration table given, the theoretical isogloss density is skipped");
            None
        }
        Some(path) => Some(CalibrationCurve::read(&path).map_err(|e| format!("{}: {}", path, e))?),
    };

    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "Starting…");
    info!("{:?}", p);
    let mut rng = StdRng::seed_from_u64(seed);

    let result = run_realizations(
        &p,
        curve.as_ref().map(|c| c as &dyn HashCurve),
        &o,
        &mut rng,
    )
    .map_err(|e| e.to_string())?;

    let final_frequency = result.series.frequency.last().copied();
    let final_isogloss_density = result.series.isogloss_density.last().copied();
    info!(
        frequency = ?final_frequency,
        theoretical_frequency = result.prediction.stationary_frequency,
        temperature = result.prediction.temperature,
        "Frequency of the feature"
    );
    info!(
        isogloss_density = ?final_isogloss_density,
        theoretical_isogloss_density = ?result.prediction.isogloss_density,
        "Isogloss density"
    );

    observation::store_series(&result.series.frequency, &o.frequency_file)
        .map_err(|e| e.to_string())?;
    observation::store_series(&result.series.isogloss_density, &o.isogloss_file)
        .map_err(|e| e.to_string())?;
    observation::store_summary(
        &Summary {
            parameters: &p,
            seed,
            prediction: &result.prediction,
            sweeps: &result.series.sweeps,
            final_frequency,
            final_isogloss_density,
        },
        &o.summary_file,
    )
    .map_err(|e| e.to_string())?;
    info!("Ended");
    Ok(())
}
