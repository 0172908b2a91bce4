use model::calibration::CalibrationCurve;
use model::emergence::{estimate_temperature, hash_from_observation, Observation};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// WALS features 130A, 37A, 120A and 48A, as frequency and isogloss density.
const WALS_FEATURES: [(&str, f64, f64); 4] = [
    ("130A", 0.12142, 0.18876),
    ("37A", 0.60806, 0.36313),
    ("120A", 0.45337, 0.32420),
    ("48A", 0.83333, 0.20930),
];

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut calibration = "tau_hash.csv".to_string();
    let mut observations: Vec<Observation> = vec![];
    {
        let mut parser = argparse::ArgumentParser::new();
        parser.set_description(
            "Estimate the linguistic temperature of observed features from their frequency and isogloss density",
        );
        parser.refer(&mut calibration).add_option(
            &["--calibration"],
            argparse::Store,
            "CSV table of tau,H(tau) samples, with H strictly increasing",
        );
        parser.refer(&mut observations).add_option(
            &["--observation"],
            argparse::Collect,
            "FREQUENCY,ISOGLOSS_DENSITY of a feature (default: four WALS features)",
        );
        parser.parse_args_or_exit();
    }

    let labelled: Vec<(String, Observation)> = if observations.is_empty() {
        info!("No observations given, using WALS features");
        WALS_FEATURES
            .iter()
            .map(|(id, frequency, isogloss_density)| {
                (
                    id.to_string(),
                    Observation {
                        frequency: *frequency,
                        isogloss_density: *isogloss_density,
                    },
                )
            })
            .collect()
    } else {
        observations
            .into_iter()
            .enumerate()
            .map(|(i, o)| ((i + 1).to_string(), o))
            .collect()
    };

    let curve = CalibrationCurve::read(&calibration).map_err(|e| format!("{}: {}", calibration, e))?;

    println!("feature,frequency,isogloss_density,hash,tau");
    for (label, o) in labelled {
        let hash = hash_from_observation(o).map_err(|e| format!("{}: {}", label, e))?;
        let tau = estimate_temperature(&curve, o).map_err(|e| format!("{}: {}", label, e))?;
        println!(
            "{},{},{},{},{:.3}",
            label, o.frequency, o.isogloss_density, hash, tau
        );
    }
    Ok(())
}
