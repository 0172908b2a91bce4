use model::calibration::{CalibrationCurve, HashCurve};
use model::emergence::isogloss_density;
use model::util::linspace;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Tabulate the fitted calibration curve, or the theoretical relation between
/// feature frequency and isogloss density at one temperature.
fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut calibration = "tau_hash.csv".to_string();
    let mut points: usize = 1000;
    let mut from: Option<f64> = None;
    let mut to: Option<f64> = None;
    let mut isogloss_for_tau: Option<f64> = None;
    {
        let mut parser = argparse::ArgumentParser::new();
        parser.set_description("Tabulate the interpolated H(tau) curve");
        parser.refer(&mut calibration).add_option(
            &["--calibration"],
            argparse::Store,
            "CSV table of tau,H(tau) samples",
        );
        parser.refer(&mut points).add_option(
            &["--points"],
            argparse::Store,
            "number of evenly spaced points to tabulate",
        );
        parser.refer(&mut from).add_option(
            &["--from"],
            argparse::StoreOption,
            "smallest tau (default: first sample)",
        );
        parser.refer(&mut to).add_option(
            &["--to"],
            argparse::StoreOption,
            "largest tau (default: last sample)",
        );
        parser.refer(&mut isogloss_for_tau).add_option(
            &["--isogloss-for-tau"],
            argparse::StoreOption,
            "instead, tabulate 2 H(tau) f (1 - f) against the frequency f for this tau",
        );
        parser.parse_args_or_exit();
    }

    let curve = CalibrationCurve::read(&calibration).map_err(|e| format!("{}: {}", calibration, e))?;

    match isogloss_for_tau {
        Some(tau) => {
            let hash = curve.hash_of_tau(tau).map_err(|e| e.to_string())?;
            info!(tau, hash, "Isogloss density against frequency");
            println!("frequency,isogloss_density");
            for f in linspace(0., 1., points) {
                println!("{},{}", f, isogloss_density(hash, f));
            }
        }
        None => {
            let (low, high) = curve.tau_range();
            info!(low, high, "Interpolating H(tau)");
            println!("tau,hash");
            for tau in linspace(from.unwrap_or(low), to.unwrap_or(high), points) {
                let hash = curve.hash_of_tau(tau).map_err(|e| e.to_string())?;
                println!("{},{}", tau, hash);
            }
        }
    }
    Ok(())
}
