use crate::isogloss::IsoglossScan;
use crate::observation::ObservationSettings;
use crate::Parameters;
use std::fmt;
use std::str::FromStr;

impl FromStr for IsoglossScan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(IsoglossScan::Open),
            "periodic" => Ok(IsoglossScan::Periodic),
            _ => Err(format!("Unknown isogloss scan {:?}, expected open or periodic", s)),
        }
    }
}

impl fmt::Display for IsoglossScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsoglossScan::Open => write!(f, "open"),
            IsoglossScan::Periodic => write!(f, "periodic"),
        }
    }
}

pub fn parse_args<'a>(
    p: &'a mut Parameters,
    o: &'a mut ObservationSettings,
) -> ::argparse::ArgumentParser<'a> {
    let mut parser = ::argparse::ArgumentParser::new();
    parser.set_description("Simulate the diffusion of a linguistic feature on a torus");
    parser.refer(&mut p.grid_size).add_option(
        &["--grid-size"],
        ::argparse::Store,
        "side length N of the grid of communities",
    );
    parser.refer(&mut p.trials).add_option(
        &["--trials"],
        ::argparse::Store,
        "number of micro-steps per realization, a multiple of N²",
    );
    parser.refer(&mut p.realizations).add_option(
        &["--realizations"],
        ::argparse::Store,
        "number of independent realizations to average",
    );
    parser.refer(&mut p.probability_vertical).add_option(
        &["--probability-vertical"],
        ::argparse::Store,
        "probability q that an event is vertical",
    );
    parser.refer(&mut p.probability_egress_vertical).add_option(
        &["--egress-vertical"],
        ::argparse::Store,
        "probability that a vertical event gives a community the feature",
    );
    parser.refer(&mut p.probability_ingress_vertical).add_option(
        &["--ingress-vertical"],
        ::argparse::Store,
        "probability that a vertical event takes the feature from a community",
    );
    parser.refer(&mut p.probability_egress_horizontal).add_option(
        &["--egress-horizontal"],
        ::argparse::Store,
        "probability that a horizontal event from a community without the feature gives it to the neighbor",
    );
    parser.refer(&mut p.probability_ingress_horizontal).add_option(
        &["--ingress-horizontal"],
        ::argparse::Store,
        "probability that a horizontal event from a community with the feature takes it from the neighbor",
    );
    parser.refer(&mut p.isogloss_scan).add_option(
        &["--isogloss-scan"],
        ::argparse::Store,
        "open (no wrap-around, the default) or periodic",
    );
    parser.refer(&mut o.log_every).add_option(
        &["--log-every"],
        ::argparse::Store,
        "period of logging observations at info level, in sweeps",
    );
    parser.refer(&mut o.frequency_file).add_option(
        &["--frequency-file"],
        ::argparse::Store,
        "File to write the averaged feature frequency to",
    );
    parser.refer(&mut o.isogloss_file).add_option(
        &["--isogloss-file"],
        ::argparse::Store,
        "File to write the averaged isogloss density to",
    );
    parser.refer(&mut o.summary_file).add_option(
        &["--summary-file"],
        ::argparse::Store,
        "File to write parameters, prediction and final values to, as JSON",
    );
    parser
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_fill_the_parameters() {
        let mut p = Parameters::default();
        let mut o = ObservationSettings::default();
        {
            let parser = parse_args(&mut p, &mut o);
            let args: Vec<String> = vec![
                "simulation",
                "--grid-size",
                "8",
                "--trials",
                "6400",
                "--ingress-horizontal",
                "0.25",
                "--isogloss-scan",
                "periodic",
                "--log-every",
                "10",
            ]
            .into_iter()
            .map(String::from)
            .collect();
            let mut stdout = std::io::sink();
            let mut stderr = std::io::sink();
            parser
                .parse(args, &mut stdout, &mut stderr)
                .expect("arguments parse");
        }
        assert_eq!(p.grid_size, 8);
        assert_eq!(p.trials, 6400);
        assert_eq!(p.probability_ingress_horizontal, 0.25);
        assert_eq!(p.isogloss_scan, IsoglossScan::Periodic);
        assert_eq!(p.realizations, 1);
        assert_eq!(o.log_every, 10);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn scan_names_round_trip() {
        for scan in [IsoglossScan::Open, IsoglossScan::Periodic].iter() {
            assert_eq!(scan.to_string().parse::<IsoglossScan>(), Ok(*scan));
        }
        assert!("torus".parse::<IsoglossScan>().is_err());
    }
}
