use crate::error::ModelError;
use crate::isogloss::IsoglossScan;
use serde_derive::{Deserialize, Serialize};

/**
The fixed parameters of one experiment. Nothing in here changes while the
experiment runs; every component gets a reference to the same record.

The four conditional probabilities follow the naming of the model:
*egress* is the chance that a community without the feature picks it up,
*ingress* the chance that a community with the feature loses it.
 */
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Parameters {
    /// Side length N of the square grid of communities.
    pub grid_size: usize,
    /// Number of micro-steps in one realization. Must be a multiple of N².
    pub trials: u64,
    /// Number of independent realizations to average over.
    pub realizations: usize,
    /// q, the chance that an event is vertical. Horizontal events happen
    /// with 1 − q.
    pub probability_vertical: f64,
    pub probability_egress_vertical: f64,
    pub probability_ingress_vertical: f64,
    pub probability_egress_horizontal: f64,
    pub probability_ingress_horizontal: f64,
    /// Which neighbor pairs count as potential isoglosses.
    pub isogloss_scan: IsoglossScan,
}

impl Default for Parameters {
    fn default() -> Parameters {
        Parameters {
            grid_size: 4,
            trials: 16,
            realizations: 1,
            probability_vertical: 0.5,
            // Getting the feature out of nowhere always succeeds, nothing
            // else ever does.
            probability_egress_vertical: 1.0,
            probability_ingress_vertical: 0.0,
            probability_egress_horizontal: 0.0,
            probability_ingress_horizontal: 0.0,
            isogloss_scan: IsoglossScan::Open,
        }
    }
}

impl Parameters {
    /// p, the total rate of unfaithful vertical transmission.
    pub fn vertical_rate(&self) -> f64 {
        self.probability_egress_vertical + self.probability_ingress_vertical
    }

    /// p′, the total rate of unfaithful horizontal transmission.
    pub fn horizontal_rate(&self) -> f64 {
        self.probability_egress_horizontal + self.probability_ingress_horizontal
    }

    pub fn probability_horizontal(&self) -> f64 {
        1. - self.probability_vertical
    }

    /// The number of micro-steps in one Monte Carlo sweep, N².
    pub fn sweep_length(&self) -> u64 {
        (self.grid_size * self.grid_size) as u64
    }

    /// The number of sampling points in one realization.
    pub fn sweeps(&self) -> u64 {
        self.trials / self.sweep_length()
    }

    /**
    Check every precondition of a run. This is called before any random
    number is drawn, so a bad configuration never produces partial output.

    ```rust
    let mut p = model::Parameters::default();
    assert!(p.validate().is_ok());
    p.trials = 17;
    assert!(p.validate().is_err());
    ```
     */
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [
            ("probability_vertical", self.probability_vertical),
            ("probability_egress_vertical", self.probability_egress_vertical),
            ("probability_ingress_vertical", self.probability_ingress_vertical),
            (
                "probability_egress_horizontal",
                self.probability_egress_horizontal,
            ),
            (
                "probability_ingress_horizontal",
                self.probability_ingress_horizontal,
            ),
        ] {
            // NaN fails this check as well.
            if !(0.0..=1.0).contains(&value) {
                return Err(ModelError::InvalidProbability { name, value });
            }
        }
        if self.grid_size == 0 {
            return Err(ModelError::InvalidGridSize);
        }
        if self.trials == 0 {
            return Err(ModelError::InvalidTrials);
        }
        if self.realizations == 0 {
            return Err(ModelError::InvalidRealizations);
        }
        if self.trials % self.sweep_length() != 0 {
            return Err(ModelError::TrialsNotWholeSweeps {
                trials: self.trials,
                sweep: self.sweep_length(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let p = Parameters::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.sweeps(), 1);
        assert_eq!(p.vertical_rate(), 1.0);
        assert_eq!(p.horizontal_rate(), 0.0);
    }

    #[test]
    fn probabilities_outside_unit_interval_are_rejected() {
        let mut p = Parameters::default();
        p.probability_ingress_horizontal = 1.5;
        match p.validate() {
            Err(ModelError::InvalidProbability { name, value }) => {
                assert_eq!(name, "probability_ingress_horizontal");
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut p = Parameters::default();
        p.probability_vertical = f64::NAN;
        assert!(matches!(
            p.validate(),
            Err(ModelError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn sizes_must_be_positive() {
        let mut p = Parameters::default();
        p.grid_size = 0;
        assert!(matches!(p.validate(), Err(ModelError::InvalidGridSize)));

        let mut p = Parameters::default();
        p.trials = 0;
        assert!(matches!(p.validate(), Err(ModelError::InvalidTrials)));

        let mut p = Parameters::default();
        p.realizations = 0;
        assert!(matches!(p.validate(), Err(ModelError::InvalidRealizations)));
    }

    #[test]
    fn trials_must_fill_whole_sweeps() {
        let mut p = Parameters::default();
        p.grid_size = 3;
        p.trials = 10;
        assert!(matches!(
            p.validate(),
            Err(ModelError::TrialsNotWholeSweeps {
                trials: 10,
                sweep: 9
            })
        ));
        p.trials = 27;
        assert!(p.validate().is_ok());
        assert_eq!(p.sweeps(), 3);
    }
}
