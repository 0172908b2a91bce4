/*!
Errors of the model.

Every failure is a configuration or data problem, so there is nothing to
retry: the caller reports the error and ends the run.
*/

/// Everything that can go wrong before, during, or after a run.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A transition probability is not in [0, 1].
    #[error("probability {name} must lie in [0, 1], found {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("grid size must be positive")]
    InvalidGridSize,

    #[error("number of trials must be positive")]
    InvalidTrials,

    #[error("number of realizations must be positive")]
    InvalidRealizations,

    /// Sampling happens on sweep boundaries, so the trials must fill whole sweeps.
    #[error("{trials} trials do not fill whole Monte Carlo sweeps of {sweep} micro-steps")]
    TrialsNotWholeSweeps { trials: u64, sweep: u64 },

    /// q·p + (1−q)·p′ vanishes.
    #[error("undefined stationary distribution for these parameters")]
    UndefinedStationaryDistribution,

    /// (1−q)·(1−p′) vanishes.
    #[error("undefined linguistic temperature for these parameters")]
    UndefinedTemperature,

    #[error("{value} is outside the interpolation range [{low}, {high}]")]
    OutOfInterpolationRange { value: f64, low: f64, high: f64 },

    #[error("calibration column {column} is not strictly increasing")]
    NotStrictlyIncreasing { column: &'static str },

    #[error("calibration needs at least 4 samples for a cubic fit, found {found}")]
    TooFewSamples { found: usize },

    #[error("calibration line {line}: {reason}")]
    MalformedCalibration { line: usize, reason: String },

    /// The hash of an observation is 0/0 when the feature is absent everywhere or present everywhere.
    #[error("no hash value is defined for feature frequency {frequency}")]
    UndefinedHash { frequency: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
