/*!
Model Description
=================

This model description follows the ODD (Overview, Design concept, Details)
protocol (Grimm et al., 2006; Grimm et al., 2010). It is loosely literate:
the documentation walks through the protocol, and the code implementing each
part sits right where it is described.

# 1. Purpose

The model simulates how a single binary linguistic feature spreads through a
population of communities, following the statistical-physics account of
language change by Kauhanen. Communities sit on a square grid whose edges
wrap around (a torus). A feature can change inside a community's own lineage
(vertical transmission) or be passed on to a neighboring community
(horizontal transmission, or diffusion).

The research question is whether the long-run statistics of the simulation,
the frequency of the feature and the density of isoglosses (boundaries
between neighbors that differ in the feature), match the closed-form
predictions of the model. Those predictions depend on a "linguistic
temperature" τ and on a calibration curve H(τ) that is supplied from outside
as a table of samples.

 */

use rand::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info, trace};

pub mod argparse;
pub mod calibration;
mod debug;
pub mod error;
pub mod grid;
pub mod isogloss;
pub mod parameters;
pub mod util;

pub use error::ModelError;
pub use parameters::Parameters;

use calibration::HashCurve;
use grid::Grid;

/**

# 2. Entities, state variables, and scales

The model consists of N×N communities in discrete time. The smallest unit of
time is a micro-step, in which exactly one transmission event happens. N²
micro-steps make up one Monte Carlo sweep, so that on average every community
is the focus of one event per sweep. Observations are taken once per sweep.

 */
pub type Sweeps = u64;

/// A cell position as (column, row).
pub type Coordinate = (usize, usize);

/**
## 2.1 Communities

Every community either has the feature or does not. No other state is
attached to a community, so the whole population is a bit matrix, see
[`grid::Grid`]. The grid is created at the start of a realization, mutated in
place by every micro-step, and dropped at the end; only the statistics
observed on it survive.

## 2.2 Parameters

The fixed parameters of an experiment are collected in [`Parameters`]: the
grid size, the number of micro-steps per realization, the number of
realizations, and five probabilities. q is the probability that an event is
vertical. For each kind of event there is a probability of *egress*
(acquiring the feature) and of *ingress* (losing it). The sums

```text
p  = P(egress, vertical)   + P(ingress, vertical)
p′ = P(egress, horizontal) + P(ingress, horizontal)
```

are derived from them on demand.

# 3. Process overview and scheduling

Each micro-step does the following, drawing every random number from the
one generator handed to the realization, in this order:

 1. Pick a community uniformly at random (first its row, then its column).
 2. Decide the kind of event: horizontal with probability 1 − q, otherwise
    vertical.
 3. Look up the transition from the kind of event and the community's
    current value (see 7.2) and draw whether it succeeds.
 4. For a vertical event, write the outcome into the community itself. For a
    horizontal event, walk to a random neighbor (see 7.1) and write the
    outcome there. The community that was picked is never changed by a
    horizontal event: the feature is copied, not moved.

 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroStep {
    /// The community picked in step 1.
    pub source: Coordinate,
    /// The community whose value was written in step 4.
    pub target: Coordinate,
    pub transition: submodels::transmission::Transition,
    pub success: bool,
}

pub fn step<R: Rng + ?Sized>(grid: &mut Grid, p: &Parameters, rng: &mut R) -> MicroStep {
    use submodels::transmission::{Event, Transition};

    let n = grid.size();
    let y = rng.gen_range(0..n);
    let x = rng.gen_range(0..n);
    let event = Event::draw(p, rng);
    let transition = Transition::select(event, grid.get(x, y));
    let success = rng.gen::<f64>() < transition.success_probability(p);
    let target = match event {
        Event::Vertical => (x, y),
        Event::Horizontal => submodels::walk::random_neighbor((x, y), n, rng),
    };
    grid.set(target.0, target.1, transition.outcome(success));
    MicroStep {
        source: (x, y),
        target,
        transition,
        success,
    }
}

/**
A realization runs `p.trials` micro-steps on a fresh random grid and
observes the grid after every full sweep.

The micro-step counter goes up for every event, whatever its outcome, so the
number of observations only depends on the parameters: `p.trials / N²`.

 */
pub fn realization<R: Rng + ?Sized>(
    p: &Parameters,
    o: &observation::ObservationSettings,
    rng: &mut R,
) -> observation::TimeSeries {
    let mut grid = Grid::initialize(p.grid_size, rng);
    trace!("Initial grid:\n{:?}", grid);
    let sweep_length = p.sweep_length();
    let mut series = observation::TimeSeries::with_capacity(p.sweeps() as usize);

    for t in 1..=p.trials {
        step(&mut grid, p, rng);
        if t % sweep_length == 0 {
            let sweep = t / sweep_length;
            let (frequency, isogloss_density) = series.record(sweep, &grid, p.isogloss_scan);
            if (o.log_every > 0) && (sweep % o.log_every == 0) {
                info!(sweep, frequency, isogloss_density, "observed");
            } else {
                debug!(sweep, frequency, isogloss_density, "observed");
            }
            trace!("Grid after sweep {}:\n{:?}", sweep, grid);
        }
    }
    series
}

/// The outcome of an experiment: the observed time series (averaged, if
/// there was more than one realization) and the theoretical prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub series: observation::TimeSeries,
    pub prediction: emergence::Prediction,
}

/**
A single experiment: check the parameters, compute the prediction, run one
realization.

The calibration curve is optional. Without it, the prediction lacks the
theoretical isogloss density but the simulation still runs. With it, any
failure of the curve ends the experiment before the first micro-step.

 */
pub fn experiment<R: Rng + ?Sized>(
    p: &Parameters,
    curve: Option<&dyn HashCurve>,
    o: &observation::ObservationSettings,
    rng: &mut R,
) -> Result<ExperimentResult, ModelError> {
    p.validate()?;
    let prediction = emergence::predict(p, curve)?;
    Ok(ExperimentResult {
        series: realization(p, o, rng),
        prediction,
    })
}

/**
Run `p.realizations` independent realizations one after the other and
average their series sweep by sweep. The prediction is computed once for the
whole ensemble, since all realizations share the parameters.

Realizations are independent because each starts from its own random grid and
keeps drawing from the generator where the previous one stopped. With a
single realization the result is exactly what [`experiment`] returns for the
same generator state.

 */
pub fn run_realizations<R: Rng + ?Sized>(
    p: &Parameters,
    curve: Option<&dyn HashCurve>,
    o: &observation::ObservationSettings,
    rng: &mut R,
) -> Result<ExperimentResult, ModelError> {
    p.validate()?;
    let prediction = emergence::predict(p, curve)?;
    info!(
        stationary_frequency = prediction.stationary_frequency,
        temperature = prediction.temperature,
        hash = ?prediction.hash,
        isogloss_density = ?prediction.isogloss_density,
        "Theoretical values"
    );

    let mut average = observation::SeriesAverage::default();
    for r in 0..p.realizations {
        info!("Realization {:} of {:}", r + 1, p.realizations);
        let series = realization(p, o, rng);
        if let (Some(f), Some(i)) = (series.frequency.last(), series.isogloss_density.last()) {
            info!(frequency = f, isogloss_density = i, "Realization ended");
        }
        average.add(&series);
    }

    Ok(ExperimentResult {
        series: average.finish(),
        prediction,
    })
}

/**
# 4. Design concepts

## 4.1 Basic principles

The model is the lattice model of Kauhanen for the areal distribution of
linguistic features. It is a stochastic spin system: every site carries one
of two states and changes it through random local events. The two drivers of
change are faithful or unfaithful transmission within a community over time
(vertical) and contact with a neighbor (horizontal). The balance between
them, measured by the temperature τ, determines how clustered the feature
ends up being.

## 4.2 Emergence

The two emergent quantities are the frequency of the feature and the density
of isoglosses. For both, the model has a closed-form expectation in the
stationary state, which the observations are compared against.

*/
pub mod emergence {
    use crate::calibration::HashCurve;
    use crate::{ModelError, Parameters};
    use serde_derive::{Deserialize, Serialize};
    use std::str::FromStr;

    /// The theoretical values for one set of parameters.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Prediction {
        /// ρ*, see [`stationary_frequency`].
        pub stationary_frequency: f64,
        /// τ*, see [`temperature`].
        pub temperature: f64,
        /// H(τ*), if a calibration curve was available.
        pub hash: Option<f64>,
        /// 2·H(τ*)·ρ*·(1 − ρ*), if a calibration curve was available.
        pub isogloss_density: Option<f64>,
    }

    /**
    The frequency ρ* of the feature in the stationary distribution,

    ```text
    ρ* = (q·ingress_v + (1 − q)·ingress_h) / (q·p + (1 − q)·p′)
    ```

    Note that the numerator is built from the *ingress* probabilities, so ρ*
    is the frequency of communities without the feature, which is exactly
    what [`crate::observation::feature_frequency`] measures.
     */
    pub fn stationary_frequency(p: &Parameters) -> Result<f64, ModelError> {
        let q = p.probability_vertical;
        let top = q * p.probability_ingress_vertical
            + p.probability_horizontal() * p.probability_ingress_horizontal;
        let bottom = q * p.vertical_rate() + p.probability_horizontal() * p.horizontal_rate();
        if bottom == 0. {
            return Err(ModelError::UndefinedStationaryDistribution);
        }
        Ok(top / bottom)
    }

    /**
    The linguistic temperature τ*, the rate of unfaithful transmission events
    relative to faithful horizontal ones,

    ```text
    τ* = (q·p + (1 − q)·p′) / ((1 − q)·(1 − p′))
    ```

    ```rust
    let p = model::Parameters::default();
    assert_eq!(model::emergence::temperature(&p).unwrap(), 1.0);
    ```
     */
    pub fn temperature(p: &Parameters) -> Result<f64, ModelError> {
        let q = p.probability_vertical;
        let top = q * p.vertical_rate() + p.probability_horizontal() * p.horizontal_rate();
        let bottom = p.probability_horizontal() * (1. - p.horizontal_rate());
        if bottom == 0. {
            return Err(ModelError::UndefinedTemperature);
        }
        Ok(top / bottom)
    }

    pub fn isogloss_density(hash: f64, frequency: f64) -> f64 {
        2. * hash * frequency * (1. - frequency)
    }

    /// Compute the prediction. This consults the calibration curve at most
    /// once.
    pub fn predict(p: &Parameters, curve: Option<&dyn HashCurve>) -> Result<Prediction, ModelError> {
        let stationary_frequency = stationary_frequency(p)?;
        let temperature = temperature(p)?;
        let hash = match curve {
            None => None,
            Some(c) => Some(c.hash_of_tau(temperature)?),
        };
        Ok(Prediction {
            stationary_frequency,
            temperature,
            hash,
            isogloss_density: hash.map(|h| isogloss_density(h, stationary_frequency)),
        })
    }

    /// A feature as observed in the world: its frequency and the density of
    /// its isoglosses. Parses from `"frequency,isogloss_density"`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Observation {
        pub frequency: f64,
        pub isogloss_density: f64,
    }

    impl FromStr for Observation {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let mut parts = s.split(',');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(f), Some(i), None) => Ok(Observation {
                    frequency: f.trim().parse().map_err(|e| format!("Bad frequency {:?}: {}", f, e))?,
                    isogloss_density: i
                        .trim()
                        .parse()
                        .map_err(|e| format!("Bad isogloss density {:?}: {}", i, e))?,
                }),
                _ => Err(format!("Expected FREQUENCY,ISOGLOSS_DENSITY, found {:?}", s)),
            }
        }
    }

    /// Invert [`isogloss_density`] for the hash: H = iso / (2·ρ·(1 − ρ)).
    pub fn hash_from_observation(o: Observation) -> Result<f64, ModelError> {
        let spread = 2. * o.frequency * (1. - o.frequency);
        if spread == 0. {
            return Err(ModelError::UndefinedHash {
                frequency: o.frequency,
            });
        }
        Ok(o.isogloss_density / spread)
    }

    /// The temperature at which the model would produce the observed
    /// relation between frequency and isogloss density.
    pub fn estimate_temperature(curve: &dyn HashCurve, o: Observation) -> Result<f64, ModelError> {
        curve.tau_of_hash(hash_from_observation(o)?)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use approx::assert_abs_diff_eq;

        #[test]
        fn reference_parameters() {
            let p = Parameters::default();
            assert_eq!(stationary_frequency(&p).unwrap(), 0.);
            assert_eq!(temperature(&p).unwrap(), 1.);
        }

        #[test]
        fn mixed_parameters() {
            let p = Parameters {
                probability_vertical: 0.25,
                probability_egress_vertical: 0.2,
                probability_ingress_vertical: 0.1,
                probability_egress_horizontal: 0.05,
                probability_ingress_horizontal: 0.15,
                ..Parameters::default()
            };
            // top = 0.25·0.1 + 0.75·0.15, bottom = 0.25·0.3 + 0.75·0.2
            assert_abs_diff_eq!(stationary_frequency(&p).unwrap(), 0.1375 / 0.225, epsilon = 1e-12);
            assert_abs_diff_eq!(temperature(&p).unwrap(), 0.225 / (0.75 * 0.8), epsilon = 1e-12);
        }

        #[test]
        fn degenerate_parameters_are_reported() {
            let p = Parameters {
                probability_egress_vertical: 0.,
                ..Parameters::default()
            };
            assert!(matches!(
                stationary_frequency(&p),
                Err(ModelError::UndefinedStationaryDistribution)
            ));

            let p = Parameters {
                probability_vertical: 1.,
                ..Parameters::default()
            };
            assert!(matches!(temperature(&p), Err(ModelError::UndefinedTemperature)));

            let p = Parameters {
                probability_egress_horizontal: 0.5,
                probability_ingress_horizontal: 0.5,
                ..Parameters::default()
            };
            assert!(matches!(temperature(&p), Err(ModelError::UndefinedTemperature)));
        }

        #[test]
        fn isogloss_density_peaks_at_one_half() {
            assert_eq!(isogloss_density(0.8, 0.5), 0.4);
            assert_eq!(isogloss_density(0.8, 0.), 0.);
            assert_eq!(isogloss_density(0.8, 1.), 0.);
        }

        #[test]
        fn observations_parse_and_invert() {
            let o: Observation = "0.25, 0.3".parse().unwrap();
            assert_eq!(o.frequency, 0.25);
            assert_abs_diff_eq!(hash_from_observation(o).unwrap(), 0.3 / 0.375, epsilon = 1e-12);
            assert!("0.25".parse::<Observation>().is_err());
            assert!("0.25,x".parse::<Observation>().is_err());
            assert!(matches!(
                hash_from_observation(Observation {
                    frequency: 1.,
                    isogloss_density: 0.
                }),
                Err(ModelError::UndefinedHash { .. })
            ));
        }
    }
}

/**
## 4.3 Adaptation, objectives, learning, prediction

Communities have no adaptive traits, objectives, memory, or expectations.
They are the passive carriers of the feature.

## 4.4 Sensing and interaction

A community only ever interacts with its four direct neighbors on the torus,
and only in one direction: in a horizontal event, the focal community's
value determines which transition is tried at a neighbor, but the focal
community does not learn anything from it.

## 4.5 Stochasticity

Everything that happens is random: the initial grid, the focal community,
the kind of event, its success, and the direction of diffusion. All these
draws come from one generator that is passed in explicitly, so a seeded
generator reproduces a run exactly.

## 4.6 Collectives

There are none; clusters of communities sharing the feature are an outcome,
not an entity of the model.

# 4.7 Observation

After each sweep we record the frequency of the feature and the isogloss
density. By the convention of the model, the frequency counts the communities
*without* the feature (value 0). This matches the stationary frequency ρ*.

 */
pub mod observation {
    use crate::error::ModelError;
    use crate::grid::Grid;
    use crate::isogloss::{self, IsoglossScan};
    use crate::Sweeps;
    use itertools::Itertools;
    use serde_derive::{Deserialize, Serialize};
    use std::fs::File;
    use std::io::prelude::*;
    use std::io::BufWriter;

    /// The fraction of communities without the feature.
    pub fn feature_frequency(grid: &Grid) -> f64 {
        grid.count_absent() as f64 / (grid.size() * grid.size()) as f64
    }

    /// One observation per sweep. The three vectors always have the same length.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct TimeSeries {
        pub sweeps: Vec<Sweeps>,
        pub frequency: Vec<f64>,
        pub isogloss_density: Vec<f64>,
    }

    impl TimeSeries {
        pub fn with_capacity(n: usize) -> TimeSeries {
            TimeSeries {
                sweeps: Vec::with_capacity(n),
                frequency: Vec::with_capacity(n),
                isogloss_density: Vec::with_capacity(n),
            }
        }

        /// Observe the grid and append the result, which is also returned.
        pub fn record(&mut self, sweep: Sweeps, grid: &Grid, scan: IsoglossScan) -> (f64, f64) {
            let frequency = feature_frequency(grid);
            let density = isogloss::density(grid, scan);
            self.sweeps.push(sweep);
            self.frequency.push(frequency);
            self.isogloss_density.push(density);
            (frequency, density)
        }

        pub fn len(&self) -> usize {
            self.sweeps.len()
        }

        pub fn is_empty(&self) -> bool {
            self.sweeps.is_empty()
        }
    }

    /**
    Element-wise mean of several time series. All series must have been
    observed at the same sweeps, which holds for realizations of the same
    parameters; a mismatch is a bug and panics.
     */
    #[derive(Debug, Default)]
    pub struct SeriesAverage {
        sum: TimeSeries,
        count: usize,
    }

    impl SeriesAverage {
        pub fn add(&mut self, series: &TimeSeries) {
            if self.count == 0 {
                self.sum = series.clone();
            } else {
                assert_eq!(self.sum.sweeps, series.sweeps);
                crate::util::add_assign(&mut self.sum.frequency, &series.frequency);
                crate::util::add_assign(&mut self.sum.isogloss_density, &series.isogloss_density);
            }
            self.count += 1;
        }

        pub fn finish(self) -> TimeSeries {
            let n = self.count as f64;
            TimeSeries {
                sweeps: self.sum.sweeps,
                frequency: self.sum.frequency.into_iter().map(|f| f / n).collect(),
                isogloss_density: self.sum.isogloss_density.into_iter().map(|i| i / n).collect(),
            }
        }
    }

    pub struct ObservationSettings {
        /// Log an observation at info level every this many sweeps (0: never).
        pub log_every: Sweeps,
        pub frequency_file: String,
        pub isogloss_file: String,
        pub summary_file: String,
    }

    impl Default for ObservationSettings {
        fn default() -> Self {
            ObservationSettings {
                log_every: 0,
                frequency_file: "frequency_average.csv".to_string(),
                isogloss_file: "iso_average.csv".to_string(),
                summary_file: "summary.json".to_string(),
            }
        }
    }

    /// Write a series as plain text, one value per line.
    pub fn write_series<W: Write>(mut out: W, values: &[f64]) -> Result<(), ModelError> {
        writeln!(out, "{}", values.iter().map(|v| format!("{:.18e}", v)).join("\n"))?;
        Ok(())
    }

    pub fn store_series(values: &[f64], path: &str) -> Result<(), ModelError> {
        let mut out = BufWriter::new(File::create(path)?);
        write_series(&mut out, values)?;
        out.flush()?;
        Ok(())
    }

    /// What a run leaves behind besides the two series files.
    #[derive(Serialize)]
    pub struct Summary<'a> {
        pub parameters: &'a crate::Parameters,
        pub seed: u64,
        pub prediction: &'a crate::emergence::Prediction,
        pub sweeps: &'a [Sweeps],
        pub final_frequency: Option<f64>,
        pub final_isogloss_density: Option<f64>,
    }

    pub fn store_summary(summary: &Summary, path: &str) -> Result<(), ModelError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, summary)?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn frequency_counts_communities_without_the_feature() {
            let g = Grid::from_rows(&[vec![0, 1], vec![1, 1]]);
            assert_eq!(feature_frequency(&g), 0.25);
        }

        #[test]
        fn record_keeps_vectors_aligned() {
            let g = Grid::from_rows(&[vec![0, 1], vec![1, 0]]);
            let mut s = TimeSeries::default();
            assert_eq!(s.record(1, &g, IsoglossScan::Open), (0.5, 1.));
            s.record(2, &g, IsoglossScan::Open);
            assert_eq!(s.len(), 2);
            assert_eq!(s.sweeps, vec![1, 2]);
            assert_eq!(s.isogloss_density, vec![1., 1.]);
        }

        #[test]
        fn average_of_two_series() {
            let a = TimeSeries {
                sweeps: vec![1, 2],
                frequency: vec![0., 0.5],
                isogloss_density: vec![1., 0.25],
            };
            let b = TimeSeries {
                sweeps: vec![1, 2],
                frequency: vec![1., 0.5],
                isogloss_density: vec![0., 0.75],
            };
            let mut avg = SeriesAverage::default();
            avg.add(&a);
            avg.add(&b);
            let m = avg.finish();
            assert_eq!(m.sweeps, vec![1, 2]);
            assert_eq!(m.frequency, vec![0.5, 0.5]);
            assert_eq!(m.isogloss_density, vec![0.5, 0.5]);
        }

        #[test]
        fn series_are_written_one_value_per_line() {
            let mut out = vec![];
            write_series(&mut out, &[0.25, 1.]).unwrap();
            let text = String::from_utf8(out).unwrap();
            let lines: Vec<f64> = text.lines().map(|l| l.parse().unwrap()).collect();
            assert_eq!(lines, vec![0.25, 1.]);
        }
    }
}

/**
# 5. Initialization

Each realization starts from a grid where every community independently has
the feature with probability ½ ([`grid::Grid::initialize`]). The initial
state therefore differs between realizations, but its distribution does not.

# 6. Input Data

The only external input is the calibration table of (τ, H(τ)) samples, from
which [`calibration::CalibrationCurve`] interpolates H for any τ inside the
sampled range.

# 7. Submodels

 */
pub mod submodels {
    /**
    ## 7.1 Diffusion walk

    Horizontal transmission reaches one of the four direct neighbors, chosen
    uniformly. Leaving the grid on one side re-enters it on the opposite
    side, so every community has exactly four neighbors.

     */
    pub mod walk {
        use crate::Coordinate;
        use rand::Rng;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Direction {
            Up,
            Right,
            Down,
            Left,
        }

        pub const DIRECTIONS: [Direction; 4] = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];

        /// The neighbor of `cell` in `direction` on a torus of side `size`.
        pub fn neighbor(cell: Coordinate, size: usize, direction: Direction) -> Coordinate {
            let (x, y) = cell;
            match direction {
                Direction::Up => (x, if y == 0 { size - 1 } else { y - 1 }),
                Direction::Right => (if x + 1 == size { 0 } else { x + 1 }, y),
                Direction::Down => (x, if y + 1 == size { 0 } else { y + 1 }),
                Direction::Left => (if x == 0 { size - 1 } else { x - 1 }, y),
            }
        }

        pub fn random_neighbor<R: Rng + ?Sized>(cell: Coordinate, size: usize, rng: &mut R) -> Coordinate {
            neighbor(cell, size, DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())])
        }
    }

    /**
    ## 7.2 Transmission

    The kind of event and the value of the focal community together select
    one of four transitions. Each has its own success probability, and the
    value written depends only on the transition and its success:

    | transition         | success draw            | success | failure |
    |--------------------|-------------------------|---------|---------|
    | vertical ingress   | P(ingress, vertical)    | 0       | 1       |
    | vertical egress    | P(egress, vertical)     | 1       | 0       |
    | horizontal ingress | P(ingress, horizontal)  | 0       | 1       |
    | horizontal egress  | P(egress, horizontal)   | 1       | 0       |

    Vertical transitions write to the focal community, horizontal ones to a
    neighbor. So a failed horizontal transition copies the focal value to
    the neighbor, a successful one writes the opposite value.

     */
    pub mod transmission {
        use crate::Parameters;
        use rand::Rng;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Event {
            Vertical,
            Horizontal,
        }

        impl Event {
            /// Horizontal with probability 1 − q.
            pub fn draw<R: Rng + ?Sized>(p: &Parameters, rng: &mut R) -> Event {
                if rng.gen::<f64>() > p.probability_vertical {
                    Event::Horizontal
                } else {
                    Event::Vertical
                }
            }
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Transition {
            VerticalIngress,
            VerticalEgress,
            HorizontalIngress,
            HorizontalEgress,
        }

        impl Transition {
            /// A community with the feature can only lose it (ingress), one
            /// without can only gain it (egress).
            pub fn select(event: Event, has_feature: bool) -> Transition {
                match (event, has_feature) {
                    (Event::Vertical, true) => Transition::VerticalIngress,
                    (Event::Vertical, false) => Transition::VerticalEgress,
                    (Event::Horizontal, true) => Transition::HorizontalIngress,
                    (Event::Horizontal, false) => Transition::HorizontalEgress,
                }
            }

            pub fn success_probability(self, p: &Parameters) -> f64 {
                match self {
                    Transition::VerticalIngress => p.probability_ingress_vertical,
                    Transition::VerticalEgress => p.probability_egress_vertical,
                    Transition::HorizontalIngress => p.probability_ingress_horizontal,
                    Transition::HorizontalEgress => p.probability_egress_horizontal,
                }
            }

            /// The value written to the target community.
            pub fn outcome(self, success: bool) -> bool {
                match self {
                    Transition::VerticalIngress | Transition::HorizontalIngress => !success,
                    Transition::VerticalEgress | Transition::HorizontalEgress => success,
                }
            }

            pub fn is_horizontal(self) -> bool {
                matches!(
                    self,
                    Transition::HorizontalIngress | Transition::HorizontalEgress
                )
            }
        }
    }
}
