/*!
The calibration curve H(τ).

The theoretical isogloss density needs H at the model's temperature τ*. H is
not known in closed form; it comes as a table of (τ, H) samples that is
interpolated with a cubic spline. The same table read the other way round
gives τ for an observed H, which needs H to be strictly increasing along the
table.
*/
use crate::error::ModelError;
use std::fs;
use std::path::Path;

/// Anything that maps temperatures to hash values and back.
pub trait HashCurve {
    fn hash_of_tau(&self, tau: f64) -> Result<f64, ModelError>;
    fn tau_of_hash(&self, hash: f64) -> Result<f64, ModelError>;
}

/// The sample table, with τ strictly increasing and at least four rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    tau: Vec<f64>,
    hash: Vec<f64>,
}

impl CalibrationTable {
    pub fn from_pairs(pairs: Vec<(f64, f64)>) -> Result<CalibrationTable, ModelError> {
        if pairs.len() < 4 {
            return Err(ModelError::TooFewSamples { found: pairs.len() });
        }
        let (tau, hash): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if !strictly_increasing(&tau) {
            return Err(ModelError::NotStrictlyIncreasing { column: "tau" });
        }
        Ok(CalibrationTable { tau, hash })
    }

    /**
    Parse a headerless two-column CSV table, one `tau,hash` pair per line.
    Blank lines are skipped.

    ```rust
    let table = model::calibration::CalibrationTable::parse("0,0\n1,1\n2,8\n3,27\n").unwrap();
    assert_eq!(table.tau(), &[0., 1., 2., 3.]);
    ```
     */
    pub fn parse(text: &str) -> Result<CalibrationTable, ModelError> {
        let mut pairs = vec![];
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 2 {
                return Err(ModelError::MalformedCalibration {
                    line: i + 1,
                    reason: format!("expected 2 fields, found {}", fields.len()),
                });
            }
            let parse = |s: &str| {
                s.parse::<f64>().map_err(|e| ModelError::MalformedCalibration {
                    line: i + 1,
                    reason: format!("{:?}: {}", s, e),
                })
            };
            pairs.push((parse(fields[0])?, parse(fields[1])?));
        }
        CalibrationTable::from_pairs(pairs)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<CalibrationTable, ModelError> {
        CalibrationTable::parse(&fs::read_to_string(path)?)
    }

    pub fn tau(&self) -> &[f64] {
        &self.tau
    }

    pub fn hash(&self) -> &[f64] {
        &self.hash
    }
}

fn strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

/**
A cubic interpolating spline with not-a-knot end conditions: the third
derivative is continuous across the second and the second-to-last knot. On
data sampled from a cubic polynomial, the spline reproduces that polynomial.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative of the spline at each knot.
    m: Vec<f64>,
}

impl CubicSpline {
    pub fn fit(x: &[f64], y: &[f64]) -> Result<CubicSpline, ModelError> {
        assert_eq!(x.len(), y.len());
        let n = x.len();
        if n < 4 {
            return Err(ModelError::TooFewSamples { found: n });
        }
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

        // The unknowns are m[1..n-1]. The end values m[0] and m[n-1] follow
        // from the not-a-knot conditions and are substituted into the first
        // and last rows, which keeps the system tridiagonal.
        let k = n - 2;
        let mut sub = vec![0.; k];
        let mut diag = vec![0.; k];
        let mut sup = vec![0.; k];
        let mut rhs = vec![0.; k];
        for j in 0..k {
            let i = j + 1;
            sub[j] = h[i - 1];
            diag[j] = 2. * (h[i - 1] + h[i]);
            sup[j] = h[i];
            rhs[j] = 6. * (slope[i] - slope[i - 1]);
        }
        diag[0] = (h[0] + h[1]) * (2. + h[0] / h[1]);
        sup[0] = h[1] - h[0] * h[0] / h[1];
        let (a, b) = (h[n - 3], h[n - 2]);
        sub[k - 1] = a - b * b / a;
        diag[k - 1] = (a + b) * (2. + b / a);

        let inner = solve_tridiagonal(&sub, &diag, &sup, &rhs);
        let mut m = Vec::with_capacity(n);
        m.push(((h[0] + h[1]) * inner[0] - h[0] * inner[1]) / h[1]);
        m.extend_from_slice(&inner);
        m.push(((a + b) * inner[k - 1] - b * inner[k - 2]) / a);

        Ok(CubicSpline {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    pub fn range(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Evaluate the spline. Fails outside the range of the knots.
    pub fn evaluate(&self, at: f64) -> Result<f64, ModelError> {
        let (low, high) = self.range();
        if !(low..=high).contains(&at) {
            return Err(ModelError::OutOfInterpolationRange {
                value: at,
                low,
                high,
            });
        }
        let i = self
            .x
            .partition_point(|&xi| xi <= at)
            .saturating_sub(1)
            .min(self.x.len() - 2);
        let h = self.x[i + 1] - self.x[i];
        let left = self.x[i + 1] - at;
        let right = at - self.x[i];
        Ok(self.m[i] * left.powi(3) / (6. * h)
            + self.m[i + 1] * right.powi(3) / (6. * h)
            + (self.y[i] / h - self.m[i] * h / 6.) * left
            + (self.y[i + 1] / h - self.m[i + 1] * h / 6.) * right)
    }
}

/// Thomas algorithm. The callers only pass diagonally dominant systems, so
/// no pivoting is needed.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let k = diag.len();
    let mut c = vec![0.; k];
    let mut d = vec![0.; k];
    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for j in 1..k {
        let denominator = diag[j] - sub[j] * c[j - 1];
        c[j] = sup[j] / denominator;
        d[j] = (rhs[j] - sub[j] * d[j - 1]) / denominator;
    }
    let mut solution = d;
    for j in (0..k - 1).rev() {
        solution[j] -= c[j] * solution[j + 1];
    }
    solution
}

/**
The interpolated calibration curve.

The inverse direction is only available if the hash column is strictly
increasing. A table where it is not can still be used in the forward
direction; asking it for τ fails.
 */
#[derive(Debug, Clone)]
pub struct CalibrationCurve {
    forward: CubicSpline,
    inverse: Option<CubicSpline>,
}

impl CalibrationCurve {
    pub fn new(table: &CalibrationTable) -> Result<CalibrationCurve, ModelError> {
        let forward = CubicSpline::fit(&table.tau, &table.hash)?;
        let inverse = if strictly_increasing(&table.hash) {
            Some(CubicSpline::fit(&table.hash, &table.tau)?)
        } else {
            None
        };
        Ok(CalibrationCurve { forward, inverse })
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<CalibrationCurve, ModelError> {
        CalibrationCurve::new(&CalibrationTable::read(path)?)
    }

    /// The range of τ the curve is defined on.
    pub fn tau_range(&self) -> (f64, f64) {
        self.forward.range()
    }
}

impl HashCurve for CalibrationCurve {
    fn hash_of_tau(&self, tau: f64) -> Result<f64, ModelError> {
        self.forward.evaluate(tau)
    }

    fn tau_of_hash(&self, hash: f64) -> Result<f64, ModelError> {
        match &self.inverse {
            None => Err(ModelError::NotStrictlyIncreasing { column: "hash" }),
            Some(spline) => spline.evaluate(hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::linspace;
    use approx::assert_abs_diff_eq;

    fn cubic(x: f64) -> f64 {
        x.powi(3) - 2. * x + 1.
    }

    #[test]
    fn spline_reproduces_cubics() {
        let x = vec![0., 1., 2.5, 3., 4.5, 6.];
        let y: Vec<f64> = x.iter().map(|&x| cubic(x)).collect();
        let s = CubicSpline::fit(&x, &y).unwrap();
        for &at in &[0., 0.3, 1.7, 2.5, 3.9, 5.2, 6.] {
            assert_abs_diff_eq!(s.evaluate(at).unwrap(), cubic(at), epsilon = 1e-9);
        }
    }

    #[test]
    fn four_points_give_the_interpolating_cubic() {
        let x = vec![-1., 0., 2., 3.];
        let y: Vec<f64> = x.iter().map(|&x| cubic(x)).collect();
        let s = CubicSpline::fit(&x, &y).unwrap();
        assert_abs_diff_eq!(s.evaluate(1.).unwrap(), cubic(1.), epsilon = 1e-9);
        assert_abs_diff_eq!(s.evaluate(-0.5).unwrap(), cubic(-0.5), epsilon = 1e-9);
    }

    #[test]
    fn spline_passes_through_knots() {
        let x = vec![0.1, 0.2, 0.5, 1., 2., 5.];
        let y = vec![0.9, 0.7, 0.6, 0.3, 0.35, 0.1];
        let s = CubicSpline::fit(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert_abs_diff_eq!(s.evaluate(*xi).unwrap(), *yi, epsilon = 1e-12);
        }
    }

    #[test]
    fn evaluation_outside_the_table_fails() {
        let table = CalibrationTable::parse("1,0.1\n2,0.2\n3,0.4\n4,0.5").unwrap();
        let curve = CalibrationCurve::new(&table).unwrap();
        assert_eq!(curve.tau_range(), (1., 4.));
        assert!(matches!(
            curve.hash_of_tau(0.5),
            Err(ModelError::OutOfInterpolationRange { low, high, .. }) if low == 1. && high == 4.
        ));
        assert!(curve.hash_of_tau(4.5).is_err());
        assert!(curve.hash_of_tau(f64::NAN).is_err());
        assert!(curve.hash_of_tau(4.).is_ok());
    }

    #[test]
    fn round_trip_through_the_inverse() {
        let tau = linspace(0.1, 4., 40);
        let pairs = tau.iter().map(|&t| (t, t / (1. + t))).collect();
        let curve = CalibrationCurve::new(&CalibrationTable::from_pairs(pairs).unwrap()).unwrap();
        for &t in &[0.15, 0.5, 1., 1.234, 2.7, 3.95] {
            let h = curve.hash_of_tau(t).unwrap();
            assert_abs_diff_eq!(h, t / (1. + t), epsilon = 1e-4);
            assert_abs_diff_eq!(curve.tau_of_hash(h).unwrap(), t, epsilon = 1e-3);
        }
    }

    #[test]
    fn inverse_needs_increasing_hash() {
        let table = CalibrationTable::parse("0,0.5\n1,0.7\n2,0.6\n3,0.9\n").unwrap();
        let curve = CalibrationCurve::new(&table).unwrap();
        assert!(curve.hash_of_tau(1.5).is_ok());
        assert!(matches!(
            curve.tau_of_hash(0.65),
            Err(ModelError::NotStrictlyIncreasing { column: "hash" })
        ));
    }

    #[test]
    fn malformed_tables_are_rejected() {
        assert!(matches!(
            CalibrationTable::parse("0,0\n1,1\n2,2\n"),
            Err(ModelError::TooFewSamples { found: 3 })
        ));
        assert!(matches!(
            CalibrationTable::parse("0,0\n1,1\n\n1,2\n3,3\n"),
            Err(ModelError::NotStrictlyIncreasing { column: "tau" })
        ));
        assert!(matches!(
            CalibrationTable::parse("0,0\n1\n"),
            Err(ModelError::MalformedCalibration { line: 2, .. })
        ));
        assert!(matches!(
            CalibrationTable::parse("0,0\n1,x\n"),
            Err(ModelError::MalformedCalibration { line: 2, .. })
        ));
    }
}
