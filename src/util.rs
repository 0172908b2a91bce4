use itertools::Itertools;

/// Add `other` to `sum` element by element. Both must have the same length.
pub fn add_assign(sum: &mut [f64], other: &[f64]) {
    for (s, o) in sum.iter_mut().zip_eq(other) {
        *s += o;
    }
}

/// `n` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        assert_eq!(linspace(0., 1., 5), vec![0., 0.25, 0.5, 0.75, 1.]);
        assert_eq!(linspace(2., 3., 1), vec![2.]);
        assert!(linspace(2., 3., 0).is_empty());
    }

    #[test]
    fn add_assign_sums_elementwise() {
        let mut s = vec![1., 2.];
        add_assign(&mut s, &[0.5, 0.25]);
        assert_eq!(s, vec![1.5, 2.25]);
    }

    #[test]
    #[should_panic]
    fn add_assign_rejects_different_lengths() {
        let mut s = vec![1., 2.];
        add_assign(&mut s, &[0.5]);
    }
}
