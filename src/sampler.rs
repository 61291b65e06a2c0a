use crate::errors::EpidemicError;
use crate::prelude::Real;
use rand::Rng;

/// Inverse cumulative-distribution sampler producing random ages consistent
/// with an empirical age histogram.
///
/// Built once from an ordered table of (age breakpoint, population weight)
/// pairs and read-only afterwards. Sampling inverts the normalized cumulative
/// curve with a monotone cubic Hermite interpolant, so larger uniform inputs
/// never map to smaller ages.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeSampler {
    /// Cumulative probabilities, strictly increasing, last value 1.
    knots: Vec<Real>,
    /// Age breakpoints, strictly increasing.
    ages: Vec<Real>,
    /// Hermite tangents dAge/dCum at each knot, Fritsch-Carlson limited.
    tangents: Vec<Real>,
}

impl AgeSampler {
    /// Build the sampler from an age distribution table. Breakpoints must be
    /// strictly ascending and weights non-negative with a positive total; the
    /// table is scanned in the given order without re-sorting.
    pub fn from_table(table: &[(Real, Real)]) -> Result<Self, EpidemicError> {
        if table.len() < 4 {
            return Err(EpidemicError::ConfigurationError(format!(
                "age table needs at least 4 breakpoints, got {}",
                table.len()
            )));
        }
        let total: Real = table.iter().map(|&(_, weight)| weight).sum();
        if !(total > 0.0) {
            return Err(EpidemicError::ConfigurationError(format!(
                "age table weights must sum to a positive total, got {}",
                total
            )));
        }

        let mut knots = Vec::with_capacity(table.len());
        let mut ages = Vec::with_capacity(table.len());
        let mut acc = 0.0;
        for &(age, weight) in table {
            if weight < 0.0 {
                return Err(EpidemicError::ConfigurationError(format!(
                    "negative weight {} for age {}",
                    weight, age
                )));
            }
            if let Some(&last) = ages.last() {
                if age <= last {
                    return Err(EpidemicError::ConfigurationError(format!(
                        "age breakpoints must be ascending, got {} after {}",
                        age, last
                    )));
                }
            }
            acc += weight / total;
            knots.push(acc);
            ages.push(age);
        }

        let tangents = hermite_tangents(&knots, &ages)?;
        Ok(AgeSampler {
            knots,
            ages,
            tangents,
        })
    }

    /// Age at the given cumulative probability. Inputs outside the curve's
    /// range are clamped to its end knots, so 0 and 1 are always valid.
    pub fn age_at(&self, u: Real) -> Real {
        let n = self.knots.len();
        let u = u.clamp(self.knots[0], self.knots[n - 1]);
        let i = match self.knots.binary_search_by(|knot| knot.total_cmp(&u)) {
            Ok(i) => return self.ages[i],
            Err(i) => i.saturating_sub(1).min(n - 2),
        };

        let h = self.knots[i + 1] - self.knots[i];
        let t = (u - self.knots[i]) / h;
        let t2 = t * t;
        let t3 = t2 * t;
        let (y0, y1) = (self.ages[i], self.ages[i + 1]);
        let (m0, m1) = (self.tangents[i] * h, self.tangents[i + 1] * h);
        return (2.0 * t3 - 3.0 * t2 + 1.0) * y0
            + (t3 - 2.0 * t2 + t) * m0
            + (-2.0 * t3 + 3.0 * t2) * y1
            + (t3 - t2) * m1;
    }

    /// Draw a random age from the distribution.
    pub fn sample(&self, rng: &mut impl Rng) -> Real {
        self.age_at(rng.gen_range(0.0..1.0))
    }
}

/// Fritsch-Carlson limited tangents for a monotone cubic Hermite interpolant
/// through the points (xs, ys). Keeps every segment within the range of its
/// endpoints, so the interpolant never overshoots.
fn hermite_tangents(xs: &[Real], ys: &[Real]) -> Result<Vec<Real>, EpidemicError> {
    let n = xs.len();
    let mut widths = Vec::with_capacity(n - 1);
    let mut slopes = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let dx = xs[i + 1] - xs[i];
        if dx <= 0.0 {
            return Err(EpidemicError::ConfigurationError(
                "cumulative curve is not strictly increasing".to_string(),
            ));
        }
        widths.push(dx);
        slopes.push((ys[i + 1] - ys[i]) / dx);
    }

    let mut tangents = vec![0.0; n];
    tangents[0] = slopes[0];
    tangents[n - 1] = slopes[n - 2];
    for i in 1..n - 1 {
        if slopes[i - 1] * slopes[i] <= 0.0 {
            tangents[i] = 0.0;
        } else {
            // weighted harmonic mean of the secant slopes
            let w1 = 2.0 * widths[i] + widths[i - 1];
            let w2 = widths[i] + 2.0 * widths[i - 1];
            tangents[i] = (w1 + w2) / (w1 / slopes[i - 1] + w2 / slopes[i]);
        }
    }
    Ok(tangents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GERMANY_AGE_DISTRIBUTION;
    use assert_approx_eq::assert_approx_eq;
    use rand::prelude::{Rng, SeedableRng, SmallRng};

    fn uniform_table() -> [(Real, Real); 5] {
        [(0., 0.), (25., 1.), (50., 1.), (75., 1.), (100., 1.)]
    }

    #[test]
    fn endpoints() {
        let sampler = AgeSampler::from_table(&uniform_table()).unwrap();
        assert_approx_eq!(sampler.age_at(0.0), 0.0, 1e-9);
        assert_approx_eq!(sampler.age_at(1.0), 100.0, 1e-9);
    }

    #[test]
    fn uniform_table_is_linear() {
        // equal weights give equal secant slopes, which the limiter keeps
        let sampler = AgeSampler::from_table(&uniform_table()).unwrap();
        assert_approx_eq!(sampler.age_at(0.125), 12.5, 1e-6);
        assert_approx_eq!(sampler.age_at(0.5), 50.0, 1e-9);
        assert_approx_eq!(sampler.age_at(0.9), 90.0, 1e-6);
    }

    #[test]
    fn interpolates_through_knots() {
        let sampler = AgeSampler::from_table(&GERMANY_AGE_DISTRIBUTION).unwrap();
        for (u, age) in sampler.knots.iter().zip(&sampler.ages) {
            assert_approx_eq!(sampler.age_at(*u), *age, 1e-9);
        }
    }

    #[test]
    fn monotone_in_u() {
        let sampler = AgeSampler::from_table(&GERMANY_AGE_DISTRIBUTION).unwrap();
        let mut last = sampler.age_at(0.0);
        for i in 1..=1000 {
            let u = i as Real / 1000.0;
            let age = sampler.age_at(u);
            assert!(age >= last - 1e-9, "age decreased at u = {}", u);
            last = age;
        }
    }

    #[test]
    fn out_of_range_clamps() {
        let sampler = AgeSampler::from_table(&uniform_table()).unwrap();
        assert_approx_eq!(sampler.age_at(-0.5), 0.0, 1e-9);
        assert_approx_eq!(sampler.age_at(1.5), 100.0, 1e-9);
    }

    #[test]
    fn samples_stay_in_range() {
        let sampler = AgeSampler::from_table(&GERMANY_AGE_DISTRIBUTION).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let age = sampler.sample(&mut rng);
            assert!((0.0..=100.0).contains(&age), "age {} out of range", age);
        }
    }

    #[test]
    fn sampling_matches_uniform_draws() {
        let sampler = AgeSampler::from_table(&GERMANY_AGE_DISTRIBUTION).unwrap();
        let mut a = SmallRng::seed_from_u64(11);
        let mut b = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            let age = sampler.sample(&mut a);
            let u: Real = b.gen_range(0.0..1.0);
            assert_approx_eq!(age, sampler.age_at(u), 1e-12);
        }
    }

    #[test]
    fn rejects_short_table() {
        let res = AgeSampler::from_table(&[(0., 0.), (50., 1.), (100., 1.)]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_unsorted_ages() {
        let res = AgeSampler::from_table(&[(0., 0.), (50., 1.), (25., 1.), (100., 1.)]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_zero_total_weight() {
        let res = AgeSampler::from_table(&[(0., 0.), (25., 0.), (50., 0.), (100., 0.)]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_flat_cumulative_segment() {
        // a zero weight after the first bucket collapses two knots
        let res = AgeSampler::from_table(&[(0., 0.), (25., 1.), (50., 0.), (75., 1.), (100., 1.)]);
        assert!(res.is_err());
    }
}
