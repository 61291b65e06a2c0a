pub use crate::agent::{Outcome, Person};
pub use crate::errors::EpidemicError;
pub use crate::params::RunConfig;
pub use crate::sampler::AgeSampler;
pub use crate::sim::{age_histogram, RunReport, Simulation};

/// Basic representation of time. This crate usually assumes time is measured
/// in days.
pub type Time = u32;

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;

pub(crate) const INF: Real = Real::INFINITY;

/// Simple trait to simplify the use of age-dependent values/parameters.
pub trait ForAge<T> {
    /// Return the content of parameter for agents with the given age.
    fn for_age(&self, age: Real) -> T;
}

/// Piecewise-constant bands given as (inclusive upper age, value) pairs.
/// The last band is open-ended regardless of its bound.
impl<const N: usize> ForAge<Real> for [(Real, Real); N] {
    fn for_age(&self, age: Real) -> Real {
        for &(upper, value) in &self[..N - 1] {
            if age <= upper {
                return value;
            }
        }
        return self[N - 1].1;
    }
}
