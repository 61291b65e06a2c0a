use crate::prelude::{Real, Time, INF};
use getset::CopyGetters;
use serde::{Deserialize, Serialize};

///////////////////////////////////////////////////////////////////////////////
// Demographic source data
///////////////////////////////////////////////////////////////////////////////

/// Population by age group as (upper age of bucket, millions of people).
/// Source: statista.com, population by age group, Germany.
pub const GERMANY_AGE_DISTRIBUTION: [(Real, Real); 11] = [
    (0., 0.),
    (1., 0.78),
    (5., 3.88),
    (14., 6.22),
    (17., 2.31),
    (20., 2.59),
    (24., 3.72),
    (39., 15.84),
    (59., 23.9),
    (64., 5.49),
    (100., 17.88),
];

///////////////////////////////////////////////////////////////////////////////
// Default rates for COVID-19
///////////////////////////////////////////////////////////////////////////////

/// Base fatality rate by age as (inclusive upper age, rate) bands.
/// Source: worldometers.info COVID-19 fatality rate by age.
pub const DEATH_CHANCE_DISTRIBUTION: [(Real, Real); 7] = [
    (9., 0.),
    (39., 0.002),
    (49., 0.004),
    (59., 0.013),
    (69., 0.036),
    (79., 0.08),
    (INF, 0.148),
];

/// Daily scale applied on top of the fatality bands.
pub const DEATH_CHANCE_FACTOR: Real = 0.065;

/// Base susceptibility of a contacted person by age.
pub const INFECTION_CHANCE_DISTRIBUTION: [(Real, Real); 4] =
    [(9., 0.05), (19., 0.1), (39., 0.2), (INF, 0.4)];

/// Scale applied on top of the susceptibility bands.
pub const INFECTION_CHANCE_FACTOR: Real = 0.28;

/// Numerator of the recovery rate: a person of age A recovers at a base rate
/// of CURE_AGE_SCALE / A per day.
pub const CURE_AGE_SCALE: Real = 10.0;

/// Time constant (days) with which the recovery rate saturates after
/// infection.
pub const CURE_SATURATION_DAYS: Real = 10.0;

///////////////////////////////////////////////////////////////////////////////
// Run configuration
///////////////////////////////////////////////////////////////////////////////

/// Stop conditions and retry policy of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, CopyGetters)]
#[serde(default)]
#[getset(get_copy = "pub")]
pub struct RunConfig {
    /// Last simulated day index; the run stops once it has been simulated.
    max_days: Time,

    /// Stop once the active population grows past this size.
    population_cap: usize,

    /// How many zero-death runs are discarded before giving up.
    max_attempts: usize,
}

impl RunConfig {
    pub fn new(max_days: Time, population_cap: usize, max_attempts: usize) -> Self {
        RunConfig {
            max_days,
            population_cap,
            max_attempts,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            max_days: 75,
            population_cap: 200_000,
            max_attempts: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::ForAge;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn death_bands() {
        assert_eq!(DEATH_CHANCE_DISTRIBUTION.for_age(5.), 0.0);
        assert_eq!(DEATH_CHANCE_DISTRIBUTION.for_age(9.), 0.0);
        assert_eq!(DEATH_CHANCE_DISTRIBUTION.for_age(45.), 0.004);
        assert_eq!(DEATH_CHANCE_DISTRIBUTION.for_age(79.), 0.08);
        assert_eq!(DEATH_CHANCE_DISTRIBUTION.for_age(100.), 0.148);
    }

    #[test]
    fn infection_bands() {
        assert_eq!(INFECTION_CHANCE_DISTRIBUTION.for_age(3.), 0.05);
        assert_eq!(INFECTION_CHANCE_DISTRIBUTION.for_age(19.), 0.1);
        assert_eq!(INFECTION_CHANCE_DISTRIBUTION.for_age(20.), 0.2);
        assert_eq!(INFECTION_CHANCE_DISTRIBUTION.for_age(64.), 0.4);
    }

    #[test]
    fn germany_table_total() {
        let total: Real = GERMANY_AGE_DISTRIBUTION.iter().map(|&(_, w)| w).sum();
        assert_approx_eq!(total, 82.61, 0.01);
    }

    #[test]
    fn config_roundtrip() {
        let config = RunConfig::default();
        let data = toml::to_string(&config).unwrap();
        let config_: RunConfig = toml::from_str(&data).unwrap();
        assert_eq!(config, config_);
    }
}
