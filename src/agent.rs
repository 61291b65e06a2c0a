use crate::params::{
    CURE_AGE_SCALE, CURE_SATURATION_DAYS, DEATH_CHANCE_DISTRIBUTION, DEATH_CHANCE_FACTOR,
    INFECTION_CHANCE_DISTRIBUTION, INFECTION_CHANCE_FACTOR,
};
use crate::prelude::{ForAge, Real, Time, INF};
use crate::sampler::AgeSampler;
use getset::CopyGetters;
use rand::Rng;

/// What happened to an agent after resolving one simulated day.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Dead,
    Cured,
    Infectious,
}

/// One simulated person: an age drawn from the demographic distribution and
/// the number of days since infection. Agents only exist once infected; there
/// is no susceptible-but-healthy representation.
#[derive(Debug, Clone, Copy, PartialEq, Default, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Person {
    age: Real,
    days_since_infection: Time,
}

impl Person {
    /// Create an agent with the given age and a fresh infection clock.
    pub fn new(age: Real) -> Self {
        Person {
            age,
            days_since_infection: 0,
        }
    }

    /// Create a newly infected agent with a random age.
    pub fn sample(sampler: &AgeSampler, rng: &mut impl Rng) -> Self {
        Person::new(sampler.sample(rng))
    }

    /// Raw recovery rate: grows with time since infection and shrinks with
    /// age. Unbounded; see cure_chance for the probability.
    fn cure_function(&self) -> Real {
        if self.age <= 0.0 {
            // the division below diverges; the clamp turns this into certainty
            return INF;
        }
        (CURE_AGE_SCALE / self.age)
            * (1.0 - (-(self.days_since_infection as Real) / CURE_SATURATION_DAYS).exp())
    }

    /// Probability of recovering today.
    pub fn cure_chance(&self) -> Real {
        self.cure_function().clamp(0.0, 1.0)
    }

    /// Probability of dying today.
    pub fn death_chance(&self) -> Real {
        DEATH_CHANCE_FACTOR * DEATH_CHANCE_DISTRIBUTION.for_age(self.age)
    }

    /// Probability that this person catches the infection when exposed.
    pub fn infection_chance(&self) -> Real {
        INFECTION_CHANCE_FACTOR * INFECTION_CHANCE_DISTRIBUTION.for_age(self.age)
    }

    /// Daily contact count; drops as the infection progresses and the agent
    /// isolates.
    pub fn number_of_people_met(day: Time) -> usize {
        match day {
            d if d <= 7 => 4,
            d if d <= 21 => 2,
            _ => 1,
        }
    }

    /// One independent uniform draw against cure_chance.
    pub fn gets_cured(&self, rng: &mut impl Rng) -> bool {
        rng.gen_bool(self.cure_chance())
    }

    /// One independent uniform draw against death_chance.
    pub fn dies(&self, rng: &mut impl Rng) -> bool {
        rng.gen_bool(self.death_chance())
    }

    /// Advance the infection clock by one day and resolve the outcome.
    /// Death is checked before cure and whichever hits ends the day.
    pub fn step(&mut self, rng: &mut impl Rng) -> Outcome {
        self.days_since_infection += 1;
        if self.dies(rng) {
            Outcome::Dead
        } else if self.gets_cured(rng) {
            Outcome::Cured
        } else {
            Outcome::Infectious
        }
    }
}
