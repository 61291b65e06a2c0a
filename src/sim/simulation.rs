use crate::agent::{Outcome, Person};
use crate::errors::EpidemicError;
use crate::params::{RunConfig, GERMANY_AGE_DISTRIBUTION};
use crate::prelude::Time;
use crate::sampler::AgeSampler;
use crate::sim::RunReport;
use getset::{CopyGetters, Getters};
use log::{info, warn};
use rand::prelude::{Rng, SeedableRng, SmallRng};
use std::cell::RefCell;

/// Day-by-day epidemic simulation started from a single infected agent.
///
/// Each day every agent carried over from the previous day ages its infection
/// by one day and resolves death, then cure. Survivors meet a day-dependent
/// number of fresh contacts, each of which may join the active population;
/// contacts infected today are appended after their infector and only act
/// from the next day on. The run stops at the configured day limit or
/// population cap, and runs that finish without a single death are discarded
/// and restarted up to the configured attempt count.
#[derive(Debug, Getters, CopyGetters)]
pub struct Simulation {
    sampler: AgeSampler,

    #[getset(get_copy = "pub")]
    config: RunConfig,

    #[getset(get = "pub")]
    active: Vec<Person>,

    #[getset(get = "pub")]
    report: RunReport,

    /// Index of the next day to simulate.
    #[getset(get_copy = "pub")]
    day: Time,

    rng: RefCell<SmallRng>,
}

impl Simulation {
    /// Create a new simulation drawing ages from the given sampler.
    pub fn new(sampler: AgeSampler, config: RunConfig) -> Self {
        Simulation {
            sampler,
            config,
            active: vec![],
            report: RunReport::default(),
            day: 0,
            rng: RefCell::new(SmallRng::from_entropy()),
        }
    }

    /// Simulation over the bundled demographic table with default config.
    pub fn from_defaults() -> Result<Self, EpidemicError> {
        let sampler = AgeSampler::from_table(&GERMANY_AGE_DISTRIBUTION)?;
        Ok(Simulation::new(sampler, RunConfig::default()))
    }

    /// Set seed for random number generator
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng.replace(SmallRng::seed_from_u64(seed));
        return self;
    }

    /// Run attempts until one produces at least one death, up to the
    /// configured bound, and return the report of the first fatal run.
    pub fn run(&mut self) -> Result<RunReport, EpidemicError> {
        let max_attempts = self.config.max_attempts().max(1);
        for attempt in 0..max_attempts {
            self.reset();
            while !self.stopped() {
                self.simulate_day();
            }
            if !self.report.deaths().is_empty() {
                return Ok(std::mem::take(&mut self.report));
            }
            warn!(
                "run [{}/{}] ended with no deaths, discarding",
                attempt + 1,
                max_attempts
            );
        }
        Err(EpidemicError::SimulationError(format!(
            "no deaths in any of {} runs",
            max_attempts
        )))
    }

    /// Discard all state of the previous attempt and start over from a
    /// single freshly sampled infection.
    fn reset(&mut self) {
        let rng = &mut *self.rng.borrow_mut();
        self.active = vec![Person::sample(&self.sampler, rng)];
        self.report = RunReport::seeded(self.active.len());
        self.day = 0;
    }

    /// Advance the active population by one day.
    fn simulate_day(&mut self) {
        let rng = &mut *self.rng.borrow_mut();
        let old_population = std::mem::take(&mut self.active);
        for mut person in old_population {
            match person.step(rng) {
                Outcome::Dead => self.report.record_death(person),
                Outcome::Cured => self.report.record_cure(person),
                Outcome::Infectious => {
                    self.active.push(person);
                    let contacts = Person::number_of_people_met(person.days_since_infection());
                    for _ in 0..contacts {
                        let contact = Person::sample(&self.sampler, rng);
                        if rng.gen_bool(contact.infection_chance()) {
                            self.active.push(contact);
                            self.report.record_infection(contact);
                        }
                    }
                }
            }
        }
        self.report.close_day(self.active.len());
        self.day += 1;
        info!(
            "day [{}]: {} active, {} dead, {} cured",
            self.day,
            self.active.len(),
            self.report.deaths().len(),
            self.report.cured().len()
        );
    }

    /// Stop conditions, checked after every simulated day.
    fn stopped(&self) -> bool {
        self.day > self.config.max_days() || self.active.len() > self.config.population_cap()
    }
}
