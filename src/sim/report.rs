use crate::agent::Person;
use crate::prelude::Real;
use getset::Getters;
use std::collections::HashMap;

/// Everything a finished run hands to the reporting stage: the two per-day
/// curves (index = day) and the terminal agent collections.
#[derive(Debug, Clone, Default, Getters)]
#[getset(get = "pub")]
pub struct RunReport {
    /// Size of the active population at the end of each day, seeded with the
    /// initial population of one.
    active_by_day: Vec<usize>,

    /// Cumulative death count at the end of each day, seeded with zero.
    death_toll_by_day: Vec<usize>,

    /// Every agent infected through an exposure, in insertion order.
    infections: Vec<Person>,

    /// Agents that died, in order of death.
    deaths: Vec<Person>,

    /// Agents that recovered, in order of recovery.
    cured: Vec<Person>,
}

impl RunReport {
    /// Fresh report with the day-zero row already recorded.
    pub(crate) fn seeded(initial_active: usize) -> Self {
        let mut report = RunReport::default();
        report.active_by_day.push(initial_active);
        report.death_toll_by_day.push(0);
        return report;
    }

    pub(crate) fn record_infection(&mut self, person: Person) {
        self.infections.push(person);
    }

    pub(crate) fn record_death(&mut self, person: Person) {
        self.deaths.push(person);
    }

    pub(crate) fn record_cure(&mut self, person: Person) {
        self.cured.push(person);
    }

    /// Close the day: snapshot the active count and the cumulative toll.
    pub(crate) fn close_day(&mut self, active: usize) {
        self.active_by_day.push(active);
        self.death_toll_by_day.push(self.deaths.len());
    }

    /// Everyone who was ever infected, the index case included.
    pub fn total_infected(&self) -> usize {
        self.active_by_day.first().copied().unwrap_or(0) + self.infections.len()
    }

    /// Deaths as a fraction of resolved cases (deaths plus cures).
    pub fn case_fatality_ratio(&self) -> Real {
        let resolved = self.deaths.len() + self.cured.len();
        if resolved == 0 {
            return 0.0;
        }
        self.deaths.len() as Real / resolved as Real
    }

    /// Render the two per-day curves as CSV rows below the given header.
    pub fn render_curves_csv(&self, head: &str) -> String {
        let mut data = head.to_string();
        let days = self.active_by_day.iter().zip(&self.death_toll_by_day);
        for (day, (active, toll)) in days.enumerate() {
            data.push('\n');
            data.push_str(&format!("{},{},{}", day, active, toll));
        }
        return data;
    }
}

/// Count agents per 10-year age bucket (nearest multiple of ten).
pub fn age_histogram(group: &[Person]) -> HashMap<u32, usize> {
    let mut res: HashMap<u32, usize> = HashMap::new();
    for person in group {
        let bucket = 10 * (person.age() / 10.0).round() as u32;
        *res.entry(bucket).or_insert(0) += 1;
    }
    return res;
}
