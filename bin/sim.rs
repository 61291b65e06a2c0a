use std::fs;

use outbreak::params::GERMANY_AGE_DISTRIBUTION;
use outbreak::prelude::*;
use serde::{Deserialize, Serialize};

/// Runtime configuration, read from conf.toml when present.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    run: RunConfig,
    seed: Option<u64>,
    verbose: bool,
    age_table: String,
    epicurve: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            run: RunConfig::default(),
            seed: None,
            verbose: true,
            age_table: "ages.csv".to_string(),
            epicurve: "epicurve.csv".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct TableRow {
    age: Real,
    weight: Real,
}

/// Read a CSV of age,weight rows into a distribution table.
pub fn read_age_table(path: &str) -> csv::Result<Vec<(Real, Real)>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut table = Vec::new();
    for res in reader.deserialize() {
        let row: TableRow = res?;
        table.push((row.age, row.weight));
    }
    Ok(table)
}

pub fn main() {
    use simple_logger::SimpleLogger;
    SimpleLogger::new().init().unwrap();

    let cfg: Config = match fs::read_to_string("conf.toml") {
        Ok(data) => toml::from_str(&data).unwrap(),
        _ => Config::default(),
    };
    if cfg.verbose {
        println!("{:#?}", cfg);
    }

    let sampler = match read_age_table(&cfg.age_table) {
        Ok(table) => {
            println!("Using age distribution from {}", cfg.age_table);
            AgeSampler::from_table(&table).unwrap()
        }
        _ => AgeSampler::from_table(&GERMANY_AGE_DISTRIBUTION).unwrap(),
    };

    let mut sim = Simulation::new(sampler, cfg.run);
    if let Some(seed) = cfg.seed {
        sim.seed(seed);
    }
    let report = sim.run().unwrap();

    println!("simulated days:  {}", report.active_by_day().len() - 1);
    println!("total infected:  {}", report.total_infected());
    println!("deaths:          {}", report.deaths().len());
    println!("cured:           {}", report.cured().len());
    println!("case fatality:   {:.4}", report.case_fatality_ratio());
    println!("infections by age: {:?}", age_histogram(report.infections()));
    println!("deaths by age:     {:?}", age_histogram(report.deaths()));
    println!("cured by age:      {:?}", age_histogram(report.cured()));

    fs::write(&cfg.epicurve, report.render_curves_csv("day,active,dead")).unwrap();
}
