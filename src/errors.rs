//! All errors that can occur in the outbreak library.

use std::fmt;

#[derive(Clone, Debug)]
pub enum EpidemicError {
    ConfigurationError(String),
    SimulationError(String),
}

impl fmt::Display for EpidemicError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpidemicError::ConfigurationError(message) => {
                write!(f, "ConfigurationError: {}", message)
            }
            EpidemicError::SimulationError(message) => {
                write!(f, "SimulationError: {}", message)
            }
        }
    }
}

impl std::error::Error for EpidemicError {}
