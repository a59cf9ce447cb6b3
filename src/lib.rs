//! Cutlist retrieval library
//!
//! Looks up the cutlists published for a recording, ranks them by user
//! rating and returns the first one that passes its consistency checks.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod parsers;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::RetrieveInteractor;
pub use domain::errors::DomainError;
pub use domain::model::{CandidateHeader, Cutlist, RetrievalOutcome, Segment};
pub use ports::{CutlistSourcePort, ProgressPort};
