//! Core library: decides when to save `movie.xml`, assembles it and writes
//! it without re-triggering the metadata refresh it came from.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod refresh;
pub mod renderers;
pub mod save_path;
pub mod saver;
pub mod update;
pub mod writer;
pub mod xml;

pub use error::SaveError;
pub use saver::{MetadataSaver, MovieXmlSaver, SaveOutcome, SaverRegistry};
