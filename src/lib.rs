// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod model;
pub mod prompt;
pub mod storage;

pub use engine::{Engine, Extraction, parse};
pub use model::{Category, Locale, ParseOutcome, Priority, TaskRecord};
