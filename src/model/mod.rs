// File: ./src/model/mod.rs
pub mod display;
pub mod item;
pub mod locale;

pub use display::TaskDisplay;
pub use item::{
    Category, ExtractedFields, ParseOutcome, ParsedTask, Priority, Schedule, Subtask, TaskRecord,
    TimeSpan,
};
pub use locale::{Keywords, Labels, Locale, Messages};
