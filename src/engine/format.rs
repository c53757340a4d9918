// File: ./src/engine/format.rs
// Conversion between parsed tasks, exported records and labeled text.
use crate::model::{Category, Locale, ParsedTask, Priority, Schedule, TaskRecord};
use uuid::Uuid;

/// Exact, case-insensitive name match against the known categories.
pub fn resolve_category_id(guess: &str, categories: &[Category]) -> Option<String> {
    let guess = guess.trim().to_lowercase();
    if guess.is_empty() {
        return None;
    }
    categories
        .iter()
        .find(|c| c.name.trim().to_lowercase() == guess)
        .map(|c| c.id.clone())
}

pub fn to_record(task: &ParsedTask, categories: &[Category]) -> TaskRecord {
    TaskRecord {
        id: Uuid::new_v4().to_string(),
        category_id: resolve_category_id(&task.category_guess, categories),
        title: task.title.clone(),
        description: task.description.clone(),
        is_all_day: task.schedule.is_all_day(),
        start: task.schedule.start_string(),
        end: task.schedule.end_string(),
        location: task.location.clone(),
        priority: task.priority,
        completed: false,
        subtasks: Vec::new(),
        category_guess: task.category_guess.clone(),
    }
}

/// First alias of a label, capitalized for display.
pub fn label_name(aliases: &[String], fallback: &str) -> String {
    let word = aliases.first().map(String::as_str).unwrap_or(fallback);
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => fallback.to_string(),
    }
}

fn capitalize_first(word: &str) -> String {
    label_name(&[word.to_string()], word)
}

/// Write a record back as a labeled block the engine understands.
pub fn render_block(record: &TaskRecord, locale: &Locale) -> String {
    let labels = &locale.labels;
    let kw = &locale.keywords;
    let mut out = Vec::new();

    out.push(format!("{}: {}", label_name(&labels.title, "Title"), record.title));

    if let Some(schedule) = record.schedule() {
        out.push(format!(
            "{}: {}",
            label_name(&labels.date, "Date"),
            schedule.date().format(locale.display_date_format())
        ));
        let time = match schedule {
            Schedule::AllDay(_) => kw
                .all_day
                .first()
                .cloned()
                .unwrap_or_else(|| locale.messages.all_day.clone()),
            Schedule::Timed { start, end } => {
                format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
            }
        };
        out.push(format!("{}: {}", label_name(&labels.time, "Time"), time));
    }

    if !record.description.is_empty() {
        out.push(format!(
            "{}: {}",
            label_name(&labels.description, "Description"),
            record.description
        ));
    }
    if !record.location.is_empty() {
        out.push(format!(
            "{}: {}",
            label_name(&labels.location, "Location"),
            record.location
        ));
    }
    if !record.category_guess.is_empty() {
        out.push(format!(
            "{}: {}",
            label_name(&labels.category, "Category"),
            record.category_guess
        ));
    }
    let marker = match record.priority {
        Priority::High => kw.high_priority.first(),
        Priority::Low => kw.low_priority.first(),
        Priority::Medium => None,
    };
    if let Some(word) = marker {
        out.push(format!(
            "{}: {}",
            label_name(&labels.priority, "Priority"),
            capitalize_first(word)
        ));
    }

    out.join("\n")
}
