// File: ./src/engine/assemble.rs
// Turns one block into a task, or explains why it could not.
use crate::engine::fields::{
    TitleSource, classify_priority, collect_leftovers, extract_description, extract_location,
    extract_title, guess_category,
};
use crate::engine::lines::{BlockView, LabelMatcher, clean_title};
use crate::engine::patterns::Matchers;
use crate::engine::rules::{TimeHit, resolve_date, resolve_time};
use crate::engine::splitter::TaskBlock;
use crate::model::{Category, ExtractedFields, Locale, ParsedTask, Schedule};
use chrono::NaiveDate;

/// Run every extractor over one block.
pub fn extract_fields(
    block: &TaskBlock,
    labels: &LabelMatcher,
    m: &Matchers,
    categories: &[Category],
    today: NaiveDate,
) -> ExtractedFields {
    let view = BlockView::new(&block.text, labels);
    let mut fields = ExtractedFields::default();

    let title = extract_title(&view, m);
    let title_line = title.as_ref().and_then(|t| t.line);
    if let Some(hit) = title {
        log::debug!(
            "Block #{}: title '{}' from {:?}",
            block.ordinal,
            hit.title,
            hit.source
        );
        fields.title_from_label = hit.source == TitleSource::Label;
        fields.title = Some(hit.title);
    }

    match resolve_date(&view, m, today) {
        Some((date, rule)) => {
            log::debug!("Block #{}: date {} via {:?}", block.ordinal, date, rule);
            fields.date = Some(date);
            fields.date_found = true;
        }
        None => fields.date = Some(today),
    }

    match resolve_time(&view, m) {
        Some((TimeHit::Span(span), rule)) => {
            log::debug!(
                "Block #{}: time {:?} via {:?} ({:?})",
                block.ordinal,
                span,
                rule,
                rule.kind()
            );
            fields.time_span = Some(span);
            fields.is_all_day = false;
        }
        Some((TimeHit::AllDay, rule)) => {
            log::debug!("Block #{}: all day via {:?}", block.ordinal, rule);
        }
        None => {}
    }

    fields.description = match extract_description(&view) {
        Some(desc) => desc,
        None => collect_leftovers(&view, title_line, m, categories),
    };
    fields.location = extract_location(&view);
    fields.category_guess = guess_category(&view, categories);
    fields.priority = classify_priority(&block.text, m);

    if fields.title.is_none() && !fields.description.is_empty() {
        let (first, rest) = match fields.description.split_once('\n') {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (fields.description.clone(), String::new()),
        };
        let promoted = clean_title(&first);
        if !promoted.is_empty() {
            fields.title = Some(promoted);
            fields.description = rest;
        }
    }

    fields
}

/// Apply title fallback and the usefulness check.
/// `Err` carries the warning text for a rejected block.
pub fn assemble(
    block: &TaskBlock,
    fields: ExtractedFields,
    locale: &Locale,
    today: NaiveDate,
) -> Result<ParsedTask, String> {
    let has_content = !fields.description.is_empty()
        || !fields.location.is_empty()
        || fields.has_time_signal()
        || fields.date_found;

    let title = match fields.title {
        Some(t) => t,
        None if has_content => locale.messages.untitled.clone(),
        None => {
            log::debug!("Block #{}: nothing usable, skipping", block.ordinal);
            return Err(locale.messages.not_enough_info_for(block.ordinal));
        }
    };

    let date = fields.date.unwrap_or(today);
    let schedule = match (fields.is_all_day, fields.time_span) {
        (false, Some(span)) => {
            let (start, end) = span.on(date);
            Schedule::Timed { start, end }
        }
        _ => Schedule::AllDay(date),
    };

    Ok(ParsedTask {
        ordinal: block.ordinal,
        title,
        schedule,
        description: fields.description,
        location: fields.location,
        category_guess: fields.category_guess,
        priority: fields.priority,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::NaiveTime;

    fn run(text: &str) -> (ExtractedFields, Result<ParsedTask, String>) {
        let locale = Locale::english();
        let labels = LabelMatcher::new(&locale.labels).unwrap();
        let m = Matchers::new(&locale).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let block = TaskBlock {
            ordinal: 2,
            text: text.to_string(),
        };
        let fields = extract_fields(&block, &labels, &m, &[], today);
        let task = assemble(&block, fields.clone(), &locale, today);
        (fields, task)
    }

    #[test]
    fn test_label_only_block_is_rejected() {
        let (_, task) = run("Priority: Medium\nCategory: Misc");
        assert_eq!(
            task.unwrap_err(),
            "block #2 does not contain enough information to create a task"
        );
    }

    #[test]
    fn test_placeholder_title_when_other_fields_exist() {
        let (fields, task) = run("Location: Gym\nTime: 07:00");
        assert!(fields.title.is_none());
        let task = task.unwrap();
        assert_eq!(task.title, "Untitled");
        assert_eq!(task.location, "Gym");
        assert!(!task.schedule.is_all_day());
    }

    #[test]
    fn test_leftover_line_promoted_to_title() {
        let long_intro = format!("Date: tomorrow\n{}\nPack the bags", "word ".repeat(30));
        let (_, task) = run(&long_intro);
        let task = task.unwrap();
        assert!(task.title.starts_with("word word"));
        assert_eq!(task.description, "Pack the bags");
    }

    #[test]
    fn test_description_label_suppresses_leftovers() {
        let (fields, _) = run("Title: Trip\nstray note\nDescription: pack light");
        assert_eq!(fields.description, "pack light");
    }

    #[test]
    fn test_defaults() {
        let (fields, task) = run("Buy milk");
        assert_eq!(fields.priority, Priority::Medium);
        assert!(!fields.date_found);
        let task = task.unwrap();
        assert_eq!(
            task.schedule,
            Schedule::AllDay(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
        );
    }

    #[test]
    fn test_timed_schedule_uses_resolved_date() {
        let (_, task) = run("Dentist tomorrow at 09:30");
        let d = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(
            task.unwrap().schedule,
            Schedule::Timed {
                start: d.and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
                end: d.and_time(NaiveTime::from_hms_opt(10, 30, 0).unwrap()),
            }
        );
    }
}
