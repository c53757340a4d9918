// File: ./src/engine/fields.rs
// Title, description, location, category and priority extraction.
use crate::engine::lines::{BlockView, Label, clean_title};
use crate::engine::patterns::Matchers;
use crate::model::{Category, Priority};

/// Titles longer than this are not taken from a bare first line.
pub const MAX_TITLE_LINE_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    Label,
    /// Text of the first line before its first date/time expression.
    FirstLinePrefix,
    FirstLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleHit {
    pub title: String,
    pub source: TitleSource,
    /// Index of the line the title consumed, if it was not a label.
    pub line: Option<usize>,
}

pub fn extract_title(view: &BlockView, m: &Matchers) -> Option<TitleHit> {
    if let Some(value) = view.values(Label::Title).map(clean_title).find(|v| !v.is_empty()) {
        return Some(TitleHit {
            title: value,
            source: TitleSource::Label,
            line: None,
        });
    }

    let first = view.first_line()?;
    if first.label.is_some() {
        return None;
    }

    if let Some(at) = m.first_token_at(first.text) {
        let prefix = clean_title(&first.text[..at]);
        if !prefix.is_empty() {
            return Some(TitleHit {
                title: prefix,
                source: TitleSource::FirstLinePrefix,
                line: Some(first.index),
            });
        }
    }

    let whole = clean_title(first.text);
    if !whole.is_empty() && first.text.trim().chars().count() < MAX_TITLE_LINE_CHARS {
        return Some(TitleHit {
            title: whole,
            source: TitleSource::FirstLine,
            line: Some(first.index),
        });
    }
    None
}

/// Text after a description label up to the next labeled line.
/// Returns `None` when the block has no description label at all.
pub fn extract_description(view: &BlockView) -> Option<String> {
    let start = view.lines.iter().position(|l| l.is_label(Label::Description))?;
    let mut parts = Vec::new();
    if let Some((_, value)) = &view.lines[start].label
        && !value.is_empty()
    {
        parts.push(value.clone());
    }
    for line in &view.lines[start + 1..] {
        if line.label.is_some() {
            break;
        }
        parts.push(line.text.trim().to_string());
    }
    Some(parts.join("\n").trim().to_string())
}

pub fn extract_location(view: &BlockView) -> String {
    view.first_value(Label::Location)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Label value verbatim, else the first known category named in the block.
pub fn guess_category(view: &BlockView, categories: &[Category]) -> String {
    if let Some(value) = view.first_value(Label::Category) {
        return value.to_string();
    }
    let lower = view.text.to_lowercase();
    categories
        .iter()
        .find(|c| !c.name.trim().is_empty() && lower.contains(&c.name.to_lowercase()))
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

pub fn classify_priority(text: &str, m: &Matchers) -> Priority {
    if m.has(&m.high_priority, text) {
        Priority::High
    } else if m.has(&m.low_priority, text) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// True when a free line says nothing beyond dates, times, priority words
/// and category names, i.e. everything in it was already picked up.
pub fn is_metadata_only(line: &str, m: &Matchers, categories: &[Category]) -> bool {
    let mut rest = m.strip_tokens(line).to_lowercase();
    for cat in categories {
        let name = cat.name.trim().to_lowercase();
        if !name.is_empty() {
            rest = rest.replace(&name, " ");
        }
    }
    !rest.chars().any(char::is_alphanumeric)
}

/// Lines nobody claimed: not labeled, not the title line, not pure metadata.
pub fn collect_leftovers(
    view: &BlockView,
    title_line: Option<usize>,
    m: &Matchers,
    categories: &[Category],
) -> String {
    view.lines
        .iter()
        .filter(|l| l.label.is_none() && !l.is_blank())
        .filter(|l| Some(l.index) != title_line)
        .filter(|l| !is_metadata_only(l.text, m, categories))
        .map(|l| l.text.trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lines::LabelMatcher;
    use crate::model::Locale;

    fn setup(locale: Locale) -> (LabelMatcher, Matchers) {
        (
            LabelMatcher::new(&locale.labels).unwrap(),
            Matchers::new(&locale).unwrap(),
        )
    }

    fn title(text: &str) -> Option<TitleHit> {
        let (labels, m) = setup(Locale::english());
        extract_title(&BlockView::new(text, &labels), &m)
    }

    #[test]
    fn test_title_precedence() {
        let hit = title("Gym session tomorrow\n**Title:** Gym.").unwrap();
        assert_eq!(hit.title, "Gym");
        assert_eq!(hit.source, TitleSource::Label);

        let hit = title("Meeting with Anna tomorrow at 11:00").unwrap();
        assert_eq!(hit.title, "Meeting with Anna");
        assert_eq!(hit.source, TitleSource::FirstLinePrefix);
        assert_eq!(hit.line, Some(0));

        let hit = title("Tomorrow: dentist").unwrap();
        assert_eq!(hit.title, "Tomorrow: dentist");
        assert_eq!(hit.source, TitleSource::FirstLine);
    }

    #[test]
    fn test_no_title_from_label_line_or_long_line() {
        assert!(title("Date: tomorrow\nPack bags").is_none());
        let long = "x".repeat(MAX_TITLE_LINE_CHARS + 5);
        assert!(title(&long).is_none());
    }

    #[test]
    fn test_description_stops_at_next_label() {
        let (labels, _) = setup(Locale::english());
        let text = "Title: Demo\nDescription: bring laptop\n  and charger\nLocation: HQ\nnot part";
        let view = BlockView::new(text, &labels);
        assert_eq!(
            extract_description(&view),
            Some("bring laptop\nand charger".to_string())
        );
        assert_eq!(extract_location(&view), "HQ");

        let view = BlockView::new("Title: Demo", &labels);
        assert_eq!(extract_description(&view), None);
    }

    #[test]
    fn test_category_guess() {
        let (labels, _) = setup(Locale::english());
        let cats = vec![Category::new("c1", "Work"), Category::new("c2", "Personal")];

        let view = BlockView::new("Call mom\nCategory: Family", &labels);
        assert_eq!(guess_category(&view, &cats), "Family");

        let view = BlockView::new("Dinner, personal stuff, after work", &labels);
        assert_eq!(guess_category(&view, &cats), "Work");

        let view = BlockView::new("Dinner", &labels);
        assert_eq!(guess_category(&view, &cats), "");
    }

    #[test]
    fn test_priority_classes() {
        let (_, m) = setup(Locale::english());
        assert_eq!(classify_priority("urgent, but low effort", &m), Priority::High);
        assert_eq!(classify_priority("Priority: Low", &m), Priority::Low);
        assert_eq!(classify_priority("Priority: Medium", &m), Priority::Medium);

        let (_, m) = setup(Locale::russian());
        assert_eq!(classify_priority("Приоритет: Важно", &m), Priority::High);
        assert_eq!(classify_priority("это неважно", &m), Priority::Low);
    }

    #[test]
    fn test_leftovers_skip_metadata_lines() {
        let (labels, m) = setup(Locale::english());
        let cats = vec![Category::new("c1", "Work")];
        let text = "Standup\ntomorrow at 10:00\nWork, urgent\nbring the slides\nDate: today";
        let view = BlockView::new(text, &labels);
        assert_eq!(collect_leftovers(&view, Some(0), &m, &cats), "bring the slides");
    }
}
