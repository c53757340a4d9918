// File: ./src/engine/lines.rs
// Line classification for one task block.
//
// A labeled line is `Label: value`, optionally wrapped in markdown the way
// chat models like to write it: `**Title:** Gym`, `**Title**: Gym`,
// `- Title: Gym`. Only the closed set of labels from the locale counts.
use crate::model::Labels;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Title,
    Date,
    Time,
    Description,
    Location,
    Category,
    Priority,
}

#[derive(Debug, Clone)]
pub struct LabelMatcher {
    re: Option<Regex>,
    by_alias: HashMap<String, Label>,
}

impl LabelMatcher {
    pub fn new(labels: &Labels) -> Result<Self> {
        let mut by_alias = HashMap::new();
        for (label, aliases) in [
            (Label::Title, &labels.title),
            (Label::Date, &labels.date),
            (Label::Time, &labels.time),
            (Label::Description, &labels.description),
            (Label::Location, &labels.location),
            (Label::Category, &labels.category),
            (Label::Priority, &labels.priority),
        ] {
            for alias in aliases {
                let key = normalize_alias(alias);
                if !key.is_empty() {
                    by_alias.entry(key).or_insert(label);
                }
            }
        }

        let mut aliases: Vec<&String> = by_alias.keys().collect();
        aliases.sort_by_key(|a| std::cmp::Reverse(a.chars().count()));
        let alt = aliases
            .iter()
            .map(|a| {
                a.split(' ')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|");
        if alt.is_empty() {
            return Ok(Self { re: None, by_alias });
        }
        let src = format!(
            r"(?i)^\s*(?:[-•]\s+)?[*_#]{{0,4}}\s*(?P<label>{})\s*[*_]{{0,3}}\s*:(?P<value>.*)$",
            alt
        );
        let re = Regex::new(&src).context("Failed to compile label pattern")?;
        Ok(Self {
            re: Some(re),
            by_alias,
        })
    }

    /// Returns the label and the cleaned value if `line` is a labeled line.
    pub fn classify(&self, line: &str) -> Option<(Label, String)> {
        let caps = self.re.as_ref()?.captures(line)?;
        let alias = normalize_alias(caps.name("label")?.as_str());
        let label = *self.by_alias.get(&alias)?;
        let value = clean_value(caps.name("value").map_or("", |m| m.as_str()));
        Some((label, value))
    }
}

fn normalize_alias(alias: &str) -> String {
    alias
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Trim whitespace and the markdown emphasis characters around a value.
pub fn clean_value(s: &str) -> String {
    s.trim()
        .trim_matches(|c: char| c == '*' || c == '_' || c == '`')
        .trim()
        .to_string()
}

/// `clean_value` plus trailing punctuation, for titles.
pub fn clean_title(s: &str) -> String {
    let s = clean_value(s.trim_start_matches(|c: char| c == '#' || c.is_whitespace()));
    s.trim_end_matches(|c: char| {
        c.is_whitespace() || matches!(c, ':' | '-' | '–' | '—' | '.' | ',' | ';' | '!' | '*' | '_')
    })
    .to_string()
}

#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub index: usize,
    pub text: &'a str,
    pub label: Option<(Label, String)>,
}

impl Line<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn is_label(&self, label: Label) -> bool {
        matches!(&self.label, Some((l, _)) if *l == label)
    }
}

/// A block's lines with their labels resolved once.
#[derive(Debug, Clone)]
pub struct BlockView<'a> {
    pub text: &'a str,
    pub lines: Vec<Line<'a>>,
}

impl<'a> BlockView<'a> {
    pub fn new(text: &'a str, labels: &LabelMatcher) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .map(|(index, text)| Line {
                index,
                text,
                label: labels.classify(text),
            })
            .collect();
        Self { text, lines }
    }

    /// Values of every line carrying `label`, in order.
    pub fn values(&self, label: Label) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(move |l| match &l.label {
            Some((found, value)) if *found == label => Some(value.as_str()),
            _ => None,
        })
    }

    /// First non-empty value for `label`.
    pub fn first_value(&self, label: Label) -> Option<&str> {
        self.values(label).find(|v| !v.is_empty())
    }

    pub fn has_label(&self, label: Label) -> bool {
        self.lines.iter().any(|l| l.is_label(label))
    }

    pub fn first_line(&self) -> Option<&Line<'a>> {
        self.lines.iter().find(|l| !l.is_blank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Locale;

    fn matcher() -> LabelMatcher {
        LabelMatcher::new(&Locale::english().labels).unwrap()
    }

    #[test]
    fn test_plain_and_markdown_labels() {
        let m = matcher();
        assert_eq!(m.classify("Title: Gym"), Some((Label::Title, "Gym".to_string())));
        assert_eq!(m.classify("**Title:** Gym"), Some((Label::Title, "Gym".to_string())));
        assert_eq!(m.classify("**Title**: Gym"), Some((Label::Title, "Gym".to_string())));
        assert_eq!(m.classify("- Where: Home"), Some((Label::Location, "Home".to_string())));
        assert_eq!(m.classify("  TIME : 10:00"), Some((Label::Time, "10:00".to_string())));
        assert_eq!(m.classify("Description:"), Some((Label::Description, String::new())));
    }

    #[test]
    fn test_non_labels() {
        let m = matcher();
        assert_eq!(m.classify("Timeline: next week"), None);
        assert_eq!(m.classify("Meeting at 10:00"), None);
        assert_eq!(m.classify("Date 12:00"), None);
        assert_eq!(m.classify("Day after tomorrow: gym"), None);
    }

    #[test]
    fn test_russian_labels() {
        let m = LabelMatcher::new(&Locale::russian().labels).unwrap();
        assert_eq!(m.classify("Дата: завтра"), Some((Label::Date, "завтра".to_string())));
        assert_eq!(m.classify("**Место:** офис"), Some((Label::Location, "офис".to_string())));
        assert_eq!(
            m.classify("Время: с 15:00 до 16:00"),
            Some((Label::Time, "с 15:00 до 16:00".to_string()))
        );
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("  Gym. "), "Gym");
        assert_eq!(clean_title("**Call mom**"), "Call mom");
        assert_eq!(clean_title("## Review -"), "Review");
    }
}
