// File: ./src/model/item.rs
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A category known to the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Clock times found in a block. A missing `end` means "one hour after start".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
}

impl TimeSpan {
    pub fn single(start: NaiveTime) -> Self {
        Self { start, end: None }
    }

    pub fn range(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Anchor the span on a date. An end that is missing or earlier than the
    /// start becomes start + 1 hour, which may roll over to the next day.
    pub fn on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = date.and_time(self.start);
        let end = match self.end {
            Some(end) if end >= self.start => date.and_time(end),
            _ => start + Duration::hours(1),
        };
        (start, end)
    }
}

/// Per-block intermediate state filled by the field extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub title: Option<String>,
    /// True when the title came from an explicit label line.
    pub title_from_label: bool,
    pub date: Option<NaiveDate>,
    /// True when a date rule other than the "today" default matched.
    pub date_found: bool,
    pub time_span: Option<TimeSpan>,
    pub is_all_day: bool,
    pub description: String,
    pub location: String,
    pub category_guess: String,
    pub priority: Priority,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self {
            title: None,
            title_from_label: false,
            date: None,
            date_found: false,
            time_span: None,
            is_all_day: true,
            description: String::new(),
            location: String::new(),
            category_guess: String::new(),
            priority: Priority::Medium,
        }
    }
}

impl ExtractedFields {
    pub fn has_time_signal(&self) -> bool {
        !self.is_all_day && self.time_span.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    AllDay(NaiveDate),
    Timed {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl Schedule {
    pub fn is_all_day(&self) -> bool {
        matches!(self, Schedule::AllDay(_))
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Schedule::AllDay(d) => *d,
            Schedule::Timed { start, .. } => start.date(),
        }
    }

    /// `YYYY-MM-DD` for all-day tasks, `YYYY-MM-DDTHH:MM` otherwise.
    pub fn start_string(&self) -> String {
        match self {
            Schedule::AllDay(d) => d.format(DATE_FORMAT).to_string(),
            Schedule::Timed { start, .. } => start.format(DATE_TIME_FORMAT).to_string(),
        }
    }

    pub fn end_string(&self) -> String {
        match self {
            Schedule::AllDay(d) => d.format(DATE_FORMAT).to_string(),
            Schedule::Timed { end, .. } => end.format(DATE_TIME_FORMAT).to_string(),
        }
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A task recovered from one block, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    /// 1-based position of the source block.
    pub ordinal: usize,
    pub title: String,
    pub schedule: Schedule,
    pub description: String,
    pub location: String,
    pub category_guess: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// The record handed to the calendar and to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub category_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub is_all_day: bool,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Category text as the assistant wrote it. Display only.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category_guess: String,
}

impl TaskRecord {
    /// Decode `start`/`end` back into a schedule.
    pub fn schedule(&self) -> Option<Schedule> {
        if self.is_all_day {
            let d = NaiveDate::parse_from_str(&self.start, DATE_FORMAT).ok()?;
            return Some(Schedule::AllDay(d));
        }
        let start = NaiveDateTime::parse_from_str(&self.start, DATE_TIME_FORMAT).ok()?;
        let end = NaiveDateTime::parse_from_str(&self.end, DATE_TIME_FORMAT).ok()?;
        Some(Schedule::Timed { start, end })
    }
}

/// What `parse` returns. Records and a warning together mean partial success.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub records: Vec<TaskRecord>,
    pub warning: Option<String>,
}

impl ParseOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            warning: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_span_end_fallbacks() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        let (s, e) = TimeSpan::single(t(9, 0)).on(d);
        assert_eq!(s, d.and_time(t(9, 0)));
        assert_eq!(e, d.and_time(t(10, 0)));

        // End before start is replaced, not kept.
        let (_, e) = TimeSpan::range(t(15, 0), t(14, 0)).on(d);
        assert_eq!(e, d.and_time(t(16, 0)));

        // Late single time rolls over midnight.
        let (_, e) = TimeSpan::single(t(23, 30)).on(d);
        assert_eq!(e.date(), d.succ_opt().unwrap());
        assert_eq!(e.time(), t(0, 30));
    }

    #[test]
    fn test_priority_strings() {
        assert_eq!(Priority::High.to_string(), "High");
        assert_eq!(Priority::from_str("low").unwrap(), Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"Medium\"");
    }

    #[test]
    fn test_record_json_shape() {
        let rec = TaskRecord {
            id: "x".to_string(),
            category_id: None,
            title: "Gym".to_string(),
            description: String::new(),
            is_all_day: true,
            start: "2026-03-10".to_string(),
            end: "2026-03-10".to_string(),
            location: String::new(),
            priority: Priority::Low,
            completed: false,
            subtasks: vec![],
            category_guess: String::new(),
        };
        let v: serde_json::Value = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["categoryId"], serde_json::Value::Null);
        assert_eq!(v["isAllDay"], true);
        assert_eq!(v["priority"], "Low");
        assert!(v.get("categoryGuess").is_none());
        assert_eq!(
            rec.schedule(),
            Some(Schedule::AllDay(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()))
        );
    }
}
