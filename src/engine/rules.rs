// File: ./src/engine/rules.rs
// Date and time resolution as ordered lists of small rules.
//
// Each rule is one enum variant with its own `apply`. The resolvers walk the
// list in order and stop at the first hit, so priority lives in `ORDER` and
// nowhere else.
use crate::engine::lines::{BlockView, Label};
use crate::engine::patterns::Matchers;
use crate::model::TimeSpan;
use chrono::{Duration, NaiveDate, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Reads the value of a `Label: value` line.
    LabeledLine,
    /// Looks for a fixed word anywhere in the block.
    Keyword,
    /// Looks for a digit pattern anywhere in the block.
    Pattern,
}

// --- DATE ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    LabeledLiteral,
    RelativeKeyword,
    UnlabeledLiteral,
}

impl DateRule {
    pub const ORDER: [DateRule; 3] = [
        DateRule::LabeledLiteral,
        DateRule::RelativeKeyword,
        DateRule::UnlabeledLiteral,
    ];

    pub fn kind(&self) -> RuleKind {
        match self {
            DateRule::LabeledLiteral => RuleKind::LabeledLine,
            DateRule::RelativeKeyword => RuleKind::Keyword,
            DateRule::UnlabeledLiteral => RuleKind::Pattern,
        }
    }

    pub fn apply(&self, view: &BlockView, m: &Matchers, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateRule::LabeledLiteral => view.values(Label::Date).find_map(|v| m.find_date(v)),
            DateRule::RelativeKeyword => {
                // "day after tomorrow" contains "tomorrow", so it goes first.
                let offsets = [
                    (&m.day_after_tomorrow, 2),
                    (&m.tomorrow, 1),
                    (&m.today, 0),
                ];
                offsets
                    .into_iter()
                    .find(|(re, _)| m.has(re, view.text))
                    .map(|(_, days)| today + Duration::days(days))
            }
            DateRule::UnlabeledLiteral => m.find_date(view.text),
        }
    }
}

/// First matching date rule, or `None` when the block names no date.
pub fn resolve_date(
    view: &BlockView,
    m: &Matchers,
    today: NaiveDate,
) -> Option<(NaiveDate, DateRule)> {
    DateRule::ORDER
        .iter()
        .find_map(|rule| rule.apply(view, m, today).map(|d| (d, *rule)))
}

// --- TIME ---

pub const MORNING: (u32, u32) = (9, 0);
pub const MIDDAY: (u32, u32) = (13, 0);
pub const EVENING: (u32, u32) = (18, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeHit {
    Span(TimeSpan),
    AllDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRule {
    LabeledRange,
    LabeledSingle,
    LabeledAllDay,
    Range,
    Single,
    DayPart,
    AllDayKeyword,
}

impl TimeRule {
    pub const ORDER: [TimeRule; 7] = [
        TimeRule::LabeledRange,
        TimeRule::LabeledSingle,
        TimeRule::LabeledAllDay,
        TimeRule::Range,
        TimeRule::Single,
        TimeRule::DayPart,
        TimeRule::AllDayKeyword,
    ];

    pub fn kind(&self) -> RuleKind {
        match self {
            TimeRule::LabeledRange | TimeRule::LabeledSingle | TimeRule::LabeledAllDay => {
                RuleKind::LabeledLine
            }
            TimeRule::Range | TimeRule::Single => RuleKind::Pattern,
            TimeRule::DayPart | TimeRule::AllDayKeyword => RuleKind::Keyword,
        }
    }

    pub fn apply(&self, view: &BlockView, m: &Matchers) -> Option<TimeHit> {
        let span = |(start, end): (NaiveTime, NaiveTime)| TimeHit::Span(TimeSpan::range(start, end));
        let single = |start: NaiveTime| TimeHit::Span(TimeSpan::single(start));
        match self {
            TimeRule::LabeledRange => view.values(Label::Time).find_map(|v| m.find_range(v)).map(span),
            TimeRule::LabeledSingle => view.values(Label::Time).find_map(|v| m.find_clock(v)).map(single),
            TimeRule::LabeledAllDay => view
                .values(Label::Time)
                .any(|v| m.has_all_day(v))
                .then_some(TimeHit::AllDay),
            TimeRule::Range => m.find_range(view.text).map(span),
            TimeRule::Single => m.find_clock(view.text).map(single),
            TimeRule::DayPart => {
                let parts = [(&m.morning, MORNING), (&m.midday, MIDDAY), (&m.evening, EVENING)];
                parts
                    .into_iter()
                    .find(|(re, _)| m.has(re, view.text))
                    .and_then(|(_, (h, min))| NaiveTime::from_hms_opt(h, min, 0))
                    .map(single)
            }
            TimeRule::AllDayKeyword => m.has_all_day(view.text).then_some(TimeHit::AllDay),
        }
    }
}

/// First matching time rule. An all-day keyword anywhere in the block wins
/// over any clock time found before it.
pub fn resolve_time(view: &BlockView, m: &Matchers) -> Option<(TimeHit, TimeRule)> {
    let hit = TimeRule::ORDER
        .iter()
        .find_map(|rule| rule.apply(view, m).map(|h| (h, *rule)))?;
    if matches!(hit.0, TimeHit::Span(_)) && m.has_all_day(view.text) {
        return Some((TimeHit::AllDay, TimeRule::AllDayKeyword));
    }
    Some(hit)
}
