// File: ./src/engine/patterns.rs
// Regexes compiled once per locale, plus the locale-independent digit patterns.
use crate::model::Locale;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").expect("valid clock regex"));

// 15.07.2026, 15/07/2026, 2026-07-15
static RE_DATE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,2}[./]\d{1,2}[./]\d{4}|\d{4}-\d{1,2}-\d{1,2})\b")
        .expect("valid date literal regex")
});

const CLOCK: &str = r"\d{1,2}:\d{2}";

/// Alternation of escaped phrases, longest first, with flexible inner spacing.
fn alternation(words: &[String]) -> Option<String> {
    let mut words: Vec<&String> = words.iter().filter(|w| !w.trim().is_empty()).collect();
    if words.is_empty() {
        return None;
    }
    words.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
    let parts: Vec<String> = words
        .iter()
        .map(|w| {
            w.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    Some(format!("(?:{})", parts.join("|")))
}

fn keyword_regex(words: &[String], what: &str) -> Result<Option<Regex>> {
    match alternation(words) {
        Some(alt) => {
            let re = Regex::new(&format!(r"(?i)\b{}\b", alt))
                .with_context(|| format!("Failed to compile {} keywords", what))?;
            Ok(Some(re))
        }
        None => Ok(None),
    }
}

fn is_match(re: &Option<Regex>, text: &str) -> bool {
    re.as_ref().is_some_and(|r| r.is_match(text))
}

fn clock(h: &str, m: &str) -> Option<NaiveTime> {
    let h = h.parse::<u32>().ok()?;
    let m = m.parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(h, m, 0)
}

/// Compiled keyword set for one locale.
#[derive(Debug, Clone)]
pub struct Matchers {
    pub today: Option<Regex>,
    pub tomorrow: Option<Regex>,
    pub day_after_tomorrow: Option<Regex>,
    pub all_day: Option<Regex>,
    pub morning: Option<Regex>,
    pub midday: Option<Regex>,
    pub evening: Option<Regex>,
    pub high_priority: Option<Regex>,
    pub low_priority: Option<Regex>,
    range: Regex,
    /// Any date/time expression, used to cut the title off the first line
    /// and to decide whether a free line carries nothing but a date/time.
    token: Regex,
    date_formats: Vec<String>,
}

impl Matchers {
    pub fn new(locale: &Locale) -> Result<Self> {
        let kw = &locale.keywords;

        let prefix = alternation(&kw.range_prefixes)
            .map(|p| format!(r"(?:\b{}[ \t]+)?", p))
            .unwrap_or_default();
        let mut connectors = vec!["-".to_string(), "–".to_string(), "—".to_string()];
        if let Some(words) = alternation(&kw.range_connectors) {
            connectors.push(format!(r"\b{}\b", words));
        }
        let range_src = format!(
            r"(?i){}\b(\d{{1,2}}):(\d{{2}})[ \t]*(?:{})[ \t]*(\d{{1,2}}):(\d{{2}})\b",
            prefix,
            connectors.join("|")
        );
        let range = Regex::new(&range_src).context("Failed to compile time range pattern")?;

        let mut lead_words = kw.range_prefixes.clone();
        lead_words.extend(kw.time_prepositions.iter().cloned());
        let lead = alternation(&lead_words)
            .map(|p| format!(r"(?:\b{}[ \t]+)?", p))
            .unwrap_or_default();
        let mut token_parts = vec![
            format!(r"{}\b{}(?:[ \t]*(?:-|–|—)[ \t]*{})?\b", lead, CLOCK, CLOCK),
            r"\b\d{1,2}[./]\d{1,2}[./]\d{4}\b".to_string(),
            r"\b\d{4}-\d{1,2}-\d{1,2}\b".to_string(),
        ];
        for group in [
            &kw.day_after_tomorrow,
            &kw.tomorrow,
            &kw.today,
            &kw.all_day,
            &kw.morning,
            &kw.midday,
            &kw.evening,
        ] {
            if let Some(alt) = alternation(group) {
                token_parts.push(format!(r"\b{}\b", alt));
            }
        }
        let token = Regex::new(&format!("(?i){}", token_parts.join("|")))
            .context("Failed to compile date/time token pattern")?;

        Ok(Self {
            today: keyword_regex(&kw.today, "today")?,
            tomorrow: keyword_regex(&kw.tomorrow, "tomorrow")?,
            day_after_tomorrow: keyword_regex(&kw.day_after_tomorrow, "day-after-tomorrow")?,
            all_day: keyword_regex(&kw.all_day, "all-day")?,
            morning: keyword_regex(&kw.morning, "morning")?,
            midday: keyword_regex(&kw.midday, "midday")?,
            evening: keyword_regex(&kw.evening, "evening")?,
            high_priority: keyword_regex(&kw.high_priority, "high priority")?,
            low_priority: keyword_regex(&kw.low_priority, "low priority")?,
            range,
            token,
            date_formats: locale.date_formats.clone(),
        })
    }

    pub fn has_all_day(&self, text: &str) -> bool {
        is_match(&self.all_day, text)
    }

    pub fn has(&self, re: &Option<Regex>, text: &str) -> bool {
        is_match(re, text)
    }

    /// First range whose both ends are valid clock times.
    pub fn find_range(&self, text: &str) -> Option<(NaiveTime, NaiveTime)> {
        self.range.captures_iter(text).find_map(|c: Captures| {
            let start = clock(&c[1], &c[2])?;
            let end = clock(&c[3], &c[4])?;
            Some((start, end))
        })
    }

    /// First valid `HH:MM`. Out-of-range candidates are skipped.
    pub fn find_clock(&self, text: &str) -> Option<NaiveTime> {
        RE_CLOCK
            .captures_iter(text)
            .find_map(|c| clock(&c[1], &c[2]))
    }

    /// First literal that parses under one of the locale's date formats.
    pub fn find_date(&self, text: &str) -> Option<NaiveDate> {
        RE_DATE_LITERAL.find_iter(text).find_map(|m| {
            self.date_formats
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(m.as_str(), fmt).ok())
        })
    }

    /// Byte offset of the first date/time expression in `text`.
    pub fn first_token_at(&self, text: &str) -> Option<usize> {
        self.token.find(text).map(|m| m.start())
    }

    pub fn strip_tokens(&self, text: &str) -> String {
        let mut out = self.token.replace_all(text, " ").into_owned();
        for re in [&self.high_priority, &self.low_priority].into_iter().flatten() {
            out = re.replace_all(&out, " ").into_owned();
        }
        out
    }
}
