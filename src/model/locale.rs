// File: ./src/model/locale.rs
// Keyword sets that drive the extraction engine.
//
// Nothing in the engine hardcodes a word: separator, labels, relative date
// words, day parts and priority markers all come from a `Locale` value that
// the caller passes in.
use serde::{Deserialize, Serialize};

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Label aliases for each recognized `Label: value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub title: Vec<String>,
    pub date: Vec<String>,
    pub time: Vec<String>,
    pub description: Vec<String>,
    pub location: Vec<String>,
    pub category: Vec<String>,
    pub priority: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    pub today: Vec<String>,
    pub tomorrow: Vec<String>,
    pub day_after_tomorrow: Vec<String>,
    pub all_day: Vec<String>,
    /// Optional word in front of a range ("from 10:00 to 12:00").
    pub range_prefixes: Vec<String>,
    /// Words between the two ends of a range. Dashes are always accepted.
    pub range_connectors: Vec<String>,
    /// Word that may precede a single time ("at 10:00").
    pub time_prepositions: Vec<String>,
    pub morning: Vec<String>,
    pub midday: Vec<String>,
    pub evening: Vec<String>,
    pub high_priority: Vec<String>,
    pub low_priority: Vec<String>,
}

/// User-facing strings produced by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub no_text: String,
    /// `{n}` is replaced by the 1-based block ordinal.
    pub not_enough_info: String,
    pub empty_block: String,
    pub untitled: String,
    pub all_day: String,
}

impl Messages {
    pub fn not_enough_info_for(&self, ordinal: usize) -> String {
        self.not_enough_info.replace("{n}", &ordinal.to_string())
    }

    pub fn empty_block_for(&self, ordinal: usize) -> String {
        self.empty_block.replace("{n}", &ordinal.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// BCP-47-ish tag, "en" or "ru" for the built-ins.
    pub tag: String,
    pub separator: String,
    pub labels: Labels,
    pub keywords: Keywords,
    /// chrono format strings tried in order for literal dates.
    /// The first one is also used when displaying dates.
    pub date_formats: Vec<String>,
    pub messages: Messages,
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl Locale {
    pub fn english() -> Self {
        Self {
            tag: "en".to_string(),
            separator: "--- NEW TASK ---".to_string(),
            labels: Labels {
                title: words(&["title", "task", "name"]),
                date: words(&["date", "day"]),
                time: words(&["time", "when"]),
                description: words(&["description", "details", "notes"]),
                location: words(&["location", "where", "place"]),
                category: words(&["category"]),
                priority: words(&["priority"]),
            },
            keywords: Keywords {
                today: words(&["today"]),
                tomorrow: words(&["tomorrow"]),
                day_after_tomorrow: words(&["day after tomorrow", "the day after tomorrow"]),
                all_day: words(&["all day", "all-day", "whole day"]),
                range_prefixes: words(&["from"]),
                range_connectors: words(&["to", "until", "till"]),
                time_prepositions: words(&["at"]),
                morning: words(&["in the morning", "morning"]),
                midday: words(&["at noon", "midday", "noon", "at lunch", "lunchtime"]),
                evening: words(&["in the evening", "evening", "tonight"]),
                high_priority: words(&["important", "urgent", "high"]),
                low_priority: words(&["unimportant", "low"]),
            },
            date_formats: words(&["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"]),
            messages: Messages {
                no_text: "no text to parse.".to_string(),
                not_enough_info: "block #{n} does not contain enough information to create a task"
                    .to_string(),
                empty_block: "block #{n} is empty".to_string(),
                untitled: "Untitled".to_string(),
                all_day: "all day".to_string(),
            },
        }
    }

    pub fn russian() -> Self {
        Self {
            tag: "ru".to_string(),
            separator: "--- НОВАЯ ЗАДАЧА ---".to_string(),
            labels: Labels {
                title: words(&["название", "задача"]),
                date: words(&["дата"]),
                time: words(&["время"]),
                description: words(&["описание"]),
                location: words(&["место", "где", "локация"]),
                category: words(&["категория"]),
                priority: words(&["приоритет"]),
            },
            keywords: Keywords {
                today: words(&["сегодня"]),
                tomorrow: words(&["завтра"]),
                day_after_tomorrow: words(&["послезавтра"]),
                all_day: words(&["весь день", "целый день"]),
                range_prefixes: words(&["с"]),
                range_connectors: words(&["до", "по"]),
                time_prepositions: words(&["в"]),
                morning: words(&["утром"]),
                midday: words(&["днем", "днём", "в обед"]),
                evening: words(&["вечером"]),
                high_priority: words(&["важно", "срочно", "высокий"]),
                low_priority: words(&["неважно", "низкий"]),
            },
            date_formats: words(&["%d.%m.%Y", "%d/%m/%Y", "%Y-%m-%d"]),
            messages: Messages {
                no_text: "нет текста для разбора.".to_string(),
                not_enough_info: "блок #{n} не содержит достаточно информации для создания задачи"
                    .to_string(),
                empty_block: "блок #{n} пуст".to_string(),
                untitled: "Без названия".to_string(),
                all_day: "весь день".to_string(),
            },
        }
    }

    /// Resolve a locale tag such as "ru", "ru-RU" or "en_US.UTF-8".
    /// Unknown tags fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        let lang = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "ru" => Self::russian(),
            _ => Self::english(),
        }
    }

    /// Built-in locale matching the operating system language.
    pub fn detect() -> Self {
        match sys_locale::get_locale() {
            Some(tag) => {
                log::debug!("Detected system locale '{}'", tag);
                Self::from_tag(&tag)
            }
            None => Self::english(),
        }
    }

    pub fn is_russian(&self) -> bool {
        self.tag.to_lowercase().starts_with("ru")
    }

    pub fn display_date_format(&self) -> &str {
        self.date_formats
            .first()
            .map(String::as_str)
            .unwrap_or("%Y-%m-%d")
    }
}
