// File: ./src/model/display.rs
use crate::model::item::{Category, ParsedTask, Priority, Schedule};
use crate::model::locale::Locale;

pub trait TaskDisplay {
    fn format_when(&self, locale: &Locale) -> String;
    fn priority_marker(&self) -> &'static str;
    fn to_preview_line(&self, categories: &[Category], locale: &Locale) -> String;
}

impl TaskDisplay for ParsedTask {
    fn format_when(&self, locale: &Locale) -> String {
        let date_fmt = locale.display_date_format();
        match self.schedule {
            Schedule::AllDay(d) => format!("{}, {}", d.format(date_fmt), locale.messages.all_day),
            Schedule::Timed { start, end } => {
                let mut s = format!("{} {}", start.format(date_fmt), start.format("%H:%M"));
                if end != start {
                    s.push_str(&format!(" - {}", end.format("%H:%M")));
                }
                s
            }
        }
    }

    fn priority_marker(&self) -> &'static str {
        match self.priority {
            Priority::High => "!",
            Priority::Medium => "",
            Priority::Low => "↓",
        }
    }

    fn to_preview_line(&self, categories: &[Category], locale: &Locale) -> String {
        let mut s = String::new();
        let marker = self.priority_marker();
        if !marker.is_empty() {
            s.push_str(marker);
            s.push(' ');
        }
        s.push_str(&self.title);

        if !self.category_guess.is_empty() {
            let known = categories
                .iter()
                .find(|c| c.name.to_lowercase() == self.category_guess.to_lowercase());
            match known {
                Some(cat) => s.push_str(&format!(" [{}]", cat.name)),
                None => s.push_str(&format!(" ({}?)", self.category_guess)),
            }
        }

        s.push_str(&format!(" [{}]", self.format_when(locale)));

        if !self.location.is_empty() {
            s.push_str(&format!(" @ {}", self.location));
        }
        if !self.description.is_empty() {
            let first = self.description.lines().next().unwrap_or_default();
            s.push_str(&format!(" - {}", first));
            if self.description.lines().count() > 1 {
                s.push_str(" …");
            }
        }
        s
    }
}
