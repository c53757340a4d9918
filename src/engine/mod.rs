// File: ./src/engine/mod.rs
// Extraction engine: assistant reply in, calendar records out.
pub mod assemble;
pub mod fields;
pub mod format;
pub mod lines;
pub mod patterns;
pub mod rules;
pub mod splitter;

use crate::model::{Category, Locale, ParseOutcome, ParsedTask};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use lines::LabelMatcher;
use patterns::Matchers;

pub use format::{render_block, resolve_category_id, to_record};
pub use splitter::{SplitResult, TaskBlock, split_blocks};

/// Tasks recovered from one reply, plus a joined warning for what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub tasks: Vec<ParsedTask>,
    pub warning: Option<String>,
}

/// Compiled matchers for one locale. Build once, reuse for every reply.
#[derive(Debug, Clone)]
pub struct Engine {
    locale: Locale,
    labels: LabelMatcher,
    matchers: Matchers,
}

impl Engine {
    pub fn new(locale: Locale) -> Result<Self> {
        let labels = LabelMatcher::new(&locale.labels)?;
        let matchers = Matchers::new(&locale)?;
        Ok(Self {
            locale,
            labels,
            matchers,
        })
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Split and extract without assigning ids.
    pub fn extract(&self, raw: &str, categories: &[Category], today: NaiveDate) -> Extraction {
        let split = split_blocks(raw, &self.locale.separator);
        if split.is_empty() {
            log::info!("Nothing to parse");
            return Extraction {
                tasks: Vec::new(),
                warning: Some(self.locale.messages.no_text.clone()),
            };
        }
        log::debug!(
            "Split reply into {} block(s), {} empty",
            split.blocks.len(),
            split.empty.len()
        );

        let mut notes: Vec<(usize, String)> = split
            .empty
            .iter()
            .map(|&n| (n, self.locale.messages.empty_block_for(n)))
            .collect();
        let mut tasks = Vec::new();

        for block in &split.blocks {
            let fields =
                assemble::extract_fields(block, &self.labels, &self.matchers, categories, today);
            match assemble::assemble(block, fields, &self.locale, today) {
                Ok(task) => tasks.push(task),
                Err(msg) => {
                    log::warn!("{}", msg);
                    notes.push((block.ordinal, msg));
                }
            }
        }

        notes.sort_by_key(|(n, _)| *n);
        let warning = if notes.is_empty() {
            None
        } else {
            Some(
                notes
                    .into_iter()
                    .map(|(_, msg)| msg)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };
        log::info!("Extracted {} task(s)", tasks.len());
        Extraction { tasks, warning }
    }

    /// Parse with an explicit "today", for reproducible runs.
    pub fn parse_on(&self, raw: &str, categories: &[Category], today: NaiveDate) -> ParseOutcome {
        let extraction = self.extract(raw, categories, today);
        ParseOutcome {
            records: extraction
                .tasks
                .iter()
                .map(|t| to_record(t, categories))
                .collect(),
            warning: extraction.warning,
        }
    }

    pub fn parse(&self, raw: &str, categories: &[Category]) -> ParseOutcome {
        self.parse_on(raw, categories, Local::now().date_naive())
    }
}

/// One-shot parse against the local clock.
pub fn parse(raw: &str, categories: &[Category], locale: &Locale) -> ParseOutcome {
    match Engine::new(locale.clone()) {
        Ok(engine) => engine.parse(raw, categories),
        Err(e) => {
            log::error!("Invalid locale '{}': {:#}", locale.tag, e);
            ParseOutcome::failure(format!("{:#}", e))
        }
    }
}
