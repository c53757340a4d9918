// File: ./src/engine/splitter.rs

/// One separator-delimited piece of the assistant's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBlock {
    /// 1-based, stable across the response.
    pub ordinal: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitResult {
    pub blocks: Vec<TaskBlock>,
    /// Ordinals of empty pieces found between two separators.
    pub empty: Vec<usize>,
}

impl SplitResult {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.empty.is_empty()
    }
}

/// Split `raw` on `separator`, trimming every piece.
///
/// Empty pieces before the first or after the last non-empty piece are
/// dropped silently (a model often ends its answer with a separator). Empty
/// pieces in the middle keep their ordinal and are reported in `empty`.
/// Whitespace-only input yields an empty result.
pub fn split_blocks(raw: &str, separator: &str) -> SplitResult {
    let whole = raw.trim();
    if whole.is_empty() {
        return SplitResult::default();
    }
    if separator.trim().is_empty() {
        return single(whole);
    }

    let pieces: Vec<&str> = raw.split(separator).map(str::trim).collect();
    let first = pieces.iter().position(|p| !p.is_empty());
    let last = pieces.iter().rposition(|p| !p.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        // Nothing but separators: keep the text rather than report nothing.
        return single(whole);
    };

    let mut result = SplitResult::default();
    for (i, piece) in pieces[first..=last].iter().enumerate() {
        let ordinal = i + 1;
        if piece.is_empty() {
            result.empty.push(ordinal);
        } else {
            result.blocks.push(TaskBlock {
                ordinal,
                text: piece.to_string(),
            });
        }
    }
    result
}

fn single(whole: &str) -> SplitResult {
    SplitResult {
        blocks: vec![TaskBlock {
            ordinal: 1,
            text: whole.to_string(),
        }],
        empty: Vec::new(),
    }
}
