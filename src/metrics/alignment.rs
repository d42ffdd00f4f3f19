use crate::metrics::distance::DistanceTable;
use crate::WerError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edit operation attached to an aligned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditOp {
    Match,
    Substitution,
    Deletion,
    Insertion,
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Match => write!(f, "match"),
            EditOp::Substitution => write!(f, "substitution"),
            EditOp::Deletion => write!(f, "deletion"),
            EditOp::Insertion => write!(f, "insertion"),
        }
    }
}

/// One rendered unit of the alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentToken {
    pub op: EditOp,
    /// Hypothesis-side word. Absent for deletions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<String>,
    /// Reference-side word. Present for matches, substitutions and deletions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl AlignmentToken {
    pub fn matched(word: impl Into<String>) -> Self {
        let word = word.into();
        Self {
            op: EditOp::Match,
            hypothesis: Some(word.clone()),
            reference: Some(word),
        }
    }

    pub fn substitution(shown: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            op: EditOp::Substitution,
            hypothesis: Some(shown.into()),
            reference: Some(original.into()),
        }
    }

    pub fn deletion(reference: impl Into<String>) -> Self {
        Self {
            op: EditOp::Deletion,
            hypothesis: None,
            reference: Some(reference.into()),
        }
    }

    pub fn insertion(hypothesis: impl Into<String>) -> Self {
        Self {
            op: EditOp::Insertion,
            hypothesis: Some(hypothesis.into()),
            reference: None,
        }
    }

    pub fn hypothesis_word(&self) -> Option<&str> {
        self.hypothesis.as_deref()
    }

    pub fn reference_word(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// Per-operation tallies over an alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCounts {
    pub matches: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
}

impl EditCounts {
    /// Substitutions + deletions + insertions.
    pub fn errors(&self) -> usize {
        self.substitutions + self.deletions + self.insertions
    }
}

/// Result of backtracking through a [`DistanceTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    /// Tokens in left-to-right text order.
    pub tokens: Vec<AlignmentToken>,
    /// Set when backtracking stopped early on a cell no recurrence case explains.
    /// `tokens` then holds only the suffix that was aligned before the stop.
    pub inconsistency: Option<WerError>,
}

impl Alignment {
    pub fn is_complete(&self) -> bool {
        self.inconsistency.is_none()
    }

    pub fn counts(&self) -> EditCounts {
        let mut counts = EditCounts::default();
        for token in &self.tokens {
            match token.op {
                EditOp::Match => counts.matches += 1,
                EditOp::Substitution => counts.substitutions += 1,
                EditOp::Deletion => counts.deletions += 1,
                EditOp::Insertion => counts.insertions += 1,
            }
        }
        counts
    }
}

enum Step {
    Emit {
        token: AlignmentToken,
        next: (usize, usize),
    },
    Done,
    Inconsistent,
}

/// Backtrack from the bottom-right cell of `table` and return the aligned tokens.
///
/// At every cell the cases are tried in a fixed order: match, substitution,
/// deletion, insertion. The first one that holds wins, which pins which of several
/// optimal alignments is produced.
///
/// The walk ends at (0, 0) rather than at the first border cell, so leading
/// deletions or insertions are emitted too.
pub fn render<R, H>(reference: &[R], hypothesis: &[H], table: &DistanceTable) -> Alignment
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    let mut tokens = Vec::new();
    let mut cursor = (reference.len(), hypothesis.len());

    let fits = table.rows() == reference.len() + 1 && table.cols() == hypothesis.len() + 1;
    let inconsistency = if !fits {
        Some(WerError::InconsistentTable {
            x: cursor.0,
            y: cursor.1,
        })
    } else {
        loop {
            match step(reference, hypothesis, table, cursor) {
                Step::Emit { token, next } => {
                    tokens.push(token);
                    cursor = next;
                }
                Step::Done => break None,
                Step::Inconsistent => {
                    break Some(WerError::InconsistentTable {
                        x: cursor.0,
                        y: cursor.1,
                    })
                }
            }
        }
    };

    if let Some(err) = &inconsistency {
        warn!("{}; returning {} aligned tokens", err, tokens.len());
    }

    tokens.reverse();
    Alignment {
        tokens,
        inconsistency,
    }
}

fn step<R, H>(reference: &[R], hypothesis: &[H], table: &DistanceTable, (x, y): (usize, usize)) -> Step
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    if x == 0 && y == 0 {
        return Step::Done;
    }

    if x > 0 && y > 0 && reference[x - 1].as_ref() == hypothesis[y - 1].as_ref() {
        return Step::Emit {
            token: AlignmentToken::matched(hypothesis[y - 1].as_ref()),
            next: (x - 1, y - 1),
        };
    }

    let Some(here) = table.get(x, y) else {
        return Step::Inconsistent;
    };
    let costs_one_more =
        |i: usize, j: usize| table.get(i, j).and_then(|prev| prev.checked_add(1)) == Some(here);

    if x > 0 && y > 0 && costs_one_more(x - 1, y - 1) {
        Step::Emit {
            token: AlignmentToken::substitution(hypothesis[y - 1].as_ref(), reference[x - 1].as_ref()),
            next: (x - 1, y - 1),
        }
    } else if x > 0 && costs_one_more(x - 1, y) {
        Step::Emit {
            token: AlignmentToken::deletion(reference[x - 1].as_ref()),
            next: (x - 1, y),
        }
    } else if y > 0 && costs_one_more(x, y - 1) {
        Step::Emit {
            token: AlignmentToken::insertion(hypothesis[y - 1].as_ref()),
            next: (x, y - 1),
        }
    } else {
        Step::Inconsistent
    }
}
