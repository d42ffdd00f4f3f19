pub mod alignment;
pub mod distance;

use crate::WerError;
use alignment::{AlignmentToken, EditCounts};
use serde::Serialize;

/// WER and alignment for one reference/hypothesis pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Word error rate as a percentage of the reference length.
    pub wer: f64,
    pub distance: usize,
    pub reference_len: usize,
    pub hypothesis_len: usize,
    pub counts: EditCounts,
    pub tokens: Vec<AlignmentToken>,
    #[serde(skip)]
    pub inconsistency: Option<WerError>,
}

/// Compute WER for `hypothesis` against `reference` and align the two.
///
/// The distance table only lives for the duration of this call.
pub fn compare<R, H>(reference: &[R], hypothesis: &[H]) -> Result<ComparisonResult, WerError>
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    let (wer, table) = distance::compute(reference, hypothesis)?;
    let alignment = alignment::render(reference, hypothesis, &table);

    Ok(ComparisonResult {
        wer,
        distance: table.distance(),
        reference_len: reference.len(),
        hypothesis_len: hypothesis.len(),
        counts: alignment.counts(),
        inconsistency: alignment.inconsistency,
        tokens: alignment.tokens,
    })
}
