pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod text;

pub use config::Config;
pub use error::WerError;
pub use metrics::alignment::{Alignment, AlignmentToken, EditCounts, EditOp};
pub use metrics::distance::DistanceTable;
pub use metrics::{compare, ComparisonResult};

/// Ordered word tokens, produced by whitespace-splitting normalized text.
pub type WordSequence = Vec<String>;
