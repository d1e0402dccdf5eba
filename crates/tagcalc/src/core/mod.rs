//! Calculator core: pure state with no I/O
//!
//! Everything here is deterministic. Time enters only as millisecond
//! readings passed in by the caller, and persistence lives in
//! [`crate::store`].

pub mod clear;
pub mod entry;
pub mod history;
pub mod memo;
pub mod number;
mod operations;
pub mod tags;
pub mod totals;

pub use clear::{ClearDetector, ClearPress};
pub use entry::{CalculatorState, Evaluation};
pub use history::{History, HistoryEntry};
pub use memo::MemoMap;
pub use operations::Operation;
pub use tags::TagSet;
pub use totals::{classify_deficit, tag_totals, Rank, RankBand, TagTotal, RANK_BANDS};
