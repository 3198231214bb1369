//! # aqua-core
//!
//! Core types and the contamination risk scorer for aquawatch.
//!
//! This crate has no I/O. It provides:
//! - The tabular sheet model (`DataTable`, `CellValue`) shared by every source
//! - `Reading` extraction from the last sheet row, with field defaults
//! - The two-factor risk scorer and its three-level `Verdict`
//! - Per-parameter safe ranges for the status panel
//! - Gauge bands and the cosmetic ramp frames

pub mod errors;
pub mod gauge;
pub mod ranges;
pub mod reading;
pub mod score;
pub mod table;

pub use errors::ReadingError;
pub use reading::Reading;
pub use score::{ScoreResult, Verdict, assess, score};
pub use table::{CellValue, DataTable};
