//! # memo-engine
//!
//! Rule-based narrative analysis and scoring for investor memos.
//!
//! ## Features
//!
//! - Problem-intensity ("pain") scoring and moat scoring
//! - Evidence checklists with letter grades
//! - Blind-spot detection for risky narrative language
//! - Pricing-metric and unit-economics extraction
//! - Anchored assumptions with AI estimation and stage defaults as fallbacks
//!
//! ## Quick Start
//!
//! ```rust
//! use memo_engine::analysis::analyze_pain;
//!
//! let pain = analyze_pain("Finance teams lose money every week and need a fix urgently.");
//! assert!(pain.overall_score <= 100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod assumptions;
pub mod cli;
pub mod data;
pub mod estimator;
pub mod financial;
pub mod memo;
pub mod patterns;
pub mod text;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::memo::{build_report, MemoInput, MemoReport};

/// The current version of memo-engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
