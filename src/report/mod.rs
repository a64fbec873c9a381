//! Report module
//!
//! Renders gauntlet results as a standalone LaTeX article.

pub mod latex;

pub use latex::{escape_latex, format_table, size_label};
