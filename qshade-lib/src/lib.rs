//! QShade: a small QSS-flavored stylesheet engine.
//!
//! The pipeline is: parse QSS text into owned rules (`parser::shade_qss`),
//! compile selectors into matchable form (`style::qss_matcher`), then resolve
//! each widget of a tree (`widget`) through the cascade and store the result
//! on the node (`style::shade_style`). `theme` carries the built-in dark
//! launcher theme and the sample widget tree it was written for.

pub mod parser;
pub mod shade_resolve;
pub mod style;
pub mod theme;
pub mod widget;
