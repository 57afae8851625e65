//! Read entities definitions.

pub mod import;
pub mod lead;
