//! Shared leaf utilities: expression evaluation, value parsing, significant
//! figures, report rendering, and interactive prompting.

pub mod eval;
pub mod prompt;
pub mod render;
pub mod sigfig;
pub mod value;
