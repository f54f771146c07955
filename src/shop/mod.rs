//! Machining calculators.

pub mod ball;
