//! A scientific calculator with a small geometry formula bank.

pub mod calculator;
pub mod config;
pub mod display;
pub mod formulas;
pub mod fraction;
pub mod history;
