//! Prerequisite tool detection

pub mod check;

pub use check::{check_runtime, check_runtimes, Runtime, RuntimeInfo};
