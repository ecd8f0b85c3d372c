//! Log Merger command-line front end, as a library.
//!
//! The binary is a thin wrapper; exposing the modules lets `lm-e2e-tests`
//! drive the same flow without spawning a process.

pub mod app;
pub mod cli;
pub mod config;
pub mod output;
