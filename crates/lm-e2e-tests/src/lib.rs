//! End-to-end tests for Log Merger live under `tests/`; this crate has no
//! library code of its own.
