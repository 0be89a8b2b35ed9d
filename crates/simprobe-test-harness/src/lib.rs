//! simprobe-test-harness: Test utilities and mock transports for simprobe.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! the AT driver without requiring a cellular module on the bench.

pub mod mock_serial;

pub use mock_serial::MockTransport;
