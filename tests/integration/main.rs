//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  No database or device API is required.

mod mock_ports;
mod monitor_cycle_tests;
mod poll_tests;
