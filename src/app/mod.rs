//! Application core: domain orchestration with zero I/O.
//!
//! This module contains the monitoring cycle: poll scheduling, risk
//! evaluation, and response dispatch.  All interaction with storage and
//! devices happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without a database or network.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
