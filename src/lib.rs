//! Lonewatch library.
//!
//! Risk monitoring for a single-occupant room fitted with a door contact,
//! a motion sensor and a water leak sensor.  The pure risk evaluator lives
//! in [`risk`]; everything that touches storage or devices goes through the
//! port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod ingest;
pub mod responder;
pub mod risk;
pub mod sensors;
