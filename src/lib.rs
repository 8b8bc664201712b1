#![cfg_attr(not(test), no_std)]

//! # irrigation-rs
//! ## A soil irrigation controller in Rust
//!
//! Features:
//! - Nutrient presence monitoring (P and K)
//! - Humidity monitoring with a fallback reading on sensor faults
//! - Light sensor proxy index (0 - 14)
//! - Pump relay and indicator LED control
//! - 16x2 status display
//! - Serial telemetry for plotting tools
//!
//! Every cycle is independent: read, decide, actuate, display, report, sleep.

#[macro_use]
mod log;

pub mod actuation;
pub mod config;
pub mod controller;
pub mod decision;
pub mod error;
pub mod fixed;
pub mod rendering;
pub mod sensors;
pub mod telemetry;
pub mod timer;

#[cfg(test)]
mod mock;

pub use controller::{Controller, CycleReport};
pub use error::Error;
