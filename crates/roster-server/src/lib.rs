//! # Roster Server Library
//!
//! Wiring for the Roster HTTP server: logging setup, component assembly
//! and the serve loop with graceful shutdown.

pub mod app;
pub mod logging;
pub mod startup;
