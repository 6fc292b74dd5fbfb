//! # Roster Core
//!
//! Core types, error definitions, and health primitives for Roster.
//! Every other crate in the workspace builds on the abstractions here.

pub mod domain;
pub mod error;
pub mod health;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use health::*;
pub use id::*;
pub use result::*;
pub use validation::*;
