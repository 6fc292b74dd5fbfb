//! # Roster REST
//!
//! HTTP surface for the user service: CRUD endpoints under `/users`,
//! a dependency health check and the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
