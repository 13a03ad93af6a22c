//! Route configuration for the phrase API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod phrase_routes;

pub use phrase_routes::create_routes;
