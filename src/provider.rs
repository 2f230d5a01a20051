//! Provider-facing configuration (data) and strategies (behavior).
//!
//! `config` exposes the immutable [`StrategyConfig`] resolved at
//! construction time plus its validating builder. `strategy` defines
//! [`TokenStrategy`], the per-provider capability hook the dispatcher works
//! against, and `foursquare` holds the concrete Foursquare implementation.

pub mod config;
pub mod foursquare;
pub mod strategy;

pub use config::*;
pub use foursquare::*;
pub use strategy::*;
