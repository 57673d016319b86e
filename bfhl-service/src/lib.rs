//! bfhl-service: one health check and one multiplexed JSON endpoint.
//!
//! `POST /bfhl` takes an object with exactly one key and dispatches on it:
//! `fibonacci`, `prime`, `lcm`, `hcf`, or `AI` (delegated to a text provider).

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
