pub mod dto;
pub mod errors;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use startup::{build_services, run, run_with};
