pub mod common;
pub mod route;
pub mod telemetry;
