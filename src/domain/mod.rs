//! Domain aggregates and pure computation exposed by the service layer.

pub mod client;
pub mod period;
pub mod pricing;
pub mod status;
pub mod subscription;
pub mod types;
