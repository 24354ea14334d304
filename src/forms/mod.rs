//! Form payloads with declarative validation, as submitted by the dashboard.

pub mod client;
pub mod subscription;
