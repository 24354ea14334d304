//! Backend-shaped wire records and their normalization into domain models.

pub mod client;

use thiserror::Error;

/// Errors raised while turning a raw backend record into a view model.
///
/// Only a contract violation by the upstream data source fails loudly;
/// every merely-absent optional field is defaulted instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The record carried no usable identifier.
    #[error("client record is missing its identifier")]
    MissingId,
}
