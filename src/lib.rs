//! Domain layer of a subscription-service administration dashboard.
//!
//! The REST backend and the rendering layer are external collaborators:
//! this crate owns everything between them — normalizing loosely-typed
//! backend records into complete view models, resolving one canonical
//! client status out of the backend's conflicting signals, computing
//! subscription term progress and effective prices, and the form/service
//! plumbing the dashboard's mutation flows go through.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;
