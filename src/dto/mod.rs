//! DTOs shaped for the dashboard's card and list views.

pub mod client;
