//! Gateway traits describing the REST backend this dashboard sits on.
//!
//! The backend owns storage and state transitions; these traits are the
//! whole contract the service layer depends on, so tests swap in the
//! in-memory implementation or generated mocks.
use chrono::{DateTime, Utc};

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::status::ResolvedStatus;
use crate::domain::subscription::{Plan, PlanAssignment};
use crate::domain::types::{ClientEmail, RecordId};
use crate::models::client::RawClientRecord;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub trait ClientReader {
    fn get_client_by_id(&self, id: &RecordId) -> RepositoryResult<Option<RawClientRecord>>;
    fn get_client_by_email(&self, email: &ClientEmail)
    -> RepositoryResult<Option<RawClientRecord>>;
    /// Fetches the whole collection; filtering and pagination happen
    /// client-side.
    fn list_clients(&self) -> RepositoryResult<Vec<RawClientRecord>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<RawClientRecord>;
    fn update_client(
        &self,
        client_id: &RecordId,
        updates: &UpdateClient,
    ) -> RepositoryResult<RawClientRecord>;
    fn set_client_status(
        &self,
        client_id: &RecordId,
        status: ResolvedStatus,
    ) -> RepositoryResult<RawClientRecord>;
    fn delete_client(&self, client_id: &RecordId) -> RepositoryResult<()>;
}

pub trait PlanReader {
    fn get_plan_by_id(&self, plan_id: &str) -> RepositoryResult<Option<Plan>>;
    fn list_plans(&self) -> RepositoryResult<Vec<Plan>>;
}

pub trait SubscriptionWriter {
    fn assign_subscription(
        &self,
        client_id: &RecordId,
        assignment: &PlanAssignment,
    ) -> RepositoryResult<RawClientRecord>;
    fn renew_subscription(
        &self,
        client_id: &RecordId,
        expires_at: DateTime<Utc>,
    ) -> RepositoryResult<RawClientRecord>;
    fn cancel_subscription(&self, client_id: &RecordId) -> RepositoryResult<RawClientRecord>;
}
