//! Mock gateway implementations for isolating services in tests.

use chrono::{DateTime, Utc};
use mockall::mock;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::status::ResolvedStatus;
use crate::domain::subscription::{Plan, PlanAssignment};
use crate::domain::types::{ClientEmail, RecordId};
use crate::models::client::RawClientRecord;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter, PlanReader, SubscriptionWriter};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: &RecordId) -> RepositoryResult<Option<RawClientRecord>>;
        fn get_client_by_email(
            &self,
            email: &ClientEmail,
        ) -> RepositoryResult<Option<RawClientRecord>>;
        fn list_clients(&self) -> RepositoryResult<Vec<RawClientRecord>>;
    }

    impl ClientWriter for Repository {
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

    impl PlanReader for Repository {
        fn get_plan_by_id(&self, plan_id: &str) -> RepositoryResult<Option<Plan>>;
        fn list_plans(&self) -> RepositoryResult<Vec<Plan>>;
    }

    impl SubscriptionWriter for Repository {
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
}
