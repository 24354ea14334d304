//! In-memory gateway implementation.
//!
//! Stands in for the REST backend in integration tests, mimicking its
//! observable behavior: records stay loosely typed, mutations return the
//! updated record, and state transitions happen only on explicit calls.
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::status::{ResolvedStatus, SubscriptionStatus};
use crate::domain::subscription::{Plan, PlanAssignment, PlanRef};
use crate::domain::types::{ClientEmail, RecordId};
use crate::models::client::{RawClientRecord, RawSubscription};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, PlanReader, SubscriptionWriter};

/// Thread-safe in-memory store of raw client records and a plan catalog.
#[derive(Default)]
pub struct InMemoryRepository {
    clients: RwLock<Vec<RawClientRecord>>,
    plans: RwLock<Vec<Plan>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the plan catalog.
    pub fn with_plans(plans: Vec<Plan>) -> Self {
        Self {
            clients: RwLock::new(Vec::new()),
            plans: RwLock::new(plans),
        }
    }

    /// Inserts a raw record as-is, keeping whatever gaps it has.
    pub fn insert_raw(&self, record: RawClientRecord) -> RepositoryResult<()> {
        self.clients
            .write()
            .map_err(|_| poisoned())?
            .push(record);
        Ok(())
    }

    fn mutate_client<F>(&self, client_id: &RecordId, apply: F) -> RepositoryResult<RawClientRecord>
    where
        F: FnOnce(&mut RawClientRecord),
    {
        let mut clients = self.clients.write().map_err(|_| poisoned())?;
        let record = clients
            .iter_mut()
            .find(|record| record.id.as_deref() == Some(client_id.as_str()))
            .ok_or(RepositoryError::NotFound)?;
        apply(record);
        record.updated_at = Some(Utc::now().to_rfc3339());
        Ok(record.clone())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unexpected("store lock poisoned".to_string())
}

impl ClientReader for InMemoryRepository {
    fn get_client_by_id(&self, id: &RecordId) -> RepositoryResult<Option<RawClientRecord>> {
        let clients = self.clients.read().map_err(|_| poisoned())?;
        Ok(clients
            .iter()
            .find(|record| record.id.as_deref() == Some(id.as_str()))
            .cloned())
    }

    fn get_client_by_email(
        &self,
        email: &ClientEmail,
    ) -> RepositoryResult<Option<RawClientRecord>> {
        let clients = self.clients.read().map_err(|_| poisoned())?;
        Ok(clients
            .iter()
            .find(|record| {
                record
                    .email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email.as_str()))
            })
            .cloned())
    }

    fn list_clients(&self) -> RepositoryResult<Vec<RawClientRecord>> {
        let clients = self.clients.read().map_err(|_| poisoned())?;
        Ok(clients.clone())
    }
}

impl ClientWriter for InMemoryRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<RawClientRecord> {
        let now = Utc::now().to_rfc3339();
        let record = RawClientRecord {
            id: Some(Uuid::new_v4().to_string()),
            email: new_client.email.clone(),
            phone: new_client.phone.clone(),
            company_name: Some(new_client.company_name.clone()),
            business_location: new_client.business_location.clone(),
            notes: new_client.notes.clone(),
            is_active: Some(true),
            is_client: Some(true),
            created_at: Some(now.clone()),
            updated_at: Some(now),
            ..RawClientRecord::default()
        };
        self.clients
            .write()
            .map_err(|_| poisoned())?
            .push(record.clone());
        Ok(record)
    }

    fn update_client(
        &self,
        client_id: &RecordId,
        updates: &UpdateClient,
    ) -> RepositoryResult<RawClientRecord> {
        self.mutate_client(client_id, |record| {
            record.company_name = Some(updates.company_name.clone());
            record.email = updates.email.clone();
            record.phone = updates.phone.clone();
            record.business_location = updates.business_location.clone();
            record.tax_id = updates.tax_id.clone();
            record.notes = updates.notes.clone();
            record.old_website = updates.old_website.clone();
        })
    }

    fn set_client_status(
        &self,
        client_id: &RecordId,
        status: ResolvedStatus,
    ) -> RepositoryResult<RawClientRecord> {
        self.mutate_client(client_id, |record| {
            record.status = Some(status.as_str().to_string());
            record.is_active = Some(status == ResolvedStatus::Active);
        })
    }

    fn delete_client(&self, client_id: &RecordId) -> RepositoryResult<()> {
        let mut clients = self.clients.write().map_err(|_| poisoned())?;
        let before = clients.len();
        clients.retain(|record| record.id.as_deref() != Some(client_id.as_str()));
        if clients.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl PlanReader for InMemoryRepository {
    fn get_plan_by_id(&self, plan_id: &str) -> RepositoryResult<Option<Plan>> {
        let plans = self.plans.read().map_err(|_| poisoned())?;
        Ok(plans.iter().find(|plan| plan.id == plan_id).cloned())
    }

    fn list_plans(&self) -> RepositoryResult<Vec<Plan>> {
        let plans = self.plans.read().map_err(|_| poisoned())?;
        Ok(plans.clone())
    }
}

impl SubscriptionWriter for InMemoryRepository {
    fn assign_subscription(
        &self,
        client_id: &RecordId,
        assignment: &PlanAssignment,
    ) -> RepositoryResult<RawClientRecord> {
        self.mutate_client(client_id, |record| {
            record.is_active = Some(true);
            record.current_plan = Some(PlanRef::Id(assignment.plan.id.clone()));
            record.subscription = Some(RawSubscription {
                plan: Some(PlanRef::Populated(assignment.plan.clone())),
                status: Some(SubscriptionStatus::Active.as_str().to_string()),
                amount: Some(assignment.amount),
                start_date: Some(assignment.start_date.to_rfc3339()),
                expires_at: Some(assignment.expires_at.to_rfc3339()),
                custom_price: assignment.custom_price,
                discount: Some(assignment.discount.get()),
                ..RawSubscription::default()
            });
        })
    }

    fn renew_subscription(
        &self,
        client_id: &RecordId,
        expires_at: DateTime<Utc>,
    ) -> RepositoryResult<RawClientRecord> {
        self.mutate_client(client_id, |record| {
            let mut subscription = record.subscription.take().unwrap_or_default();
            subscription.status = Some(SubscriptionStatus::Active.as_str().to_string());
            subscription.expires_at = Some(expires_at.to_rfc3339());
            record.subscription = Some(subscription);
            record.is_active = Some(true);
        })
    }

    fn cancel_subscription(&self, client_id: &RecordId) -> RepositoryResult<RawClientRecord> {
        self.mutate_client(client_id, |record| {
            if let Some(subscription) = record.subscription.as_mut() {
                subscription.status = Some(SubscriptionStatus::Cancelled.as_str().to_string());
            } else {
                record.subscription = Some(RawSubscription {
                    status: Some(SubscriptionStatus::Cancelled.as_str().to_string()),
                    ..RawSubscription::default()
                });
            }
        })
    }
}
