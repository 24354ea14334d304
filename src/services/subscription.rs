//! Subscription assignment and lifecycle services.
//!
//! State transitions are owned by the backend; these services only validate
//! input, compute the charged amount, and reflect what the backend returns.
use chrono::{DateTime, Duration, Utc};
use validator::Validate;

use crate::domain::client::Client;
use crate::domain::subscription::{PlanAssignment, TERM_DAYS};
use crate::domain::types::{DiscountPercent, RecordId};
use crate::forms::subscription::AssignPlanForm;
use crate::repository::{ClientReader, PlanReader, SubscriptionWriter};
use crate::services::{ServiceError, ServiceResult};

/// Assigns a plan to a client, computing the discounted charge amount from
/// the override price or the plan's list price.
pub fn assign_plan<R>(
    repo: &R,
    form: &AssignPlanForm,
    now: DateTime<Utc>,
) -> ServiceResult<Client>
where
    R: PlanReader + SubscriptionWriter + ?Sized,
{
    form.validate()?;

    let client_id =
        RecordId::new(form.id.as_str()).map_err(|err| ServiceError::Validation(err.to_string()))?;
    let plan = repo
        .get_plan_by_id(&form.plan_id)
        .map_err(|err| {
            log::error!("Failed to fetch plan {}: {err}", form.plan_id);
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    let assignment = PlanAssignment::new(
        plan,
        form.custom_price,
        DiscountPercent::new(form.discount.unwrap_or(0.0)),
        now,
    );

    let record = repo
        .assign_subscription(&client_id, &assignment)
        .map_err(|err| {
            log::error!("Failed to assign plan to client {client_id}: {err}");
            err
        })?;
    Ok(record.normalize(now)?)
}

/// Extends the client's subscription by one term.
///
/// The new expiry anchors on the current one when it is still in the
/// future, otherwise on `now`, so renewing early never loses paid days.
pub fn renew_subscription<R>(
    repo: &R,
    client_id: &RecordId,
    now: DateTime<Utc>,
) -> ServiceResult<Client>
where
    R: ClientReader + SubscriptionWriter + ?Sized,
{
    let record = repo
        .get_client_by_id(client_id)
        .map_err(|err| {
            log::error!("Failed to fetch client {client_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;
    let client = record.normalize(now)?;

    let anchor = client
        .subscription
        .expires_at
        .filter(|expires| *expires > now)
        .unwrap_or(now);
    let expires_at = anchor + Duration::days(TERM_DAYS);

    let record = repo
        .renew_subscription(client_id, expires_at)
        .map_err(|err| {
            log::error!("Failed to renew subscription of client {client_id}: {err}");
            err
        })?;
    Ok(record.normalize(now)?)
}

/// Cancels the client's subscription, reflecting the backend's result.
pub fn cancel_subscription<R>(
    repo: &R,
    client_id: &RecordId,
    now: DateTime<Utc>,
) -> ServiceResult<Client>
where
    R: SubscriptionWriter + ?Sized,
{
    let record = repo.cancel_subscription(client_id).map_err(|err| {
        log::error!("Failed to cancel subscription of client {client_id}: {err}");
        err
    })?;
    Ok(record.normalize(now)?)
}
