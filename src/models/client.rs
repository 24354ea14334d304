//! Loosely-typed client records as the REST backend returns them.
//!
//! Relationship fields may arrive as bare id strings or populated objects,
//! nearly everything is optional, and timestamps are raw ISO-8601 strings.
//! [`RawClientRecord::normalize`] turns this into the fully populated
//! [`Client`] shape the rest of the crate works with.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::client::{Client, UserProfile};
use crate::domain::period::parse_timestamp;
use crate::domain::status::{ClientSignals, SubscriptionStatus, resolve_status};
use crate::domain::subscription::{DEFAULT_PLAN, PlanRef, Subscription};
use crate::models::NormalizeError;

/// A user relationship field: either a bare identifier or the populated
/// profile object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UserField {
    Populated(UserProfile),
    Id(String),
}

impl UserField {
    /// Whether the backend returned the full profile object.
    pub fn is_populated(&self) -> bool {
        matches!(self, UserField::Populated(_))
    }

    /// The user identifier, available in both shapes.
    pub fn id(&self) -> &str {
        match self {
            UserField::Populated(profile) => &profile.id,
            UserField::Id(id) => id,
        }
    }
}

/// Subscription block as the backend returns it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSubscription {
    pub plan: Option<PlanRef>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub start_date: Option<String>,
    pub expires_at: Option<String>,
    pub custom_price: Option<f64>,
    pub discount: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawSubscription {
    /// Fills the gaps in a present-but-partial subscription block.
    ///
    /// An unrecognized status string falls back to the client's active flag,
    /// the same rule used when synthesizing a block from nothing.
    fn into_subscription(self, client_active: bool) -> Subscription {
        let status = self
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(if client_active {
                SubscriptionStatus::Active
            } else {
                SubscriptionStatus::Cancelled
            });
        Subscription {
            plan: self
                .plan
                .unwrap_or_else(|| PlanRef::Id(DEFAULT_PLAN.to_string())),
            status,
            amount: self.amount.unwrap_or(0.0),
            start_date: self.start_date.as_deref().and_then(parse_timestamp),
            expires_at: self.expires_at.as_deref().and_then(parse_timestamp),
            custom_price: self.custom_price,
            discount: self.discount,
            extra: self.extra,
        }
    }
}

/// Client record exactly as fetched from the backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RawClientRecord {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub user: Option<UserField>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub business_location: Option<String>,
    pub tax_id: Option<String>,
    pub notes: Option<String>,
    pub old_website: Option<String>,
    pub is_active: Option<bool>,
    pub is_client: Option<bool>,
    pub status: Option<String>,
    pub current_plan: Option<PlanRef>,
    pub subscription: Option<RawSubscription>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub last_active: Option<String>,
    pub revenue: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawClientRecord {
    /// Produces the fully populated view model.
    ///
    /// Deterministic given `now`: defaults are applied once here, never
    /// re-derived downstream. A missing identifier is the one loud failure;
    /// every other absent field is defaulted. Unrecognized backend fields
    /// pass through on the `extra` map.
    pub fn normalize(self, now: DateTime<Utc>) -> Result<Client, NormalizeError> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(NormalizeError::MissingId)?;

        let user = match self.user {
            Some(UserField::Populated(profile)) => profile,
            Some(UserField::Id(user_id)) => {
                UserProfile::from_contact(user_id, self.email.clone(), self.phone.clone())
            }
            None => UserProfile::placeholder(),
        };

        let status = resolve_status(
            user.signals(),
            ClientSignals {
                status: self.status.as_deref(),
                is_active: self.is_active,
            },
        );

        let is_active = self.is_active.unwrap_or(true);
        let created_at = self
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);
        let updated_at = self
            .updated_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);
        let last_active = self
            .last_active
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(updated_at);

        let subscription = match self.subscription {
            Some(raw) => raw.into_subscription(is_active),
            None => Subscription::synthesized(
                self.current_plan
                    .clone()
                    .unwrap_or_else(|| PlanRef::Id(DEFAULT_PLAN.to_string())),
                is_active,
                created_at,
            ),
        };

        Ok(Client {
            id,
            user,
            email: self.email,
            phone: self.phone,
            company_name: self.company_name,
            business_location: self.business_location,
            tax_id: self.tax_id,
            notes: self.notes,
            old_website: self.old_website,
            is_active,
            is_client: self.is_client.unwrap_or(true),
            status,
            current_plan: self.current_plan,
            subscription,
            created_at,
            updated_at,
            last_active,
            revenue: self.revenue.unwrap_or(0.0),
            extra: self.extra,
        })
    }
}
