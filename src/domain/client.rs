//! Normalized client aggregate consumed by views.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::status::{ResolvedStatus, UserSignals};
use crate::domain::subscription::{PlanRef, Subscription};

/// Identifier used for the placeholder account profile.
pub const UNKNOWN_USER_ID: &str = "unknown";

/// Account profile attached to a client record.
///
/// Serialized with the backend's field naming so a normalized client can be
/// fed back through the wire layer unchanged.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "fName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserProfile {
    /// Placeholder profile for records with no user relationship at all.
    pub fn placeholder() -> Self {
        Self {
            id: UNKNOWN_USER_ID.to_string(),
            email: None,
            first_name: Some("Unknown".to_string()),
            last_name: Some("User".to_string()),
            phone: None,
            status: None,
            is_approved: None,
            is_active: None,
        }
    }

    /// Minimal profile synthesized from a bare user id plus whatever contact
    /// details the client record itself carries.
    pub fn from_contact(id: String, email: Option<String>, phone: Option<String>) -> Self {
        Self {
            id,
            email,
            first_name: None,
            last_name: None,
            phone,
            status: None,
            is_approved: None,
            is_active: None,
        }
    }

    /// Display name assembled from the name parts, falling back to the email.
    pub fn full_name(&self) -> String {
        let name = match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => String::new(),
        };
        if !name.trim().is_empty() {
            return name;
        }
        self.email.clone().unwrap_or_else(|| self.id.clone())
    }

    /// The status signals this profile contributes to resolution.
    pub fn signals(&self) -> UserSignals<'_> {
        UserSignals {
            is_approved: self.is_approved,
            status: self.status.as_deref(),
            is_active: self.is_active,
        }
    }
}

/// Fully populated, internally consistent client view model.
///
/// Every field a view renders is present: the normalizer has already
/// resolved the canonical status, synthesized a subscription block when the
/// backend had none, and applied deterministic defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: UserProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_website: Option<String>,
    pub is_active: bool,
    pub is_client: bool,
    pub status: ResolvedStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_plan: Option<PlanRef>,
    pub subscription: Subscription,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub revenue: f64,
    /// Backend fields this crate does not model; carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Client {
    /// Display name for lists: company name first, then the account holder.
    pub fn display_name(&self) -> String {
        self.company_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.user.full_name())
    }
}

/// Data required to create a client through the backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub company_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub business_location: Option<String>,
    pub notes: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        company_name: String,
        email: Option<String>,
        phone: Option<String>,
        business_location: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            company_name: company_name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            business_location: business_location
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            notes: notes.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

/// Partial profile update sent to the backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    pub company_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub business_location: Option<String>,
    pub tax_id: Option<String>,
    pub notes: Option<String>,
    pub old_website: Option<String>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(
        company_name: String,
        email: Option<String>,
        phone: Option<String>,
        business_location: Option<String>,
        tax_id: Option<String>,
        notes: Option<String>,
        old_website: Option<String>,
    ) -> Self {
        Self {
            company_name: company_name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            business_location: business_location
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            tax_id: tax_id
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            notes: notes.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            old_website: old_website
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
