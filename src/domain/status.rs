//! Canonical status resolution.
//!
//! The backend carries several independent status-like signals for one
//! client: account approval, the user-level status string, the client-level
//! status string, and two active flags. Views must display exactly one
//! status, so a single ordered rule list reduces the signals here and
//! nowhere else.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// The single canonical status a view displays for a client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedStatus {
    Pending,
    Active,
    Inactive,
    Suspended,
    Blocked,
}

impl ResolvedStatus {
    /// All possible values, in display order.
    pub const ALL: [ResolvedStatus; 5] = [
        ResolvedStatus::Pending,
        ResolvedStatus::Active,
        ResolvedStatus::Inactive,
        ResolvedStatus::Suspended,
        ResolvedStatus::Blocked,
    ];

    /// Lower-case wire representation of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            ResolvedStatus::Pending => "pending",
            ResolvedStatus::Active => "active",
            ResolvedStatus::Inactive => "inactive",
            ResolvedStatus::Suspended => "suspended",
            ResolvedStatus::Blocked => "blocked",
        }
    }
}

impl Display for ResolvedStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResolvedStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ResolvedStatus::Pending),
            "active" => Ok(ResolvedStatus::Active),
            "inactive" => Ok(ResolvedStatus::Inactive),
            "suspended" => Ok(ResolvedStatus::Suspended),
            "blocked" => Ok(ResolvedStatus::Blocked),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Subscription lifecycle state assigned by the backend.
///
/// This crate never transitions the state locally; it only reflects what
/// explicit renew/cancel/assign calls return, or synthesizes a default for
/// records that lack a subscription block entirely.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
    Pending,
}

impl SubscriptionStatus {
    /// Lower-case wire representation of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Pending => "pending",
        }
    }
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(SubscriptionStatus::Active),
            "cancelled" | "canceled" => Ok(SubscriptionStatus::Cancelled),
            "expired" => Ok(SubscriptionStatus::Expired),
            "pending" => Ok(SubscriptionStatus::Pending),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// User-level status signals feeding [`resolve_status`].
#[derive(Clone, Copy, Debug, Default)]
pub struct UserSignals<'a> {
    pub is_approved: Option<bool>,
    pub status: Option<&'a str>,
    pub is_active: Option<bool>,
}

/// Client-level status signals feeding [`resolve_status`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientSignals<'a> {
    pub status: Option<&'a str>,
    pub is_active: Option<bool>,
}

/// Parses a status-like string signal, ignoring unknown values.
fn parse_signal(signal: Option<&str>) -> Option<ResolvedStatus> {
    signal.and_then(|s| s.parse().ok())
}

/// Reduces the possibly-conflicting status signals to one canonical value.
///
/// The rules are ordered, and the first match wins:
/// 1. an explicitly unapproved user is `pending`;
/// 2. a recognized user-level status string wins next, user account state
///    being authoritative over client state;
/// 3. then a recognized client-level status string;
/// 4. then either active flag being explicitly `false` means `inactive`
///    (client flag checked before user flag);
/// 5. an approved user with a client not explicitly deactivated is `active`;
/// 6. anything still unresolved falls back to `pending`, the
///    least-privileged state.
///
/// Total over arbitrary missing fields; never panics.
pub fn resolve_status(user: UserSignals<'_>, client: ClientSignals<'_>) -> ResolvedStatus {
    if user.is_approved == Some(false) {
        return ResolvedStatus::Pending;
    }
    if let Some(status) = parse_signal(user.status) {
        return status;
    }
    if let Some(status) = parse_signal(client.status) {
        return status;
    }
    if client.is_active == Some(false) {
        return ResolvedStatus::Inactive;
    }
    if user.is_active == Some(false) {
        return ResolvedStatus::Inactive;
    }
    if user.is_approved == Some(true) && client.is_active != Some(false) {
        return ResolvedStatus::Active;
    }
    ResolvedStatus::Pending
}
