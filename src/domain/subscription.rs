//! Subscription aggregate and plan references.
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::period;
use crate::domain::pricing::effective_price;
use crate::domain::status::SubscriptionStatus;
use crate::domain::types::DiscountPercent;

/// Plan code used when a record carries no plan information at all.
pub const DEFAULT_PLAN: &str = "basic";

/// Length in days of one subscription term.
pub const TERM_DAYS: i64 = 30;

fn default_true() -> bool {
    true
}

/// A fully populated subscription plan.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A plan relationship as the backend returns it: either a bare identifier
/// or the populated object.
///
/// Callers narrow through [`PlanRef::is_populated`] and the accessors below
/// instead of inspecting the variants ad hoc.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PlanRef {
    Populated(Plan),
    Id(String),
}

impl PlanRef {
    /// Whether the backend returned the full plan object.
    pub fn is_populated(&self) -> bool {
        matches!(self, PlanRef::Populated(_))
    }

    /// The plan identifier, available in both shapes.
    pub fn id(&self) -> &str {
        match self {
            PlanRef::Populated(plan) => &plan.id,
            PlanRef::Id(id) => id,
        }
    }

    /// The plan's display name, when populated.
    pub fn name(&self) -> Option<&str> {
        match self {
            PlanRef::Populated(plan) => Some(&plan.name),
            PlanRef::Id(_) => None,
        }
    }

    /// The plan's list price, when populated.
    pub fn price(&self) -> Option<f64> {
        match self {
            PlanRef::Populated(plan) => Some(plan.price),
            PlanRef::Id(_) => None,
        }
    }
}

impl From<Plan> for PlanRef {
    fn from(plan: Plan) -> Self {
        PlanRef::Populated(plan)
    }
}

/// Normalized subscription block, always present on a normalized client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: PlanRef,
    pub status: SubscriptionStatus,
    /// Amount actually charged; distinct from the plan list price.
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// Backend fields this crate does not model; carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subscription {
    /// Fabricates the default subscription block for a record that has none,
    /// so views always receive a complete shape.
    pub fn synthesized(plan: PlanRef, client_active: bool, created_at: DateTime<Utc>) -> Self {
        let (status, expires_at) = if client_active {
            (
                SubscriptionStatus::Active,
                created_at + Duration::days(TERM_DAYS),
            )
        } else {
            (SubscriptionStatus::Cancelled, created_at)
        };
        Self {
            plan,
            status,
            amount: 0.0,
            start_date: Some(created_at),
            expires_at: Some(expires_at),
            custom_price: None,
            discount: None,
            extra: Map::new(),
        }
    }

    /// Base price before discount: the positive custom override when set,
    /// otherwise the populated plan's list price, otherwise zero.
    pub fn base_price(&self) -> f64 {
        self.custom_price
            .filter(|price| *price > 0.0)
            .or_else(|| self.plan.price())
            .unwrap_or(0.0)
    }

    /// Price actually charged per term after the percentage discount.
    pub fn effective_price(&self) -> f64 {
        effective_price(self.base_price(), self.discount.unwrap_or(0.0))
    }

    /// How far through the current term we are at `now`, in `[0, 100]`.
    ///
    /// Missing or inverted term bounds degrade to 0.
    pub fn progress_at(&self, now: DateTime<Utc>) -> u8 {
        match (self.start_date, self.expires_at) {
            (Some(start), Some(end)) => period::progress_percent(start, end, now),
            _ => 0,
        }
    }

    /// Days until renewal/expiry, negative once past; `None` without an
    /// expiry anchor.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|expires| period::days_until(expires, now))
    }
}

/// Payload sent to the backend when a moderator assigns a plan to a client.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAssignment {
    pub plan: Plan,
    pub custom_price: Option<f64>,
    pub discount: DiscountPercent,
    /// Charged amount, already discounted and rounded to cents.
    pub amount: f64,
    pub start_date: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PlanAssignment {
    /// Builds an assignment starting at `now` for one term, computing the
    /// charged amount from the override price or the plan list price.
    pub fn new(
        plan: Plan,
        custom_price: Option<f64>,
        discount: DiscountPercent,
        now: DateTime<Utc>,
    ) -> Self {
        let custom_price = custom_price.filter(|price| *price > 0.0);
        let base = custom_price.unwrap_or(plan.price);
        let amount = effective_price(base, discount.get());
        Self {
            plan,
            custom_price,
            discount,
            amount,
            start_date: now,
            expires_at: now + Duration::days(TERM_DAYS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::period::parse_timestamp;

    fn plan(price: f64) -> Plan {
        Plan {
            id: "plan-pro".to_string(),
            name: "Pro".to_string(),
            price,
            description: None,
            features: vec![],
            is_active: true,
        }
    }

    fn ts(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn synthesized_active_subscription_spans_one_term() {
        let created = ts("2024-03-01");
        let sub = Subscription::synthesized(PlanRef::Id(DEFAULT_PLAN.to_string()), true, created);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.amount, 0.0);
        assert_eq!(sub.start_date, Some(created));
        assert_eq!(sub.expires_at, Some(ts("2024-03-31")));
    }

    #[test]
    fn synthesized_inactive_subscription_is_cancelled_and_expired() {
        let created = ts("2024-03-01");
        let sub = Subscription::synthesized(PlanRef::Id(DEFAULT_PLAN.to_string()), false, created);
        assert_eq!(sub.status, SubscriptionStatus::Cancelled);
        assert_eq!(sub.expires_at, Some(created));
        assert_eq!(sub.progress_at(ts("2024-03-15")), 0);
    }

    #[test]
    fn base_price_prefers_positive_custom_price() {
        let mut sub = Subscription::synthesized(PlanRef::Populated(plan(50.0)), true, ts("2024-01-01"));
        assert_eq!(sub.base_price(), 50.0);

        sub.custom_price = Some(35.0);
        assert_eq!(sub.base_price(), 35.0);

        // A zero override means "no override", not "free".
        sub.custom_price = Some(0.0);
        assert_eq!(sub.base_price(), 50.0);

        sub.plan = PlanRef::Id("plan-pro".to_string());
        sub.custom_price = None;
        assert_eq!(sub.base_price(), 0.0);
    }

    #[test]
    fn effective_price_applies_discount_to_base() {
        let mut sub = Subscription::synthesized(PlanRef::Populated(plan(100.0)), true, ts("2024-01-01"));
        sub.discount = Some(20.0);
        assert_eq!(sub.effective_price(), 80.0);
    }

    #[test]
    fn days_remaining_requires_an_expiry_anchor() {
        let mut sub = Subscription::synthesized(PlanRef::Id(DEFAULT_PLAN.to_string()), true, ts("2024-01-01"));
        assert_eq!(sub.days_remaining(ts("2024-01-21")), Some(10));
        sub.expires_at = None;
        assert_eq!(sub.days_remaining(ts("2024-01-21")), None);
    }

    #[test]
    fn plan_assignment_charges_discounted_custom_price() {
        let now = ts("2024-06-01");
        let assignment = PlanAssignment::new(
            plan(100.0),
            Some(80.0),
            DiscountPercent::new(25.0),
            now,
        );
        assert_eq!(assignment.amount, 60.0);
        assert_eq!(assignment.expires_at, ts("2024-07-01"));

        let list_price = PlanAssignment::new(plan(100.0), None, DiscountPercent::new(150.0), now);
        assert_eq!(list_price.amount, 0.0);
    }

    #[test]
    fn plan_ref_deserializes_both_shapes() {
        let bare: PlanRef = serde_json::from_str("\"plan-basic\"").unwrap();
        assert!(!bare.is_populated());
        assert_eq!(bare.id(), "plan-basic");

        let populated: PlanRef = serde_json::from_value(serde_json::json!({
            "_id": "plan-pro",
            "name": "Pro",
            "price": 49.0,
        }))
        .unwrap();
        assert!(populated.is_populated());
        assert_eq!(populated.price(), Some(49.0));
        assert!(populated.name().is_some());
    }
}
