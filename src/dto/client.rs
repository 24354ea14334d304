//! Aggregated data for the client card view.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::client::Client;

/// Everything the client/subscription card renders, computed at one seam so
/// the view never re-derives economics at render time.
#[derive(Debug, Clone, Serialize)]
pub struct ClientCard {
    pub client: Client,
    /// Elapsed share of the current subscription term, `[0, 100]`.
    pub term_progress: u8,
    /// Days until renewal/expiry, negative once past; `None` without data.
    pub days_remaining: Option<i64>,
    /// Per-term charge after discount, rounded to cents.
    pub effective_price: f64,
}

impl ClientCard {
    /// Builds the card for one normalized client at the given instant.
    pub fn build(client: Client, now: DateTime<Utc>) -> Self {
        let term_progress = client.subscription.progress_at(now);
        let days_remaining = client.subscription.days_remaining(now);
        let effective_price = client.subscription.effective_price();
        Self {
            client,
            term_progress,
            days_remaining,
            effective_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::period::parse_timestamp;
    use crate::models::client::RawClientRecord;
    use serde_json::json;

    #[test]
    fn card_computes_term_economics() {
        let now = parse_timestamp("2024-01-16T00:00:00Z").unwrap();
        let record: RawClientRecord = serde_json::from_value(json!({
            "_id": "c1",
            "isActive": true,
            "subscription": {
                "plan": {"_id": "plan-pro", "name": "Pro", "price": 100.0},
                "status": "active",
                "amount": 80.0,
                "startDate": "2024-01-01",
                "expiresAt": "2024-01-31",
                "discount": 20.0,
            },
        }))
        .unwrap();
        let client = record.normalize(now).unwrap();

        let card = ClientCard::build(client, now);
        assert_eq!(card.term_progress, 50);
        assert_eq!(card.days_remaining, Some(15));
        assert_eq!(card.effective_price, 80.0);
    }

    #[test]
    fn card_degrades_without_term_data() {
        let now = parse_timestamp("2024-01-16T00:00:00Z").unwrap();
        let record: RawClientRecord = serde_json::from_value(json!({
            "_id": "c1",
            "subscription": {
                "plan": "plan-pro",
                "status": "active",
                "amount": 0.0,
                "expiresAt": "not-a-date",
            },
        }))
        .unwrap();
        let client = record.normalize(now).unwrap();

        let card = ClientCard::build(client, now);
        assert_eq!(card.term_progress, 0);
        assert_eq!(card.days_remaining, None);
        assert_eq!(card.effective_price, 0.0);
    }
}
