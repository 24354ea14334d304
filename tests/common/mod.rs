use subdesk::domain::subscription::Plan;
use subdesk::models::client::RawClientRecord;
use subdesk::repository::memory::InMemoryRepository;

/// Builds a gateway seeded with the standard plan catalog.
pub fn seeded_repo() -> InMemoryRepository {
    InMemoryRepository::with_plans(vec![
        plan("plan-basic", "Basic", 25.0),
        plan("plan-pro", "Pro", 100.0),
    ])
}

pub fn plan(id: &str, name: &str, price: f64) -> Plan {
    Plan {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: None,
        features: vec![],
        is_active: true,
    }
}

/// Raw record with the given id and company, otherwise untouched.
pub fn raw_record(id: &str, company: &str) -> RawClientRecord {
    RawClientRecord {
        id: Some(id.to_string()),
        company_name: Some(company.to_string()),
        ..RawClientRecord::default()
    }
}
