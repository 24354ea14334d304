use chrono::Utc;
use validator::Validate;

use subdesk::domain::client::NewClient;
use subdesk::domain::status::{ResolvedStatus, SubscriptionStatus};
use subdesk::domain::types::{ClientEmail, RecordId};
use subdesk::forms::client::{ChangeStatusForm, NewClientForm, UpdateClientForm};
use subdesk::forms::subscription::AssignPlanForm;
use subdesk::services::client::{
    ClientListQuery, change_client_status, client_card, create_client, find_client_by_email,
    get_client, list_clients, update_client,
};
use subdesk::services::subscription::{assign_plan, cancel_subscription, renew_subscription};

mod common;

#[test]
fn test_client_lifecycle_through_services() {
    let repo = common::seeded_repo();
    let now = Utc::now();

    let form = NewClientForm {
        company_name: "Acme Corp".to_string(),
        email: "owner@acme.com".to_string(),
        phone: "555-0100".to_string(),
        business_location: "Springfield".to_string(),
        notes: String::new(),
    };
    form.validate().unwrap();

    let created = create_client(&repo, &NewClient::from(&form), now).unwrap();
    // A fresh record has no approval signals, so it starts pending.
    assert_eq!(created.status, ResolvedStatus::Pending);
    assert!(created.is_active);
    assert_eq!(created.subscription.status, SubscriptionStatus::Active);

    let client_id = RecordId::new(created.id.clone()).unwrap();

    let update_form = UpdateClientForm {
        id: created.id.clone(),
        company_name: "Acme Corporation".to_string(),
        email: "billing@acme.com".to_string(),
        phone: String::new(),
        business_location: String::new(),
        tax_id: "TAX-1".to_string(),
        notes: String::new(),
        old_website: None,
    };
    update_form.validate().unwrap();
    let updated = update_client(&repo, &client_id, &(&update_form).into(), now).unwrap();
    assert_eq!(updated.company_name.as_deref(), Some("Acme Corporation"));
    assert_eq!(updated.email.as_deref(), Some("billing@acme.com"));

    let status_form = ChangeStatusForm {
        id: created.id.clone(),
        status: "active".to_string(),
    };
    let activated =
        change_client_status(&repo, &client_id, status_form.resolved_status().unwrap(), now)
            .unwrap();
    assert_eq!(activated.status, ResolvedStatus::Active);

    let fetched = get_client(&repo, &client_id, now).unwrap();
    assert_eq!(fetched.status, ResolvedStatus::Active);

    let by_email = find_client_by_email(
        &repo,
        &ClientEmail::new("Billing@Acme.com").unwrap(),
        now,
    )
    .unwrap()
    .unwrap();
    assert_eq!(by_email.id, created.id);
}

#[test]
fn test_list_clients_searches_and_paginates() {
    let repo = common::seeded_repo();
    let now = Utc::now();

    for i in 0..12 {
        repo.insert_raw(common::raw_record(&format!("c{i}"), &format!("Company {i}")))
            .unwrap();
    }
    repo.insert_raw(common::raw_record("special", "Orbit Labs"))
        .unwrap();

    let page = list_clients(&repo, &ClientListQuery::new().paginate(2, 5), now).unwrap();
    assert_eq!(page.total, 13);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.page, 2);

    let found = list_clients(&repo, &ClientListQuery::new().search("orbit"), now).unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].id, "special");

    let pending = list_clients(
        &repo,
        &ClientListQuery::new().status(ResolvedStatus::Pending),
        now,
    )
    .unwrap();
    assert_eq!(pending.total, 13);
}

#[test]
fn test_subscription_flow_through_services() {
    let repo = common::seeded_repo();
    let now = Utc::now();

    repo.insert_raw(common::raw_record("c1", "Acme")).unwrap();
    let client_id = RecordId::new("c1").unwrap();

    let form = AssignPlanForm {
        id: "c1".to_string(),
        plan_id: "plan-pro".to_string(),
        custom_price: Some(80.0),
        discount: Some(25.0),
    };
    let assigned = assign_plan(&repo, &form, now).unwrap();
    assert_eq!(assigned.subscription.status, SubscriptionStatus::Active);
    assert_eq!(assigned.subscription.amount, 60.0);
    assert_eq!(assigned.subscription.days_remaining(now), Some(30));

    let card = client_card(&repo, &client_id, now).unwrap();
    assert_eq!(card.term_progress, 0);
    assert_eq!(card.effective_price, 60.0);
    assert_eq!(card.client.id, assigned.id);

    let renewed = renew_subscription(&repo, &client_id, now).unwrap();
    assert_eq!(renewed.subscription.days_remaining(now), Some(60));

    let cancelled = cancel_subscription(&repo, &client_id, now).unwrap();
    assert_eq!(cancelled.subscription.status, SubscriptionStatus::Cancelled);
    // Economics survive cancellation so the card can still show them.
    assert_eq!(cancelled.subscription.amount, 60.0);
}
