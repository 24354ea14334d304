//! Client listing and profile maintenance services.
use chrono::{DateTime, Utc};

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::status::ResolvedStatus;
use crate::domain::types::{ClientEmail, RecordId};
use crate::dto::client::ClientCard;
use crate::models::client::RawClientRecord;
use crate::pagination::{DEFAULT_PAGE_SIZE, Paginated, paginate};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Search/filter/pagination parameters for the client list view.
#[derive(Debug, Clone)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub status: Option<ResolvedStatus>,
    pub page: usize,
    pub per_page: usize,
}

impl Default for ClientListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            status: None,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: ResolvedStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    fn matches(&self, client: &Client) -> bool {
        if let Some(status) = self.status
            && client.status != status
        {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                let haystacks = [
                    Some(client.display_name()),
                    Some(client.user.full_name()),
                    client.email.clone(),
                    client.user.email.clone(),
                ];
                haystacks
                    .into_iter()
                    .flatten()
                    .any(|value| value.to_lowercase().contains(&term))
            }
        }
    }
}

/// Normalizes a batch of fetched records, dropping the malformed ones.
///
/// A single bad record must not blank the whole list view, so contract
/// violations are logged and skipped here rather than propagated.
fn normalize_all(records: Vec<RawClientRecord>, now: DateTime<Utc>) -> Vec<Client> {
    records
        .into_iter()
        .filter_map(|record| match record.normalize(now) {
            Ok(client) => Some(client),
            Err(err) => {
                log::warn!("Skipping malformed client record: {err}");
                None
            }
        })
        .collect()
}

/// Fetches, normalizes, filters, and paginates the client list.
pub fn list_clients<R>(
    repo: &R,
    query: &ClientListQuery,
    now: DateTime<Utc>,
) -> ServiceResult<Paginated<Client>>
where
    R: ClientReader + ?Sized,
{
    let records = repo.list_clients().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err
    })?;

    let mut clients = normalize_all(records, now);
    clients.retain(|client| query.matches(client));

    Ok(paginate(clients, query.page, query.per_page))
}

/// Fetches one client by id, normalized for display.
pub fn get_client<R>(repo: &R, client_id: &RecordId, now: DateTime<Utc>) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let record = repo.get_client_by_id(client_id).map_err(|err| {
        log::error!("Failed to fetch client {client_id}: {err}");
        err
    })?;
    let record = record.ok_or(ServiceError::NotFound)?;
    Ok(record.normalize(now)?)
}

/// Fetches one client and computes the card-view economics for it.
pub fn client_card<R>(
    repo: &R,
    client_id: &RecordId,
    now: DateTime<Utc>,
) -> ServiceResult<ClientCard>
where
    R: ClientReader + ?Sized,
{
    let client = get_client(repo, client_id, now)?;
    Ok(ClientCard::build(client, now))
}

/// Looks a client up by contact email.
pub fn find_client_by_email<R>(
    repo: &R,
    email: &ClientEmail,
    now: DateTime<Utc>,
) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ?Sized,
{
    let record = repo.get_client_by_email(email).map_err(|err| {
        log::error!("Failed to look up client by email: {err}");
        err
    })?;
    record.map(|record| record.normalize(now)).transpose().map_err(Into::into)
}

/// Creates a client through the backend and returns it normalized.
pub fn create_client<R>(
    repo: &R,
    new_client: &NewClient,
    now: DateTime<Utc>,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let record = repo.create_client(new_client).map_err(|err| {
        log::error!("Failed to create client: {err}");
        err
    })?;
    Ok(record.normalize(now)?)
}

/// Applies profile updates and returns the refreshed view model.
pub fn update_client<R>(
    repo: &R,
    client_id: &RecordId,
    updates: &UpdateClient,
    now: DateTime<Utc>,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let record = repo.update_client(client_id, updates).map_err(|err| {
        log::error!("Failed to update client {client_id}: {err}");
        err
    })?;
    Ok(record.normalize(now)?)
}

/// Asks the backend to set an explicit status and reflects the result.
pub fn change_client_status<R>(
    repo: &R,
    client_id: &RecordId,
    status: ResolvedStatus,
    now: DateTime<Utc>,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let record = repo.set_client_status(client_id, status).map_err(|err| {
        log::error!("Failed to change status of client {client_id}: {err}");
        err
    })?;
    Ok(record.normalize(now)?)
}

/// Removes a client record.
pub fn delete_client<R>(repo: &R, client_id: &RecordId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.delete_client(client_id).map_err(|err| {
        log::error!("Failed to delete client {client_id}: {err}");
        ServiceError::from(err)
    })
}
