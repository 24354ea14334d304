use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::status::ResolvedStatus;
use crate::domain::types::TypeConstraintError;

#[derive(Deserialize, Validate)]
/// Form data for registering a new client.
pub struct NewClientForm {
    /// Company display name.
    #[validate(length(min = 1))]
    pub company_name: String,
    /// Contact email address.
    #[validate(email)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Free-form business location.
    #[serde(default)]
    pub business_location: String,
    /// Internal notes.
    #[serde(default)]
    pub notes: String,
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing client profile.
pub struct UpdateClientForm {
    /// Client identifier.
    pub id: String,
    /// Updated company name.
    #[validate(length(min = 1))]
    pub company_name: String,
    /// Updated contact email.
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub business_location: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub notes: String,
    /// Previous website, kept for migration reference.
    #[validate(url)]
    #[serde(default)]
    pub old_website: Option<String>,
}

#[derive(Deserialize, Validate)]
/// Form data for an explicit status change.
pub struct ChangeStatusForm {
    /// Client identifier.
    pub id: String,
    /// Target status, one of the canonical lower-case values.
    #[validate(length(min = 1))]
    pub status: String,
}

impl ChangeStatusForm {
    /// Parses the submitted status string.
    pub fn resolved_status(&self) -> Result<ResolvedStatus, TypeConstraintError> {
        self.status.parse()
    }
}

impl From<&NewClientForm> for NewClient {
    /// Convert the [`NewClientForm`] into a [`NewClient`] payload.
    fn from(form: &NewClientForm) -> Self {
        NewClient::new(
            form.company_name.clone(),
            Some(form.email.clone()),
            Some(form.phone.clone()),
            Some(form.business_location.clone()),
            Some(form.notes.clone()),
        )
    }
}

impl From<&UpdateClientForm> for UpdateClient {
    /// Convert the [`UpdateClientForm`] into an [`UpdateClient`] payload.
    fn from(form: &UpdateClientForm) -> Self {
        UpdateClient::new(
            form.company_name.clone(),
            Some(form.email.clone()),
            Some(form.phone.clone()),
            Some(form.business_location.clone()),
            Some(form.tax_id.clone()),
            Some(form.notes.clone()),
            form.old_website.clone(),
        )
    }
}
