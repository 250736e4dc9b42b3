//! Lead-capture form relays.
//!
//! The site's contact and website-audit forms both post JSON here; we
//! reshape each payload and forward it to a spreadsheet-backed webhook.
//! The contact script expects form-urlencoded fields, the audit script
//! expects JSON. Each relay tags its submission with a fixed `source`
//! so the spreadsheet can tell the funnels apart.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::FormsConfig;

/// Errors from relaying a form submission upstream.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The webhook URL for this form is not configured.
    #[error("{form} webhook URL is not configured")]
    NotConfigured { form: &'static str },

    /// The upstream webhook could not be reached or answered with an error.
    #[error("webhook request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// A general contact-form submission.
///
/// Missing fields default to empty strings; the spreadsheet keeps the
/// row either way and a human follows up.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A website-audit request submission.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditForm {
    pub name: String,
    pub email: String,
    pub website: String,
    pub business_type: String,
}

/// Audit payload as the spreadsheet script expects it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditPayload<'a> {
    name: &'a str,
    email: &'a str,
    website: &'a str,
    business_type: &'a str,
    source: &'static str,
}

/// Forwards form submissions to the configured spreadsheet webhooks.
pub struct FormRelay {
    client: reqwest::Client,
    contact_url: String,
    audit_url: String,
}

impl FormRelay {
    pub fn new(client: reqwest::Client, forms: &FormsConfig) -> Self {
        Self {
            client,
            contact_url: forms.contact_webhook_url.clone(),
            audit_url: forms.audit_webhook_url.clone(),
        }
    }

    /// Relay a contact submission. Returns the webhook's response body.
    pub async fn relay_contact(&self, form: &ContactForm) -> Result<String, RelayError> {
        if self.contact_url.is_empty() {
            return Err(RelayError::NotConfigured { form: "contact" });
        }

        debug!(email = %form.email, "Relaying contact form");
        let response = self
            .client
            .post(&self.contact_url)
            .form(&[
                ("name", form.name.as_str()),
                ("email", form.email.as_str()),
                ("message", form.message.as_str()),
                ("source", "NovaStack Website"),
            ])
            .send()
            .await?;

        let text = response.text().await?;
        info!("Contact form relayed");
        Ok(text)
    }

    /// Relay an audit request. Returns the webhook's response body.
    pub async fn relay_audit(&self, form: &AuditForm) -> Result<String, RelayError> {
        if self.audit_url.is_empty() {
            return Err(RelayError::NotConfigured { form: "audit" });
        }

        debug!(email = %form.email, website = %form.website, "Relaying audit form");
        let response = self
            .client
            .post(&self.audit_url)
            .json(&AuditPayload {
                name: &form.name,
                email: &form.email,
                website: &form.website,
                business_type: &form.business_type,
                source: "Website Audit",
            })
            .send()
            .await?;

        let text = response.text().await?;
        info!("Audit form relayed");
        Ok(text)
    }

    /// Whether the contact webhook is configured.
    pub fn contact_configured(&self) -> bool {
        !self.contact_url.is_empty()
    }

    /// Whether the audit webhook is configured.
    pub fn audit_configured(&self) -> bool {
        !self.audit_url.is_empty()
    }
}
