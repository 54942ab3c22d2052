//! Contact and newsletter forms, delivered through a third-party form relay.

use async_trait::async_trait;
use awc::Client;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    core::content::ContentService,
    error::{CmsError, Result},
};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL.is_match(email.trim()) {
        Ok(())
    } else {
        Err(CmsError::InvalidEmail(email.to_string()))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CmsError::InvalidForm("name is required".to_string()));
        }
        if self.message.trim().is_empty() {
            return Err(CmsError::InvalidForm("message is required".to_string()));
        }
        validate_email(&self.email)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewsletterSignup {
    pub email: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RelayMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "_subject")]
    pub subject: String,
    #[serde(rename = "_captcha")]
    pub captcha: String,
}

impl RelayMessage {
    pub fn contact(form: &ContactForm, subject: &str) -> Self {
        RelayMessage {
            name: Some(form.name.clone()),
            email: form.email.clone(),
            message: Some(form.message.clone()),
            subject: subject.to_string(),
            captcha: "false".to_string(),
        }
    }

    pub fn newsletter(email: &str, subject: &str) -> Self {
        RelayMessage {
            name: None,
            email: email.to_string(),
            message: None,
            subject: subject.to_string(),
            captcha: "false".to_string(),
        }
    }
}

#[async_trait(?Send)]
pub trait Relay: Send + Sync {
    async fn deliver(&self, message: &RelayMessage) -> Result<()>;
}

/// Reads the relay's verdict: `success` may come back as `true` or `"true"`.
pub fn relay_verdict(status_ok: bool, body: &Value) -> Result<()> {
    let success = matches!(body.get("success"), Some(Value::Bool(true)))
        || matches!(body.get("success"), Some(Value::String(flag)) if flag == "true");
    if status_ok && success {
        return Ok(());
    }
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Submission failed.");
    Err(CmsError::FormSubmission(message.to_string()))
}

pub struct FormRelay {
    endpoint: String,
}

impl FormRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        FormRelay {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl Relay for FormRelay {
    async fn deliver(&self, message: &RelayMessage) -> Result<()> {
        let client = Client::default();
        let mut response = client
            .post(&self.endpoint)
            .insert_header(("Accept", "application/json"))
            .send_json(message)
            .await
            .map_err(|error| CmsError::FormSubmission(error.to_string()))?;
        let body = response
            .json::<Value>()
            .await
            .map_err(|error| CmsError::FormSubmission(error.to_string()))?;
        relay_verdict(response.status().is_success(), &body)
    }
}

/// Validates and relays a contact form. Invalid forms never reach the relay.
pub async fn submit_contact(relay: &dyn Relay, form: &ContactForm, subject: &str) -> Result<()> {
    form.validate()?;
    relay.deliver(&RelayMessage::contact(form, subject)).await?;
    info!("Contact form from {} delivered", form.email);
    Ok(())
}

/// Records a newsletter signup and notifies the relay. A relay failure does
/// not undo the signup.
pub async fn subscribe(
    content: &ContentService,
    relay: &dyn Relay,
    signup: &NewsletterSignup,
    subject: &str,
) -> Result<bool> {
    let email = signup.email.trim();
    validate_email(email)?;
    let added = content.add_subscriber(email).await?;
    if let Err(error) = relay.deliver(&RelayMessage::newsletter(email, subject)).await {
        warn!("Newsletter relay failed for {}: {}", email, error);
    }
    Ok(added)
}
