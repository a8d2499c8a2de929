//! Contact page route handlers.
//!
//! The one page with a write: `GET /contact` renders the contact channels
//! and the message form, `POST /contact` submits the message through the
//! backend. Reads stay fail-soft; the submission fails loud with text the
//! visitor sees. The form control cycle is idle -> submitting -> idle with
//! exactly one status message; no automatic retry, the visitor resubmits.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::{ApiError, ContactEntry, MessagePayload};
use crate::filters;
use crate::state::AppState;

/// Contact message form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Settled submission status shown above the form. At most one at a time;
/// a new submission overwrites it.
#[derive(Clone)]
pub struct FormStatus {
    pub success: bool,
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/index.html")]
pub struct ContactTemplate {
    pub phone: Option<ContactEntry>,
    pub email: Option<ContactEntry>,
    pub address: Option<ContactEntry>,
    pub form: ContactForm,
    pub status: Option<FormStatus>,
}

impl ContactTemplate {
    /// Assemble the page from the fetched channel map plus form state.
    async fn build(state: &AppState, form: ContactForm, status: Option<FormStatus>) -> Self {
        let mut info = state.backend().get_contact_info().await;
        Self {
            phone: info.remove("phone"),
            email: info.remove("email"),
            address: info.remove("address"),
            form,
            status,
        }
    }
}

/// Display the contact page.
#[instrument(skip(state))]
pub async fn page(State(state): State<AppState>) -> impl IntoResponse {
    ContactTemplate::build(&state, ContactForm::default(), None).await
}

/// Submit a contact message and re-render the page with the outcome.
///
/// On failure the visitor's field values are preserved so they can correct
/// and resubmit; on success the form is cleared.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    if let Err(message) = validate_form(&form) {
        let status = FormStatus {
            success: false,
            message,
        };
        return ContactTemplate::build(&state, form, Some(status)).await;
    }

    let payload = MessagePayload {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        phone: form.phone.trim().to_string(),
        subject: form.subject.trim().to_string(),
        message: form.message.trim().to_string(),
    };

    let result = state.backend().send_message(&payload).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "contact message submission failed");
    }

    let (status, form) = submission_outcome(result, form);
    ContactTemplate::build(&state, form, Some(status)).await
}

/// Validate the form before submission.
///
/// # Errors
///
/// Returns the message to display when a required field is missing or the
/// email address is malformed.
fn validate_form(form: &ContactForm) -> Result<(), String> {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return Err("Name and message are required.".to_string());
    }
    if !is_valid_email(form.email.trim()) {
        return Err("Please enter a valid email address.".to_string());
    }
    Ok(())
}

/// Map the settled submission onto the status banner and the next form
/// state: success clears the fields, failure keeps them intact.
fn submission_outcome(
    result: Result<(), ApiError>,
    form: ContactForm,
) -> (FormStatus, ContactForm) {
    match result {
        Ok(()) => (
            FormStatus {
                success: true,
                message: "Your message has been sent successfully!".to_string(),
            },
            ContactForm::default(),
        ),
        Err(e) => (
            FormStatus {
                success: false,
                message: e.user_message().to_string(),
            },
            form,
        ),
    }
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
