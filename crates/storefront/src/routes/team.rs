//! Team page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::backend::TeamMember;
use crate::filters;
use crate::state::AppState;

/// Team member display data for templates.
///
/// Contact links are derived from whichever optional channels the member
/// has; a missing channel renders no icon.
#[derive(Clone)]
pub struct TeamMemberView {
    pub name: String,
    pub position: String,
    pub image: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_href: Option<String>,
}

impl From<&TeamMember> for TeamMemberView {
    fn from(member: &TeamMember) -> Self {
        Self {
            name: member.name.clone(),
            position: member.position.clone(),
            image: member.image.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            whatsapp_href: member.whatsapp.as_deref().and_then(whatsapp_link),
        }
    }
}

/// Build a wa.me link from a messaging handle.
///
/// Handles arrive with human formatting ("+20 100-555-0123"); wa.me wants
/// digits only. A handle with no digits yields no link.
fn whatsapp_link(handle: &str) -> Option<String> {
    let digits: String = handle.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("https://wa.me/{digits}"))
    }
}

/// Team page template.
#[derive(Template, WebTemplate)]
#[template(path = "team/index.html")]
pub struct TeamTemplate {
    pub members: Vec<TeamMemberView>,
}

/// Only active members are shown.
fn active_members(members: &[TeamMember]) -> Vec<TeamMemberView> {
    members
        .iter()
        .filter(|member| member.is_active)
        .map(TeamMemberView::from)
        .collect()
}

/// Display the team page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let members = state.backend().list_team_members().await;

    TeamTemplate {
        members: active_members(&members),
    }
}
