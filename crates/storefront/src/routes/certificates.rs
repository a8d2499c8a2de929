//! Certificates page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::backend::Certificate;
use crate::filters;
use crate::state::AppState;

/// Certificate display data for templates.
#[derive(Clone)]
pub struct CertificateView {
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl From<&Certificate> for CertificateView {
    fn from(certificate: &Certificate) -> Self {
        Self {
            name: certificate.name.clone(),
            description: certificate.description.clone(),
            image: certificate.image.clone(),
            category: certificate.category.clone(),
        }
    }
}

/// Certificates page template.
#[derive(Template, WebTemplate)]
#[template(path = "certificates/index.html")]
pub struct CertificatesTemplate {
    pub certificates: Vec<CertificateView>,
}

/// Only active certificates are shown.
fn active_certificates(certificates: &[Certificate]) -> Vec<CertificateView> {
    certificates
        .iter()
        .filter(|certificate| certificate.is_active)
        .map(CertificateView::from)
        .collect()
}

/// Display the certificates page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let certificates = state.backend().list_certificates().await;

    CertificatesTemplate {
        certificates: active_certificates(&certificates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certificate(name: &str, is_active: bool) -> Certificate {
        Certificate {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: "Export-grade quality assurance".to_string(),
            image: String::new(),
            is_active,
            category: "quality".to_string(),
            created_at: "2025-06-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_inactive_certificates_are_hidden() {
        let certificates = vec![
            certificate("ISO", true),
            certificate("Expired", false),
            certificate("Organic", true),
        ];
        let views = active_certificates(&certificates);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "ISO");
        assert_eq!(views[1].name, "Organic");
    }

    #[test]
    fn test_all_inactive_yields_empty_view() {
        let certificates = vec![certificate("Old", false)];
        assert!(active_certificates(&certificates).is_empty());
    }
}
