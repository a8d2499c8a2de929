//! HTTP route handlers for the storefront.
//!
//! Every page follows the same shape: fetch from the content backend,
//! derive the view (filter, slice, or look up), render a full template.
//! Backend reads fail soft, so handlers never surface fetch failures -
//! the page degrades to its empty state instead.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page (featured products)
//! GET  /products         - Product catalog with category filter bar
//! GET  /product-details  - Product detail page (?id=...)
//! GET  /certificates     - Active certificates
//! GET  /team             - Active team members
//! GET  /contact          - Contact info and message form
//! POST /contact          - Submit a contact message
//! ```

pub mod certificates;
pub mod contact;
pub mod home;
pub mod products;
pub mod team;

use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .route("/product-details", get(products::show))
        .route("/certificates", get(certificates::index))
        .route("/team", get(team::index))
        .route("/contact", get(contact::page).post(contact::submit))
}
