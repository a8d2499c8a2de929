//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::backend::Product;
use crate::filters;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Number of featured products shown on the home page.
const FEATURED_PRODUCT_COUNT: usize = 6;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Featured products for the "Our Projects" grid.
    pub featured: Vec<ProductCardView>,
}

/// The featured slice: the first [`FEATURED_PRODUCT_COUNT`] products in
/// source order, fewer when the catalog is smaller.
fn featured_products(products: &[Product]) -> Vec<ProductCardView> {
    products
        .iter()
        .take(FEATURED_PRODUCT_COUNT)
        .map(ProductCardView::from)
        .collect()
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.backend().list_products().await;

    HomeTemplate {
        featured: featured_products(&products),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CategoryRef;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            image: String::new(),
            category: CategoryRef {
                name: "Herbs".to_string(),
                slug: "herbs".to_string(),
            },
            created_at: "2026-01-05T10:00:00Z".to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn test_featured_empty_catalog() {
        assert!(featured_products(&[]).is_empty());
    }

    #[test]
    fn test_featured_single_product() {
        let featured = featured_products(&[product("only")]);
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].name, "Product only");
    }

    #[test]
    fn test_featured_caps_at_six_preserving_order() {
        let products: Vec<Product> = (0..9).map(|i| product(&i.to_string())).collect();
        let featured = featured_products(&products);
        assert_eq!(featured.len(), FEATURED_PRODUCT_COUNT);
        let names: Vec<_> = featured.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Product 0", "Product 1", "Product 2", "Product 3", "Product 4", "Product 5"]
        );
    }
}
