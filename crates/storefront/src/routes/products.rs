//! Product catalog and detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::{Category, Product};
use crate::filters;
use crate::state::AppState;

/// Maximum number of related products on the detail page.
const RELATED_PRODUCT_COUNT: usize = 3;

// =============================================================================
// View Types
// =============================================================================

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub name: String,
    pub image: String,
    pub category_name: String,
    pub created_at: String,
    pub detail_href: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            image: product.image.clone(),
            category_name: product.category.name.clone(),
            created_at: product.created_at.clone(),
            detail_href: detail_href(&product.id),
        }
    }
}

/// One control in the category filter bar.
///
/// The bar is derived from an explicit selection value on every render;
/// exactly one control carries `active`.
#[derive(Clone)]
pub struct FilterView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Full product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub name: String,
    pub description: String,
    pub image: String,
    pub category_name: String,
    pub created_at: String,
    pub in_stock: bool,
    pub share_url: String,
}

/// Relative URL of a product's detail page.
fn detail_href(id: &str) -> String {
    format!("/product-details?id={}", urlencoding::encode(id))
}

// =============================================================================
// View Derivation
// =============================================================================

/// Resolve the requested category slug against the fetched categories.
///
/// An absent or unknown slug selects "all"; the filter bar then marks the
/// "All Products" control active, never zero or two controls.
fn resolve_selection<'a>(categories: &'a [Category], requested: Option<&str>) -> Option<&'a str> {
    let requested = requested?;
    categories
        .iter()
        .find(|category| category.slug == requested)
        .map(|category| category.slug.as_str())
}

/// Build the filter bar from the category list and the resolved selection.
fn build_filter_views(categories: &[Category], selected: Option<&str>) -> Vec<FilterView> {
    let mut views = Vec::with_capacity(categories.len() + 1);
    views.push(FilterView {
        label: "All Products".to_string(),
        href: "/products".to_string(),
        active: selected.is_none(),
    });
    for category in categories {
        views.push(FilterView {
            label: format!("{} ({})", category.name, category.product_count),
            href: format!(
                "/products?category={}",
                urlencoding::encode(&category.slug)
            ),
            active: selected == Some(category.slug.as_str()),
        });
    }
    views
}

/// Filter products by category slug. Pure and idempotent.
fn filter_by_slug(products: &[Product], slug: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|product| product.category.slug == slug)
        .cloned()
        .collect()
}

/// Related products: same category, excluding the product itself,
/// source order, capped at [`RELATED_PRODUCT_COUNT`].
fn related_products(candidates: &[Product], current_id: &str) -> Vec<ProductCardView> {
    candidates
        .iter()
        .filter(|product| product.id != current_id)
        .take(RELATED_PRODUCT_COUNT)
        .map(ProductCardView::from)
        .collect()
}

// =============================================================================
// Catalog Page
// =============================================================================

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// Product catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct CatalogTemplate {
    pub filters: Vec<FilterView>,
    pub products: Vec<ProductCardView>,
}

/// Display the product catalog with the category filter bar.
///
/// Products and categories are independent reads, fetched concurrently.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let backend = state.backend();
    let (all_products, categories) =
        tokio::join!(backend.list_products(), backend.list_categories());

    let selected = resolve_selection(&categories, query.category.as_deref());
    let products = selected.map_or_else(
        || all_products.iter().map(ProductCardView::from).collect(),
        |slug| {
            filter_by_slug(&all_products, slug)
                .iter()
                .map(ProductCardView::from)
                .collect()
        },
    );

    CatalogTemplate {
        filters: build_filter_views(&categories, selected),
        products,
    }
}

// =============================================================================
// Detail Page
// =============================================================================

/// Detail page query parameters.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub id: Option<String>,
}

/// Product detail page template.
///
/// `product` is `None` when the id is absent or unknown; the template then
/// renders its not-found state instead of the product overview.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct DetailTemplate {
    pub product: Option<ProductDetailView>,
    pub related: Vec<ProductCardView>,
}

/// Display a single product looked up from the `id` query parameter.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<DetailQuery>,
) -> impl IntoResponse {
    // A missing id cannot render a product, but it is not an error
    let Some(id) = query.id.as_deref().filter(|id| !id.is_empty()) else {
        return DetailTemplate {
            product: None,
            related: Vec::new(),
        };
    };

    let backend = state.backend();
    let Some(product) = backend.get_product_by_id(id).await else {
        return DetailTemplate {
            product: None,
            related: Vec::new(),
        };
    };

    let siblings = backend
        .list_products_by_category(&product.category.slug)
        .await;
    let related = related_products(&siblings, &product.id);

    DetailTemplate {
        product: Some(ProductDetailView {
            name: product.name,
            description: product.description,
            image: product.image,
            category_name: product.category.name,
            created_at: product.created_at,
            in_stock: product.in_stock,
            share_url: format!("{}{}", state.config().base_url, detail_href(id)),
        }),
        related,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::CategoryRef;

    fn category(slug: &str, name: &str, count: u32) -> Category {
        Category {
            id: format!("cat-{slug}"),
            name: name.to_string(),
            slug: slug.to_string(),
            product_count: count,
        }
    }

    fn product(id: &str, slug: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            image: format!("https://cdn.example.com/{id}.jpg"),
            category: CategoryRef {
                name: slug.to_string(),
                slug: slug.to_string(),
            },
            created_at: "2026-01-05T10:00:00Z".to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn test_filter_by_slug_is_idempotent() {
        let products = vec![product("a", "herbs"), product("b", "spices"), product("c", "herbs")];
        let once = filter_by_slug(&products, "herbs");
        let twice = filter_by_slug(&once, "herbs");
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_exactly_one_filter_active_for_known_slug() {
        let categories = vec![category("herbs", "Herbs", 3), category("spices", "Spices", 5)];
        let selected = resolve_selection(&categories, Some("spices"));
        let views = build_filter_views(&categories, selected);

        let active: Vec<_> = views.iter().filter(|v| v.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Spices (5)");
    }

    #[test]
    fn test_unknown_slug_falls_back_to_all_products() {
        let categories = vec![category("herbs", "Herbs", 3)];
        let selected = resolve_selection(&categories, Some("no-such-category"));
        assert!(selected.is_none());

        let views = build_filter_views(&categories, selected);
        let active: Vec<_> = views.iter().filter(|v| v.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "All Products");
    }

    #[test]
    fn test_absent_slug_marks_all_products_active() {
        let categories = vec![category("herbs", "Herbs", 3)];
        let views = build_filter_views(&categories, resolve_selection(&categories, None));
        assert!(views[0].active);
        assert_eq!(views.iter().filter(|v| v.active).count(), 1);
    }

    #[test]
    fn test_related_products_excludes_self_and_caps_at_three() {
        let siblings = vec![
            product("p1", "herbs"),
            product("p2", "herbs"),
            product("p3", "herbs"),
            product("p4", "herbs"),
            product("p5", "herbs"),
        ];
        let related = related_products(&siblings, "p2");
        assert_eq!(related.len(), RELATED_PRODUCT_COUNT);
        // Source order preserved, current product skipped
        assert_eq!(related[0].name, "Product p1");
        assert_eq!(related[1].name, "Product p3");
        assert_eq!(related[2].name, "Product p4");
    }

    #[test]
    fn test_detail_href_encodes_id() {
        assert_eq!(detail_href("abc 123"), "/product-details?id=abc%20123");
    }
}
