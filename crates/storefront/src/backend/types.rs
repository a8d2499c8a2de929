//! Wire types and normalized records for the content backend.
//!
//! The backend is a Mongo-backed REST API: documents carry `_id` and
//! camelCase field names, and every read endpoint wraps its payload in a
//! `{success, data}` envelope. The raw shapes live here together with the
//! canonical records the rest of the crate consumes. Normalization happens
//! once, at the client boundary - downstream code never sees a raw document.

use serde::{Deserialize, Serialize};

// =============================================================================
// Envelopes
// =============================================================================

/// The `{success, data}` wrapper every read response is expected to carry.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Response body for `POST /messages`.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct RawCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(rename = "productCount", default)]
    pub product_count: u32,
}

/// A product category. Slug is unique among categories in a single response
/// and is the key used for catalog filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub product_count: u32,
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            slug: raw.slug,
            product_count: raw.product_count,
        }
    }
}

// =============================================================================
// Products
// =============================================================================

/// The owning category of a product as it appears on the wire: either an
/// embedded category document or a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawCategoryField {
    Embedded(RawCategoryRef),
    Bare(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCategoryRef {
    pub name: String,
    pub slug: String,
}

/// Canonical owning-category reference. A bare wire string is used as both
/// name and slug, matching the backend's older documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
}

impl From<RawCategoryField> for CategoryRef {
    fn from(raw: RawCategoryField) -> Self {
        match raw {
            RawCategoryField::Embedded(c) => Self {
                name: c.name,
                slug: c.slug,
            },
            RawCategoryField::Bare(s) => Self {
                name: s.clone(),
                slug: s,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    pub category: RawCategoryField,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "inStock", default)]
    pub in_stock: bool,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Free text, may contain embedded line breaks.
    pub description: String,
    /// Image URL.
    pub image: String,
    pub category: CategoryRef,
    /// RFC 3339 creation timestamp as delivered by the backend.
    pub created_at: String,
    pub in_stock: bool,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            image: raw.image,
            category: raw.category.into(),
            created_at: raw.created_at,
            in_stock: raw.in_stock,
        }
    }
}

// =============================================================================
// Certificates
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct RawCertificate {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// A company certificate (quality assurance, export grade, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_active: bool,
    pub category: String,
    pub created_at: String,
}

impl From<RawCertificate> for Certificate {
    fn from(raw: RawCertificate) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            image: raw.image,
            is_active: raw.is_active,
            category: raw.category,
            created_at: raw.created_at,
        }
    }
}

// =============================================================================
// Team
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct RawTeamMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub position: String,
    pub image: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(rename = "startDate", default)]
    pub start_date: String,
}

/// A team member profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub position: String,
    pub image: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Messaging handle; may contain formatting characters.
    pub whatsapp: Option<String>,
    pub is_active: bool,
    pub start_date: String,
}

impl From<RawTeamMember> for TeamMember {
    fn from(raw: RawTeamMember) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            position: raw.position,
            image: raw.image,
            email: raw.email,
            phone: raw.phone,
            whatsapp: raw.whatsapp,
            is_active: raw.is_active,
            start_date: raw.start_date,
        }
    }
}

// =============================================================================
// Contact
// =============================================================================

/// A contact channel record as delivered by `GET /contact`: a flat list of
/// `{type, label, value}` documents, one per channel.
#[derive(Debug, Deserialize)]
pub(crate) struct RawContactChannel {
    #[serde(rename = "type")]
    pub channel_type: String,
    #[serde(default)]
    pub label: String,
    pub value: String,
}

/// The `{label, value}` pair stored per contact channel type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEntry {
    pub label: String,
    pub value: String,
}

/// Payload for `POST /messages`.
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}
