use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Violations of product invariants.
///
/// Each variant has stable identity so callers can branch on kind rather
/// than matching message text. [`Product::validate`] reports the first
/// violated rule in a fixed order: id, name, price-missing, price-invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("id is required")]
    IdRequired,
    #[error("id is invalid")]
    IdInvalid,
    #[error("name is required")]
    NameRequired,
    #[error("price is required")]
    PriceRequired,
    #[error("price is invalid")]
    PriceInvalid,
}

/// Sort direction for product listings, by creation time
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Product entity - a single catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, immutable after creation
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Price, strictly greater than zero
    pub price: f64,
    /// Creation timestamp, set once at construction
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Construct a new product with a fresh identifier and timestamp.
    ///
    /// Validation runs before the value is returned, so an invalid input
    /// never produces a partially-built product.
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, ValidationError> {
        let product = Self {
            id: Uuid::now_v7(),
            name: name.into(),
            price,
            created_at: Utc::now(),
        };
        product.validate()?;
        Ok(product)
    }

    /// Check the product invariants, reporting the first violated rule.
    ///
    /// A price of exactly zero is treated as "missing", distinct from a
    /// negative price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::IdRequired);
        }
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.price == 0.0 {
            return Err(ValidationError::PriceRequired);
        }
        if self.price < 0.0 {
            return Err(ValidationError::PriceInvalid);
        }
        Ok(())
    }

    /// Parse a caller-supplied identifier string.
    ///
    /// The identifier type is a plain UUID; this is the boundary where a
    /// syntactically invalid identifier is reported, since a typed `id`
    /// field cannot hold one.
    pub fn parse_id(raw: &str) -> Result<Uuid, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        Uuid::parse_str(raw).map_err(|_| ValidationError::IdInvalid)
    }

    /// Whole-record replacement preserving identity and creation time.
    pub fn replace(&self, input: UpdateProduct) -> Product {
        Product {
            id: self.id,
            name: input.name,
            price: input.price,
            created_at: self.created_at,
        }
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub name: String,
    pub price: f64,
}

/// DTO for replacing an existing product.
///
/// Deliberately distinct from [`Product`]: the identifier comes from the
/// route path and the creation time is owned by the store, so neither is
/// accepted from the wire.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub name: String,
    pub price: f64,
}

/// Query parameters for listing products.
///
/// Parsing is lenient: a missing or unparsable `page`/`limit` falls back
/// to zero (first page, default size) and a missing, empty, or unknown
/// `sort` falls back to descending, rather than rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListProductsQuery {
    /// Page number, 1-based; 0 or unparsable means first page
    pub page: Option<String>,
    /// Page size; 0 or unparsable means implementation default
    pub limit: Option<String>,
    /// Sort direction by creation time: "asc" or "desc"
    pub sort: Option<String>,
}

impl ListProductsQuery {
    pub fn page(&self) -> u64 {
        lenient_u64(self.page.as_deref())
    }

    pub fn limit(&self) -> u64 {
        lenient_u64(self.limit.as_deref())
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

fn lenient_u64(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}
