//! Product model and multipart form parsing

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProductCategory {
    #[serde(rename = "Health & Fitness")]
    HealthFitness,
    #[serde(rename = "Baby Safety Gear")]
    BabySafetyGear,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::HealthFitness => "Health & Fitness",
            ProductCategory::BabySafetyGear => "Baby Safety Gear",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Health & Fitness" => Ok(ProductCategory::HealthFitness),
            "Baby Safety Gear" => Ok(ProductCategory::BabySafetyGear),
            other => Err(format!("Invalid category: {}", other)),
        }
    }
}

// SQLx conversion for ProductCategory
impl sqlx::Type<Postgres> for ProductCategory {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for ProductCategory {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for ProductCategory {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Internal row structure, specifications live in a JSONB column
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    category: ProductCategory,
    features: Vec<String>,
    specifications: Json<BTreeMap<String, String>>,
    images: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            features: row.features,
            specifications: row.specifications.0,
            images: row.images,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// Rentable product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    /// Ordered feature bullet points
    pub features: Vec<String>,
    /// Free-form key/value specification table
    pub specifications: BTreeMap<String, String>,
    /// Stored image filenames, served under /uploads
    pub images: Vec<String>,
    /// Whether the product shows up in the public catalog
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Public product listing filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact category name
    pub category: Option<String>,
}

/// Validated product ready for insertion
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub features: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub images: Vec<String>,
    pub is_active: bool,
}

/// Partial product update, `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProductCategory>,
    pub features: Option<Vec<String>>,
    pub specifications: Option<BTreeMap<String, String>>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Text fields of the multipart product form.
///
/// Also used as the OpenAPI schema of the form; `images` there stands for the
/// repeated file parts, which the handler collects separately.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    /// "Health & Fitness" or "Baby Safety Gear"
    pub category: Option<String>,
    /// Comma separated list
    pub features: Option<String>,
    /// JSON object of string values, e.g. {"Weight":"85 kg"}
    pub specifications: Option<String>,
    /// "true" or "false"
    pub is_active: Option<String>,
    /// Image files (1 to 5), multipart field name `images`
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductForm {
    /// Assign a text part by its multipart field name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: String) {
        let slot = match field {
            "name" => &mut self.name,
            "description" => &mut self.description,
            "category" => &mut self.category,
            "features" => &mut self.features,
            "specifications" => &mut self.specifications,
            "isActive" | "is_active" => &mut self.is_active,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Build a complete product for creation, `images` being the stored filenames
    pub fn into_new_product(self, images: Vec<String>) -> AppResult<NewProduct> {
        let name = required(self.name, "name")?;
        let description = required(self.description, "description")?;
        let category = parse_category(&required(self.category, "category")?)?;

        Ok(NewProduct {
            name,
            description,
            category,
            features: present(self.features).map(|f| parse_features(&f)).unwrap_or_default(),
            specifications: present(self.specifications)
                .map(|s| parse_specifications(&s))
                .transpose()?
                .unwrap_or_default(),
            images,
            is_active: present(self.is_active).map(|v| parse_bool(&v)).transpose()?.unwrap_or(true),
        })
    }

    /// Build a partial update; blank fields are treated as absent
    pub fn into_changes(self, images: Option<Vec<String>>) -> AppResult<ProductChanges> {
        Ok(ProductChanges {
            name: present(self.name),
            description: present(self.description),
            category: present(self.category).map(|c| parse_category(&c)).transpose()?,
            features: present(self.features).map(|f| parse_features(&f)),
            specifications: present(self.specifications)
                .map(|s| parse_specifications(&s))
                .transpose()?,
            images,
            is_active: present(self.is_active).map(|v| parse_bool(&v)).transpose()?,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    present(value).ok_or_else(|| AppError::Validation(format!("Field '{}' is required", field)))
}

fn parse_category(value: &str) -> AppResult<ProductCategory> {
    value.parse().map_err(AppError::Validation)
}

fn parse_bool(value: &str) -> AppResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        other => Err(AppError::Validation(format!("Invalid boolean for isActive: {}", other))),
    }
}

/// Split a comma separated feature list, trimming entries and dropping empty ones
pub fn parse_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse and validate the specifications table.
///
/// Accepts a JSON object whose keys are non-empty and whose values are strings.
/// Numbers and booleans are rejected rather than coerced.
pub fn parse_specifications(raw: &str) -> AppResult<BTreeMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| AppError::Validation(format!("Specifications must be valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| AppError::Validation("Specifications must be a JSON object".to_string()))?;

    let mut specs = BTreeMap::new();
    for (key, value) in object {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::Validation("Specification names must not be empty".to_string()));
        }
        let value = value.as_str().ok_or_else(|| {
            AppError::Validation(format!("Specification '{}' must be a string", key))
        })?;
        specs.insert(key.to_string(), value.trim().to_string());
    }
    Ok(specs)
}
