//! Inquiry model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::product::ProductCategory;

/// Inquiry follow-up status. Any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Converted,
    Closed,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 4] = [
        InquiryStatus::New,
        InquiryStatus::Contacted,
        InquiryStatus::Converted,
        InquiryStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Converted => "converted",
            InquiryStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(InquiryStatus::New),
            "contacted" => Ok(InquiryStatus::Contacted),
            "converted" => Ok(InquiryStatus::Converted),
            "closed" => Ok(InquiryStatus::Closed),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

// SQLx conversion for InquiryStatus
impl sqlx::Type<Postgres> for InquiryStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for InquiryStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for InquiryStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Customer rental inquiry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: Uuid,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp_number: String,
    /// Product the inquiry was made for. May no longer exist.
    pub product_id: Uuid,
    /// Product name at submission time
    pub product_name: String,
    pub message: Option<String>,
    pub rental_duration: String,
    pub location: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

/// Product projection joined onto an inquiry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryProduct {
    pub id: Uuid,
    pub name: String,
    pub category: ProductCategory,
    pub images: Vec<String>,
    /// Only present on single inquiry lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Inquiry with its product, `product` is null once the product is deleted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryWithProduct {
    #[serde(flatten)]
    pub inquiry: Inquiry,
    pub product: Option<InquiryProduct>,
}

/// Internal row for inquiry queries joined with products
#[derive(Debug, Clone, FromRow)]
pub struct InquiryJoinRow {
    #[sqlx(flatten)]
    inquiry: Inquiry,
    p_id: Option<Uuid>,
    p_name: Option<String>,
    p_category: Option<ProductCategory>,
    p_images: Option<Vec<String>>,
    p_description: Option<String>,
}

impl From<InquiryJoinRow> for InquiryWithProduct {
    fn from(row: InquiryJoinRow) -> Self {
        let product = match (row.p_id, row.p_name, row.p_category) {
            (Some(id), Some(name), Some(category)) => Some(InquiryProduct {
                id,
                name,
                category,
                images: row.p_images.unwrap_or_default(),
                description: row.p_description,
            }),
            _ => None,
        };
        InquiryWithProduct { inquiry: row.inquiry, product }
    }
}

/// Public inquiry submission.
///
/// Every field is optional at the serde level so a missing field yields the
/// same 400 as a blank one.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInquiry {
    pub customer_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub product_id: Option<String>,
    pub message: Option<String>,
    pub rental_duration: Option<String>,
    pub location: Option<String>,
}

impl SubmitInquiry {
    /// Trim every field; blank values become `None`
    pub fn trimmed(self) -> Self {
        fn trim(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }

        Self {
            customer_name: trim(self.customer_name),
            email: trim(self.email),
            phone: trim(self.phone),
            whatsapp_number: trim(self.whatsapp_number),
            product_id: trim(self.product_id),
            message: trim(self.message),
            rental_duration: trim(self.rental_duration),
            location: trim(self.location),
        }
    }
}

/// Inquiry fields checked for presence, trimmed, ready for insertion
#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp_number: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub message: Option<String>,
    pub rental_duration: String,
    pub location: String,
}

/// Receipt returned to the customer after submission
#[derive(Debug, Serialize, ToSchema)]
pub struct InquiryReceipt {
    pub message: String,
    pub inquiry: InquirySummary,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquirySummary {
    pub id: Uuid,
    pub customer_name: String,
    pub product_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Inquiry> for InquirySummary {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            id: inquiry.id,
            customer_name: inquiry.customer_name.clone(),
            product_name: inquiry.product_name.clone(),
            created_at: inquiry.created_at,
        }
    }
}

/// Admin inquiry listing parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InquiryQuery {
    /// Exact status filter
    pub status: Option<String>,
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Page size (default: 20, max: 100)
    pub limit: Option<i64>,
}

impl InquiryQuery {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT)
    }

    /// Saturates instead of overflowing for absurd page numbers
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

/// One page of inquiries
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryPage {
    pub inquiries: Vec<InquiryWithProduct>,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub limit: i64,
}

impl InquiryPage {
    pub fn new(inquiries: Vec<InquiryWithProduct>, total: i64, page: i64, limit: i64) -> Self {
        Self {
            inquiries,
            total,
            total_pages: (total + limit - 1) / limit,
            current_page: page,
            limit,
        }
    }
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateInquiryStatus {
    /// One of new, contacted, converted, closed
    pub status: Option<String>,
}

/// Aggregate inquiry counters
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryStats {
    pub total: i64,
    pub new: i64,
    pub contacted: i64,
    pub converted: i64,
    pub closed: i64,
    /// Inquiries created in the trailing 30 days
    pub recent_inquiries: i64,
}
