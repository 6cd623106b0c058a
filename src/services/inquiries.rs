//! Inquiry intake and management service

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        admin::AuthContext,
        inquiry::{
            Inquiry, InquiryPage, InquiryQuery, InquiryStats, InquiryStatus, InquiryWithProduct,
            NewInquiry, SubmitInquiry, UpdateInquiryStatus,
        },
    },
    repository::Repository,
};

/// Window for the "recent inquiries" counter
const RECENT_WINDOW_DAYS: i64 = 30;

#[derive(Clone)]
pub struct InquiriesService {
    repository: Repository,
}

impl InquiriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Public submission. The product must exist; its current name is copied.
    pub async fn submit(&self, request: SubmitInquiry) -> AppResult<Inquiry> {
        let request = request.trimmed();
        let fields = required_fields(&request)?;
        request.validate()?;

        let product_id = Uuid::parse_str(&fields.product_id)
            .map_err(|_| AppError::NotFound("Product not found".to_string()))?;
        let product = self.repository.products.get_by_id(product_id).await?;

        let inquiry = self
            .repository
            .inquiries
            .create(&NewInquiry {
                customer_name: fields.customer_name,
                email: fields.email,
                phone: fields.phone,
                whatsapp_number: fields.whatsapp_number,
                product_id: product.id,
                product_name: product.name,
                message: request.message,
                rental_duration: fields.rental_duration,
                location: fields.location,
            })
            .await?;

        tracing::info!(inquiry_id = %inquiry.id, product_id = %product_id, "Inquiry submitted");
        Ok(inquiry)
    }

    /// Page through inquiries, optionally by status
    pub async fn list(&self, auth: &AuthContext, query: &InquiryQuery) -> AppResult<InquiryPage> {
        let status = query
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_status)
            .transpose()?;

        tracing::debug!(admin = %auth.username, ?status, page = query.page(), "Listing inquiries");
        let (inquiries, total) = self
            .repository
            .inquiries
            .list(status, query.limit(), query.offset())
            .await?;

        Ok(InquiryPage::new(inquiries, total, query.page(), query.limit()))
    }

    pub async fn get(&self, _auth: &AuthContext, id: Uuid) -> AppResult<InquiryWithProduct> {
        self.repository.inquiries.get_by_id(id).await
    }

    /// Change status; unknown values leave the inquiry untouched
    pub async fn update_status(
        &self,
        auth: &AuthContext,
        id: Uuid,
        request: UpdateInquiryStatus,
    ) -> AppResult<InquiryWithProduct> {
        let status = parse_status(request.status.as_deref().unwrap_or_default())?;
        let inquiry = self.repository.inquiries.update_status(id, status).await?;
        tracing::info!(admin = %auth.username, inquiry_id = %id, %status, "Inquiry status updated");
        Ok(inquiry)
    }

    /// Counters as of now
    pub async fn stats(&self, _auth: &AuthContext) -> AppResult<InquiryStats> {
        let since = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
        self.repository.inquiries.stats(since).await
    }

    pub async fn delete(&self, auth: &AuthContext, id: Uuid) -> AppResult<()> {
        self.repository.inquiries.delete(id).await?;
        tracing::info!(admin = %auth.username, inquiry_id = %id, "Inquiry deleted");
        Ok(())
    }
}

fn parse_status(value: &str) -> AppResult<InquiryStatus> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid status".to_string()))
}

/// Trimmed required fields of a submission
#[derive(Debug)]
struct RequiredFields {
    customer_name: String,
    email: String,
    phone: String,
    whatsapp_number: String,
    product_id: String,
    rental_duration: String,
    location: String,
}

fn required_fields(request: &SubmitInquiry) -> AppResult<RequiredFields> {
    let mut missing = Vec::new();
    let mut take = |value: &Option<String>, name: &'static str| -> String {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => {
                missing.push(name);
                String::new()
            }
        }
    };

    let fields = RequiredFields {
        customer_name: take(&request.customer_name, "customerName"),
        email: take(&request.email, "email"),
        phone: take(&request.phone, "phone"),
        whatsapp_number: take(&request.whatsapp_number, "whatsappNumber"),
        product_id: take(&request.product_id, "productId"),
        rental_duration: take(&request.rental_duration, "rentalDuration"),
        location: take(&request.location, "location"),
    };

    if missing.is_empty() {
        Ok(fields)
    } else {
        Err(AppError::BadRequest(format!(
            "All required fields must be filled (missing: {})",
            missing.join(", ")
        )))
    }
}
