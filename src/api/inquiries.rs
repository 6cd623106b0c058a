//! Inquiry endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::AppJson,
    error::AppResult,
    models::{
        admin::AuthContext,
        inquiry::{
            InquiryPage, InquiryQuery, InquiryReceipt, InquiryStats, InquirySummary,
            InquiryWithProduct, SubmitInquiry, UpdateInquiryStatus,
        },
    },
    AppState,
};

/// Submit a rental inquiry (public)
#[utoipa::path(
    post,
    path = "/inquiries",
    tag = "inquiries",
    request_body = SubmitInquiry,
    responses(
        (status = 201, description = "Inquiry recorded", body = InquiryReceipt),
        (status = 400, description = "Missing or invalid field"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    AppJson(request): AppJson<SubmitInquiry>,
) -> AppResult<(StatusCode, Json<InquiryReceipt>)> {
    let inquiry = state.services.inquiries.submit(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(InquiryReceipt {
            message: "Inquiry submitted successfully! We will contact you soon.".to_string(),
            inquiry: InquirySummary::from(&inquiry),
        }),
    ))
}

/// List inquiries with optional status filter and pagination
#[utoipa::path(
    get,
    path = "/inquiries",
    tag = "inquiries",
    security(("bearer_auth" = [])),
    params(InquiryQuery),
    responses(
        (status = 200, description = "One page of inquiries", body = InquiryPage),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_inquiries(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<InquiryQuery>,
) -> AppResult<Json<InquiryPage>> {
    let page = state.services.inquiries.list(&auth, &query).await?;
    Ok(Json(page))
}

/// Get an inquiry with product details
#[utoipa::path(
    get,
    path = "/inquiries/{id}",
    tag = "inquiries",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    responses(
        (status = 200, description = "Inquiry details", body = InquiryWithProduct),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Inquiry not found")
    )
)]
pub async fn get_inquiry(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InquiryWithProduct>> {
    let inquiry = state.services.inquiries.get(&auth, id).await?;
    Ok(Json(inquiry))
}

/// Change an inquiry's status
#[utoipa::path(
    patch,
    path = "/inquiries/{id}/status",
    tag = "inquiries",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    request_body = UpdateInquiryStatus,
    responses(
        (status = 200, description = "Inquiry updated", body = InquiryWithProduct),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Inquiry not found")
    )
)]
pub async fn update_inquiry_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<UpdateInquiryStatus>,
) -> AppResult<Json<InquiryWithProduct>> {
    let inquiry = state.services.inquiries.update_status(&auth, id, request).await?;
    Ok(Json(inquiry))
}

/// Inquiry counters
#[utoipa::path(
    get,
    path = "/inquiries/stats/overview",
    tag = "inquiries",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Totals per status and last 30 days", body = InquiryStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn inquiry_stats(
    State(state): State<AppState>,
    auth: AuthContext,
) -> AppResult<Json<InquiryStats>> {
    let stats = state.services.inquiries.stats(&auth).await?;
    Ok(Json(stats))
}

/// Delete an inquiry
#[utoipa::path(
    delete,
    path = "/inquiries/{id}",
    tag = "inquiries",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    responses(
        (status = 204, description = "Inquiry deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Inquiry not found")
    )
)]
pub async fn delete_inquiry(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.inquiries.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
