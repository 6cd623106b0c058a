//! Product catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        admin::AuthContext,
        product::{Product, ProductForm, ProductQuery},
    },
    services::uploads::PendingImage,
    AppState,
};

/// Multipart field carrying image files
const IMAGES_FIELD: &str = "images";

/// List active products
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Active products, newest first", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.services.catalog.list_public(&query).await?;
    Ok(Json(products))
}

/// List every product, active or not
#[utoipa::path(
    get,
    path = "/products/admin/all",
    tag = "products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All products, newest first", body = Vec<Product>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_all_products(
    State(state): State<AppState>,
    auth: AuthContext,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.services.catalog.list_all(&auth).await?;
    Ok(Json(products))
}

/// Get a product by ID, whatever its status
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let product = state.services.catalog.get(id).await?;
    Ok(Json(product))
}

/// Create a product with 1 to 5 images
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    security(("bearer_auth" = [])),
    request_body(content = ProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing images, fields, or non-image upload"),
        (status = 401, description = "Not authenticated"),
        (status = 413, description = "Image too large")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthContext,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Product>)> {
    let (form, images) = read_product_form(multipart).await?;
    let product = state.services.catalog.create(&auth, form, images).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product; new images replace the existing list
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content = ProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid field or non-image upload"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<Product>> {
    let (form, images) = read_product_form(multipart).await?;
    let product = state.services.catalog.update(&auth, id, form, images).await?;
    Ok(Json(product))
}

/// Flip a product between active and inactive
#[utoipa::path(
    patch,
    path = "/products/{id}/toggle-status",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with its new status", body = Product),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn toggle_product_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let product = state.services.catalog.toggle_status(&auth, id).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Split a product form into its text fields and buffered image parts
async fn read_product_form(mut multipart: Multipart) -> AppResult<(ProductForm, Vec<PendingImage>)> {
    let mut form = ProductForm::default();
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to parse multipart data: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGES_FIELD {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read image: {}", e)))?;

            // Browsers send an empty part for an untouched file input
            if original_name.is_empty() && bytes.is_empty() {
                continue;
            }
            images.push(PendingImage { original_name, content_type, bytes });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field '{}': {}", name, e)))?;
            form.set(&name, value);
        }
    }

    Ok((form, images))
}
