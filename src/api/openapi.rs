//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, health, inquiries, products};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RentalHub API",
        version = "1.0.0",
        description = "Rental catalog and inquiry management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::index,
        health::health_check,
        // Products
        products::list_products,
        products::list_all_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::toggle_product_status,
        products::delete_product,
        // Inquiries
        inquiries::submit_inquiry,
        inquiries::list_inquiries,
        inquiries::get_inquiry,
        inquiries::update_inquiry_status,
        inquiries::inquiry_stats,
        inquiries::delete_inquiry,
        // Admin
        admin::register,
        admin::login,
        admin::verify,
        admin::update_profile,
        admin::change_password,
    ),
    components(
        schemas(
            // Products
            crate::models::product::Product,
            crate::models::product::ProductCategory,
            crate::models::product::ProductForm,
            // Inquiries
            crate::models::inquiry::Inquiry,
            crate::models::inquiry::InquiryStatus,
            crate::models::inquiry::InquiryProduct,
            crate::models::inquiry::InquiryWithProduct,
            crate::models::inquiry::SubmitInquiry,
            crate::models::inquiry::InquiryReceipt,
            crate::models::inquiry::InquirySummary,
            crate::models::inquiry::InquiryPage,
            crate::models::inquiry::UpdateInquiryStatus,
            crate::models::inquiry::InquiryStats,
            // Admin
            crate::models::admin::AdminInfo,
            crate::models::admin::RegisterRequest,
            crate::models::admin::LoginRequest,
            crate::models::admin::AuthResponse,
            crate::models::admin::AdminResponse,
            crate::models::admin::UpdateProfileRequest,
            crate::models::admin::ChangePasswordRequest,
            crate::models::admin::MessageResponse,
            // Health
            health::HealthResponse,
            health::BannerResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Product catalog"),
        (name = "inquiries", description = "Customer inquiries"),
        (name = "admin", description = "Admin authentication and account")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
