//! Admin authentication and account endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::AppJson,
    error::AppResult,
    models::admin::{
        AdminInfo, AdminResponse, AuthContext, AuthResponse, ChangePasswordRequest, LoginRequest,
        MessageResponse, RegisterRequest, UpdateProfileRequest,
    },
    AppState,
};

/// Register an admin account
#[utoipa::path(
    post,
    path = "/admin/register",
    tag = "admin",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Admin created", body = AuthResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let (token, admin) = state.services.auth.register(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Admin registered successfully".to_string(),
            token,
            admin: AdminInfo::from(&admin),
        }),
    ))
}

/// Log in with username or email
#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (token, admin) = state.services.auth.login(&request).await?;
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        admin: AdminInfo::from(&admin),
    }))
}

/// Confirm the token and that the admin still exists
#[utoipa::path(
    get,
    path = "/admin/verify",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token valid", body = AdminResponse),
        (status = 401, description = "Invalid or expired token"),
        (status = 404, description = "Admin no longer exists")
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    auth: AuthContext,
) -> AppResult<Json<AdminResponse>> {
    let admin = state.services.auth.current_admin(&auth).await?;
    Ok(Json(AdminResponse {
        message: None,
        admin: AdminInfo::from(&admin),
    }))
}

/// Update own username and/or email
#[utoipa::path(
    put,
    path = "/admin/profile",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = AdminResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthContext,
    AppJson(request): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<AdminResponse>> {
    let admin = state.services.auth.update_profile(&auth, request).await?;
    Ok(Json(AdminResponse {
        message: Some("Profile updated successfully".to_string()),
        admin: AdminInfo::from(&admin),
    }))
}

/// Change own password
#[utoipa::path(
    put,
    path = "/admin/change-password",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Current password is incorrect"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthContext,
    AppJson(request): AppJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth.change_password(&auth, request).await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}
