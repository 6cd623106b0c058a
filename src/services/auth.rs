//! Admin authentication and account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::admin::{
        Admin, AdminClaims, AuthContext, ChangePasswordRequest, LoginRequest, RegisterRequest,
        UpdateProfileRequest,
    },
    repository::Repository,
};

/// Same message for unknown account and wrong password
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new admin and return a token for it
    pub async fn register(&self, request: RegisterRequest) -> AppResult<(String, Admin)> {
        let request = request.trimmed();
        request.validate()?;
        let username = request.username.as_str();
        let email = request.email.as_str();

        if self
            .repository
            .admins
            .identity_taken(Some(username), Some(email), None)
            .await?
        {
            return Err(AppError::Conflict(
                "Admin with this email or username already exists".to_string(),
            ));
        }

        let hash = hash_password(&request.password)?;
        let admin = self.repository.admins.create(username, email, &hash).await?;
        tracing::info!(admin = %admin.username, "Admin registered");

        let token = self.create_token(&admin)?;
        Ok((token, admin))
    }

    /// Authenticate by username or email
    pub async fn login(&self, request: &LoginRequest) -> AppResult<(String, Admin)> {
        let admin = self
            .repository
            .admins
            .find_by_login(request.username.trim())
            .await?
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&admin.password, &request.password)? {
            tracing::warn!(admin = %admin.username, "Rejected login with wrong password");
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.create_token(&admin)?;
        Ok((token, admin))
    }

    /// Decode a bearer token into the caller identity
    pub fn authenticate(&self, token: &str) -> AppResult<AuthContext> {
        AdminClaims::from_token(token, &self.config.jwt_secret)
            .map(AuthContext::from)
            .map_err(|e| AppError::Authentication(format!("Invalid token: {}", e)))
    }

    /// Fetch the admin behind the token, confirming the account still exists
    pub async fn current_admin(&self, auth: &AuthContext) -> AppResult<Admin> {
        self.repository.admins.get_by_id(auth.admin_id).await
    }

    /// Update own username and/or email
    pub async fn update_profile(&self, auth: &AuthContext, request: UpdateProfileRequest) -> AppResult<Admin> {
        let request = request.trimmed();
        request.validate()?;
        let username = request.username.as_deref();
        let email = request.email.as_deref();

        self.repository.admins.get_by_id(auth.admin_id).await?;

        if self
            .repository
            .admins
            .identity_taken(username, email, Some(auth.admin_id))
            .await?
        {
            return Err(AppError::Conflict("Username or email already exists".to_string()));
        }

        let admin = self
            .repository
            .admins
            .update_profile(auth.admin_id, username, email)
            .await?;
        tracing::info!(admin = %admin.username, "Admin profile updated");
        Ok(admin)
    }

    /// Rotate own password after checking the current one
    pub async fn change_password(&self, auth: &AuthContext, request: ChangePasswordRequest) -> AppResult<()> {
        request.validate()?;
        let admin = self.repository.admins.get_by_id(auth.admin_id).await?;

        if !verify_password(&admin.password, &request.current_password)? {
            return Err(AppError::BadRequest("Current password is incorrect".to_string()));
        }

        let hash = hash_password(&request.new_password)?;
        self.repository.admins.update_password(admin.id, &hash).await?;
        tracing::info!(admin = %admin.username, "Admin password changed");
        Ok(())
    }

    fn create_token(&self, admin: &Admin) -> AppResult<String> {
        AdminClaims::new(admin, self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
