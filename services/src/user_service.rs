use crate::error::AppError;
use crate::media::{self, MediaAsset, MediaHost, UploadedFile};
use crate::validation::{first_validation_message, format_validation_errors};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use db::models::user::{Model as UserModel, Role};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use serde::Serialize;
use std::borrow::Cow;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};
use validator::{Validate, ValidationError};

pub const USER_EXISTS_MESSAGE: &str = "User already exists";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

#[derive(Debug, Default, Validate)]
pub struct SignUp {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(custom(function = "validate_role"))]
    pub role: String,

    pub cv_image: Option<UploadedFile>,
}

impl SignUp {
    const FIELD_ORDER: [&'static str; 4] = ["name", "email", "password", "role"];
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    Role::from_str(role.trim()).map(|_| ()).map_err(|_| {
        ValidationError::new("role").with_message(Cow::Borrowed("Role must be Teacher or Student"))
    })
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub cv_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserModel> for UserProfile {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            cv_image: user.cv_image,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub struct UserService {
    db: DatabaseConnection,
    media: Arc<dyn MediaHost>,
}

impl UserService {
    pub fn new(db: DatabaseConnection, media: Arc<dyn MediaHost>) -> Self {
        Self { db, media }
    }

    /// Registers a new account. The e-mail is stored trimmed and lowercased;
    /// a CV image, when attached, is hosted first and its URL stored.
    pub async fn sign_up(&self, req: SignUp) -> Result<UserProfile, AppError> {
        if let Err(errors) = req.validate() {
            debug!(errors = %format_validation_errors(&errors), "Rejected sign-up");
            return Err(AppError::Validation(first_validation_message(
                &errors,
                &SignUp::FIELD_ORDER,
            )));
        }
        let role = Role::from_str(req.role.trim())
            .map_err(|_| AppError::Validation("Role must be Teacher or Student".into()))?;
        let email = normalize_email(&req.email);

        if UserModel::find_by_email(&self.db, &email).await?.is_some() {
            return Err(AppError::Conflict(USER_EXISTS_MESSAGE.into()));
        }

        let password_hash = hash_password(&req.password)?;

        let hosted_cv = match req.cv_image.filter(|f| !f.is_empty()) {
            Some(file) => Some(self.media.upload(MediaAsset::image(&file)).await?),
            None => None,
        };

        let created = UserModel::create(
            &self.db,
            req.name.trim(),
            &email,
            &password_hash,
            role,
            hosted_cv.as_ref().map(|m| m.url.clone()),
        )
        .await;

        match created {
            Ok(user) => {
                info!(user_id = user.id, role = %user.role, "User registered");
                Ok(user.into())
            }
            Err(e) => {
                if let Some(cv) = hosted_cv {
                    media::discard(self.media.as_ref(), &[cv]).await;
                }
                Err(map_unique_violation(e))
            }
        }
    }

    /// Checks credentials. Unknown e-mail and wrong password are
    /// indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AppError> {
        let user = UserModel::find_by_email(&self.db, email)
            .await?
            .filter(|user| verify_password(&user.password_hash, password))
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.into()))?;

        info!(user_id = user.id, "User logged in");
        Ok(user.into())
    }

    pub async fn profile(&self, user_id: i64) -> Result<UserProfile, AppError> {
        UserModel::find_by_id(&self.db, user_id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND_MESSAGE.into()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A concurrent sign-up can slip past the existence check; the unique index
/// still catches it.
fn map_unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(USER_EXISTS_MESSAGE.into())
        }
        _ => AppError::Database(err),
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

pub fn verify_password(password_hash: &str, password: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
