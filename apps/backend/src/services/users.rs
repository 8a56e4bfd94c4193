//! Player registration and login.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{info, warn};

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, User};

const USERNAME_MAX: usize = 80;
const EMAIL_MAX: usize = 120;
const PASSWORD_MAX: usize = 128;
const INVALID_LOGIN: &str = "Invalid login";

fn clean_username(raw: Option<String>) -> Result<String, DomainError> {
    let raw = raw.ok_or_else(|| {
        DomainError::validation(ValidationKind::MissingParameters, "username required")
    })?;
    let username = raw.trim();
    if username.is_empty() || username.chars().count() > USERNAME_MAX {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            format!("Username must be 1 to {USERNAME_MAX} characters"),
        ));
    }
    Ok(username.to_string())
}

fn clean_email(raw: Option<String>) -> Result<String, DomainError> {
    let raw = raw.ok_or_else(|| {
        DomainError::validation(ValidationKind::MissingParameters, "email required")
    })?;
    let email = raw.trim().to_lowercase();
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    };
    if !well_formed || email.len() > EMAIL_MAX {
        return Err(DomainError::validation(
            ValidationKind::InvalidEmail,
            "Email address is not valid",
        ));
    }
    Ok(email)
}

fn clean_password(raw: Option<String>) -> Result<String, DomainError> {
    let password = raw.filter(|p| !p.trim().is_empty()).ok_or_else(|| {
        DomainError::validation(ValidationKind::MissingParameters, "password required")
    })?;
    if password.chars().count() > PASSWORD_MAX {
        return Err(DomainError::validation(
            ValidationKind::Other("password".into()),
            format!("Password must be at most {PASSWORD_MAX} characters"),
        ));
    }
    Ok(password)
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::internal(format!("password salt: {e}")))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("password hash: {e}")))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "stored password hash is unreadable");
            false
        }
    }
}

/// Reject a username or email that is already taken. Username is checked
/// first; the unique indexes still catch a concurrent insert.
async fn ensure_available(
    txn: &DatabaseTransaction,
    username: &str,
    email: &str,
) -> Result<(), DomainError> {
    let existing = users::find_by_username_or_email(txn, username, email).await?;
    if existing.iter().any(|u| u.username == username) {
        return Err(DomainError::conflict(
            ConflictKind::UniqueUsername,
            "Username already exists",
        ));
    }
    if !existing.is_empty() {
        return Err(DomainError::conflict(
            ConflictKind::UniqueEmail,
            "Email already exists",
        ));
    }
    Ok(())
}

/// Create a player with a hashed password. Usernames and emails are unique.
pub async fn register(
    txn: &DatabaseTransaction,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<User, AppError> {
    let username = clean_username(username)?;
    let email = clean_email(email)?;
    let password = clean_password(password)?;

    ensure_available(txn, &username, &email).await?;
    let password_hash = hash_password(&password)?;

    let user = users::create_user(txn, &username, &email, &password_hash).await?;
    info!(user_id = user.id, username = %user.username, email = %Redacted(&user.email), "user registered");
    Ok(user)
}

/// Check a username and password. Unknown users and wrong passwords give the
/// same 401.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: Option<String>,
    password: Option<String>,
) -> Result<User, AppError> {
    let (Some(username), Some(password)) = (username, password) else {
        return Err(DomainError::validation(
            ValidationKind::MissingParameters,
            "username and password required",
        )
        .into());
    };

    let credentials = users::find_credentials_by_username(conn, username.trim()).await?;
    match credentials {
        Some(c) if verify_password(&password, &c.password_hash) => {
            info!(user_id = c.user.id, "user logged in");
            Ok(c.user)
        }
        _ => {
            info!(username = %username.trim(), "login rejected");
            Err(AppError::unauthorized(
                ErrorCode::InvalidCredentials,
                INVALID_LOGIN,
            ))
        }
    }
}
