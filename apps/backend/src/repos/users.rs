//! User repository functions for domain layer.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users;
use crate::errors::domain::{DomainError, NotFoundKind};

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: time::OffsetDateTime,
}

/// A user together with the stored password hash. Only login reads this.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

/// Find user by id or return `NotFound`.
pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "User not found"))
}

pub async fn find_credentials_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<UserCredentials>, DomainError> {
    let user = users_adapter::find_by_username(conn, username).await?;
    Ok(user.map(|model| {
        let password_hash = model.password_hash.clone();
        UserCredentials {
            user: User::from(model),
            password_hash,
        }
    }))
}

/// Existing users that already hold `username` or `email`.
pub async fn find_by_username_or_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    email: &str,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::find_by_username_or_email(conn, username, email).await?;
    Ok(users.into_iter().map(User::from).collect())
}

/// Usernames keyed by user id; unknown ids are absent.
pub async fn usernames_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<HashMap<i64, String>, DomainError> {
    let users = users_adapter::find_by_ids(conn, user_ids).await?;
    Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, DomainError> {
    let dto = users_adapter::UserCreate::new(username, email, password_hash);
    let user = users_adapter::create_user(conn, dto).await?;
    Ok(User::from(user))
}
