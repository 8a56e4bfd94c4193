//! Player registration and login routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::users::User;
use crate::services::notify::{dispatch, Notification};
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

/// Body of a successful register or login.
#[derive(Debug, Serialize)]
struct AuthResponse {
    message: &'static str,
    user_id: i64,
    username: String,
}

impl From<User> for AuthResponse {
    fn from(user: User) -> Self {
        Self {
            message: "Success",
            user_id: user.id,
            username: user.username,
        }
    }
}

/// POST /register
///
/// Creates a player and returns the id clients pass as `player_id`.
async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let RegisterRequest {
        username,
        email,
        password,
    } = body.into_inner();

    let user = with_txn(&app_state, move |txn| {
        Box::pin(async move { users::register(txn, username, email, password).await })
    })
    .await?;

    dispatch(
        app_state.notifier(),
        Notification::Welcome {
            username: user.username.clone(),
            email: user.email.clone(),
        },
    );

    Ok(HttpResponse::Created().json(AuthResponse::from(user)))
}

/// POST /login
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = body.into_inner();

    let user = with_txn(&app_state, move |txn| {
        Box::pin(async move { users::login(txn, username, password).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(AuthResponse::from(user)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
