use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_problem;
use hexlink_backend::services::notify::Notification;
use hexlink_backend::AppError;
use serde_json::{json, Value};

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::test_state::{build_recording_state, build_test_state};

fn register_request(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/register")
        .set_json(body)
        .to_request()
}

fn login_request(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/login")
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn register_creates_player_and_welcomes_them() -> Result<(), AppError> {
    let (state, notifier) = build_recording_state().await?;
    let app = create_test_app(state).build().await;

    let req = register_request(
        json!({"username": "ann", "email": "Ann@Example.com", "password": "hunter2"}),
    );
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = read_json(resp).await;
    assert_eq!(body["message"], "Success");
    assert_eq!(body["username"], "ann");
    assert!(body["user_id"].as_i64().is_some_and(|id| id > 0));
    assert!(body.get("password").is_none());

    let seen = notifier.wait_for(1).await;
    assert_eq!(
        seen[0],
        Notification::Welcome {
            username: "ann".into(),
            email: "ann@example.com".into(),
        }
    );
    Ok(())
}

#[actix_web::test]
async fn reused_username_is_a_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    let req = register_request(
        json!({"username": "ann", "email": "ann@example.com", "password": "pw"}),
    );
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    // Same username and same email: the username is reported
    let req = register_request(
        json!({"username": "ann", "email": "ann@example.com", "password": "pw"}),
    );
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::CONFLICT, "UNIQUE_USERNAME").await;

    let req = register_request(
        json!({"username": "ann", "email": "other@example.com", "password": "pw"}),
    );
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::CONFLICT, "UNIQUE_USERNAME").await;
    Ok(())
}

#[actix_web::test]
async fn reused_email_is_a_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    let req = register_request(
        json!({"username": "ann", "email": "ann@example.com", "password": "pw"}),
    );
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = register_request(
        json!({"username": "bea", "email": "ANN@example.com", "password": "pw"}),
    );
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::CONFLICT, "UNIQUE_EMAIL").await;
    Ok(())
}

#[actix_web::test]
async fn missing_fields_are_a_bad_request() -> Result<(), AppError> {
    let (state, notifier) = build_recording_state().await?;
    let app = create_test_app(state).build().await;

    let bodies = [
        json!({"username": "ann", "password": "pw"}),
        json!({"username": "ann", "email": "ann@example.com"}),
        json!({"username": "ann", "email": "ann@example.com", "password": "  "}),
    ];
    for body in bodies {
        let resp = test::call_service(&app, register_request(body)).await;
        assert_problem(resp, StatusCode::BAD_REQUEST, "MISSING_PARAMETERS").await;
    }
    assert!(notifier.seen().is_empty());
    Ok(())
}

#[actix_web::test]
async fn login_returns_the_registered_player() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    let req = register_request(
        json!({"username": "ann", "email": "ann@example.com", "password": "hunter2"}),
    );
    let registered = read_json(test::call_service(&app, req).await).await;

    let req = login_request(json!({"username": "ann", "password": "hunter2"}));
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    assert_eq!(body["message"], "Success");
    assert_eq!(body["username"], "ann");
    assert_eq!(body["user_id"], registered["user_id"]);
    Ok(())
}

#[actix_web::test]
async fn bad_credentials_are_unauthorized() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    let req = register_request(
        json!({"username": "ann", "email": "ann@example.com", "password": "hunter2"}),
    );
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    for body in [
        json!({"username": "ann", "password": "hunter3"}),
        json!({"username": "nobody", "password": "hunter2"}),
    ] {
        let resp = test::call_service(&app, login_request(body)).await;
        let problem = assert_problem(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;
        assert_eq!(problem.detail, "Invalid login");
    }
    Ok(())
}

#[actix_web::test]
async fn login_without_password_is_a_bad_request() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).build().await;

    let resp = test::call_service(&app, login_request(json!({"username": "ann"}))).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "MISSING_PARAMETERS").await;
    Ok(())
}
