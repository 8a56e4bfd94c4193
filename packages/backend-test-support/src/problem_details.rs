//! Assertions on Problem Details error bodies.
//!
//! Kept independent of backend types so the contract is checked as a client
//! would see it.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Problem Details body as clients parse it.
#[derive(Debug, Clone, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert `resp` is a Problem Details error with `status` and `code`, and
/// return the parsed body for further checks.
///
/// Also checks the content type, that `x-trace-id` matches the body, and
/// that `type` ends with the code.
pub async fn assert_problem<B>(resp: ServiceResponse<B>, status: StatusCode, code: &str) -> Problem
where
    B: MessageBody,
{
    assert_eq!(resp.status(), status, "unexpected HTTP status");

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "expected problem+json, got {content_type:?}"
    );

    let header_trace = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-trace-id header should be present");

    let body = actix_web::test::read_body(resp).await;
    let problem: Problem =
        serde_json::from_slice(&body).expect("body should be Problem Details JSON");

    assert_eq!(problem.code, code);
    assert_eq!(problem.status, status.as_u16());
    assert!(
        problem.type_.ends_with(code),
        "type {:?} should end with {code}",
        problem.type_
    );
    assert_eq!(problem.trace_id, header_trace, "body and header trace ids differ");

    problem
}
