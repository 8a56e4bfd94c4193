// Error mapping without HTTP or database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;
use crate::AppError;

fn map(de: DomainError) -> (ErrorCode, u16) {
    let app: AppError = de.into();
    (app.code(), app.status().as_u16())
}

#[test]
fn validation_kinds_are_bad_requests() {
    let cases = [
        (ValidationKind::MissingPlayerId, ErrorCode::MissingPlayerId),
        (ValidationKind::MissingParameters, ErrorCode::MissingParameters),
        (ValidationKind::InvalidUsername, ErrorCode::InvalidUsername),
        (ValidationKind::InvalidEmail, ErrorCode::InvalidEmail),
        (ValidationKind::Other("x".into()), ErrorCode::ValidationError),
    ];
    for (kind, code) in cases {
        assert_eq!(map(DomainError::validation(kind, "bad")), (code, 400));
    }
}

#[test]
fn not_found_kinds_keep_their_entity() {
    assert_eq!(
        map(DomainError::not_found(NotFoundKind::Player, "User not found")),
        (ErrorCode::PlayerNotFound, 404)
    );
    assert_eq!(
        map(DomainError::not_found(NotFoundKind::Session, "Game not found")),
        (ErrorCode::SessionNotFound, 404)
    );
    assert_eq!(
        map(DomainError::not_found(NotFoundKind::Other("x".into()), "gone")),
        (ErrorCode::NotFound, 404)
    );
}

#[test]
fn turn_violations_are_forbidden() {
    assert_eq!(
        map(DomainError::forbidden(ForbiddenKind::NotYourTurn, "Not your turn")),
        (ErrorCode::NotYourTurn, 403)
    );
}

#[test]
fn conflicts_are_409() {
    let cases = [
        (ConflictKind::SessionFinished, ErrorCode::SessionFinished),
        (ConflictKind::OptimisticLock, ErrorCode::OptimisticLock),
        (ConflictKind::RoomIdCollision, ErrorCode::RoomIdCollision),
        (ConflictKind::UniqueUsername, ErrorCode::UniqueUsername),
        (ConflictKind::UniqueEmail, ErrorCode::UniqueEmail),
        (ConflictKind::Other("x".into()), ErrorCode::Conflict),
    ];
    for (kind, code) in cases {
        assert_eq!(map(DomainError::conflict(kind, "conflict")), (code, 409));
    }
}

#[test]
fn infra_failures_are_500() {
    assert_eq!(
        map(DomainError::infra(InfraErrorKind::DbUnavailable, "down")),
        (ErrorCode::DbUnavailable, 500)
    );
    assert_eq!(
        map(DomainError::infra(InfraErrorKind::DataCorruption, "bad deck")),
        (ErrorCode::DataCorruption, 500)
    );
    assert_eq!(
        map(DomainError::infra(InfraErrorKind::RoomIdsExhausted, "full")),
        (ErrorCode::RoomIdExhausted, 500)
    );
}
