use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::room_code::normalize_room_id;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Room id taken from the `{room_id}` path segment, upper-cased.
///
/// A segment that cannot be a room id is answered like any unknown room;
/// existence of well-formed ids is checked by the service that uses it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoomId(pub String);

impl FromRequest for RoomId {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("room_id")
            .and_then(normalize_room_id)
            .map(RoomId)
            .ok_or_else(|| {
                AppError::from(DomainError::not_found(NotFoundKind::Room, "Room not found"))
            });
        std::future::ready(result)
    }
}
