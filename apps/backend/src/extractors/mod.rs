pub mod room_id;
pub mod validated_json;

pub use room_id::RoomId;
pub use validated_json::{JsonBodyLimit, ValidatedJson};
