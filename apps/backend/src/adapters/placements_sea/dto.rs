//! DTOs for placements_sea adapter.

/// DTO for appending one tile to a room's board.
#[derive(Debug, Clone)]
pub struct PlacementCreate {
    pub room_id: String,
    /// Next free position in the room's placement history
    pub seq: i32,
    pub q: i32,
    pub r: i32,
    pub tile_id: String,
    pub player: i16,
    pub rotation: i32,
}
