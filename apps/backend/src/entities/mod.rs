pub mod game_sessions;
pub mod rooms;
pub mod tile_placements;
pub mod users;

pub use game_sessions::Entity as GameSessions;
pub use game_sessions::Model as GameSession;
pub use rooms::Entity as Rooms;
pub use rooms::Model as Room;
pub use tile_placements::Entity as TilePlacements;
pub use tile_placements::Model as TilePlacement;
pub use users::Entity as Users;
pub use users::Model as User;
