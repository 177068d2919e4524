pub mod master_ideologies;
pub mod master_policies;
pub mod room_players;
pub mod rooms;

pub use master_ideologies::Entity as MasterIdeologies;
pub use master_policies::Entity as MasterPolicies;
pub use room_players::Entity as RoomPlayers;
pub use room_players::Model as RoomPlayer;
pub use rooms::Entity as Rooms;
pub use rooms::Model as Room;
