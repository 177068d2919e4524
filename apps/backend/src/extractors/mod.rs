pub mod current_user;
pub mod room_id;
pub mod validated_json;

pub use current_user::{CurrentUser, MaybeUser};
pub use room_id::RoomId;
pub use validated_json::ValidatedJson;
