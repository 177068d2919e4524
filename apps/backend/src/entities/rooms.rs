use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RoomStatus {
    #[sea_orm(string_value = "LOBBY")]
    Lobby,
    #[sea_orm(string_value = "VOTING")]
    Voting,
    #[sea_orm(string_value = "RESULT")]
    Result,
    #[sea_orm(string_value = "FINISHED")]
    Finished,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub host_id: String,
    pub status: RoomStatus,
    pub turn: i32,
    pub max_turns: i32,
    pub economy: i32,
    pub welfare: i32,
    pub education: i32,
    pub environment: i32,
    pub security: i32,
    pub human_rights: i32,
    pub is_collapsed: bool,
    pub current_policy_ids: Json,
    pub deck_ids: Json,
    pub passed_policy_ids: Json,
    pub votes: Json,
    pub last_result: Option<Json>,
    pub generated_policies: Json,
    pub lock_version: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room_players::Entity")]
    RoomPlayers,
}

impl Related<super::room_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
