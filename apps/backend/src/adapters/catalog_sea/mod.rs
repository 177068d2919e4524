//! SeaORM adapter for the master catalog tables.

use serde_json::Value as Json;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::entities::{master_ideologies, master_policies};

#[derive(Debug, Clone)]
pub struct PolicyRow {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub news_flash: String,
    pub effects: Json,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct IdeologyRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub coefficients: Json,
    pub sort_order: i32,
}

pub async fn list_policies<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<master_policies::Model>, sea_orm::DbErr> {
    master_policies::Entity::find()
        .order_by_asc(master_policies::Column::SortOrder)
        .order_by_asc(master_policies::Column::Id)
        .all(conn)
        .await
}

pub async fn list_ideologies<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<master_ideologies::Model>, sea_orm::DbErr> {
    master_ideologies::Entity::find()
        .order_by_asc(master_ideologies::Column::SortOrder)
        .order_by_asc(master_ideologies::Column::Id)
        .all(conn)
        .await
}

pub async fn count_policies<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    master_policies::Entity::find().count(conn).await
}

pub async fn count_ideologies<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    master_ideologies::Entity::find().count(conn).await
}

pub async fn insert_policy<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    row: PolicyRow,
) -> Result<master_policies::Model, sea_orm::DbErr> {
    master_policies::ActiveModel {
        id: Set(row.id),
        category: Set(row.category),
        title: Set(row.title),
        description: Set(row.description),
        news_flash: Set(row.news_flash),
        effects: Set(row.effects),
        sort_order: Set(row.sort_order),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn insert_ideology<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    row: IdeologyRow,
) -> Result<master_ideologies::Model, sea_orm::DbErr> {
    master_ideologies::ActiveModel {
        id: Set(row.id),
        name: Set(row.name),
        description: Set(row.description),
        coefficients: Set(row.coefficients),
        sort_order: Set(row.sort_order),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}
