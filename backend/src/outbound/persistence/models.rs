//! Diesel row structs for the persistence layer.
//!
//! These models are internal to the outbound adapter: repositories convert
//! them to and from validated domain types at the boundary and never expose
//! them to the domain layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{claims, interactions, users};

/// Row read from the `claims` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = claims)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClaimRow {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub progress: i32,
    pub claimed_at: DateTime<Utc>,
    pub released_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for a fresh claim.
#[derive(Debug, Insertable)]
#[diesel(table_name = claims)]
pub struct NewClaimRow {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub progress: i32,
    pub claimed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row read from the `interactions` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = interactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InteractionRow {
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

/// Insertable/upsert row for an interaction status.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = interactions)]
pub struct NewInteractionRow<'a> {
    pub idea_id: Uuid,
    pub user_id: Uuid,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row read from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for a new user.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
}
