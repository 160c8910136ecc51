//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; `diesel print-schema` can regenerate them from a live
//! database after migrations change.
//!
//! Note: the partial unique index `claims_one_active_per_idea`
//! (`ON claims (idea_id) WHERE released_at IS NULL`) lives only in the
//! migrations — Diesel does not model partial indexes, but the claim
//! repository relies on it for exclusivity.

diesel::table! {
    /// Build claims, one row per claim lifetime.
    ///
    /// Rows are never deleted; releasing sets `released_at` and the history
    /// feeds the per-idea claim count.
    claims (id) {
        /// Primary key: UUID v4 identifier for this claim lifetime.
        id -> Uuid,
        /// The claimed idea.
        idea_id -> Uuid,
        /// The owning builder.
        user_id -> Uuid,
        /// Completion percentage, 0–100 (checked by the domain and a DB
        /// constraint).
        progress -> Int4,
        /// Claim creation timestamp.
        claimed_at -> Timestamptz,
        /// Release timestamp; NULL while the claim is active.
        released_at -> Nullable<Timestamptz>,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user interaction status, one row per (idea, user) pair.
    interactions (idea_id, user_id) {
        /// The categorised idea.
        idea_id -> Uuid,
        /// The categorising user.
        user_id -> Uuid,
        /// Current status; constrained to the closed status set.
        status -> Varchar,
        /// Last write timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Platform users surfaced in claimer summaries.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name (unique, max 32 characters).
        display_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(claims, interactions, users);
