use sqlx::{PgPool, Result};

use crate::db::models::LineGroup;

// --- Group registry service functions ---
//
// All writes go through the `line_groups` primary key, so concurrent webhook
// deliveries and admin actions never need in-process locking.

/// Registers a group id if it is not already known. Returns `true` when a new
/// row was inserted, `false` when the id was already registered (the conflict
/// is resolved as a no-op, keeping the original `added_at`).
pub async fn upsert_group(pool: &PgPool, group_id: &str) -> Result<bool> {
    let rows_affected = sqlx::query(
        "INSERT INTO line_groups (group_id) VALUES ($1) ON CONFLICT (group_id) DO NOTHING",
    )
    .bind(group_id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(rows_affected > 0)
}

/// All registered groups, most recently added first.
pub async fn list_groups(pool: &PgPool) -> Result<Vec<LineGroup>> {
    sqlx::query_as::<_, LineGroup>("SELECT group_id, added_at FROM line_groups ORDER BY added_at DESC")
        .fetch_all(pool)
        .await
}

/// The most recently added group, if any. Used by the admin page to show the
/// group that just invited the bot.
pub async fn latest_group(pool: &PgPool) -> Result<Option<LineGroup>> {
    sqlx::query_as::<_, LineGroup>(
        "SELECT group_id, added_at FROM line_groups ORDER BY added_at DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await
}

/// Unsubscribes a group. Deleting an id that is not registered is not an
/// error; the returned count is 0 in that case.
pub async fn delete_group(pool: &PgPool, group_id: &str) -> Result<u64> {
    let rows_affected = sqlx::query("DELETE FROM line_groups WHERE group_id = $1")
        .bind(group_id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows_affected)
}
