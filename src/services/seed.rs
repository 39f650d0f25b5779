//! Seed import: load an existing shift history into the store.
//!
//! Feeds arrive as day rows listing who was on shift and who was home, with
//! names given as free-form aliases. The importer resolves aliases against
//! the roster's alias map and rebuilds the ledger from scratch, so importing
//! the same feed twice leaves the store in the identical state.

use anyhow::Context;
use log::{debug, info, warn};
use std::collections::HashMap;

use crate::api::SeedRow;
use crate::db::repository::FullStore;
use crate::error::SchedulerResult;
use crate::models::EmployeeId;

/// Parse a seed feed from a JSON array of day rows.
pub fn feed_from_json(json: &str) -> anyhow::Result<Vec<SeedRow>> {
    let rows: Vec<SeedRow> =
        serde_json::from_str(json).context("Failed to deserialize seed feed JSON")?;
    Ok(rows)
}

/// Replace the store's schedule history with the feed's.
///
/// Clears every schedule entry up front, then walks the rows in order. An
/// alias that resolves to no registered employee is logged and skipped; an
/// employee already written for a row's date is skipped so repeated aliases
/// cannot double-write. Registrations are untouched.
///
/// # Arguments
/// * `store` - Backing store to rebuild
/// * `alias_to_id` - Canonical names and aliases, both mapping to ids
/// * `rows` - The feed, one row per day
pub async fn seed_from_feed<S: FullStore>(
    store: &S,
    alias_to_id: &HashMap<String, EmployeeId>,
    rows: &[SeedRow],
) -> SchedulerResult<()> {
    info!("Seeding schedule history: {} feed rows", rows.len());
    store.clear_all_entries().await?;

    let mut written = 0usize;
    let mut skipped = 0usize;
    for row in rows {
        for (aliases, on_shift) in [(&row.on_shift, true), (&row.at_home, false)] {
            for alias in aliases {
                let Some(&id) = alias_to_id.get(alias) else {
                    warn!("Seed row {}: unknown alias '{}', skipping", row.date, alias);
                    skipped += 1;
                    continue;
                };
                if store.on_shift_flag(id, row.date).await?.is_some() {
                    debug!(
                        "Seed row {}: '{}' already recorded for the day, skipping",
                        row.date, alias
                    );
                    continue;
                }
                store.upsert_entry(id, row.date, on_shift).await?;
                written += 1;
            }
        }
    }

    info!(
        "Seed import complete: {} entries written, {} aliases skipped",
        written, skipped
    );
    Ok(())
}
