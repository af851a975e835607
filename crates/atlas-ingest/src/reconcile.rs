//! Reconciler — the update-or-insert merge of candidates into the stored
//! collection, keyed by case-insensitive name.
//!
//! Matched records keep their id and have every descriptive field
//! overwritten; unmatched candidates become new records. Stored records
//! absent from the candidate set are left untouched — absence never deletes.
//! Duplicate lowercased names within one candidate set collapse to the last
//! occurrence, so a duplicate can never produce two rows even on first
//! sight.

use std::collections::HashMap;

use atlas_core::{
  country::{CandidateRecord, CountryRecord},
  store::CountryStore,
};
use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Merge `candidates` into the store and return the full post-refresh
/// collection.
///
/// The whole batch of creates and updates is persisted as one logical unit
/// ([`CountryStore::upsert_many`]); a failure leaves the previous collection
/// intact.
pub async fn reconcile<S: CountryStore>(
  store: &S,
  candidates: Vec<CandidateRecord>,
  now: DateTime<Utc>,
) -> Result<Vec<CountryRecord>> {
  let existing = store
    .list_all()
    .await
    .map_err(|e| Error::persistence("list countries", e))?;

  let mut by_name: HashMap<String, _> = existing
    .into_iter()
    .map(|record| (record.name.to_lowercase(), record))
    .collect();

  // Staging area keyed by lowercased name. Within one run the last
  // candidate for a key wins.
  let mut staged: HashMap<String, CountryRecord> = HashMap::new();
  let (mut updated, mut created) = (0u64, 0u64);

  for candidate in candidates {
    let key = candidate.name.to_lowercase();

    if let Some(record) = staged.get_mut(&key) {
      record.absorb(candidate, now);
    } else if let Some(mut record) = by_name.remove(&key) {
      record.absorb(candidate, now);
      staged.insert(key, record);
      updated += 1;
    } else {
      staged.insert(key, CountryRecord::from_candidate(candidate, now));
      created += 1;
    }
  }

  store
    .upsert_many(staged.into_values().collect())
    .await
    .map_err(|e| Error::persistence("upsert countries", e))?;

  tracing::info!(updated, created, "reconciled country dataset");

  store
    .list_all()
    .await
    .map_err(|e| Error::persistence("list countries", e))
}
