// Horizon filler: insert the missing week slots of the earliest incomplete year.
// One read of all start dates, then sequential batched inserts. Only one year is
// processed per call; later years are left for the next call.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;
use tracing::{error, info, instrument};

use super::{missing_mondays, missing_years};

/// Persistence seam for the filler.
pub trait WeekStore {
    /// All persisted week start dates, in any order.
    fn week_start_dates(&self) -> impl Future<Output = anyhow::Result<Vec<NaiveDate>>> + Send;

    /// Insert one `free` slot (no student, no notes) per start date, skipping dates
    /// that already exist. Returns the number of rows actually inserted.
    fn insert_free_weeks(
        &self,
        starts: &[NaiveDate],
        now: DateTime<Utc>,
    ) -> impl Future<Output = anyhow::Result<u64>> + Send;
}

#[derive(Debug, Clone, Copy)]
pub struct FillPolicy {
    pub horizon_years: u32,
    pub batch_size: usize,
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self {
            horizon_years: 5,
            batch_size: 5,
        }
    }
}

/// Result of one fill call. `year` is `None` when the whole horizon is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillSummary {
    pub year: Option<i32>,
    pub created: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum FillError {
    #[error("reading week start dates failed: {0:#}")]
    Read(anyhow::Error),

    /// Batches before the failing one stay committed.
    #[error("inserting weeks for {year} failed after {created} created: {cause:#}")]
    Write {
        year: i32,
        created: u64,
        cause: anyhow::Error,
    },
}

#[instrument(skip(store, now), fields(operation = "fill_next_missing_weeks"))]
pub async fn fill_next_missing_weeks<S: WeekStore>(
    store: &S,
    current_year: i32,
    policy: FillPolicy,
    now: DateTime<Utc>,
) -> Result<FillSummary, FillError> {
    let existing = store.week_start_dates().await.map_err(FillError::Read)?;
    let known: HashSet<NaiveDate> = existing.into_iter().collect();

    let Some(year) = missing_years(&known, current_year, policy.horizon_years).next() else {
        return Ok(FillSummary {
            year: None,
            created: 0,
        });
    };

    let missing = missing_mondays(&known, year);
    let mut created = 0u64;
    for batch in missing.chunks(policy.batch_size.max(1)) {
        match store.insert_free_weeks(batch, now).await {
            Ok(n) => created += n,
            Err(cause) => {
                error!(year, created, error = %cause, "week fill stopped, earlier batches kept");
                return Err(FillError::Write {
                    year,
                    created,
                    cause,
                });
            }
        }
    }

    info!(year, missing = missing.len(), created, "filled missing weeks");
    Ok(FillSummary {
        year: Some(year),
        created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records batch sizes so tests can check the chunking.
    #[derive(Default)]
    struct RecordingStore {
        batches: Mutex<Vec<usize>>,
    }

    impl WeekStore for RecordingStore {
        async fn week_start_dates(&self) -> anyhow::Result<Vec<NaiveDate>> {
            Ok(vec![])
        }

        async fn insert_free_weeks(
            &self,
            starts: &[NaiveDate],
            _now: DateTime<Utc>,
        ) -> anyhow::Result<u64> {
            self.batches.lock().unwrap().push(starts.len());
            Ok(starts.len() as u64)
        }
    }

    #[tokio::test]
    async fn batches_are_bounded_by_policy() {
        let store = RecordingStore::default();
        let policy = FillPolicy {
            horizon_years: 1,
            batch_size: 5,
        };
        let summary = fill_next_missing_weeks(&store, 2026, policy, Utc::now())
            .await
            .unwrap();
        assert_eq!(summary.year, Some(2026));
        assert_eq!(summary.created, 52);

        let batches = store.batches.lock().unwrap().clone();
        assert_eq!(batches.len(), 11);
        assert!(batches[..10].iter().all(|&n| n == 5));
        assert_eq!(batches[10], 2);
    }
}
