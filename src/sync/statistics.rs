//! Statistics tuple and its last-writer-wins aggregator.

use serde::Serialize;
use uuid::Uuid;

use crate::source::{DataSource, SourceError};

/// Counts shown next to the task list. Always replaced as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_in_category: u64,
    pub completed_in_category: u64,
    pub uncompleted_in_category: u64,
    /// Uncompleted tasks across every category, for the "All" label.
    pub uncompleted_total: u64,
}

impl Statistics {
    /// Issue the four count queries concurrently and join them.
    ///
    /// Resolves only once all four have completed; the first failure fails the
    /// whole tuple, so a partially filled value is never produced.
    pub async fn collect(source: &dyn DataSource, category: Option<Uuid>) -> Result<Self, SourceError> {
        let (total_in_category, completed_in_category, uncompleted_in_category, uncompleted_total) = tokio::try_join!(
            source.count_total_in_category(category),
            source.count_completed_in_category(category),
            source.count_uncompleted_in_category(category),
            source.count_uncompleted_total(),
        )?;

        Ok(Self {
            total_in_category,
            completed_in_category,
            uncompleted_in_category,
            uncompleted_total,
        })
    }
}

/// Outcome of [`StatisticsAggregator::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Publish {
    Published,
    /// A newer recompute was issued; this result was dropped.
    Superseded,
    /// The latest recompute failed; the previous tuple stays current.
    Failed(SourceError),
}

/// Owns the current statistics tuple.
///
/// Each recompute gets a generation from [`begin`](Self::begin); only the most
/// recently issued generation may publish.
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    current: Option<Statistics>,
    generation: u64,
    pending: bool,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a recompute, superseding any in flight.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.pending = true;
        self.generation
    }

    pub fn publish(&mut self, generation: u64, result: Result<Statistics, SourceError>) -> Publish {
        if generation != self.generation {
            return Publish::Superseded;
        }
        self.pending = false;
        match result {
            Ok(statistics) => {
                self.current = Some(statistics);
                Publish::Published
            }
            Err(err) => Publish::Failed(err),
        }
    }

    /// Last published tuple, if any recompute has succeeded yet.
    pub fn current(&self) -> Option<Statistics> {
        self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the latest recompute is still in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
