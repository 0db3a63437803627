use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Instant;

use hindo_types::{FrequencyTable, LookupSource, RankedRow};
use tokio::task::JoinSet;

use crate::dictionary::CacheError;
use crate::language::TermLookup;

/// `(rank, term, count)` before lookup
pub type RankedTerm = (usize, String, u64);

/// Resolves a frequency table into ranked rows on a pool of tokio tasks
pub struct Enricher {
    lookup: Arc<dyn TermLookup>,
    workers: usize,
}

impl Enricher {
    pub fn new(lookup: Arc<dyn TermLookup>) -> Self {
        Self {
            lookup,
            workers: default_workers(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Rank, look up and reassemble every term of `table`.
    ///
    /// The lookup's dictionary is settled before any worker starts, so workers
    /// only ever read it.
    pub async fn enrich(&self, table: FrequencyTable) -> Result<Vec<RankedRow>, EnrichError> {
        self.lookup.ready().await?;

        let ranked = rank_terms(table);
        let total = ranked.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let size = chunk_size(total, self.workers);
        tracing::info!(
            "Enriching {} terms with {} workers (chunk size {})",
            total,
            self.workers,
            size
        );
        let start = Instant::now();

        let mut tasks = JoinSet::new();
        let mut chunk_count = 0;
        let mut terms = ranked.into_iter();
        loop {
            let chunk: Vec<RankedTerm> = terms.by_ref().take(size).collect();
            if chunk.is_empty() {
                break;
            }

            let index = chunk_count;
            chunk_count += 1;
            let lookup = Arc::clone(&self.lookup);
            tasks.spawn(async move { (index, process_chunk(lookup.as_ref(), chunk).await) });
        }

        let mut chunks: Vec<Option<Vec<RankedRow>>> = (0..chunk_count).map(|_| None).collect();
        while let Some(result) = tasks.join_next().await {
            let (index, rows) = result?;
            tracing::debug!("Chunk {} finished with {} rows", index, rows.len());
            chunks[index] = Some(rows);
        }

        let rows: Vec<RankedRow> = chunks.into_iter().flatten().flatten().collect();

        let stats = EnrichmentStats::from_rows(&rows);
        tracing::info!(
            "Enriched {} terms in {} ms (dictionary: {}, fallback: {}, failed: {})",
            rows.len(),
            start.elapsed().as_millis(),
            stats.found,
            stats.fallback,
            stats.failed
        );

        Ok(rows)
    }
}

async fn process_chunk(lookup: &dyn TermLookup, chunk: Vec<RankedTerm>) -> Vec<RankedRow> {
    let mut rows = Vec::with_capacity(chunk.len());
    for (rank, term, count) in chunk {
        let outcome = lookup.lookup(&term).await;
        tracing::debug!(rank, term = %term, source = outcome.source().as_str(), "resolved");
        rows.push(RankedRow::new(rank, term, count, outcome));
    }
    rows
}

/// Sort by count descending, then term ascending, and number from 1
pub fn rank_terms(table: FrequencyTable) -> Vec<RankedTerm> {
    let mut pairs: Vec<(String, u64)> = table.into_iter().collect();
    pairs.sort_by(|(a_term, a_count), (b_term, b_count)| {
        Reverse(a_count)
            .cmp(&Reverse(b_count))
            .then_with(|| a_term.cmp(b_term))
    });

    pairs
        .into_iter()
        .enumerate()
        .map(|(i, (term, count))| (i + 1, term, count))
        .collect()
}

/// `ceil(total / workers)`, never zero
pub fn chunk_size(total: usize, workers: usize) -> usize {
    total.div_ceil(workers.max(1)).max(1)
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Per-source row counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub found: usize,
    pub fallback: usize,
    pub failed: usize,
}

impl EnrichmentStats {
    pub fn from_rows(rows: &[RankedRow]) -> Self {
        let mut stats = Self::default();
        for row in rows {
            match row.source {
                LookupSource::Dictionary => stats.found += 1,
                LookupSource::Fallback => stats.fallback += 1,
                LookupSource::Failed => stats.failed += 1,
            }
        }
        stats
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("Dictionary unavailable: {0}")]
    Cache(#[from] CacheError),

    #[error("Enrichment worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
