use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use hindo_core::{EnrichmentStats, Enricher, ranking};

use crate::io::count_transcripts;
use crate::state::AppState;

pub struct PipelineSummary {
    pub terms: usize,
    pub output: PathBuf,
    pub stats: EnrichmentStats,
}

/// Transcripts -> frequency table -> enriched rows -> ranked table on disk
pub async fn run(state: &AppState) -> anyhow::Result<PipelineSummary> {
    let pipeline = &state.config.pipeline;

    tracing::info!("Parsing transcriptions");
    let table = count_transcripts(&pipeline.transcripts_dir, Arc::clone(&state.tokenizer)).await?;
    if table.is_empty() {
        tracing::warn!(
            "No tokens found in {}",
            pipeline.transcripts_dir.display()
        );
    }

    tracing::info!("Organizing frequency");
    let mut enricher = Enricher::new(Arc::clone(&state.lookup));
    if let Some(workers) = pipeline.workers {
        enricher = enricher.with_workers(workers);
    }
    let rows = enricher.enrich(table).await.context("Enrichment failed")?;
    let stats = EnrichmentStats::from_rows(&rows);
    let terms = rows.len();

    let output = pipeline.output_file.clone();
    let path = output.clone();
    tokio::task::spawn_blocking(move || {
        ranking::write_table(&path, &rows)?;
        ranking::resort(&path)
    })
    .await?
    .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(PipelineSummary {
        terms,
        output,
        stats,
    })
}
