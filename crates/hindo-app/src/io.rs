use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use hindo_core::Tokenizer;
use hindo_core::frequency::count_into;
use hindo_types::FrequencyTable;

/// Token streams in flight between the tokenizing task and the counter
const STREAM_CAPACITY: usize = 16;

/// Tokenize every transcript in `dir` and count the tokens
pub async fn count_transcripts(
    dir: &Path,
    tokenizer: Arc<dyn Tokenizer>,
) -> anyhow::Result<FrequencyTable> {
    let files = transcript_files(dir)?;
    tracing::info!("Parsing {} transcripts in {}", files.len(), dir.display());
    let start = Instant::now();

    let (tx, rx) = kanal::bounded_async::<Vec<String>>(STREAM_CAPACITY);

    let producer = tokio::spawn(async move {
        for path in files {
            let tokenizer = Arc::clone(&tokenizer);
            let tokens = tokio::task::spawn_blocking(move || tokenize_file(&path, tokenizer.as_ref()))
                .await??;
            tx.send(tokens).await?;
        }
        Ok::<_, anyhow::Error>(())
    });

    let mut table = FrequencyTable::new();
    let mut streams = 0;
    while let Ok(tokens) = rx.recv().await {
        count_into(&mut table, tokens);
        streams += 1;
    }
    producer.await??;

    tracing::info!(
        "Counted {} distinct terms from {} transcripts in {} ms",
        table.len(),
        streams,
        start.elapsed().as_millis()
    );
    Ok(table)
}

fn tokenize_file(path: &Path, tokenizer: &dyn Tokenizer) -> anyhow::Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let tokens = tokenizer
        .tokenize(&text)
        .with_context(|| format!("Failed to tokenize {}", path.display()))?;
    tracing::debug!("{}: {} tokens", path.display(), tokens.len());
    Ok(tokens)
}

/// Regular files of `dir`, sorted by name
pub fn transcript_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read transcripts directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
