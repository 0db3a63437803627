use std::path::Path;
use std::sync::Arc;

use hindo_config::Config;
use hindo_lang_japanese::{JapaneseLookup, LookupOptions, WhitespaceTokenizer};
use hindo_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

use crate::io::count_transcripts;
use crate::pipeline::run;
use crate::state::AppState;

struct FixedTranslator(&'static str);

#[async_trait::async_trait]
impl Translator for FixedTranslator {
    async fn translate(
        &self,
        _text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        Ok(Translation {
            text: self.0.to_string(),
            from,
            to,
            provider: "fixed".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fixed".to_string(),
            requires_api_key: false,
        }
    }
}

fn setup(root: &Path, translator: Option<Arc<dyn Translator>>) -> AppState {
    let mut config = Config::default();
    config.dictionary.dataset_dir = root.join("jmdict_english");
    config.dictionary.cache_file = root.join("cache.bin");
    config.pipeline.transcripts_dir = root.join("transcribed");
    config.pipeline.output_file = root.join("word_frequency.csv");
    config.pipeline.tokenizer = "whitespace".to_string();
    config.pipeline.workers = Some(2);

    std::fs::create_dir_all(&config.dictionary.dataset_dir).unwrap();
    std::fs::write(
        config.dictionary.dataset_dir.join("term_bank_1.json"),
        r#"[
            ["本", "ほん", "n", "", 1, ["book"], 1, ""],
            ["猫", "ねこ", "n", "", 1, ["cat"], 2, ""]
        ]"#,
    )
    .unwrap();
    std::fs::write(
        config.dictionary.dataset_dir.join("index.json"),
        r#"{"title": "JMdict", "format": 3}"#,
    )
    .unwrap();

    std::fs::create_dir_all(&config.pipeline.transcripts_dir).unwrap();
    std::fs::write(
        config.pipeline.transcripts_dir.join("episode 1.txt"),
        "本 猫 本 犬 猫",
    )
    .unwrap();
    std::fs::write(
        config.pipeline.transcripts_dir.join("episode 2.txt"),
        "本 猫\n本 犬 猫\n本 犬 猫",
    )
    .unwrap();

    let options = LookupOptions::from_config(&config.dictionary, &config.translator);
    let lookup = JapaneseLookup::new(config.dictionary.clone(), translator, options);

    AppState {
        config,
        lookup: Arc::new(lookup),
        tokenizer: Arc::new(WhitespaceTokenizer),
    }
}

#[tokio::test]
async fn writes_ranked_table_with_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let state = setup(dir.path(), Some(Arc::new(FixedTranslator("dog"))));

    let summary = run(&state).await.unwrap();

    assert_eq!(summary.terms, 3);
    assert_eq!(summary.stats.found, 2);
    assert_eq!(summary.stats.fallback, 1);
    assert_eq!(summary.stats.failed, 0);

    let contents = std::fs::read_to_string(&state.config.pipeline.output_file).unwrap();
    assert_eq!(
        contents,
        "Rank,Word,Hiragana,Translation,Frequency\n\
         1,本,ほん,book,5\n\
         2,猫,ねこ,cat,5\n\
         3,犬,,dog,3\n"
    );
    assert!(state.config.dictionary.cache_file.exists());
}

#[tokio::test]
async fn unresolved_terms_get_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let state = setup(dir.path(), None);

    let summary = run(&state).await.unwrap();
    assert_eq!(summary.stats.failed, 1);

    let contents = std::fs::read_to_string(&state.config.pipeline.output_file).unwrap();
    assert!(contents.ends_with("3,犬,,no definition found,3\n"));
}

#[tokio::test]
async fn rerun_produces_identical_table() {
    let dir = tempfile::tempdir().unwrap();
    let state = setup(dir.path(), Some(Arc::new(FixedTranslator("dog"))));

    run(&state).await.unwrap();
    let first = std::fs::read(&state.config.pipeline.output_file).unwrap();
    run(&state).await.unwrap();
    let second = std::fs::read(&state.config.pipeline.output_file).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn broken_dataset_stops_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let state = setup(dir.path(), None);
    std::fs::write(
        state.config.dictionary.dataset_dir.join("term_bank_2.json"),
        r#"[["壊れた"]]"#,
    )
    .unwrap();

    assert!(run(&state).await.is_err());
    assert!(!state.config.pipeline.output_file.exists());
    assert!(!state.config.dictionary.cache_file.exists());
}

#[tokio::test]
async fn counts_many_transcripts() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..40 {
        std::fs::write(dir.path().join(format!("{i:02}.txt")), "の は の\nです").unwrap();
    }

    let table = count_transcripts(dir.path(), Arc::new(WhitespaceTokenizer))
        .await
        .unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table["の"], 80);
    assert_eq!(table["は"], 40);
    assert_eq!(table["です"], 40);
}

#[tokio::test]
async fn missing_transcripts_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = count_transcripts(&dir.path().join("transcribed"), Arc::new(WhitespaceTokenizer)).await;
    assert!(result.is_err());
}
