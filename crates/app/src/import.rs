//! Bulk import of words from a JSON file.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use services::WordService;
use words_core::model::{Word, WordDraft};

/// Either a bare list of words or a `{ "words": [...] }` data file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportFile {
    List(Vec<WordDraft>),
    DataFile { words: Vec<WordDraft> },
}

/// Parse import drafts. Ids and other unknown fields are ignored; imported
/// words get fresh ids.
///
/// # Errors
///
/// Returns an error if `raw` is neither accepted shape.
pub fn parse_drafts(raw: &str) -> anyhow::Result<Vec<WordDraft>> {
    let file: ImportFile = serde_json::from_str(raw).context("parse import file")?;
    Ok(match file {
        ImportFile::List(words) | ImportFile::DataFile { words } => words,
    })
}

/// Read `path` and store every word in it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the store
/// rejects a word.
pub async fn import_file(words: &WordService, path: &Path) -> anyhow::Result<Vec<Word>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    let drafts = parse_drafts(&raw)?;
    let stored = words.import_words(drafts).await?;
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bare_list_with_ids() {
        let drafts = parse_drafts(
            r#"[{"id": 4, "title": "run", "translate": "бежать", "examples": ["I run"]}]"#,
        )
        .unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "run");
        assert_eq!(drafts[0].examples[0].en, "I run");
    }

    #[test]
    fn reads_data_file_shape() {
        let drafts = parse_drafts(
            r#"{"next_id": 9, "words": [{"title": "a", "translate": "b", "learned": true}]}"#,
        )
        .unwrap();
        assert!(drafts[0].learned);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_drafts(r#"{"title": "a"}"#).is_err());
    }
}
