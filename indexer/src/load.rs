use anyhow::{anyhow, Context, Result};
use doccorpus::document::parse_date;
use doccorpus::ops::create_document;
use doccorpus::{CorpusError, DocId, DocumentStore, NewDocument};
use serde::Deserialize;
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: serde_json::Value,
    title: String,
    #[serde(alias = "body")]
    text: String,
    date: String,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub created: usize,
    /// Documents whose id already existed in the collection.
    pub skipped: usize,
}

pub fn load_path<S: DocumentStore>(col: &S, input: &str) -> Result<LoadSummary> {
    let input_path = Path::new(input);
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        return Err(anyhow!("input path {input} does not exist"));
    }

    let mut summary = LoadSummary::default();
    for file in files {
        tracing::debug!(file = %file.display(), "loading documents");
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(col, &file, &mut summary)?;
        } else {
            load_json(col, &file, &mut summary)?;
        }
    }
    Ok(summary)
}

fn load_jsonl<S: DocumentStore>(col: &S, file: &Path, summary: &mut LoadSummary) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        ingest_doc(col, doc, summary)?;
    }
    Ok(())
}

fn load_json<S: DocumentStore>(col: &S, file: &Path, summary: &mut LoadSummary) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                ingest_doc(col, serde_json::from_value(v)?, summary)?;
            }
        }
        serde_json::Value::Object(_) => {
            ingest_doc(col, serde_json::from_value(json)?, summary)?;
        }
        _ => tracing::warn!(file = %file.display(), "expected a document object or array, skipping"),
    }
    Ok(())
}

fn ingest_doc<S: DocumentStore>(col: &S, doc: InputDoc, summary: &mut LoadSummary) -> Result<()> {
    let id = DocId::from_json(&doc.id).ok_or_else(|| anyhow!("unsupported document id {}", doc.id))?;
    let date = parse_date(&doc.date).with_context(|| format!("document {id}: invalid date {:?}", doc.date))?;
    let input = NewDocument { id, title: doc.title, text: doc.text, date, category: doc.category };
    match create_document(col, input) {
        Ok(_) => summary.created += 1,
        Err(CorpusError::DuplicateId(id)) => {
            tracing::warn!(%id, "document already exists, skipping");
            summary.skipped += 1;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
