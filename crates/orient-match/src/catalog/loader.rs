use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::{Catalog, CatalogError, CatalogRecord};
use crate::embedding::SentenceEmbedder;

fn default_frequency() -> u32 {
    1
}

/// One record as it appears in the catalog source JSON.
///
/// `frequency` is optional (unknown titles are treated as rare). `embedding`
/// is optional; records that ship without one are embedded at load time from
/// their combined title + description text.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    pub code: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

/// Loads the catalog from a JSON file. Any failure here is load-time fatal:
/// there is no sane fallback catalog, so the process must not start serving.
pub fn load_catalog(path: &Path, embedder: &SentenceEmbedder) -> Result<Catalog, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(path)?;
    let records: Vec<SourceRecord> =
        serde_json::from_str(&raw).map_err(|e| CatalogError::Malformed {
            reason: e.to_string(),
        })?;

    let catalog = build_catalog(records, embedder)?;

    info!(
        path = %path.display(),
        records = catalog.len(),
        embedding_dim = catalog.embedding_dim(),
        "Catalog loaded"
    );

    Ok(catalog)
}

/// Builds a validated catalog from source records, embedding any record that
/// lacks a precomputed vector. Also used by the administrative bulk-replace
/// endpoint.
pub fn build_catalog(
    records: Vec<SourceRecord>,
    embedder: &SentenceEmbedder,
) -> Result<Catalog, CatalogError> {
    let dim = embedder.embedding_dim();
    let mut out = Vec::with_capacity(records.len());
    let mut embedded_at_load = 0usize;

    for record in records {
        if record.title.trim().is_empty() {
            return Err(CatalogError::Malformed {
                reason: format!("record {:?}: empty title", record.code),
            });
        }
        if record.frequency == 0 {
            return Err(CatalogError::InvalidFrequency {
                code: record.code,
            });
        }

        let embedding = match record.embedding {
            Some(vector) => {
                if vector.len() != dim {
                    return Err(CatalogError::DimensionMismatch {
                        code: record.code,
                        expected: dim,
                        actual: vector.len(),
                    });
                }
                vector
            }
            None => {
                embedded_at_load += 1;
                embedder
                    .embed(&combined_text(&record.title, &record.description))
                    .map_err(|e| CatalogError::Embedding {
                        code: record.code.clone(),
                        source: e,
                    })?
            }
        };

        out.push(CatalogRecord {
            code: record.code,
            title: record.title,
            description: record.description,
            frequency: record.frequency,
            embedding,
        });
    }

    if embedded_at_load > 0 {
        debug!(embedded_at_load, "Embedded records without precomputed vectors");
    }

    Catalog::from_records(out, dim)
}

/// Combined text used for record embeddings (mirrors the query-side input).
fn combined_text(title: &str, description: &str) -> String {
    format!("{}. {}", title, description)
}
