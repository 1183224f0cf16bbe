//! JSON merge service
//!
//! Combines several exported order files (each a JSON array) into one
//! array, persists the pretty-printed result, and hands the bytes back for
//! download. Element order follows upload order.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::MergeError;

pub struct MergeService {
    output_path: PathBuf,
}

impl MergeService {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Merge uploaded documents into one array and write it to the
    /// configured output path. Each document must be a JSON array.
    pub fn merge(&self, files: &[(String, Vec<u8>)]) -> Result<Vec<u8>, MergeError> {
        let mut merged: Vec<Value> = Vec::new();

        for (filename, bytes) in files {
            let value: Value =
                serde_json::from_slice(bytes).map_err(|source| MergeError::InvalidJson {
                    filename: filename.clone(),
                    source,
                })?;
            match value {
                Value::Array(entries) => merged.extend(entries),
                _ => {
                    return Err(MergeError::NotAnArray {
                        filename: filename.clone(),
                    })
                }
            }
        }

        let output = serde_json::to_vec_pretty(&merged)
            .map_err(|e| MergeError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        fs::write(&self.output_path, &output)?;

        tracing::info!(
            files = files.len(),
            orders = merged.len(),
            path = %self.output_path.display(),
            "Merged order files"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(dir: &tempfile::TempDir) -> MergeService {
        MergeService::new(dir.path().join("merged.json"))
    }

    #[test]
    fn merges_arrays_in_upload_order() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            ("a.json".to_string(), br#"[{"id":1},{"id":2}]"#.to_vec()),
            ("b.json".to_string(), br#"[{"id":3}]"#.to_vec()),
        ];

        let output = service(&dir).merge(&files).unwrap();
        let merged: Vec<Value> = serde_json::from_slice(&output).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0]["id"], 1);
        assert_eq!(merged[2]["id"], 3);

        // The merged file lands on disk too.
        let on_disk = fs::read(dir.path().join("merged.json")).unwrap();
        assert_eq!(on_disk, output);
    }

    #[test]
    fn rejects_non_array_documents() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![("orders.json".to_string(), br#"{"id":1}"#.to_vec())];

        let err = service(&dir).merge(&files).unwrap_err();
        assert!(matches!(err, MergeError::NotAnArray { .. }));
    }

    #[test]
    fn rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![("broken.json".to_string(), b"not json".to_vec())];

        let err = service(&dir).merge(&files).unwrap_err();
        assert!(matches!(err, MergeError::InvalidJson { .. }));
    }

    #[test]
    fn merging_nothing_yields_an_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let output = service(&dir).merge(&[]).unwrap();
        let merged: Vec<Value> = serde_json::from_slice(&output).unwrap();
        assert!(merged.is_empty());
    }
}
