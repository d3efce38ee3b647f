// src/models/signature.rs

//! Stored page signatures.
//!
//! The durable form is one record per line: `identifier,fingerprint,marker`.

use std::collections::HashMap;

use crate::error::{AppError, Result};

/// Marker written for every site evaluated in a run.
pub const FRESH_MARKER: &str = "0";

/// Last known fingerprint of a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub fingerprint: String,
    pub last_update_marker: String,
}

impl Signature {
    /// Signature for a freshly computed fingerprint.
    pub fn fresh(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            last_update_marker: FRESH_MARKER.to_string(),
        }
    }
}

/// Ordered mapping from site identifier to its signature.
///
/// Records keep insertion order so the store file follows the site list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureStore {
    records: Vec<(String, Signature)>,
    index: HashMap<String, usize>,
}

impl SignatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Signature> {
        self.index.get(id).map(|&i| &self.records[i].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Insert or overwrite a signature. An existing key keeps its position.
    pub fn insert(&mut self, id: impl Into<String>, signature: Signature) {
        let id = id.into();
        match self.index.get(&id) {
            Some(&i) => self.records[i].1 = signature,
            None => {
                self.index.insert(id.clone(), self.records.len());
                self.records.push((id, signature));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Signature)> {
        self.records.iter().map(|(id, sig)| (id.as_str(), sig))
    }

    /// Parse the line format. Blank lines are skipped; a line without
    /// exactly three fields aborts the parse.
    pub fn parse(content: &str, source: &str) -> Result<Self> {
        let mut store = Self::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let cols: Vec<&str> = line.split(',').collect();
            let [id, fingerprint, marker] = cols.as_slice() else {
                return Err(AppError::parse(
                    source,
                    idx + 1,
                    format!(
                        "expected 3 fields (identifier,fingerprint,marker), found {}",
                        cols.len()
                    ),
                ));
            };

            store.insert(
                *id,
                Signature {
                    fingerprint: fingerprint.to_string(),
                    last_update_marker: marker.to_string(),
                },
            );
        }
        Ok(store)
    }

    /// Render the store in the line format, one record per line.
    pub fn to_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(id, sig)| format!("{},{},{}", id, sig.fingerprint, sig.last_update_marker))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, Signature)> for SignatureStore {
    fn from_iter<I: IntoIterator<Item = (S, Signature)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (id, sig) in iter {
            store.insert(id, sig);
        }
        store
    }
}
