//! Distinct tile labels in first-occurrence order

use std::collections::HashMap;

/// Ordered set of tile-type labels
///
/// Indices are assigned in the order labels are first seen and never change
/// afterwards, so every per-type table in the model is indexed by them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    labels: Vec<String>,
    indices: HashMap<String, usize>,
}

impl Catalog {
    /// Catalog with no labels
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect distinct labels in encounter order
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut catalog = Self::new();
        for label in labels {
            catalog.insert(label);
        }
        catalog
    }

    /// Add a label if unseen, returning its index either way
    pub fn insert(&mut self, label: &str) -> usize {
        if let Some(&index) = self.indices.get(label) {
            return index;
        }
        let index = self.labels.len();
        self.labels.push(label.to_string());
        self.indices.insert(label.to_string(), index);
        index
    }

    /// Index of a label
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    /// Label at an index
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Whether the label is part of the catalog
    pub fn contains(&self, label: &str) -> bool {
        self.indices.contains_key(label)
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels have been recorded
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in index order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterate over labels in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
