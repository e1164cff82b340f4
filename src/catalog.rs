//! # Catalog Module
//!
//! Loads the cultural points document and answers category lookups.
//! The catalog is read once at startup and never mutated afterwards.

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::BotError;

/// A single landmark entry as stored in the catalog document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CulturalPoint {
    pub name: String,
    pub description: String,
    pub category: String,
    pub address: String,
    /// Remote URL or local file path of the picture
    pub picture: String,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(rename = "CulturalPoints")]
    cultural_points: Vec<CulturalPoint>,
}

/// Ordered, read-only collection of cultural points
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    points: Vec<CulturalPoint>,
}

/// Points of a single category, in catalog order
#[derive(Debug, Clone)]
pub struct CategoryView<'a> {
    category: String,
    points: Vec<&'a CulturalPoint>,
}

impl<'a> CategoryView<'a> {
    /// Category label the view was requested with
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a CulturalPoint> {
        self.points.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CulturalPoint> + '_ {
        self.points.iter().copied()
    }
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// A missing file yields [`BotError::CatalogNotFound`], a document that does
    /// not match the `{ "CulturalPoints": [...] }` shape yields
    /// [`BotError::CatalogParse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BotError> {
        let path = path.as_ref();
        let display_path = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            IoErrorKind::NotFound => BotError::CatalogNotFound(display_path.clone()),
            _ => BotError::CatalogIo(format!("{display_path}: {e}")),
        })?;

        let catalog = Self::from_json(&content)?;
        info!(path = %display_path, points = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog document from a JSON string
    pub fn from_json(json: &str) -> Result<Self, BotError> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| BotError::CatalogParse(e.to_string()))?;
        Self::from_points(document.cultural_points)
    }

    /// Build a catalog from already parsed points, rejecting blank categories
    pub fn from_points(points: Vec<CulturalPoint>) -> Result<Self, BotError> {
        if let Some(position) = points.iter().position(|p| p.category.trim().is_empty()) {
            return Err(BotError::CatalogParse(format!(
                "point #{} ({}) has an empty category",
                position, points[position].name
            )));
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Case-insensitive exact match on the category label, order preserving
    pub fn filter_by_category(&self, category: &str) -> CategoryView<'_> {
        let wanted = category.to_lowercase();
        let points: Vec<&CulturalPoint> = self
            .points
            .iter()
            .filter(|p| p.category.to_lowercase() == wanted)
            .collect();
        debug!(category = %category, matches = points.len(), "Filtered catalog by category");

        CategoryView {
            category: category.to_string(),
            points,
        }
    }

    /// Distinct category labels in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<String> = Vec::new();
        let mut labels = Vec::new();
        for point in &self.points {
            let key = point.category.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                labels.push(point.category.as_str());
            }
        }
        labels
    }

    /// Labels from `labels` that have no entry in the catalog
    pub fn missing_categories<'l>(&self, labels: &'l [String]) -> Vec<&'l str> {
        labels
            .iter()
            .filter(|label| self.filter_by_category(label).is_empty())
            .map(String::as_str)
            .collect()
    }
}
