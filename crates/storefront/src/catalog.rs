//! Catalog of 3D models.
//!
//! The catalog is static demo data. Administrators can add, edit and remove
//! models, but edits live only as long as the [`Catalog`] value; they are
//! never written to the side-store.

use serde::{Deserialize, Serialize};

use model_store_core::{ItemId, Price};

use crate::models::LineItem;

/// A model offered for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    /// Preview image path.
    pub image: String,
    pub tags: Vec<String>,
    pub category: String,
}

impl CatalogItem {
    /// Snapshot this item as an order line.
    #[must_use]
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Fields for a model that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCatalogItem {
    pub name: String,
    pub price: Price,
    pub image: String,
    pub tags: Vec<String>,
    pub category: String,
}

/// The set of models on sale, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

const IMG_CHROME: &str = "/img/81e5bc8d-ec10-404f-8104-00f0c12d0d27.jpg";
const IMG_ROBOT: &str = "/img/cd9796df-cd02-4594-8bf6-88951bd41b72.jpg";
const IMG_CRYSTAL: &str = "/img/98ad624f-ae7c-40d7-b4ab-fea2b133e361.jpg";

impl Catalog {
    /// Create a catalog from `items`.
    #[must_use]
    pub const fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// The six demo models.
    #[must_use]
    pub fn demo() -> Self {
        let demo = [
            (1, "Chrome Geometry", 1299, IMG_CHROME, "abstract, chrome, modern", "Abstract"),
            (2, "Future Robot", 2499, IMG_ROBOT, "robot, futuristic, character", "Characters"),
            (3, "Crystal Sculpture", 1850, IMG_CRYSTAL, "crystal, glass, elegant", "Decorative"),
            (4, "Minimal Cube", 899, IMG_CHROME, "minimal, geometric, basic", "Abstract"),
            (5, "Space Marine", 3299, IMG_ROBOT, "character, armor, sci-fi", "Characters"),
            (6, "Glass Vase", 1599, IMG_CRYSTAL, "vase, transparent, home", "Decorative"),
        ];

        Self::new(
            demo.into_iter()
                .map(|(id, name, cents, image, tags, category)| CatalogItem {
                    id: ItemId::new(id),
                    name: name.to_owned(),
                    price: Price::from_cents(cents),
                    image: image.to_owned(),
                    tags: parse_tags(tags),
                    category: category.to_owned(),
                })
                .collect(),
        )
    }

    /// Every model, in display order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Look up a model by ID.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Distinct categories, in the order they first appear.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    /// Models whose name or any tag contains `query` (case-insensitive),
    /// restricted to `category` when one is given.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<&CatalogItem> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| category.is_none_or(|category| item.category == category))
            .filter(|item| item.matches_query(&needle))
            .collect()
    }

    /// Add a model, assigning the next free ID.
    pub fn insert(&mut self, new: NewCatalogItem) -> ItemId {
        let next = self
            .items
            .iter()
            .map(|item| item.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        let id = ItemId::new(next);

        tracing::info!(item_id = %id, name = %new.name, "Catalog item added");
        self.items.push(CatalogItem {
            id,
            name: new.name,
            price: new.price,
            image: new.image,
            tags: new.tags,
            category: new.category,
        });
        id
    }

    /// Replace the model with the same ID. Returns `false` if there is none.
    pub fn update(&mut self, updated: CatalogItem) -> bool {
        match self.items.iter_mut().find(|item| item.id == updated.id) {
            Some(item) => {
                tracing::info!(item_id = %updated.id, "Catalog item updated");
                *item = updated;
                true
            }
            None => false,
        }
    }

    /// Remove a model. Returns `false` if there is none.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::info!(item_id = %id, "Catalog item removed");
        }
        removed
    }
}

/// Split a comma-separated tag field, trimming entries and dropping empty
/// ones.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}
