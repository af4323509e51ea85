//! Catalog browsing.

use model_store_storefront::catalog::Catalog;

/// Log the demo models matching `query` and `category`.
pub fn list(query: &str, category: Option<&str>) {
    let catalog = Catalog::demo();
    let matches = catalog.search(query, category);

    if matches.is_empty() {
        tracing::info!("No models found");
        return;
    }

    for item in &matches {
        tracing::info!(
            "#{} {} - {} [{}] tags: {}",
            item.id,
            item.name,
            item.price,
            item.category,
            item.tags.join(", ")
        );
    }
    tracing::info!(
        "{} of {} models (categories: {})",
        matches.len(),
        catalog.items().len(),
        catalog.categories().join(", ")
    );
}
