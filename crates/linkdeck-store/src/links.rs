//! Load / normalize / persist cycle for the link hierarchy.
//!
//! The tree lives under a single kv key as a JSON document. Each request
//! performs one full load-mutate-persist cycle; there is no optimistic
//! concurrency check, so two concurrent writers race and the last write
//! wins. Accepted for a single-operator deployment.

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::db::Database;
use crate::error::StoreResult;
use crate::tree::LinkTree;

/// Storage key for the serialized link tree.
pub const LINKS_KEY: &str = "linkdeck_links_v1";

/// Load and persist the [`LinkTree`] from the kv store.
#[derive(Clone)]
pub struct LinkStore {
    db: Database,
}

impl LinkStore {
    /// Create a new link store backed by `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the authoritative tree.
    ///
    /// Absent or structurally invalid data (missing or non-array
    /// `categories`) seeds and persists a default single-category tree.
    /// Anything else passes through [`LinkTree::normalize`], which repairs
    /// partial corruption without surfacing an error.
    #[instrument(skip(self))]
    pub async fn load(&self) -> StoreResult<LinkTree> {
        if let Some(raw) = self.db.kv_get(LINKS_KEY).await? {
            match serde_json::from_str::<Value>(&raw) {
                Ok(parsed) if parsed.get("categories").is_some_and(Value::is_array) => {
                    let tree = LinkTree::normalize(&parsed);
                    debug!(
                        categories = tree.categories.len(),
                        links = tree.link_count(),
                        "link tree loaded"
                    );
                    return Ok(tree);
                }
                Ok(_) => warn!("stored link tree has no categories array, reseeding"),
                Err(e) => warn!(error = %e, "stored link tree is not valid JSON, reseeding"),
            }
        }

        let seed = LinkTree::seed();
        self.persist(&seed).await?;
        info!("seeded default link tree");
        Ok(seed)
    }

    /// Write the tree back to storage.
    ///
    /// Last writer wins: there is no revision check against concurrent
    /// mutations of the same key.
    #[instrument(skip(self, tree))]
    pub async fn persist(&self, tree: &LinkTree) -> StoreResult<()> {
        let serialized = serde_json::to_string_pretty(tree)?;
        self.db.kv_put(LINKS_KEY, &serialized).await?;
        debug!(
            categories = tree.categories.len(),
            links = tree.link_count(),
            "link tree persisted"
        );
        Ok(())
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DEFAULT_CATEGORY_NAME;

    async fn setup_store() -> LinkStore {
        let db = Database::open_in_memory().unwrap();
        db.run_migrations().await.unwrap();
        LinkStore::new(db)
    }

    #[tokio::test]
    async fn load_seeds_default_tree_on_first_use() {
        let store = setup_store().await;
        let tree = store.load().await.unwrap();

        assert_eq!(tree.categories.len(), 1);
        assert_eq!(tree.categories[0].name, DEFAULT_CATEGORY_NAME);
        assert!(tree.categories[0].links.is_empty());

        // The seed was persisted, and a second load returns the same tree.
        let again = store.load().await.unwrap();
        assert_eq!(again, tree);
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let store = setup_store().await;
        let mut tree = store.load().await.unwrap();
        let category_id = tree.categories[0].id.clone();
        tree.create_link(&category_id, "", "Example", "https://example.com", "")
            .unwrap();
        store.persist(&tree).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.link_count(), 1);
        assert_eq!(loaded.categories[0].links[0].title, "Example");
    }

    #[tokio::test]
    async fn load_reseeds_on_corrupt_json() {
        let store = setup_store().await;
        store.db.kv_put(LINKS_KEY, "{not json").await.unwrap();

        let tree = store.load().await.unwrap();
        assert_eq!(tree.categories.len(), 1);
        assert_eq!(tree.categories[0].name, DEFAULT_CATEGORY_NAME);
    }

    #[tokio::test]
    async fn load_reseeds_when_categories_is_not_an_array() {
        let store = setup_store().await;
        store
            .db
            .kv_put(LINKS_KEY, r#"{"categories": "oops"}"#)
            .await
            .unwrap();

        let tree = store.load().await.unwrap();
        assert_eq!(tree.categories.len(), 1);
    }

    #[tokio::test]
    async fn load_normalizes_partially_corrupt_data() {
        let store = setup_store().await;
        store
            .db
            .kv_put(
                LINKS_KEY,
                r#"{"categories": [
                    {"id": "c1", "name": "Ok", "links": [
                        {"id": "l1", "title": "Good", "url": "https://good.example.com"},
                        {"id": "l2", "title": "Bad", "url": "not a url"}
                    ]},
                    {"name": "  ", "links": []}
                ]}"#,
            )
            .await
            .unwrap();

        let tree = store.load().await.unwrap();
        assert_eq!(tree.categories.len(), 1);
        assert_eq!(tree.categories[0].links.len(), 1);
        assert_eq!(tree.categories[0].links[0].id, "l1");
    }
}
