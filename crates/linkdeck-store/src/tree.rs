//! The link hierarchy: categories, links, and the mutations applied to them.
//!
//! A [`LinkTree`] is the authoritative in-memory representation of the
//! dashboard. Invariants upheld by every mutation:
//!
//! 1. Every link id is unique across the whole tree.
//! 2. Every category id is unique.
//! 3. At least one category always exists — a default is seeded instead of
//!    ever producing an empty tree.
//! 4. A link belongs to exactly one category's sequence.
//!
//! Persisted data may be partially corrupt; [`LinkTree::normalize`] is the
//! defensive repair pass that restores the invariants without surfacing an
//! error to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Name given to the category seeded into an otherwise empty tree.
pub const DEFAULT_CATEGORY_NAME: &str = "Getting started";

// ═══════════════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════════════

/// A single bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Unique identifier, stable across reorders and moves.
    pub id: String,
    /// Display title, non-empty after trimming.
    pub title: String,
    /// Destination, always an `http`/`https` URL.
    pub url: String,
    /// Icon URL; backfilled with a favicon service URL when blank.
    pub icon: String,
}

/// An ordered group of links. Sequence position is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier, stable across renames and reorders.
    pub id: String,
    /// Display name, non-empty after trimming.
    pub name: String,
    /// Links in display order.
    pub links: Vec<Link>,
}

/// The whole persisted hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTree {
    /// Categories in display order.
    pub categories: Vec<Category>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Helpers
// ═══════════════════════════════════════════════════════════════════════

/// Generate a fresh unique id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Whether `s` parses as an absolute `http` or `https` URL.
pub fn is_valid_http_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(u) => matches!(u.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Build a favicon URL for a link, keyed on the link's origin when the
/// url parses and on the raw string otherwise.
pub fn favicon_from_url(raw: &str) -> String {
    let origin = Url::parse(raw)
        .map(|u| u.origin().ascii_serialization())
        .unwrap_or_else(|_| raw.to_string());
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("sz", "128")
        .append_pair("domain_url", &origin)
        .finish();
    format!("https://www.google.com/s2/favicons?{query}")
}

fn default_category() -> Category {
    Category {
        id: generate_id(),
        name: DEFAULT_CATEGORY_NAME.to_string(),
        links: Vec::new(),
    }
}

/// Coerce a JSON value's `id` field into a non-empty string, generating a
/// fresh id when absent or empty.
fn coerce_id(value: &Value) -> String {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if id.is_empty() { generate_id() } else { id }
}

fn str_field(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

// ═══════════════════════════════════════════════════════════════════════
//  LinkTree
// ═══════════════════════════════════════════════════════════════════════

impl LinkTree {
    /// A tree containing one empty default category — the seed used when
    /// nothing is persisted yet.
    pub fn seed() -> Self {
        Self {
            categories: vec![default_category()],
        }
    }

    /// Defensive repair pass over raw persisted data.
    ///
    /// Coerces and generates missing ids, trims names and titles, drops
    /// categories with empty names, drops links with empty titles or
    /// non-http(s) urls, backfills missing icons, and falls back to a
    /// single default category when nothing survives. Tolerates any input
    /// shape without error.
    pub fn normalize(raw: &Value) -> Self {
        let raw_categories = raw
            .get("categories")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut categories = Vec::with_capacity(raw_categories.len());
        for raw_cat in raw_categories {
            let name = str_field(raw_cat, "name");
            if name.is_empty() {
                continue;
            }

            let raw_links = raw_cat
                .get("links")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let mut links = Vec::with_capacity(raw_links.len());
            for raw_link in raw_links {
                let title = str_field(raw_link, "title");
                let url = str_field(raw_link, "url");
                if title.is_empty() || !is_valid_http_url(&url) {
                    continue;
                }
                let icon = str_field(raw_link, "icon");
                links.push(Link {
                    id: coerce_id(raw_link),
                    icon: if icon.is_empty() {
                        favicon_from_url(&url)
                    } else {
                        icon
                    },
                    title,
                    url,
                });
            }

            categories.push(Category {
                id: coerce_id(raw_cat),
                name,
                links,
            });
        }

        if categories.is_empty() {
            categories.push(default_category());
        }

        Self { categories }
    }

    /// Total number of links across all categories.
    pub fn link_count(&self) -> usize {
        self.categories.iter().map(|c| c.links.len()).sum()
    }

    /// Find the index of the category currently owning `link_id`.
    fn owner_index(&self, link_id: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|c| c.links.iter().any(|l| l.id == link_id))
    }

    // ── mutations ────────────────────────────────────────────────────

    /// Append a new link.
    ///
    /// Target resolution, in priority order: a non-empty `category_name`
    /// finds or creates a category by that exact name (case-sensitive);
    /// otherwise a non-empty `category_id` targets that category; otherwise
    /// the first category. The new link always lands at the sequence end.
    pub fn create_link(
        &mut self,
        category_id: &str,
        category_name: &str,
        title: &str,
        url: &str,
        icon: &str,
    ) -> StoreResult<()> {
        let title = title.trim();
        let url = url.trim();
        let icon = icon.trim();

        if title.is_empty() || url.is_empty() {
            return Err(StoreError::Validation("title and url are required".into()));
        }
        if !is_valid_http_url(url) {
            return Err(StoreError::Validation(format!("invalid url: {url}")));
        }

        if self.categories.is_empty() {
            self.categories.push(Category {
                id: generate_id(),
                name: DEFAULT_CATEGORY_NAME.to_string(),
                links: Vec::new(),
            });
        }

        let index = if !category_name.is_empty() {
            match self.categories.iter().position(|c| c.name == category_name) {
                Some(i) => i,
                None => {
                    self.categories.push(Category {
                        id: generate_id(),
                        name: category_name.to_string(),
                        links: Vec::new(),
                    });
                    self.categories.len() - 1
                }
            }
        } else {
            self.categories
                .iter()
                .position(|c| c.id == category_id)
                .unwrap_or(0)
        };

        self.categories[index].links.push(Link {
            id: generate_id(),
            title: title.to_string(),
            url: url.to_string(),
            icon: if icon.is_empty() {
                favicon_from_url(url)
            } else {
                icon.to_string()
            },
        });
        Ok(())
    }

    /// Update a link's fields in place, optionally moving it to another
    /// category.
    ///
    /// A move is always an append at the destination's end; display
    /// position is fixed up separately through reconciliation. A
    /// `move_to_category_id` naming the current or an unknown category is
    /// a no-op move.
    pub fn update_link(
        &mut self,
        link_id: &str,
        title: &str,
        url: &str,
        icon: &str,
        move_to_category_id: &str,
    ) -> StoreResult<()> {
        let title = title.trim();
        let url = url.trim();
        let icon = icon.trim();

        if title.is_empty() || url.is_empty() {
            return Err(StoreError::Validation("title and url are required".into()));
        }
        if !is_valid_http_url(url) {
            return Err(StoreError::Validation(format!("invalid url: {url}")));
        }

        let owner = self.owner_index(link_id).ok_or_else(|| StoreError::NotFound {
            entity: "link",
            id: link_id.to_string(),
        })?;

        {
            let link = self.categories[owner]
                .links
                .iter_mut()
                .find(|l| l.id == link_id)
                .ok_or_else(|| StoreError::NotFound {
                    entity: "link",
                    id: link_id.to_string(),
                })?;
            link.title = title.to_string();
            link.url = url.to_string();
            link.icon = if icon.is_empty() {
                favicon_from_url(url)
            } else {
                icon.to_string()
            };
        }

        if !move_to_category_id.is_empty() && self.categories[owner].id != move_to_category_id {
            if let Some(target) = self
                .categories
                .iter()
                .position(|c| c.id == move_to_category_id)
            {
                let pos = self.categories[owner]
                    .links
                    .iter()
                    .position(|l| l.id == link_id)
                    .ok_or_else(|| StoreError::NotFound {
                        entity: "link",
                        id: link_id.to_string(),
                    })?;
                let link = self.categories[owner].links.remove(pos);
                self.categories[target].links.push(link);
            }
        }

        Ok(())
    }

    /// Remove a link from whichever category contains it.
    pub fn delete_link(&mut self, link_id: &str) -> StoreResult<()> {
        let owner = self.owner_index(link_id).ok_or_else(|| StoreError::NotFound {
            entity: "link",
            id: link_id.to_string(),
        })?;
        self.categories[owner].links.retain(|l| l.id != link_id);
        Ok(())
    }

    /// Rename a category. The new name is trimmed and must be non-empty.
    pub fn rename_category(&mut self, category_id: &str, new_name: &str) -> StoreResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StoreError::Validation("name must not be empty".into()));
        }

        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "category",
                id: category_id.to_string(),
            })?;
        category.name = new_name.to_string();
        Ok(())
    }
}

// ── tests ────────────────────────────────────────────────────────────
