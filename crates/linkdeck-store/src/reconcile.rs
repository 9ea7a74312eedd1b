//! Reconciliation of client-submitted orderings against the authoritative
//! tree.
//!
//! The UI only ever submits ids in a new order, scoped to the categories it
//! knows about. Its view may be stale: categories it names may be gone,
//! link ids may no longer exist, and it cannot be trusted to enumerate
//! every link. [`reconcile`] merges such a patch without ever losing,
//! duplicating, or orphaning an entry.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::tree::{Category, Link, LinkTree};

// ═══════════════════════════════════════════════════════════════════════
//  Patch types
// ═══════════════════════════════════════════════════════════════════════

/// A reference to a link inside a patch. The wire format accepts either
/// `{"id": "..."}` objects or bare id strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LinkRef {
    Entry { id: String },
    Id(String),
}

impl LinkRef {
    fn id(&self) -> &str {
        match self {
            Self::Entry { id } => id,
            Self::Id(id) => id,
        }
    }
}

/// A client-proposed ordering for one category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPatch {
    /// Id of the authoritative category this entry refers to.
    pub id: String,
    /// Proposed link sequence, possibly partial or stale.
    #[serde(default)]
    pub links: Vec<LinkRef>,
}

/// A client-proposed ordering for the whole tree.
#[derive(Debug, Clone, Deserialize)]
pub struct TreePatch {
    /// Category entries in proposed display order.
    pub categories: Vec<CategoryPatch>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Reconcile
// ═══════════════════════════════════════════════════════════════════════

/// Merge a client-submitted ordering into the authoritative tree.
///
/// The sweep keeps an owned pool of every authoritative link, removing each
/// link from the pool the moment it is placed so nothing can be placed
/// twice:
///
/// 1. Patch categories are processed in patch order. Entries whose id does
///    not match an authoritative category are skipped — stale categories
///    are ignored, never created. A category id repeated in the patch is
///    only processed once.
/// 2. Authoritative categories the patch never mentioned are appended after
///    the patch-derived ones, carrying whichever of their links are still
///    unplaced — categories are never dropped.
/// 3. Any links still unplaced (ids the stale client never mentioned) are
///    appended to the new sequence of their original owning category when
///    it is present in the result, else to the first resulting category.
///
/// Postconditions: same multiset of link ids as the input, same set of
/// category ids, no duplicates, no invented entries.
pub fn reconcile(stored: &LinkTree, patch: &TreePatch) -> LinkTree {
    // Pool of unplaced links, plus each link's original owning category.
    let mut pool: HashMap<String, Link> = HashMap::new();
    let mut original_owner: HashMap<String, String> = HashMap::new();
    for category in &stored.categories {
        for link in &category.links {
            pool.insert(link.id.clone(), link.clone());
            original_owner.insert(link.id.clone(), category.id.clone());
        }
    }

    let mut next: Vec<Category> = Vec::with_capacity(stored.categories.len());

    // Patch-derived categories, in patch order.
    for entry in &patch.categories {
        let Some(stored_cat) = stored.categories.iter().find(|c| c.id == entry.id) else {
            debug!(category_id = %entry.id, "patch names unknown category, skipping");
            continue;
        };
        if next.iter().any(|c| c.id == entry.id) {
            continue;
        }

        let mut links = Vec::with_capacity(entry.links.len());
        for link_ref in &entry.links {
            if let Some(link) = pool.remove(link_ref.id()) {
                links.push(link);
            }
        }
        next.push(Category {
            id: stored_cat.id.clone(),
            name: stored_cat.name.clone(),
            links,
        });
    }

    // Categories the patch never mentioned keep their surviving links and
    // their relative order.
    for category in &stored.categories {
        if next.iter().any(|c| c.id == category.id) {
            continue;
        }
        let links = category
            .links
            .iter()
            .filter_map(|l| pool.remove(&l.id))
            .collect();
        next.push(Category {
            id: category.id.clone(),
            name: category.name.clone(),
            links,
        });
    }

    // Reinsert whatever the patch omitted, in authoritative order, next to
    // its original owner.
    if !pool.is_empty() {
        for category in &stored.categories {
            for link in &category.links {
                let Some(link) = pool.remove(&link.id) else {
                    continue;
                };
                let owner = original_owner
                    .get(&link.id)
                    .and_then(|cid| next.iter().position(|c| &c.id == cid))
                    .unwrap_or(0);
                next[owner].links.push(link);
            }
        }
    }

    LinkTree { categories: next }
}

// ── tests ────────────────────────────────────────────────────────────
