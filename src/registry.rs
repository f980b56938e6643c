//! Component Metadata Registry
//!
//! In-memory index over a collection of component descriptors, supporting
//! registration, removal, and multi-dimensional lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::{ComponentCategory, ComponentDescriptor, ComponentStatus};

/// The component metadata registry
///
/// Owns the descriptor collection plus two derived indexes (category → ids,
/// tag → ids). Indexes are never authoritative: they are rebuilt on every
/// mutation and any id they carry without a backing descriptor is dropped at
/// read time.
///
/// Single-writer, synchronous semantics: the registry does not lock. A
/// multi-threaded host must serialize mutations at the call site.
pub struct ComponentRegistry {
    /// Descriptors keyed by id
    components: HashMap<String, ComponentDescriptor>,
    /// Category index: category → descriptor ids, in registration order
    categories: HashMap<ComponentCategory, Vec<String>>,
    /// Tag index: tag → descriptor ids, in registration order
    tags: HashMap<String, Vec<String>>,
}

/// Aggregate statistics over a registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Total descriptor count
    pub total: usize,
    /// Distinct categories with an index entry
    pub total_categories: usize,
    /// Distinct tags with an index entry
    pub total_tags: usize,
    /// Descriptor count per category (index entry lengths)
    pub by_category: HashMap<ComponentCategory, usize>,
    /// Descriptor count per status (computed scan)
    pub by_status: HashMap<ComponentStatus, usize>,
}

/// Full snapshot of a registry's observable state
///
/// Holds independent copies of the descriptor collection and both indexes:
/// mutating a snapshot never affects the live registry and vice versa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub components: HashMap<String, ComponentDescriptor>,
    pub categories: HashMap<ComponentCategory, Vec<String>>,
    pub tags: HashMap<String, Vec<String>>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
            categories: HashMap::new(),
            tags: HashMap::new(),
        }
    }

    /// Insert or overwrite a descriptor by id.
    ///
    /// Overwrite is two-phase: an existing descriptor with the same id is
    /// unregistered first so its old category/tag index entries cannot go
    /// stale when the replacement carries a different category or tag set.
    pub fn register(&mut self, descriptor: ComponentDescriptor) {
        if self.components.contains_key(&descriptor.id) {
            self.unregister(&descriptor.id);
        }

        let id = descriptor.id.clone();

        let entry = self.categories.entry(descriptor.category).or_default();
        if !entry.contains(&id) {
            entry.push(id.clone());
        }

        for tag in &descriptor.tags {
            let entry = self.tags.entry(tag.clone()).or_default();
            if !entry.contains(&id) {
                entry.push(id.clone());
            }
        }

        self.components.insert(id, descriptor);
    }

    /// Register every descriptor in the collection (the startup bulk path)
    pub fn register_all<I>(&mut self, descriptors: I)
    where
        I: IntoIterator<Item = ComponentDescriptor>,
    {
        let before = self.components.len();
        for descriptor in descriptors {
            self.register(descriptor);
        }
        debug!(
            registered = self.components.len() - before,
            total = self.components.len(),
            "registered component descriptors"
        );
    }

    /// Remove a descriptor and strip its id from every index entry.
    ///
    /// No-op when the id is unknown.
    pub fn unregister(&mut self, id: &str) {
        let Some(descriptor) = self.components.remove(id) else {
            return;
        };

        if let Some(ids) = self.categories.get_mut(&descriptor.category) {
            ids.retain(|existing| existing != id);
        }

        for tag in &descriptor.tags {
            if let Some(ids) = self.tags.get_mut(tag) {
                ids.retain(|existing| existing != id);
            }
        }
    }

    /// Look up a descriptor by id
    pub fn get(&self, id: &str) -> Option<&ComponentDescriptor> {
        self.components.get(id)
    }

    /// All registered descriptors
    pub fn all(&self) -> Vec<&ComponentDescriptor> {
        self.components.values().collect()
    }

    /// Categories that have an index entry
    pub fn categories(&self) -> Vec<ComponentCategory> {
        self.categories.keys().copied().collect()
    }

    /// Tags that have an index entry
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.keys().map(String::as_str).collect()
    }

    /// Descriptors in a category, resolved through the index.
    ///
    /// Ids without a backing descriptor are silently dropped — the index is
    /// derived and may drift; the collection is the source of truth.
    pub fn by_category(&self, category: ComponentCategory) -> Vec<&ComponentDescriptor> {
        self.categories
            .get(&category)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.components.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Descriptors carrying a tag, resolved through the index
    pub fn by_tag(&self, tag: &str) -> Vec<&ComponentDescriptor> {
        self.tags
            .get(tag)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.components.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Descriptors with a given status.
    ///
    /// Linear scan; status cardinality is small and this path is not hot.
    pub fn by_status(&self, status: ComponentStatus) -> Vec<&ComponentDescriptor> {
        self.components
            .values()
            .filter(|descriptor| descriptor.status == status)
            .collect()
    }

    /// Case-insensitive substring search over name, description, and tags.
    ///
    /// An empty query matches every descriptor.
    pub fn search(&self, query: &str) -> Vec<&ComponentDescriptor> {
        let query = query.to_lowercase();
        self.components
            .values()
            .filter(|descriptor| {
                descriptor.name.to_lowercase().contains(&query)
                    || descriptor.description.to_lowercase().contains(&query)
                    || descriptor
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Descriptors related to the given id.
    ///
    /// Dangling related ids are dropped; an unknown id yields an empty list.
    pub fn related(&self, id: &str) -> Vec<&ComponentDescriptor> {
        self.components
            .get(id)
            .map(|descriptor| {
                descriptor
                    .related
                    .iter()
                    .filter_map(|related_id| self.components.get(related_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Aggregate statistics
    pub fn stats(&self) -> RegistryStats {
        let by_category = self
            .categories
            .iter()
            .map(|(category, ids)| (*category, ids.len()))
            .collect();

        let mut by_status: HashMap<ComponentStatus, usize> = HashMap::new();
        for descriptor in self.components.values() {
            *by_status.entry(descriptor.status).or_insert(0) += 1;
        }

        RegistryStats {
            total: self.components.len(),
            total_categories: self.categories.len(),
            total_tags: self.tags.len(),
            by_category,
            by_status,
        }
    }

    /// Export the full observable state as independent copies
    pub fn export(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            components: self.components.clone(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Replace the full observable state with a snapshot.
    ///
    /// All three maps are swapped in together; no partial import state is
    /// ever visible.
    pub fn import(&mut self, snapshot: RegistrySnapshot) {
        self.components = snapshot.components;
        self.categories = snapshot.categories;
        self.tags = snapshot.tags;
    }

    /// Empty the collection and both indexes
    pub fn clear(&mut self) {
        self.components.clear();
        self.categories.clear();
        self.tags.clear();
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when no descriptors are registered
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
