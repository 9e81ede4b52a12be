//! The in-memory documentation catalog.
//!
//! A [`Catalog`] is built once (see [`loader`]) and never mutated afterwards.
//! Entries are partitioned by [`Kind`]; each partition keeps insertion order so
//! that "first encountered" tie-breaks are deterministic.

pub mod loader;
pub mod state;

use crate::error::LoadError;
use ahash::AHashMap;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level category of documentation entry.
///
/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Command,
    Mechanism,
    Tag,
    Event,
    Action,
    Language,
}

impl Kind {
    /// Every kind, in catalog iteration order.
    pub const ALL: [Self; 6] = [
        Self::Command,
        Self::Mechanism,
        Self::Tag,
        Self::Event,
        Self::Action,
        Self::Language,
    ];

    /// Display name, e.g. `Command`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Command => "Command",
            Self::Mechanism => "Mechanism",
            Self::Tag => "Tag",
            Self::Event => "Event",
            Self::Action => "Action",
            Self::Language => "Language",
        }
    }

    /// Lowercase name, used in usage hints like `!command all`.
    pub const fn lower_name(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Mechanism => "mechanism",
            Self::Tag => "tag",
            Self::Event => "event",
            Self::Action => "action",
            Self::Language => "language",
        }
    }

    /// Path segment of this kind's index page on the documentation site.
    pub const fn web_path(self) -> &'static str {
        match self {
            Self::Command => "Commands",
            Self::Mechanism => "Mechanisms",
            Self::Tag => "Tags",
            Self::Event => "Events",
            Self::Action => "Actions",
            Self::Language => "Languages",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific payload carried by a [`DocEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindDetails {
    Command {
        syntax: String,
        short_description: String,
        required_args: Option<String>,
    },
    Mechanism {
        object: String,
        input: String,
        tags: Vec<String>,
    },
    Tag {
        returns: String,
        mechanism: Option<String>,
    },
    Event {
        events: Vec<String>,
        triggers: String,
    },
    Action {
        actions: Vec<String>,
    },
    Language,
}

impl KindDetails {
    /// The kind this payload belongs to.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Command { .. } => Kind::Command,
            Self::Mechanism { .. } => Kind::Mechanism,
            Self::Tag { .. } => Kind::Tag,
            Self::Event { .. } => Kind::Event,
            Self::Action { .. } => Kind::Action,
            Self::Language => Kind::Language,
        }
    }

    fn searchable_parts(&self) -> Vec<&str> {
        match self {
            Self::Command {
                syntax,
                short_description,
                ..
            } => vec![syntax.as_str(), short_description.as_str()],
            Self::Mechanism { object, input, tags } => {
                let mut parts = vec![object.as_str(), input.as_str()];
                parts.extend(tags.iter().map(String::as_str));
                parts
            }
            Self::Tag { returns, mechanism } => {
                let mut parts = vec![returns.as_str()];
                parts.extend(mechanism.as_deref());
                parts
            }
            Self::Event { events, triggers } => {
                let mut parts: Vec<&str> = events.iter().map(String::as_str).collect();
                parts.push(triggers.as_str());
                parts
            }
            Self::Action { actions } => actions.iter().map(String::as_str).collect(),
            Self::Language => Vec::new(),
        }
    }
}

/// One documentation object. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    name: String,
    clean_name: String,
    searchable: String,
    /// Main body text (may contain `<@link ...>` markers).
    pub description: String,
    /// Categorization group, if any.
    pub group: Option<String>,
    /// Free-text caveats, in declaration order.
    pub warnings: Vec<String>,
    /// Required plugin(s), if any.
    pub plugin: Option<String>,
    /// Source file that declared this object.
    pub source_file: Option<String>,
    /// Kind discriminant plus kind-specific fields.
    pub details: KindDetails,
}

impl DocEntry {
    /// Create an entry. The normalized name is the lowercased display name.
    pub fn new(name: impl Into<String>, details: KindDetails) -> Self {
        let name = name.into();
        let clean_name = name.to_lowercase();
        let mut entry = Self {
            name,
            clean_name,
            searchable: String::new(),
            description: String::new(),
            group: None,
            warnings: Vec::new(),
            plugin: None,
            source_file: None,
            details,
        };
        entry.refresh_searchable();
        entry
    }

    /// Set the description body.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self.refresh_searchable();
        self
    }

    /// Set the categorization group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self.refresh_searchable();
        self
    }

    /// Append a warning.
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Set the required plugin label.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    /// Set the declaring source file.
    #[must_use]
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    pub const fn kind(&self) -> Kind {
        self.details.kind()
    }

    /// Display name, may have capitals.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase name; the catalog key within this entry's kind.
    pub fn clean_name(&self) -> &str {
        &self.clean_name
    }

    /// Lowercase concatenated body text used for weak matching.
    pub fn searchable(&self) -> &str {
        &self.searchable
    }

    fn refresh_searchable(&mut self) {
        let mut parts = vec![self.clean_name.as_str(), self.description.as_str()];
        parts.extend(self.group.as_deref());
        parts.extend(self.details.searchable_parts());
        self.searchable = parts.join("\n").to_lowercase();
    }
}

/// All entries of one [`Kind`], keyed by normalized name.
#[derive(Debug, Clone)]
pub struct KindPartition {
    kind: Kind,
    entries: Vec<DocEntry>,
    index: AHashMap<String, usize>,
}

impl KindPartition {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: AHashMap::new(),
        }
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Exact lookup by normalized name.
    pub fn get(&self, clean_name: &str) -> Option<&DocEntry> {
        self.index.get(clean_name).map(|&slot| &self.entries[slot])
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &DocEntry> {
        self.entries.iter()
    }

    /// Normalized names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(DocEntry::clean_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The complete read-only documentation set, partitioned by kind.
#[derive(Debug, Clone)]
pub struct Catalog {
    partitions: [KindPartition; 6],
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            partitions: Kind::ALL.map(KindPartition::new),
        }
    }
}

impl Catalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The partition for one kind.
    pub fn partition(&self, kind: Kind) -> &KindPartition {
        &self.partitions[kind.slot()]
    }

    /// Every entry across all kinds, kinds in [`Kind::ALL`] order.
    pub fn all_entries(&self) -> impl Iterator<Item = &DocEntry> {
        self.partitions.iter().flat_map(KindPartition::entries)
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(KindPartition::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Accumulates entries and enforces name uniqueness within each kind.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Add an entry, rejecting blank or duplicate names.
    pub fn insert(&mut self, entry: DocEntry) -> Result<(), LoadError> {
        let kind = entry.kind();
        if entry.clean_name().trim().is_empty() {
            return Err(LoadError::EmptyName { kind });
        }
        let partition = &mut self.catalog.partitions[kind.slot()];
        if partition.index.contains_key(entry.clean_name()) {
            return Err(LoadError::DuplicateEntry {
                kind,
                name: entry.clean_name().to_string(),
            });
        }
        partition
            .index
            .insert(entry.clean_name().to_string(), partition.entries.len());
        partition.entries.push(entry);
        Ok(())
    }

    /// Add an entry, builder style.
    pub fn entry(mut self, entry: DocEntry) -> Result<Self, LoadError> {
        self.insert(entry)?;
        Ok(self)
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}
