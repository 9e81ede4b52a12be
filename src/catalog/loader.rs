//! Catalog file loading.
//!
//! The on-disk format is a JSON document with a flat `entries` array; each
//! entry is tagged by `kind`:
//!
//! ```json
//! { "entries": [
//!   { "kind": "command", "name": "Give", "syntax": "give [<item>|...]",
//!     "short": "Gives the player an item.", "group": "item" }
//! ] }
//! ```

use super::{Catalog, DocEntry, KindDetails};
use crate::error::LoadError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    warnings: Vec<String>,
    #[serde(default)]
    plugin: Option<String>,
    #[serde(default)]
    source_file: Option<String>,
    #[serde(flatten)]
    details: RawDetails,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RawDetails {
    Command {
        #[serde(default)]
        syntax: String,
        #[serde(default)]
        short: String,
        #[serde(default)]
        required: Option<String>,
    },
    Mechanism {
        #[serde(default)]
        object: String,
        #[serde(default)]
        input: String,
        #[serde(default)]
        tags: Vec<String>,
    },
    Tag {
        #[serde(default)]
        returns: String,
        #[serde(default)]
        mechanism: Option<String>,
    },
    Event {
        #[serde(default)]
        events: Vec<String>,
        #[serde(default)]
        triggers: String,
    },
    Action {
        #[serde(default)]
        actions: Vec<String>,
    },
    Language,
}

impl From<RawDetails> for KindDetails {
    fn from(raw: RawDetails) -> Self {
        match raw {
            RawDetails::Command {
                syntax,
                short,
                required,
            } => Self::Command {
                syntax,
                short_description: short,
                required_args: required,
            },
            RawDetails::Mechanism {
                object,
                input,
                tags,
            } => Self::Mechanism {
                object,
                input,
                tags,
            },
            RawDetails::Tag { returns, mechanism } => Self::Tag { returns, mechanism },
            RawDetails::Event { events, triggers } => Self::Event { events, triggers },
            RawDetails::Action { actions } => Self::Action { actions },
            RawDetails::Language => Self::Language,
        }
    }
}

impl From<RawEntry> for DocEntry {
    fn from(raw: RawEntry) -> Self {
        let mut entry = Self::new(raw.name, raw.details.into()).with_description(raw.description);
        if let Some(group) = raw.group {
            entry = entry.with_group(group);
        }
        if let Some(plugin) = raw.plugin {
            entry = entry.with_plugin(plugin);
        }
        if let Some(source_file) = raw.source_file {
            entry = entry.with_source_file(source_file);
        }
        for warning in raw.warnings {
            entry = entry.with_warning(warning);
        }
        entry
    }
}

/// Parse catalog JSON already held in memory.
///
/// `origin` is only used for error messages.
pub fn parse_catalog(content: &str, origin: &Path) -> Result<Catalog, LoadError> {
    let file: CatalogFile = serde_json::from_str(content).map_err(|source| LoadError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    let mut builder = Catalog::builder();
    for raw in file.entries {
        builder.insert(raw.into())?;
    }
    Ok(builder.build())
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&content, path)?;
    tracing::info!(
        "Loaded {} documentation entries from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Kind;
    use assert2::check;

    const SAMPLE: &str = r#"{
        "entries": [
            { "kind": "command", "name": "Give", "syntax": "give [<item>|...]",
              "short": "Gives the player an item.", "group": "item",
              "warnings": ["Cannot give to offline players."] },
            { "kind": "mechanism", "name": "PlayerTag.health", "object": "PlayerTag",
              "input": "ElementTag(Decimal)", "tags": ["<PlayerTag.health>"] },
            { "kind": "language", "name": "Script Container",
              "description": "Scripts live in <@link language script>." }
        ]
    }"#;

    #[test]
    fn parses_tagged_entries() {
        let catalog = parse_catalog(SAMPLE, Path::new("sample.json")).unwrap();
        check!(catalog.len() == 3);

        let give = catalog.partition(Kind::Command).get("give").unwrap();
        check!(give.group.as_deref() == Some("item"));
        check!(give.warnings == ["Cannot give to offline players."]);
        check!(matches!(
            &give.details,
            KindDetails::Command { short_description, .. }
                if short_description == "Gives the player an item."
        ));

        let mech = catalog.partition(Kind::Mechanism).get("playertag.health");
        check!(mech.is_some());
        check!(catalog.partition(Kind::Language).get("script container").is_some());
    }

    #[test]
    fn duplicate_entries_fail_the_load() {
        let json = r#"{ "entries": [
            { "kind": "tag", "name": "<PlayerTag.name>" },
            { "kind": "tag", "name": "<playertag.NAME>" }
        ] }"#;
        let err = parse_catalog(json, Path::new("dup.json")).unwrap_err();
        check!(matches!(err, LoadError::DuplicateEntry { kind: Kind::Tag, .. }));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = parse_catalog("{ not json", Path::new("bad.json")).unwrap_err();
        check!(matches!(err, LoadError::Parse { .. }));
        check!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_catalog(Path::new("/definitely/not/here.json")).unwrap_err();
        check!(matches!(err, LoadError::Io { .. }));
    }
}
