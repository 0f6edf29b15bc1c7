//! Device document loading.

use std::path::Path;

use serde_json::Value;
use serde_yaml::Value as Yaml;

use lifematrix_app::registry::InMemoryRegistry;
use lifematrix_domain::id::{ComponentId, ComponentKind};

use crate::convert::{key_string, to_json};
use crate::error::DocumentError;

/// Key of the component block in a device document.
pub const DEFAULT_COMPONENT_KEY: &str = "life_matrix";

/// What the adapter needs from a device document.
#[derive(Debug, Clone)]
pub struct DeviceDocument {
    /// The raw component configuration mapping.
    pub component: Value,
    /// Every other component declared in the document.
    pub registry: InMemoryRegistry,
}

/// Read and load a device document from disk.
///
/// # Errors
///
/// Returns [`DocumentError::Io`] when the file cannot be read, or any error
/// from [`load_str`].
pub fn load_path(path: &Path, component_key: &str) -> Result<DeviceDocument, DocumentError> {
    tracing::debug!(path = %path.display(), "reading device document");
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&text, component_key)
}

/// Load a device document from YAML text.
///
/// # Errors
///
/// Returns [`DocumentError`] when the text is not YAML, the top level is not
/// a mapping, the component block is missing, or sibling ids are invalid or
/// declared twice.
pub fn load_str(text: &str, component_key: &str) -> Result<DeviceDocument, DocumentError> {
    let mut yaml: Yaml = serde_yaml::from_str(text)?;
    yaml.apply_merge()?;

    let Yaml::Mapping(top) = &yaml else {
        return Err(DocumentError::NotAMapping(kind_name(&yaml)));
    };

    let mut component = None;
    let mut registry = InMemoryRegistry::new();
    for (key, block) in top {
        let block_name = key_string(key);
        if block_name == component_key {
            component = Some(to_json(block));
            continue;
        }
        let kind = ComponentKind::from_platform(&block_name);
        for id in declared_ids(&block_name, block)? {
            registry.declare(id, kind.clone())?;
        }
    }

    let component =
        component.ok_or_else(|| DocumentError::MissingComponent(component_key.to_string()))?;
    tracing::info!(siblings = registry.len(), "loaded device document");
    Ok(DeviceDocument {
        component,
        registry,
    })
}

/// Ids declared by a top-level block: a list of entries or a single entry,
/// each optionally carrying an `id`.
fn declared_ids(block_name: &str, block: &Yaml) -> Result<Vec<ComponentId>, DocumentError> {
    let entries: Vec<&Yaml> = match block {
        Yaml::Sequence(items) => items.iter().collect(),
        Yaml::Mapping(_) => vec![block],
        _ => Vec::new(),
    };

    let mut ids = Vec::new();
    for entry in entries {
        let Some(raw) = entry.get("id") else {
            continue;
        };
        let invalid = |reason: String| DocumentError::InvalidSibling {
            block: block_name.to_string(),
            reason,
        };
        let Yaml::String(text) = raw else {
            return Err(invalid(format!("id must be a string, got {}", kind_name(raw))));
        };
        let id = text
            .parse::<ComponentId>()
            .map_err(|err| invalid(err.to_string()))?;
        ids.push(id);
    }
    Ok(ids)
}

fn kind_name(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a list",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}
