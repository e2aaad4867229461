use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ErrorKind, Result};

use super::manifest_path;

/// The flat string-valued maps of a manifest that the tool knows how to edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Dependencies,
    DevDependencies,
    Scripts,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Dependencies => "dependencies",
            Collection::DevDependencies => "devDependencies",
            Collection::Scripts => "scripts",
        }
    }
}

/// A `package.json` document.
///
/// Backed by the raw JSON object so that fields the tool never touches keep
/// both their value and their position across a load/save cycle.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    /// The collection as an object, `None` when absent or not an object.
    pub fn collection(&self, collection: Collection) -> Option<&Map<String, Value>> {
        self.fields.get(collection.key()).and_then(Value::as_object)
    }

    /// Raw value stored under `key` in `collection`, if any.
    pub fn field(&self, collection: Collection, key: &str) -> Option<&Value> {
        self.collection(collection).and_then(|c| c.get(key))
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.field(Collection::Scripts, name).and_then(Value::as_str)
    }

    /// Returns a copy with `collection[key] = value`. A collection that is
    /// missing or not an object is replaced by a fresh one.
    pub fn with_field(mut self, collection: Collection, key: &str, value: &str) -> Self {
        let entry = self.fields
            .entry(collection.key())
            .or_insert_with(|| Value::Object(Map::new()));

        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }

        if let Value::Object(map) = entry {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }

        self
    }
}

/// True when `package` is a key of `dependencies` or `devDependencies`.
pub fn has_package(manifest: &Manifest, package: &str) -> bool {
    [Collection::Dependencies, Collection::DevDependencies].into_iter()
        .any(|c| manifest.collection(c).is_some_and(|deps| deps.contains_key(package)))
}

pub async fn load(root: &Path) -> Result<Manifest> {
    let path = manifest_path(root);

    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(v) => v,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ErrorKind::NotFound(path)),
        Err(e) => return Err(ErrorKind::io(&path)(e)),
    };

    serde_json::from_str(&contents).map_err(|source| ErrorKind::Parse { path, source })
}

pub async fn save(root: &Path, manifest: &Manifest) -> Result<()> {
    let path = manifest_path(root);

    let mut contents = serde_json::to_string_pretty(manifest)?;
    contents.push('\n');

    tokio::fs::write(&path, contents).await.map_err(ErrorKind::io(&path))
}
