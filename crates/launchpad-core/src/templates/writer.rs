//! Config artifact writes with a fill-if-absent policy
//!
//! Hand-authored files are created only when missing. JSON manifests are
//! patched key by key: a key is set only when it is missing or falsy
//! (`null`, `false`, `0`, `""`), so values the user already chose survive.

use crate::error::{Result, SetupError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What happened to one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactAction {
    Created,
    Patched,
    Unchanged,
    /// Left alone; the reason is shown to the user
    Skipped(String),
}

/// Every artifact touched (or deliberately not touched) during setup
#[derive(Debug, Clone, Default)]
pub struct ConfigReport {
    entries: Vec<(PathBuf, ArtifactAction)>,
}

impl ConfigReport {
    fn record(&mut self, path: &Path, action: ArtifactAction) {
        self.entries.push((path.to_path_buf(), action));
    }

    pub fn action(&self, path: impl AsRef<Path>) -> Option<&ArtifactAction> {
        self.entries
            .iter()
            .rev()
            .find(|(p, _)| p == path.as_ref())
            .map(|(_, a)| a)
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.entries.iter().filter_map(|(p, a)| match a {
            ArtifactAction::Skipped(reason) => Some((p.as_path(), reason.as_str())),
            _ => None,
        })
    }

    pub fn written(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, a)| matches!(a, ArtifactAction::Created | ArtifactAction::Patched))
            .count()
    }
}

/// Whether a JSON value counts as unset
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Set `value` at `path` unless a truthy value is already there
///
/// Missing or falsy intermediate keys become objects. A truthy
/// non-object intermediate stops the walk. Returns whether anything changed.
pub fn fill_if_absent(doc: &mut Value, path: &[&str], value: Value) -> bool {
    let Some((last, parents)) = path.split_last() else {
        return false;
    };

    let mut current = doc;
    for key in parents {
        let Some(map) = current.as_object_mut() else {
            return false;
        };
        let slot = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            if !is_falsy(slot) {
                return false;
            }
            *slot = Value::Object(Map::new());
        }
        current = slot;
    }

    let Some(map) = current.as_object_mut() else {
        return false;
    };
    match map.get(*last) {
        Some(existing) if !is_falsy(existing) => false,
        _ => {
            map.insert(last.to_string(), value);
            true
        }
    }
}

/// Creates and patches artifacts under a project root
#[derive(Debug)]
pub struct ConfigWriter {
    root: PathBuf,
    report: ConfigReport,
}

impl ConfigWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            report: ConfigReport::default(),
        }
    }

    pub fn report(&self) -> &ConfigReport {
        &self.report
    }

    pub fn into_report(self) -> ConfigReport {
        self.report
    }

    /// Create a directory (and parents) under the root; no-op if present
    pub fn ensure_dir(&mut self, rel: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = self.root.join(rel);
        fs::create_dir_all(&dir).map_err(|e| SetupError::io(&dir, e))?;
        Ok(dir)
    }

    /// Write a file only if nothing exists at `rel`; returns whether it was written
    pub fn write_if_absent(&mut self, rel: impl AsRef<Path>, contents: &str) -> Result<bool> {
        let rel = rel.as_ref();
        let path = self.root.join(rel);

        if path.exists() {
            debug!(path = %path.display(), "already exists; not overwriting");
            self.report
                .record(rel, ArtifactAction::Skipped("already exists".to_string()));
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SetupError::io(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| SetupError::io(&path, e))?;
        debug!(path = %path.display(), "created");
        self.report.record(rel, ArtifactAction::Created);
        Ok(true)
    }

    /// Fill dotted keys (`scripts.build`) of a JSON file, creating it if missing
    pub fn patch_json(&mut self, rel: impl AsRef<Path>, fields: &[(&str, Value)]) -> Result<()> {
        let rel = rel.as_ref();
        let path = self.root.join(rel);

        let (mut doc, existed) = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| SetupError::io(&path, e))?;
            match serde_json::from_str::<Value>(&content) {
                Ok(doc) if doc.is_object() => (doc, true),
                Ok(_) => {
                    debug!(path = %path.display(), "not a JSON object; leaving it alone");
                    self.report
                        .record(rel, ArtifactAction::Skipped("not a JSON object".to_string()));
                    return Ok(());
                }
                Err(e) => {
                    debug!(path = %path.display(), "unparseable JSON ({}); leaving it alone", e);
                    self.report
                        .record(rel, ArtifactAction::Skipped(format!("could not parse: {}", e)));
                    return Ok(());
                }
            }
        } else {
            (Value::Object(Map::new()), false)
        };

        let mut changed = false;
        for (key, value) in fields {
            let segments: Vec<&str> = key.split('.').collect();
            changed |= fill_if_absent(&mut doc, &segments, value.clone());
        }

        if !changed && existed {
            self.report.record(rel, ArtifactAction::Unchanged);
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SetupError::io(parent, e))?;
        }
        let mut out = serde_json::to_string_pretty(&doc).map_err(|source| SetupError::Json {
            path: path.clone(),
            source,
        })?;
        out.push('\n');
        fs::write(&path, out).map_err(|e| SetupError::io(&path, e))?;

        let action = if existed {
            ArtifactAction::Patched
        } else {
            ArtifactAction::Created
        };
        debug!(path = %path.display(), ?action, "wrote JSON");
        self.report.record(rel, action);
        Ok(())
    }

    /// Fill `package.json` fields; `scripts` entries are prefixed automatically
    pub fn patch_package_json(
        &mut self,
        fields: &[(&str, Value)],
        scripts: &[(&str, &str)],
    ) -> Result<()> {
        let script_keys: Vec<String> = scripts
            .iter()
            .map(|(name, _)| format!("scripts.{}", name))
            .collect();
        let mut all: Vec<(&str, Value)> = fields.to_vec();
        all.extend(
            script_keys
                .iter()
                .zip(scripts)
                .map(|(key, (_, cmd))| (key.as_str(), Value::String(cmd.to_string()))),
        );
        self.patch_json("package.json", &all)
    }
}
