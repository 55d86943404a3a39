//! Catalog Serializer - flag specifications on disk
//!
//! The catalog file is one JSON object keyed by flag name. Entries keep
//! their file order through load and write.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::HeartError;
use crate::flag::FlagSpec;
use crate::geometry::read_json;
use crate::hashing;

/// Flags keyed by name. Every key equals the name of the flag it holds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, FlagSpec>")]
pub struct Catalog {
    flags: IndexMap<String, FlagSpec>,
}

impl TryFrom<IndexMap<String, FlagSpec>> for Catalog {
    type Error = HeartError;

    fn try_from(flags: IndexMap<String, FlagSpec>) -> Result<Self, Self::Error> {
        if let Some((key, spec)) = flags.iter().find(|(key, spec)| **key != spec.name) {
            return Err(HeartError::MalformedNode(format!(
                "catalog key {key:?} holds flag {:?}",
                spec.name
            )));
        }
        Ok(Self { flags })
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.flags.serialize(serializer)
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from specifications, rejecting repeated names.
    pub fn from_specs(specs: impl IntoIterator<Item = FlagSpec>) -> Result<Self, HeartError> {
        let mut catalog = Self::new();
        for spec in specs {
            catalog.insert(spec)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, spec: FlagSpec) -> Result<(), HeartError> {
        if self.flags.contains_key(&spec.name) {
            return Err(HeartError::DuplicateFlag(spec.name));
        }
        self.flags.insert(spec.name.clone(), spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FlagSpec> {
        self.flags.get(name)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn specs(&self) -> impl Iterator<Item = &FlagSpec> {
        self.flags.values()
    }

    /// Changes exactly when some flag would be drawn differently.
    pub fn fingerprint(&self) -> String {
        hashing::render_fingerprint(self.specs())
    }

    pub fn load(path: &Path) -> Result<Self, HeartError> {
        let catalog: Self = read_json(path)?;
        info!(path = path.display().to_string(), flags = catalog.len(); "Loaded catalog");
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<(), HeartError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| HeartError::from_io(path, e))?;
        info!(path = path.display().to_string(), flags = self.len(); "Wrote catalog");
        Ok(())
    }
}

impl IntoIterator for Catalog {
    type Item = (String, FlagSpec);
    type IntoIter = indexmap::map::IntoIter<String, FlagSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.into_iter()
    }
}

/// Persist `specs` as a catalog keyed by name.
pub fn write(specs: &[FlagSpec], path: &Path) -> Result<(), HeartError> {
    debug!(count = specs.len(); "Serializing flag specifications");
    Catalog::from_specs(specs.iter().cloned())?.save(path)
}

/// `(name, spec)` pairs in file order, symbols rehydrated.
pub fn load_iter(path: &Path) -> Result<impl Iterator<Item = (String, FlagSpec)>, HeartError> {
    Ok(Catalog::load(path)?.into_iter())
}

pub fn load_list(path: &Path) -> Result<Vec<FlagSpec>, HeartError> {
    Ok(load_iter(path)?.map(|(_, spec)| spec).collect())
}

pub fn load_map(path: &Path) -> Result<IndexMap<String, FlagSpec>, HeartError> {
    Ok(load_iter(path)?.collect())
}
