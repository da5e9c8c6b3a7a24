//! A read-only collection of loaded adapters.

use std::collections::BTreeMap;

use mediar_core::signature::SignatureEntry;
use mediar_core::validation::UnitIndex;
use mediar_spec::MediarError;
use mediar_spec::types::{ConnectorSchema, Feature, Requirement};

use crate::capability;

use super::adapter::{Adapter, ConnectorHandle};

/// Groups loaded adapters under their names, enforcing cross-adapter unit
/// identity, and answers capability queries over everything loaded.
#[derive(Default)]
pub struct AdapterSet {
    adapters: BTreeMap<String, Adapter>,
    units: UnitIndex,
}

/// A dotted call path resolved to its adapter, connector, and signature.
pub struct ResolvedCall<'a> {
    pub adapter: &'a Adapter,
    pub connector: &'a ConnectorHandle,
    pub entry: &'a SignatureEntry,
}

impl AdapterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a loaded adapter. Fails on a duplicate adapter name or when a
    /// `unitId` literal already loaded denotes a different structure; on
    /// failure the set is left untouched.
    pub fn insert(&mut self, adapter: Adapter) -> Result<(), MediarError> {
        if self.adapters.contains_key(adapter.name()) {
            return Err(MediarError::AdapterLoad(format!(
                "an adapter named '{}' is already loaded",
                adapter.name()
            )));
        }

        let mut staged = self.units.clone();
        for connector in adapter.connectors() {
            for unit in connector.schema().object_units() {
                staged.observe(unit)?;
            }
        }

        self.units = staged;
        self.adapters.insert(adapter.name().to_string(), adapter);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Adapter> {
        self.adapters.get(name)
    }

    pub fn adapters(&self) -> impl Iterator<Item = &Adapter> {
        self.adapters.values()
    }

    fn connector_schemas(&self) -> Vec<&ConnectorSchema> {
        self.adapters
            .values()
            .flat_map(Adapter::connectors)
            .map(ConnectorHandle::schema)
            .collect()
    }

    /// Connectors satisfying the requirement, across every adapter.
    pub fn find(&self, requirement: &Requirement) -> Vec<&ConnectorSchema> {
        self.connector_schemas()
            .into_iter()
            .filter(|schema| capability::satisfies(schema, requirement))
            .collect()
    }

    /// Whether the loaded connectors, taken together, satisfy a feature.
    pub fn satisfies_feature(&self, feature: &Feature) -> bool {
        capability::feature_satisfied(&self.connector_schemas(), feature)
    }

    /// Resolve a dotted call path
    /// `<adapter>.<connector>.<transformation>.<inputKey>.<outputKey>`.
    pub fn resolve(&self, path: &str) -> Option<ResolvedCall<'_>> {
        let parts: Vec<&str> = path.split('.').collect();
        let [adapter, connector, transformation, input, output] = parts[..] else {
            return None;
        };

        let adapter = self.adapters.get(adapter)?;
        let connector = adapter.connector(connector)?;
        let entry = connector
            .table()
            .lookup(&format!("{transformation}.{input}.{output}"))?;
        Some(ResolvedCall {
            adapter,
            connector,
            entry,
        })
    }
}
