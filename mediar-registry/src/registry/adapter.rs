//! One adapter load: schemas checked, signatures derived, implementations
//! bound, all behind an immutable handle.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use mediar_core::signature::{SignatureEntry, SignatureTable};
use mediar_core::streaming::IoValue;
use mediar_core::validation::{
    UnitIndex, check_connector_with, materialize_options, materialize_unit,
};
use mediar_spec::MediarError;
use mediar_spec::types::{ConnectorSchema, OptionsValue, SecretMap};

/// One registered callable bound behind a derived signature key.
///
/// Implementations receive validated, materialized values: options have
/// their defaults filled and static payloads have passed unit validation
/// before `call` runs.
#[async_trait::async_trait]
pub trait TransformFn: Send + Sync {
    async fn call(
        &self,
        keys: &SecretMap,
        options: &OptionsValue,
        input: IoValue,
    ) -> Result<IoValue, MediarError>;
}

/// Implementation bundle supplied to [`Adapter::register`], keyed by
/// connector id and rendered signature key.
#[derive(Default)]
pub struct Implementations {
    by_connector: HashMap<String, HashMap<String, Arc<dyn TransformFn>>>,
}

impl Implementations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind one implementation behind `connector_id` and the rendered key
    /// `transformation.inputKey.outputKey`.
    pub fn bind(
        mut self,
        connector_id: impl Into<String>,
        key: impl Into<String>,
        implementation: Arc<dyn TransformFn>,
    ) -> Self {
        self.by_connector
            .entry(connector_id.into())
            .or_default()
            .insert(key.into(), implementation);
        self
    }
}

/// A loaded connector: its schema, derived signature table, and bound
/// implementations.
pub struct ConnectorHandle {
    schema: ConnectorSchema,
    table: SignatureTable,
    calls: HashMap<String, Arc<dyn TransformFn>>,
}

impl ConnectorHandle {
    pub fn schema(&self) -> &ConnectorSchema {
        &self.schema
    }

    pub fn table(&self) -> &SignatureTable {
        &self.table
    }

    /// Invoke the callable behind a rendered signature key.
    ///
    /// Secret keys, options, and static input payloads are validated
    /// before the implementation runs; on any validation failure the call
    /// is never attempted. Streamed inputs are checked for shape arity
    /// only - increments belong to the producer's contract.
    pub async fn invoke(
        &self,
        key: &str,
        keys: &SecretMap,
        options: &OptionsValue,
        input: IoValue,
    ) -> Result<IoValue, MediarError> {
        let entry = self.table.lookup(key).ok_or_else(|| {
            MediarError::UnknownSignature(format!(
                "connector '{}' does not declare '{key}'",
                self.schema.id
            ))
        })?;

        for declared in &self.schema.keys {
            if !keys.contains_key(&declared.key) {
                return Err(MediarError::Validation(format!(
                    "missing secret key '{}'",
                    declared.key
                )));
            }
        }
        for supplied in keys.keys() {
            if !self.schema.keys.iter().any(|k| &k.key == supplied) {
                return Err(MediarError::Validation(format!(
                    "undeclared secret key '{supplied}'"
                )));
            }
        }

        let options = materialize_options(&self.schema.options, options)?;
        let input = materialize_input(entry, input)?;

        let implementation = self.calls.get(&entry.key.to_string()).ok_or_else(|| {
            MediarError::UnknownSignature(format!("no implementation bound for '{}'", entry.key))
        })?;

        implementation.call(keys, &options, input).await
    }
}

fn materialize_input(entry: &SignatureEntry, input: IoValue) -> Result<IoValue, MediarError> {
    if !entry.shape.input.accepts(&input) {
        return Err(MediarError::Validation(format!(
            "'{}' takes a '{}' input, got a {}",
            entry.key,
            entry.shape.input.key(),
            input.arity()
        )));
    }

    let unit_schema = entry.pair.input().unit();
    match input {
        IoValue::Unit(value) => materialize_unit(unit_schema, &value).map(IoValue::Unit),
        IoValue::Batch(values) => values
            .iter()
            .map(|value| materialize_unit(unit_schema, value))
            .collect::<Result<Vec<_>, _>>()
            .map(IoValue::Batch),
        streamed => Ok(streamed),
    }
}

/// An immutable adapter handle: name, version, and loaded connectors.
///
/// Produced exclusively by [`Adapter::register`]; there is no way to
/// attach an implementation after the fact.
pub struct Adapter {
    name: String,
    version: String,
    connectors: BTreeMap<String, ConnectorHandle>,
}

impl std::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("connectors", &self.connectors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Adapter {
    /// Load an adapter: check every connector schema, derive its signature
    /// table, and bind an implementation behind every derived key.
    ///
    /// Fails fast: any schema defect or missing implementation aborts the
    /// whole load. Implementations that match no declared key are ignored
    /// for forward compatibility.
    pub fn register(
        name: impl Into<String>,
        version: impl Into<String>,
        schemas: Vec<ConnectorSchema>,
        mut implementations: Implementations,
    ) -> Result<Self, MediarError> {
        let name = name.into();
        let version = version.into();

        let mut units = UnitIndex::new();
        let mut connectors = BTreeMap::new();

        for schema in schemas {
            if connectors.contains_key(&schema.id) {
                return Err(MediarError::AdapterLoad(format!(
                    "adapter '{name}' declares connector '{}' more than once",
                    schema.id
                )));
            }

            check_connector_with(&schema, &mut units)?;
            let table = SignatureTable::derive(&schema)?;

            let mut supplied = implementations
                .by_connector
                .remove(&schema.id)
                .unwrap_or_default();

            let mut calls = HashMap::new();
            for entry in table.iter() {
                let rendered = entry.key.to_string();
                match supplied.remove(&rendered) {
                    Some(implementation) => {
                        calls.insert(rendered, implementation);
                    }
                    None => {
                        return Err(MediarError::AdapterLoad(format!(
                            "adapter '{name}': connector '{}' declares '{rendered}' but no implementation was supplied",
                            schema.id
                        )));
                    }
                }
            }
            for unmatched in supplied.keys() {
                tracing::warn!(
                    adapter = %name,
                    connector = %schema.id,
                    key = %unmatched,
                    "ignoring implementation with no declared signature"
                );
            }

            connectors.insert(
                schema.id.clone(),
                ConnectorHandle {
                    schema,
                    table,
                    calls,
                },
            );
        }

        for orphan in implementations.by_connector.keys() {
            tracing::warn!(
                adapter = %name,
                connector = %orphan,
                "ignoring implementations for an undeclared connector"
            );
        }

        tracing::debug!(
            adapter = %name,
            version = %version,
            connectors = connectors.len(),
            "adapter registered"
        );

        Ok(Self {
            name,
            version,
            connectors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn connector(&self, id: &str) -> Option<&ConnectorHandle> {
        self.connectors.get(id)
    }

    pub fn connectors(&self) -> impl Iterator<Item = &ConnectorHandle> {
        self.connectors.values()
    }

    /// Invoke `connector_id`'s callable behind a rendered signature key.
    pub async fn invoke(
        &self,
        connector_id: &str,
        key: &str,
        keys: &SecretMap,
        options: &OptionsValue,
        input: IoValue,
    ) -> Result<IoValue, MediarError> {
        let connector = self.connectors.get(connector_id).ok_or_else(|| {
            MediarError::UnknownSignature(format!(
                "adapter '{}' has no connector '{connector_id}'",
                self.name
            ))
        })?;
        connector.invoke(key, keys, options, input).await
    }

    /// Every dotted call path this adapter serves:
    /// `<adapter>.<connector>.<transformation>.<inputKey>.<outputKey>`.
    pub fn call_paths(&self) -> Vec<String> {
        self.connectors
            .iter()
            .flat_map(|(id, connector)| {
                connector
                    .table
                    .iter()
                    .map(move |entry| format!("{}.{id}.{}", self.name, entry.key))
            })
            .collect()
    }
}
