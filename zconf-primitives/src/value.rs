//! Caller-facing argument values, the identifier resolver, and the argument
//! normalizer.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::module::Module;
use crate::tables::canonical_argument;

/// A fully resolved directive identity: namespace URI plus directive name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectiveName {
    namespace: String,
    name: String,
}

impl DirectiveName {
    /// Creates a directive name from an already-resolved namespace and name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Returns the namespace URI.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the directive name within its namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DirectiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// A value supplied for a directive argument.
///
/// These model the input shapes the identifier resolver accepts; anything
/// outside them is expressed as [`Value::Text`] and passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A plain string, passed through unchanged.
    Text(String),
    /// A reference to a module, resolved to its dotted name.
    Module(String),
    /// A member of a module (class, function), resolved to `module.name`.
    Member {
        /// Dotted name of the defining module.
        module: String,
        /// Simple name of the member.
        name: String,
    },
    /// A package whose name equals its own top-level module name.
    Package(String),
    /// A sequence of values, flattened into one space-joined string.
    Sequence(Vec<Value>),
}

impl Value {
    /// Convenience constructor for a module-member reference.
    pub fn member(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Member {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Convenience constructor for a sequence of values.
    pub fn sequence<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&Module> for Value {
    fn from(module: &Module) -> Self {
        Self::Module(module.name().to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

/// Turns a referenced value into the stable textual identifier embedded in
/// directive arguments.
///
/// Total over all [`Value`] shapes: modules and packages resolve to their
/// names, members to `module.name`, text passes through, and sequences join
/// their resolved elements with a single space, order preserved.
#[must_use]
pub fn resolve_identifier(value: &Value) -> String {
    match value {
        Value::Text(text) => text.clone(),
        Value::Module(name) | Value::Package(name) => name.clone(),
        Value::Member { module, name } => format!("{module}.{name}"),
        Value::Sequence(items) => items
            .iter()
            .map(resolve_identifier)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Normalized directive arguments: canonical keys, scalar string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments(BTreeMap<String, String>);

impl Arguments {
    /// Creates an empty argument map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes raw caller-supplied arguments.
    ///
    /// Alias keys collapse to their canonical spelling; when both an alias and
    /// its canonical key are supplied, the canonical spelling's value wins.
    /// Every value is run through the identifier resolver, with sequences
    /// flattened into one space-joined string.
    pub fn normalize<I, K>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let entries: Vec<(String, Value)> =
            raw.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let literal: HashSet<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();

        let mut map = BTreeMap::new();
        for (key, value) in &entries {
            let canonical = canonical_argument(key);
            if canonical != key && literal.contains(canonical) {
                // An explicitly canonical spelling outranks any alias.
                continue;
            }
            map.insert(canonical.to_owned(), resolve_identifier(value));
        }
        Self(map)
    }

    /// Inserts a pre-resolved argument.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up an argument by canonical key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Removes and returns an argument.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Iterates over `(key, value)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no arguments are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
