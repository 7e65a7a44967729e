//! Context merging for layout data

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use toml::Value;

use super::types::Data;

/// Signature of an injected merge function: `(accumulator, next) -> merged`
pub type MergeFn = dyn Fn(Data, &Data) -> Data + Send + Sync;

/// How per-layout data objects are combined
///
/// Data is folded in stack order, outermost layout first, so with the
/// default [`MergeStrategy::Overwrite`] the layout closest to the content
/// wins and with [`MergeStrategy::Defaults`] the outermost layout wins.
#[derive(Clone, Default)]
pub enum MergeStrategy {
    /// Shallow merge, keys in `next` replace keys in the accumulator
    #[default]
    Overwrite,
    /// Shallow merge, keys already in the accumulator are kept
    Defaults,
    /// Like `Overwrite`, but nested tables are merged key by key
    Deep,
    /// Caller-provided merge function
    Custom(Arc<MergeFn>),
}

impl MergeStrategy {
    /// Wrap a merge function
    pub fn custom<F>(merge: F) -> Self
    where
        F: Fn(Data, &Data) -> Data + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(merge))
    }

    /// Merge `next` into the accumulator
    pub fn merge(&self, acc: Data, next: &Data) -> Data {
        match self {
            Self::Overwrite => overwrite(acc, next),
            Self::Defaults => defaults(acc, next),
            Self::Deep => deep(acc, next),
            Self::Custom(merge) => merge(acc, next),
        }
    }

    /// Left-fold a sequence of data objects into a fresh table
    pub fn fold<'a, I>(&self, items: I) -> Data
    where
        I: IntoIterator<Item = &'a Data>,
    {
        items
            .into_iter()
            .fold(Data::new(), |acc, next| self.merge(acc, next))
    }
}

impl fmt::Debug for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => f.write_str("Overwrite"),
            Self::Defaults => f.write_str("Defaults"),
            Self::Deep => f.write_str("Deep"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Built-in strategies selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeMode {
    Overwrite,
    Defaults,
    Deep,
}

impl From<MergeMode> for MergeStrategy {
    fn from(mode: MergeMode) -> Self {
        match mode {
            MergeMode::Overwrite => Self::Overwrite,
            MergeMode::Defaults => Self::Defaults,
            MergeMode::Deep => Self::Deep,
        }
    }
}

fn overwrite(mut acc: Data, next: &Data) -> Data {
    for (key, value) in next {
        acc.insert(key.clone(), value.clone());
    }
    acc
}

fn defaults(mut acc: Data, next: &Data) -> Data {
    for (key, value) in next {
        if !acc.contains_key(key) {
            acc.insert(key.clone(), value.clone());
        }
    }
    acc
}

fn deep(mut acc: Data, next: &Data) -> Data {
    for (key, value) in next {
        let merged = match (acc.remove(key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                Value::Table(deep(existing, incoming))
            }
            (_, value) => value.clone(),
        };
        acc.insert(key.clone(), merged);
    }
    acc
}
