//! Request-scoped context values and logger enrichment
//!
//! Upstream request handling stores well-known values in a [`Context`];
//! [`Logger::with_context`] copies the ones that are present onto a derived
//! logger as bound fields.

use crate::core::{Field, FieldValue};
use crate::logger::Logger;
use std::collections::BTreeMap;

pub const KEY_REQUEST_ID: &str = "requestID";
pub const KEY_USERNAME: &str = "username";
pub const KEY_WATCHER_NAME: &str = "watcher";

/// Keys copied by `with_context`, in attachment order
pub const WELL_KNOWN_KEYS: [&str; 3] = [KEY_REQUEST_ID, KEY_USERNAME, KEY_WATCHER_NAME];

/// Immutable bag of request-scoped values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: BTreeMap<String, FieldValue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this context with `key` set to `value`
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut values = self.values.clone();
        values.insert(key.into(), value.into());
        Self { values }
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Logger {
    /// Logger carrying the request id, user name and watcher name found in
    /// `ctx`; absent keys are skipped. The receiver is not modified.
    #[must_use]
    pub fn with_context(&self, ctx: &Context) -> Logger {
        let fields: Vec<Field> = WELL_KNOWN_KEYS
            .iter()
            .filter_map(|key| ctx.value(key).map(|v| Field::new(*key, v.clone())))
            .collect();
        self.with_fields(&fields)
    }
}
