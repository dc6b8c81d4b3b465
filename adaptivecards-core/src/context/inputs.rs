use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Current value of an input: one string, or the selections of a multi-select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Single(String),
    Multi(Vec<String>),
}

impl InputValue {
    pub fn is_empty(&self) -> bool {
        match self {
            InputValue::Single(s) => s.is_empty(),
            InputValue::Multi(values) => values.is_empty(),
        }
    }

    /// Wire form used in submit payloads; selections are comma-joined
    pub fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Single(s) => f.write_str(s),
            InputValue::Multi(values) => f.write_str(&values.join(",")),
        }
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Single(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Single(value)
    }
}

impl From<Vec<String>> for InputValue {
    fn from(values: Vec<String>) -> Self {
        InputValue::Multi(values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    pub value: InputValue,
    pub error_state: bool,
}

/// Input id → current value and validity
///
/// Re-registering an id overwrites it. The empty id is a valid key, so two
/// inputs without ids share one record.
#[derive(Debug, Clone, Default)]
pub struct InputStateStore {
    records: HashMap<String, InputRecord>,
}

impl InputStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, id: impl Into<String>, value: impl Into<InputValue>, error_state: bool) {
        self.records.insert(
            id.into(),
            InputRecord {
                value: value.into(),
                error_state,
            },
        );
    }

    pub fn get_all(&self) -> &HashMap<String, InputRecord> {
        &self.records
    }

    pub fn get_value(&self, id: &str) -> Option<&InputValue> {
        self.records.get(id).map(|r| &r.value)
    }

    pub fn get_error(&self, id: &str) -> Option<bool> {
        self.records.get(id).map(|r| r.error_state)
    }

    /// True when any registered input currently fails validation
    pub fn has_errors(&self) -> bool {
        self.records.values().any(|r| r.error_state)
    }

    /// Ids currently in error, sorted
    pub fn invalid_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .records
            .iter()
            .filter(|(_, r)| r.error_state)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Values keyed by id, as merged into submit data
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.records
            .iter()
            .map(|(id, r)| (id.clone(), r.value.to_json()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
