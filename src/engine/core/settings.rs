use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::engine::params::{CodecProfile, DefaultValue};

/// Stored text of the "don't change" sentinel, also shown in menus
pub const DONT_CHANGE: &str = "don't change";

/// Current value of one parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawValue", into = "RawValue")]
pub enum SettingValue {
    Int(i64),
    Text(String),
    /// Leave this parameter out of the rendered command
    DontChange,
}

/// On-disk shape of a value: a bare JSON number or string
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawValue> for SettingValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Int(n) => SettingValue::Int(n),
            RawValue::Float(f) => SettingValue::Text(f.to_string()),
            RawValue::Text(s) if s == DONT_CHANGE => SettingValue::DontChange,
            RawValue::Text(s) => SettingValue::Text(s),
        }
    }
}

impl From<SettingValue> for RawValue {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::Int(n) => RawValue::Int(n),
            SettingValue::Text(s) => RawValue::Text(s),
            SettingValue::DontChange => RawValue::Text(DONT_CHANGE.to_string()),
        }
    }
}

impl SettingValue {
    /// Value typed by the user; integer-looking input is stored as a number
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<i64>() {
            Ok(n) => SettingValue::Int(n),
            Err(_) => SettingValue::Text(input.to_string()),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        SettingValue::Text(value.into())
    }

    pub fn is_dont_change(&self) -> bool {
        matches!(self, SettingValue::DontChange)
    }

    fn from_default(default: DefaultValue) -> Option<Self> {
        match default {
            DefaultValue::Unset => None,
            DefaultValue::DontChange => Some(SettingValue::DontChange),
            DefaultValue::Int(n) => Some(SettingValue::Int(n)),
            DefaultValue::Text(s) => Some(SettingValue::Text(s.to_string())),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Int(n) => write!(f, "{}", n),
            SettingValue::Text(s) => write!(f, "{}", s),
            SettingValue::DontChange => write!(f, "{}", DONT_CHANGE),
        }
    }
}

/// Parameter values for one profile, keyed by parameter key.
///
/// Missing keys are unset. JSON `null` loads as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<SettingValue>>",
    into = "BTreeMap<String, SettingValue>"
)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
}

impl From<BTreeMap<String, Option<SettingValue>>> for Settings {
    fn from(raw: BTreeMap<String, Option<SettingValue>>) -> Self {
        Self {
            values: raw
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v)))
                .collect(),
        }
    }
}

impl From<Settings> for BTreeMap<String, SettingValue> {
    fn from(settings: Settings) -> Self {
        settings.values
    }
}

impl<K: Into<String>> FromIterator<(K, SettingValue)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, SettingValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hard-coded defaults of a profile, used when no settings file exists yet
    pub fn defaults_for(profile: &CodecProfile) -> Self {
        profile
            .params
            .iter()
            .filter_map(|p| SettingValue::from_default(p.default).map(|v| (p.key, v)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Value to render: present and not the "don't change" sentinel
    pub fn renderable(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key).filter(|v| !v.is_dont_change())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Store the "don't change" sentinel
    pub fn reset(&mut self, key: &str) {
        self.set(key, SettingValue::DontChange);
    }

    /// Remove the value entirely (unset)
    pub fn clear(&mut self, key: &str) -> Option<SettingValue> {
        self.values.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
