//! Tri-state module activation and its persisted representation.
use serde_json::Value;

/// Activation state of a module as recorded in the configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// No entry exists for the module.
    Unset,
    /// The module is recorded as enabled (`1`).
    Enabled,
    /// The module is recorded as disabled (`0`).
    Disabled,
}

impl ModuleState {
    /// Interpret a persisted value.
    ///
    /// `None` (and JSON `null`) is [`Unset`](Self::Unset); everything else is
    /// enabled or disabled according to [`is_truthy`].
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Unset,
            Some(v) if is_truthy(v) => Self::Enabled,
            Some(_) => Self::Disabled,
        }
    }

    /// The value written to the document, or `None` for [`Unset`](Self::Unset).
    #[must_use]
    pub fn to_value(self) -> Option<Value> {
        match self {
            Self::Unset => None,
            Self::Enabled => Some(Value::from(1)),
            Self::Disabled => Some(Value::from(0)),
        }
    }

    /// Status word used in diagnostics: `enabled`, `disabled` or `undefined`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unset => "undefined",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    /// Verb for a transition into this state: `enable`, `disable` or `unset`.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Enabled => "enable",
            Self::Disabled => "disable",
        }
    }
}

/// Boolean reading of a persisted value.
///
/// `false`, `0`, `0.0`, `""`, `"0"`, `[]`, `{}` and `null` are false;
/// everything else is true.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
