//! Shell configuration.

use crate::error::{Result, ShellError};
use serde::{Deserialize, Serialize};

/// Options that change how raw input is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    /// Dispatch `on_pointer_move` for every move, not only while dragging.
    pub report_pointer_move: bool,
}

impl ShellConfig {
    /// Parse a JSON config object, e.g. `{"reportPointerMove": true}`.
    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ShellError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_drag_only() {
        assert!(!ShellConfig::default().report_pointer_move);
        assert_eq!(ShellConfig::from_json("{}").unwrap(), ShellConfig::default());
    }

    #[test]
    fn parses_camel_case() {
        let config = ShellConfig::from_json(r#"{"reportPointerMove": true}"#).unwrap();
        assert!(config.report_pointer_move);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ShellConfig::from_json("{reportPointerMove").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }
}
