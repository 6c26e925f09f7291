//! Messages sent to the content script by the popup and background relay.

use serde::{Deserialize, Serialize};

/// Toggle message. JSON shape: `{ "action": "...", "value"?: bool }`.
///
/// A missing `value` flips the current setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ExtensionMessage {
    ToggleElementScan {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<bool>,
    },
    ToggleElementScanButtonVisible {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<bool>,
    },
}

impl ExtensionMessage {
    /// The action name as it appears on the wire.
    pub fn action(&self) -> &'static str {
        match self {
            ExtensionMessage::ToggleElementScan { .. } => "toggleElementScan",
            ExtensionMessage::ToggleElementScanButtonVisible { .. } => "toggleElementScanButtonVisible",
        }
    }

    /// Decode an incoming message. Anything unrecognized is dropped.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(message) => Some(message),
            Err(e) => {
                log::debug!("Ignoring extension message: {}", e);
                None
            }
        }
    }

    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(message) => Some(message),
            Err(e) => {
                log::debug!("Ignoring extension message: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_with_value() {
        let msg = ExtensionMessage::from_value(json!({ "action": "toggleElementScan", "value": true }));
        assert_eq!(msg, Some(ExtensionMessage::ToggleElementScan { value: Some(true) }));
    }

    #[test]
    fn test_decode_without_value() {
        let msg = ExtensionMessage::from_json(r#"{"action":"toggleElementScanButtonVisible"}"#);
        assert_eq!(msg, Some(ExtensionMessage::ToggleElementScanButtonVisible { value: None }));
    }

    #[test]
    fn test_unknown_action_ignored() {
        assert_eq!(ExtensionMessage::from_value(json!({ "action": "reload" })), None);
        assert_eq!(ExtensionMessage::from_value(json!({ "value": true })), None);
        assert_eq!(ExtensionMessage::from_json("not json"), None);
    }

    #[test]
    fn test_encode_matches_wire_shape() {
        let msg = ExtensionMessage::ToggleElementScan { value: Some(false) };
        let value: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({ "action": "toggleElementScan", "value": false }));
        assert_eq!(msg.action(), "toggleElementScan");

        let flip = ExtensionMessage::ToggleElementScanButtonVisible { value: None };
        assert_eq!(flip.to_json().unwrap(), r#"{"action":"toggleElementScanButtonVisible"}"#);
    }
}
