use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw change notification raised by the host, one variant per
/// notification kind.
///
/// The host guarantees at most one notification per discrete change; no
/// deduplication happens on this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    OptionUpdated {
        key: String,
        old_value: Value,
        new_value: Value,
    },
    OptionAdded {
        key: String,
        value: Value,
    },
    OptionDeleted {
        key: String,
    },
    ThemeSwitched {
        old_theme: String,
        new_theme: String,
    },
    CustomizerSaved,
    SystemUpdateCompleted {
        component: String,
        action: String,
    },
}

impl ChangeEvent {
    /// Stable name of the notification kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ChangeEvent::OptionUpdated { .. } => "option_updated",
            ChangeEvent::OptionAdded { .. } => "option_added",
            ChangeEvent::OptionDeleted { .. } => "option_deleted",
            ChangeEvent::ThemeSwitched { .. } => "theme_switched",
            ChangeEvent::CustomizerSaved => "customizer_saved",
            ChangeEvent::SystemUpdateCompleted { .. } => "system_update_completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_deserialize_from_tagged_json() {
        let event: ChangeEvent = serde_json::from_value(json!({
            "kind": "option_updated",
            "key": "blogname",
            "old_value": "Old",
            "new_value": "New",
        }))
        .unwrap();
        assert_eq!(event.kind(), "option_updated");

        let event: ChangeEvent = serde_json::from_value(json!({"kind": "customizer_saved"})).unwrap();
        assert_eq!(event.kind(), "customizer_saved");
    }
}
