//! The event normalizer: raw change notifications in, zero or one audit
//! record out.

use serde_json::Value;

use crate::actor_context::ActorContext;
use crate::event::ChangeEvent;
use crate::option_labels::{is_ignored, lookup_label};
use crate::record::{EventType, LogRecord, ObjectType, Severity};
use crate::value_format::{esc_html, format_value};

/// Converts host change notifications into [`LogRecord`]s.
///
/// Every decision is a function of the inputs and the two static tables;
/// the only ambient state is the actor identity stamped onto each record.
/// An event either produces a record or is silently suppressed; there is
/// no failure path.
pub struct EventNormalizer {
    actor: ActorContext,
}

impl EventNormalizer {
    pub fn new(actor: ActorContext) -> Self {
        EventNormalizer { actor }
    }

    /// Dispatches a notification to its handler.
    pub fn normalize(&self, event: &ChangeEvent) -> Option<LogRecord> {
        match event {
            ChangeEvent::OptionUpdated {
                key,
                old_value,
                new_value,
            } => self.on_option_updated(key, old_value, new_value),
            ChangeEvent::OptionAdded { key, value } => self.on_option_added(key, value),
            ChangeEvent::OptionDeleted { key } => self.on_option_deleted(key),
            ChangeEvent::ThemeSwitched {
                old_theme,
                new_theme,
            } => Some(self.on_theme_switched(old_theme, new_theme)),
            ChangeEvent::CustomizerSaved => Some(self.on_customizer_saved()),
            ChangeEvent::SystemUpdateCompleted { component, action } => {
                self.on_system_update_completed(component, action)
            }
        }
    }

    /// An existing option changed value.
    ///
    /// Suppressed for ignored keys, and for no-op updates where old and new
    /// render to the same canonical form.
    pub fn on_option_updated(
        &self,
        key: &str,
        old_value: &Value,
        new_value: &Value,
    ) -> Option<LogRecord> {
        if is_ignored(key) {
            log::debug!("suppressed update to ignored option {key}");
            return None;
        }
        let old_text = format_value(old_value);
        let new_text = format_value(new_value);
        if old_text == new_text {
            log::debug!("suppressed no-op update to option {key}");
            return None;
        }
        let message = format!(
            "{} was updated from '{}' to '{}'",
            esc_html(lookup_label(key)),
            esc_html(&old_text),
            esc_html(&new_text),
        );
        Some(self.record(Severity::Notice, EventType::Modified, ObjectType::Settings, message))
    }

    /// A new option appeared. No equality check: always fires unless the
    /// key is ignored.
    pub fn on_option_added(&self, key: &str, value: &Value) -> Option<LogRecord> {
        if is_ignored(key) {
            log::debug!("suppressed addition of ignored option {key}");
            return None;
        }
        let message = format!(
            "{} was added with value '{}'",
            esc_html(lookup_label(key)),
            esc_html(&format_value(value)),
        );
        Some(self.record(Severity::Info, EventType::Created, ObjectType::Settings, message))
    }

    /// An option was removed.
    pub fn on_option_deleted(&self, key: &str) -> Option<LogRecord> {
        if is_ignored(key) {
            log::debug!("suppressed deletion of ignored option {key}");
            return None;
        }
        let message = format!("{} was deleted", esc_html(lookup_label(key)));
        Some(self.record(Severity::Warning, EventType::Deleted, ObjectType::Settings, message))
    }

    /// The active theme changed. Always recorded.
    pub fn on_theme_switched(&self, old_name: &str, new_name: &str) -> LogRecord {
        let message = format!(
            "Theme switched from '{}' to '{}'",
            esc_html(old_name),
            esc_html(new_name),
        );
        self.record(Severity::Notice, EventType::Modified, theme_object(), message)
    }

    /// Customizer settings were saved. Always recorded, fixed message.
    pub fn on_customizer_saved(&self) -> LogRecord {
        self.record(
            Severity::Notice,
            EventType::Modified,
            theme_object(),
            "Theme customizer settings were updated".to_string(),
        )
    }

    /// A system component finished an update run.
    ///
    /// Only completed `update` actions on a named component are recorded;
    /// installs and anonymous components are suppressed.
    pub fn on_system_update_completed(&self, component: &str, action: &str) -> Option<LogRecord> {
        if action != "update" {
            return None;
        }
        let object_type = ObjectType::component(component)?;
        let message = format!("{object_type} update completed successfully");
        Some(self.record(Severity::Info, EventType::Modified, object_type, message))
    }

    fn record(
        &self,
        severity: Severity,
        event_type: EventType,
        object_type: ObjectType,
        message: String,
    ) -> LogRecord {
        LogRecord::new(severity, event_type, object_type, message)
            .with_user(&self.actor.user_id)
            .with_ip(&self.actor.ip_address)
    }
}

fn theme_object() -> ObjectType {
    ObjectType::Component("Theme".to_string())
}
