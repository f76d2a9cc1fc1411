// Core audit record types shared by the normalizer and every sink.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels for structured log classification, ordered from most to
/// least urgent (RFC 5424 keywords).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to the object a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Created,
    Modified,
    Trashed,
    Restored,
    Deleted,
    LoggedIn,
    LoginFailed,
    Logout,
    Published,
    Assigned,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Created => "created",
            EventType::Modified => "modified",
            EventType::Trashed => "trashed",
            EventType::Restored => "restored",
            EventType::Deleted => "deleted",
            EventType::LoggedIn => "logged-in",
            EventType::LoginFailed => "login-failed",
            EventType::Logout => "logout",
            EventType::Published => "published",
            EventType::Assigned => "assigned",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of object a record is about.
///
/// The named variants are the fixed domain; `Component` carries a freeform
/// capitalized name ("Plugin", "Theme", "Core") for system-update events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ObjectType {
    Post,
    User,
    Media,
    Taxonomy,
    Settings,
    Component(String),
}

impl ObjectType {
    /// Builds a capitalized component type from a raw name ("plugin" becomes
    /// "Plugin"). Returns `None` for an empty name.
    pub fn component(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let first = chars.next()?;
        let rest: String = chars.collect();
        let capitalized: String = first.to_uppercase().chain(rest.chars()).collect();
        Some(ObjectType::Component(capitalized))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Post => "Post",
            ObjectType::User => "User",
            ObjectType::Media => "Media",
            ObjectType::Taxonomy => "Taxonomy",
            ObjectType::Settings => "Settings",
            ObjectType::Component(name) => name,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ObjectType> for String {
    fn from(object_type: ObjectType) -> Self {
        match object_type {
            ObjectType::Component(name) => name,
            named => named.as_str().to_string(),
        }
    }
}

impl TryFrom<String> for ObjectType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Post" => Ok(ObjectType::Post),
            "User" => Ok(ObjectType::User),
            "Media" => Ok(ObjectType::Media),
            "Taxonomy" => Ok(ObjectType::Taxonomy),
            "Settings" => Ok(ObjectType::Settings),
            other => match other.chars().next() {
                Some(first) if first.is_uppercase() => Ok(ObjectType::Component(other.to_string())),
                _ => Err(format!(
                    "object type must be a known name or a capitalized component, got '{other}'"
                )),
            },
        }
    }
}

/// Fixed textual format for record timestamps.
pub const EVENT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Serde adapter keeping `event_time` in the `YYYY/MM/DD HH:MM:SS`
/// host-local form every sink stores.
pub mod event_time_format {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::EVENT_TIME_FORMAT;

    pub fn serialize<S>(ts: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(EVENT_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&raw, EVENT_TIME_FORMAT)
            .map_err(serde::de::Error::custom)?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| serde::de::Error::custom("timestamp does not exist in local time"))
    }
}

/// A single audit record handed to a log sink.
///
/// Records are immutable once constructed and write-once into the sink; no
/// part of the crate updates or deletes a stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub user_id: String,
    pub severity: Severity,
    pub ip_address: String,
    pub event_type: EventType,
    #[serde(with = "event_time_format")]
    pub event_time: DateTime<Local>,
    pub object_type: ObjectType,
    pub message: String,
}

impl LogRecord {
    /// Creates a record stamped now, for an anonymous actor on loopback.
    pub fn new(
        severity: Severity,
        event_type: EventType,
        object_type: ObjectType,
        message: impl Into<String>,
    ) -> Self {
        LogRecord {
            user_id: String::new(),
            severity,
            ip_address: crate::actor_context::LOOPBACK.to_string(),
            event_type,
            event_time: Local::now(),
            object_type,
            message: message.into(),
        }
    }

    /// Sets the acting principal.
    pub fn with_user(mut self, user_id: &str) -> Self {
        self.user_id = user_id.to_string();
        self
    }

    /// Sets the client network address.
    pub fn with_ip(mut self, ip_address: &str) -> Self {
        self.ip_address = ip_address.to_string();
        self
    }

    /// The timestamp in its fixed textual form.
    pub fn event_time_text(&self) -> String {
        self.event_time.format(EVENT_TIME_FORMAT).to_string()
    }

    /// Domain checks the storage layer enforces before persisting.
    pub fn validate(&self) -> Result<(), String> {
        if self.message.is_empty() {
            return Err("message cannot be empty".to_string());
        }
        if let ObjectType::Component(name) = &self.object_type {
            let capitalized = name.chars().next().is_some_and(|c| c.is_uppercase());
            if !capitalized {
                return Err(format!("component object type must be capitalized, got '{name}'"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn severity_and_event_type_serialize_to_domain_strings() {
        assert_eq!(serde_json::to_value(Severity::Notice).unwrap(), json!("notice"));
        assert_eq!(serde_json::to_value(EventType::LoggedIn).unwrap(), json!("logged-in"));
        assert_eq!(serde_json::to_value(EventType::LoginFailed).unwrap(), json!("login-failed"));
    }

    #[test]
    fn object_type_round_trips_as_plain_strings() {
        assert_eq!(serde_json::to_value(ObjectType::Settings).unwrap(), json!("Settings"));
        let parsed: ObjectType = serde_json::from_value(json!("Plugin")).unwrap();
        assert_eq!(parsed, ObjectType::Component("Plugin".to_string()));
        assert!(serde_json::from_value::<ObjectType>(json!("plugin")).is_err());
    }

    #[test]
    fn component_names_are_capitalized() {
        assert_eq!(ObjectType::component("plugin").unwrap().as_str(), "Plugin");
        assert_eq!(ObjectType::component("Core").unwrap().as_str(), "Core");
        assert!(ObjectType::component("").is_none());
    }

    #[test]
    fn validation_rejects_empty_messages() {
        let record = LogRecord::new(Severity::Info, EventType::Created, ObjectType::Settings, "");
        assert!(record.validate().is_err());
    }

    #[test]
    fn event_time_uses_the_fixed_format() {
        let record = LogRecord::new(
            Severity::Notice,
            EventType::Modified,
            ObjectType::Settings,
            "Tagline was deleted",
        );
        let text = record.event_time_text();
        assert_eq!(text.len(), 19);
        assert_eq!(&text[4..5], "/");
        assert_eq!(&text[7..8], "/");
        assert_eq!(&text[10..11], " ");
        assert_eq!(&text[13..14], ":");
    }

    #[test]
    fn record_survives_a_serde_round_trip() {
        let record = LogRecord::new(
            Severity::Warning,
            EventType::Deleted,
            ObjectType::Settings,
            "my_custom_flag was deleted",
        )
        .with_user("admin")
        .with_ip("203.0.113.7");

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: LogRecord = serde_json::from_str(&encoded).unwrap();
        // event_time round-trips at second precision
        assert_eq!(decoded.event_time_text(), record.event_time_text());
        assert_eq!(decoded.user_id, record.user_id);
        assert_eq!(decoded.ip_address, record.ip_address);
        assert_eq!(decoded.severity, record.severity);
        assert_eq!(decoded.event_type, record.event_type);
        assert_eq!(decoded.object_type, record.object_type);
        assert_eq!(decoded.message, record.message);
    }
}
