//! Persisted settings document
//!
//! JSON representation of the config list plus the debug-logging switch:
//!
//! ```json
//! {
//!   "log_debug": true,
//!   "events": [
//!     {
//!       "incident": "RaidEnemy",
//!       "incident_target": 0,
//!       "enabled": true,
//!       "interval": 3,
//!       "interval_scale": 1,
//!       "offset": 12,
//!       "offset_scale": 0,
//!       "selection": 1
//!     }
//!   ]
//! }
//! ```
//!
//! Scopes, scales and selection policies are stored by their stable ids.
//!
//! # Loading rules
//!
//! Loading never fails because of a single bad entry:
//! - missing `incident`, or missing/unknown `incident_target` -> entry dropped
//! - negative or non-integer `interval`/`offset`, wrong field types -> entry dropped
//! - unknown or missing scale id -> hours
//! - unknown or missing `selection` -> all
//! - missing `enabled`/`interval`/`offset` -> `false`/`0`/`0`
//!
//! Every dropped entry is reported with a warning. Only a document that is
//! not valid JSON (or not an object) is an error.

use crate::core::time::TimeScale;
use crate::models::config::{EventConfig, SelectionPolicy};
use crate::models::target::TargetScope;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or writing the whole settings document
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Malformed settings document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loaded settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Emit debug-level diagnostics
    pub log_debug: bool,

    /// Configs in document order
    pub events: Vec<EventConfig>,

    /// Entries skipped while loading, in document order
    pub dropped: Vec<DroppedEntry>,
}

/// A settings entry that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEntry {
    /// Position in the `events` array
    pub index: usize,
    pub reason: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_debug: true,
            events: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default = "default_log_debug")]
    log_debug: bool,
    #[serde(default)]
    events: Vec<serde_json::Value>,
}

fn default_log_debug() -> bool {
    true
}

/// Only the logging switch, so it can be read before the events are
#[derive(Debug, Deserialize)]
struct LogSwitch {
    #[serde(default = "default_log_debug")]
    log_debug: bool,
}

/// One event as written to disk
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedEvent {
    incident: Option<String>,
    incident_target: Option<i64>,
    enabled: Option<bool>,
    interval: Option<i64>,
    interval_scale: Option<i64>,
    offset: Option<i64>,
    offset_scale: Option<i64>,
    selection: Option<i64>,
}

#[derive(Debug, Serialize)]
struct Document {
    log_debug: bool,
    events: Vec<PersistedEvent>,
}

impl From<&EventConfig> for PersistedEvent {
    fn from(config: &EventConfig) -> Self {
        PersistedEvent {
            incident: Some(config.incident_name.clone()),
            incident_target: Some(config.target_scope.id()),
            enabled: Some(config.enabled),
            interval: Some(i64::from(config.interval)),
            interval_scale: Some(config.interval_scale.id()),
            offset: Some(i64::from(config.offset)),
            offset_scale: Some(config.offset_scale.id()),
            selection: Some(config.selection_policy.id()),
        }
    }
}

impl PersistedEvent {
    fn into_config(self) -> Result<EventConfig, String> {
        let incident = self
            .incident
            .filter(|name| !name.is_empty())
            .ok_or_else(|| "missing incident name".to_string())?;

        let scope_id = self
            .incident_target
            .ok_or_else(|| format!("{}: missing incident target", incident))?;
        let scope = TargetScope::from_id(scope_id)
            .ok_or_else(|| format!("{}: unknown incident target {}", incident, scope_id))?;

        let interval = non_negative(self.interval, "interval", &incident)?;
        let offset = non_negative(self.offset, "offset", &incident)?;

        Ok(EventConfig::new(scope, incident)
            .with_enabled(self.enabled.unwrap_or(false))
            .with_interval(interval, scale_or_hours(self.interval_scale))
            .with_offset(offset, scale_or_hours(self.offset_scale))
            .with_policy(
                self.selection
                    .and_then(SelectionPolicy::from_id)
                    .unwrap_or_default(),
            ))
    }
}

fn non_negative(value: Option<i64>, field: &str, incident: &str) -> Result<u32, String> {
    let value = value.unwrap_or(0);
    u32::try_from(value).map_err(|_| format!("{}: {} out of range ({})", incident, field, value))
}

fn scale_or_hours(id: Option<i64>) -> TimeScale {
    id.and_then(TimeScale::from_id).unwrap_or_default()
}

impl Settings {
    /// Parse a settings document, dropping malformed entries
    ///
    /// # Example
    /// ```
    /// use scheduled_events_core::Settings;
    ///
    /// let settings = Settings::from_json(r#"{
    ///     "events": [
    ///         { "incident": "Eclipse", "incident_target": 1, "enabled": true, "interval": 2 },
    ///         { "incident_target": 1 }
    ///     ]
    /// }"#).unwrap();
    ///
    /// assert_eq!(settings.events.len(), 1);
    /// assert_eq!(settings.dropped.len(), 1);
    /// assert_eq!(settings.dropped[0].index, 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let mut settings = Settings {
            log_debug: raw.log_debug,
            events: Vec::with_capacity(raw.events.len()),
            dropped: Vec::new(),
        };

        for (index, value) in raw.events.into_iter().enumerate() {
            let parsed = serde_json::from_value::<PersistedEvent>(value)
                .map_err(|err| err.to_string())
                .and_then(PersistedEvent::into_config);

            match parsed {
                Ok(config) => settings.events.push(config),
                Err(reason) => {
                    tracing::warn!("Found invalid event in saved settings (entry {}): {}", index, reason);
                    settings.dropped.push(DroppedEntry { index, reason });
                }
            }
        }

        tracing::info!("Loaded {} events from settings", settings.events.len());
        Ok(settings)
    }

    /// Read only the `log_debug` switch of a document
    ///
    /// Lets a front end install its diagnostics before [`Settings::from_json`]
    /// reports dropped entries. Anything unreadable falls back to `true`.
    pub fn peek_log_debug(json: &str) -> bool {
        serde_json::from_str::<LogSwitch>(json)
            .map(|switch| switch.log_debug)
            .unwrap_or_else(|_| default_log_debug())
    }

    /// Write the settings document
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Self::configs_to_json(self.log_debug, &self.events)
    }

    /// Write a settings document for an arbitrary config list
    pub fn configs_to_json(log_debug: bool, configs: &[EventConfig]) -> Result<String, SettingsError> {
        let document = Document {
            log_debug,
            events: configs.iter().map(PersistedEvent::from).collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
