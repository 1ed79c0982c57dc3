//! Configuration store
//!
//! Ordered list of [`EventConfig`]s owned by one scheduler. Configs are
//! addressed by [`ConfigId`], so edits from any front end (CLI, file, UI)
//! stay valid when other configs are added or removed.

use crate::models::config::{ConfigId, EventConfig};
use thiserror::Error;

/// Errors from store mutations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No config with id {0}")]
    ConfigNotFound(ConfigId),

    #[error("A config with id {0} already exists")]
    DuplicateId(ConfigId),
}

/// Ordered collection of recurring event configs
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    configs: Vec<EventConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a config list, dropping later duplicates of an id
    pub fn from_configs(configs: Vec<EventConfig>) -> Self {
        let mut store = Self::new();
        for config in configs {
            if let Err(err) = store.add(config) {
                tracing::warn!("Dropping config: {}", err);
            }
        }
        store
    }

    /// Append a config
    pub fn add(&mut self, config: EventConfig) -> Result<ConfigId, StoreError> {
        if self.get(config.id).is_some() {
            return Err(StoreError::DuplicateId(config.id));
        }
        let id = config.id;
        self.configs.push(config);
        Ok(id)
    }

    /// Remove a config, returning it
    pub fn remove(&mut self, id: ConfigId) -> Result<EventConfig, StoreError> {
        let index = self
            .configs
            .iter()
            .position(|config| config.id == id)
            .ok_or(StoreError::ConfigNotFound(id))?;
        Ok(self.configs.remove(index))
    }

    /// Edit a config in place
    ///
    /// The config keeps its id and position whatever `edit` does.
    pub fn update<F>(&mut self, id: ConfigId, edit: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut EventConfig),
    {
        let config = self
            .configs
            .iter_mut()
            .find(|config| config.id == id)
            .ok_or(StoreError::ConfigNotFound(id))?;
        edit(config);
        config.id = id;
        Ok(())
    }

    /// Replace the whole list
    pub fn replace(&mut self, configs: Vec<EventConfig>) {
        *self = Self::from_configs(configs);
    }

    pub fn get(&self, id: ConfigId) -> Option<&EventConfig> {
        self.configs.iter().find(|config| config.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventConfig> {
        self.configs.iter()
    }

    pub fn configs(&self) -> &[EventConfig] {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
