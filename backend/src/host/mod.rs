//! Host collaborator interfaces
//!
//! The scheduler never owns the simulation it schedules into. Everything it
//! needs from the host (the clock, incident definitions, live targets and the
//! incident execution machinery) is consumed through the traits in this module.
//!
//! # Example
//!
//! ```rust
//! use scheduled_events_core::host::{
//!     Clock, DefinitionRegistry, IncidentDefinition, IncidentDispatcher, TargetSource,
//! };
//! use scheduled_events_core::Target;
//!
//! struct Sandbox {
//!     tick: u64,
//! }
//!
//! impl Clock for Sandbox {
//!     fn current_tick(&self) -> u64 {
//!         self.tick
//!     }
//! }
//!
//! impl DefinitionRegistry for Sandbox {
//!     fn resolve(&self, name: &str) -> Option<IncidentDefinition> {
//!         Some(IncidentDefinition::new(name))
//!     }
//! }
//!
//! impl TargetSource for Sandbox {
//!     fn local_regions(&self) -> Vec<Target> {
//!         vec![Target::local("home")]
//!     }
//!     fn global_target(&self) -> Target {
//!         Target::world()
//!     }
//!     fn mobile_groups(&self) -> Vec<Target> {
//!         Vec::new()
//!     }
//! }
//!
//! impl IncidentDispatcher for Sandbox {
//!     type Params = String;
//!
//!     fn is_target_eligible(&self, _definition: &IncidentDefinition, _target: &Target) -> bool {
//!         true
//!     }
//!     fn build_parameters(&mut self, definition: &IncidentDefinition, target: &Target) -> String {
//!         format!("{} -> {}", definition.name, target)
//!     }
//!     fn execute(&mut self, _definition: &IncidentDefinition, _params: String) -> bool {
//!         true
//!     }
//! }
//! ```

use crate::models::target::Target;

/// Source of the current simulation tick
///
/// Must be monotonically non-decreasing; queried once per scheduler tick.
pub trait Clock {
    fn current_tick(&self) -> u64;
}

/// Incident definition as seen by the scheduler
///
/// A snapshot of the host's definition, resolved by name at use time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentDefinition {
    /// Name the definition is registered under
    pub name: String,

    /// Whether the host can scale this incident's intensity
    pub intensity_scalable: bool,
}

impl IncidentDefinition {
    /// Definition with fixed intensity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            intensity_scalable: false,
        }
    }

    /// Definition whose parameters go through [`IncidentDispatcher::scale_intensity`]
    pub fn scalable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            intensity_scalable: true,
        }
    }
}

/// Name-based lookup of incident definitions
///
/// Configs carry only the incident name because they are loaded before the
/// host has registered its definitions. Implementations must tolerate lookups
/// for names that are not (yet) registered and return `None`.
pub trait DefinitionRegistry {
    fn resolve(&self, name: &str) -> Option<IncidentDefinition>;
}

/// Live target sets, queried fresh at every firing
pub trait TargetSource {
    /// Currently active local regions (zero or more)
    fn local_regions(&self) -> Vec<Target>;

    /// The single global target; always present
    fn global_target(&self) -> Target;

    /// Currently active mobile groups (zero or more)
    fn mobile_groups(&self) -> Vec<Target>;
}

/// The host's incident execution machinery
pub trait IncidentDispatcher {
    /// Host-specific execution parameters
    type Params;

    /// Whether `definition` may run against `target` right now
    fn is_target_eligible(&self, definition: &IncidentDefinition, target: &Target) -> bool;

    /// Build default execution parameters for `target`
    fn build_parameters(&mut self, definition: &IncidentDefinition, target: &Target)
        -> Self::Params;

    /// Rescale parameters for intensity-scalable definitions
    ///
    /// Only called when [`IncidentDefinition::intensity_scalable`] is set.
    fn scale_intensity(
        &mut self,
        _definition: &IncidentDefinition,
        params: Self::Params,
    ) -> Self::Params {
        params
    }

    /// Run the incident; returns whether the host reported success
    fn execute(&mut self, definition: &IncidentDefinition, params: Self::Params) -> bool;
}

/// Everything the scheduler needs from the host for one tick
pub trait Host: Clock + DefinitionRegistry + TargetSource + IncidentDispatcher {}

impl<T> Host for T where T: Clock + DefinitionRegistry + TargetSource + IncidentDispatcher {}
