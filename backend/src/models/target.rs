//! Target handles and target scopes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of entity an event applies to
///
/// The set is closed; persisted settings refer to scopes by [`TargetScope::id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetScope {
    /// Variable set of active local regions
    Local,
    /// One fixed global target
    Singleton,
    /// Variable set of active mobile groups
    Collection,
}

impl TargetScope {
    /// All scopes in persisted-id order
    pub const ALL: [TargetScope; 3] = [
        TargetScope::Local,
        TargetScope::Singleton,
        TargetScope::Collection,
    ];

    /// Stable id used by the settings document
    pub fn id(self) -> i64 {
        match self {
            TargetScope::Local => 0,
            TargetScope::Singleton => 1,
            TargetScope::Collection => 2,
        }
    }

    /// Look up a scope by its persisted id
    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|scope| scope.id() == id)
    }

    /// Whether this scope can resolve to more than one target
    ///
    /// Selection policies only apply to multi-target scopes.
    pub fn is_multi_target(self) -> bool {
        !matches!(self, TargetScope::Singleton)
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetScope::Local => "local",
            TargetScope::Singleton => "world",
            TargetScope::Collection => "group",
        }
    }
}

/// Opaque handle to a live target in the host simulation
///
/// # Example
/// ```
/// use scheduled_events_core::{Target, TargetScope};
///
/// let region = Target::local("region_7");
/// assert_eq!(region.scope, TargetScope::Local);
/// assert_eq!(region.to_string(), "local:region_7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub scope: TargetScope,
    pub id: String,
}

impl Target {
    pub fn new(scope: TargetScope, id: impl Into<String>) -> Self {
        Self {
            scope,
            id: id.into(),
        }
    }

    /// A local region
    pub fn local(id: impl Into<String>) -> Self {
        Self::new(TargetScope::Local, id)
    }

    /// The global target
    pub fn world() -> Self {
        Self::new(TargetScope::Singleton, "world")
    }

    /// A mobile group
    pub fn group(id: impl Into<String>) -> Self {
        Self::new(TargetScope::Collection, id)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope.label(), self.id)
    }
}
