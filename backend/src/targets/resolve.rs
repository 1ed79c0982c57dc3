//! Target resolution
//!
//! Maps a config's [`TargetScope`] to the live set of candidate targets. The
//! set is queried from the host at every firing and never cached, because
//! regions and groups come and go during a run.

use crate::host::TargetSource;
use crate::models::target::{Target, TargetScope};

/// Current candidate targets for `scope`
///
/// An empty result is not an error; the firing simply reaches nobody.
///
/// # Example
/// ```
/// use scheduled_events_core::host::TargetSource;
/// use scheduled_events_core::targets::resolve_targets;
/// use scheduled_events_core::{Target, TargetScope};
///
/// struct Quiet;
///
/// impl TargetSource for Quiet {
///     fn local_regions(&self) -> Vec<Target> {
///         Vec::new()
///     }
///     fn global_target(&self) -> Target {
///         Target::world()
///     }
///     fn mobile_groups(&self) -> Vec<Target> {
///         Vec::new()
///     }
/// }
///
/// assert!(resolve_targets(TargetScope::Local, &Quiet).is_empty());
/// assert_eq!(resolve_targets(TargetScope::Singleton, &Quiet), vec![Target::world()]);
/// ```
pub fn resolve_targets<S>(scope: TargetScope, source: &S) -> Vec<Target>
where
    S: TargetSource + ?Sized,
{
    match scope {
        TargetScope::Local => source.local_regions(),
        TargetScope::Singleton => vec![source.global_target()],
        TargetScope::Collection => source.mobile_groups(),
    }
}
