//! Dispatch pipeline
//!
//! Hands one drained [`DispatchEntry`] to the host:
//!
//! ```text
//! 1. Resolve the incident definition by name (it may have vanished since firing)
//! 2. Check the target is still eligible
//! 3. Build execution parameters
//! 4. Scale intensity, for intensity-scalable definitions only
//! 5. Execute
//! ```
//!
//! Every failure drops only this dispatch; nothing here touches the pending queue.

use crate::host::{DefinitionRegistry, IncidentDispatcher};
use crate::models::event::{Event, EventLog};
use crate::queue::DispatchEntry;
use tracing::{debug, warn};

/// What happened to a drained dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Host ran the incident and reported success
    Executed,
    /// Host ran the incident and reported failure
    ExecutionFailed,
    /// Target failed the eligibility check; nothing was executed
    TargetRejected,
    /// Incident name no longer resolves; nothing was executed
    DefinitionMissing,
}

/// A drained dispatch and its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub entry: DispatchEntry,
    pub outcome: DispatchOutcome,
}

/// Run one dispatch through the host's incident machinery
pub fn dispatch_entry<H>(
    entry: DispatchEntry,
    tick: u64,
    host: &mut H,
    event_log: &mut EventLog,
) -> DispatchReport
where
    H: DefinitionRegistry + IncidentDispatcher + ?Sized,
{
    let outcome = run(&entry, tick, host, event_log);
    DispatchReport { entry, outcome }
}

fn run<H>(entry: &DispatchEntry, tick: u64, host: &mut H, event_log: &mut EventLog) -> DispatchOutcome
where
    H: DefinitionRegistry + IncidentDispatcher + ?Sized,
{
    let Some(definition) = host.resolve(&entry.incident_name) else {
        warn!(
            "Could not dispatch {}: no incident definition registered",
            entry.incident_name
        );
        event_log.log(Event::DefinitionMissing {
            tick,
            incident: entry.incident_name.clone(),
        });
        return DispatchOutcome::DefinitionMissing;
    };

    if !host.is_target_eligible(&definition, &entry.target) {
        warn!("Event target {} was invalid for {}", entry.target, definition.name);
        event_log.log(Event::TargetRejected {
            tick,
            incident: entry.incident_name.clone(),
            target: entry.target.to_string(),
        });
        return DispatchOutcome::TargetRejected;
    }

    let mut params = host.build_parameters(&definition, &entry.target);
    if definition.intensity_scalable {
        params = host.scale_intensity(&definition, params);
    }

    let success = host.execute(&definition, params);
    debug!(
        "Executed {} against {} (success: {})",
        definition.name, entry.target, success
    );
    event_log.log(Event::DispatchExecuted {
        tick,
        incident: entry.incident_name.clone(),
        target: entry.target.to_string(),
        success,
    });

    if success {
        DispatchOutcome::Executed
    } else {
        DispatchOutcome::ExecutionFailed
    }
}
