//! Command-line driver for the scheduled events engine.
//!
//! `check` validates a settings document and prints each config's first fire
//! tick. `run` replays the document against a demo host for a number of ticks.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scheduled_events_core::core::time::{describe_tick, TICKS_PER_YEAR};
use scheduled_events_core::{
    Clock, ConfigStore, DefinitionRegistry, DispatchOutcome, FiringMode, IncidentDefinition,
    IncidentDispatcher, Scheduler, SchedulerConfig, Settings, Target, TargetSource, TimeManager,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scheduled-events", version, about = "Recurring incident scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a settings document and show when each event fires next
    Check(CheckArgs),
    /// Run the scheduler against a demo host
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Settings document (JSON)
    #[arg(long)]
    settings: PathBuf,

    /// Tick the schedule is computed from
    #[arg(long, default_value_t = 0)]
    start_tick: u64,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Settings document (JSON)
    #[arg(long)]
    settings: PathBuf,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: u64,

    #[arg(long, default_value_t = 0)]
    start_tick: u64,

    /// Seed for RANDOM_ONE selection
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Number of active local regions in the demo world
    #[arg(long, default_value_t = 3)]
    regions: usize,

    /// Number of active mobile groups in the demo world
    #[arg(long, default_value_t = 2)]
    groups: usize,

    /// Incidents whose intensity the demo host scales
    #[arg(long = "scalable")]
    scalable: Vec<String>,

    /// Fire only the earliest due event each tick
    #[arg(long)]
    earliest_only: bool,

    /// Print the full scheduler event log at the end
    #[arg(long)]
    show_events: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => check(args),
        Command::Run(args) => run(args),
    }
}

/// Read the settings document, install logging at its level, then parse it
///
/// Logging goes first so the per-entry warnings from parsing are not lost.
fn load_settings(path: &Path) -> Result<Settings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    init_logging(Settings::peek_log_debug(&json));

    let settings = Settings::from_json(&json)
        .with_context(|| format!("failed to parse settings in {}", path.display()))?;
    Ok(settings)
}

/// Install the diagnostic subscriber; `RUST_LOG` overrides the document's level
fn init_logging(log_debug: bool) {
    let default_level = if log_debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn check(args: CheckArgs) -> Result<()> {
    let settings = load_settings(&args.settings)?;

    for dropped in &settings.dropped {
        println!("entry {:<3} dropped: {}", dropped.index, dropped.reason);
    }

    for config in &settings.events {
        let status = if !config.enabled {
            "disabled".to_string()
        } else {
            match config.next_fire_tick(args.start_tick) {
                Ok(tick) => format!("next at tick {} ({})", tick, describe_tick(tick)),
                Err(err) => format!("invalid: {}", err),
            }
        };
        println!(
            "{:<24} {:<6} every {} {:<8} +{} {:<8} {:?}: {}",
            config.incident_name,
            config.target_scope.label(),
            config.interval,
            config.interval_scale.label(),
            config.offset,
            config.offset_scale.label(),
            config.effective_policy(),
            status
        );
    }
    Ok(())
}

fn run(args: RunArgs) -> Result<()> {
    let settings = load_settings(&args.settings)?;
    if !settings.dropped.is_empty() {
        warn!(
            "{} malformed entries were dropped from {}",
            settings.dropped.len(),
            args.settings.display()
        );
    }

    let firing_mode = if args.earliest_only {
        FiringMode::EarliestOnly
    } else {
        FiringMode::AllDue
    };
    let mut scheduler = Scheduler::new(
        SchedulerConfig {
            rng_seed: args.seed,
            firing_mode,
        },
        ConfigStore::from_configs(settings.events),
    );
    let mut host = DemoHost::new(args.start_tick, args.regions, args.groups, args.scalable);

    scheduler.reload(host.current_tick());

    let mut fired = 0;
    let mut executed = 0;
    for _ in 0..args.ticks {
        host.time.advance_tick();
        let result = scheduler.tick(&mut host);
        fired += result.num_fired;
        if let Some(report) = result.dispatched {
            if report.outcome == DispatchOutcome::Executed {
                executed += 1;
            }
        }
    }

    info!(
        "Ran {} ticks to {}: {} firings, {} executions, {} dispatches still queued",
        args.ticks,
        describe_tick(host.current_tick()),
        fired,
        executed,
        scheduler.dispatch_queue().len()
    );

    if args.show_events {
        for event in scheduler.event_log().events() {
            println!("{:?}", event);
        }
    }
    Ok(())
}

// ============================================================================
// Demo Host
// ============================================================================

/// In-memory host where every incident name resolves and every target is eligible
struct DemoHost {
    time: TimeManager,
    regions: Vec<Target>,
    groups: Vec<Target>,
    scalable: HashSet<String>,
}

/// Parameters the demo host executes with
#[derive(Debug)]
struct DemoParams {
    target: Target,
    points: u32,
}

impl DemoHost {
    fn new(start_tick: u64, regions: usize, groups: usize, scalable: Vec<String>) -> Self {
        Self {
            time: TimeManager::starting_at(start_tick),
            regions: (0..regions)
                .map(|i| Target::local(format!("region_{}", i)))
                .collect(),
            groups: (0..groups)
                .map(|i| Target::group(format!("group_{}", i)))
                .collect(),
            scalable: scalable.into_iter().collect(),
        }
    }
}

impl Clock for DemoHost {
    fn current_tick(&self) -> u64 {
        self.time.current_tick()
    }
}

impl DefinitionRegistry for DemoHost {
    fn resolve(&self, name: &str) -> Option<IncidentDefinition> {
        if self.scalable.contains(name) {
            Some(IncidentDefinition::scalable(name))
        } else {
            Some(IncidentDefinition::new(name))
        }
    }
}

impl TargetSource for DemoHost {
    fn local_regions(&self) -> Vec<Target> {
        self.regions.clone()
    }

    fn global_target(&self) -> Target {
        Target::world()
    }

    fn mobile_groups(&self) -> Vec<Target> {
        self.groups.clone()
    }
}

impl IncidentDispatcher for DemoHost {
    type Params = DemoParams;

    fn is_target_eligible(&self, _definition: &IncidentDefinition, _target: &Target) -> bool {
        true
    }

    fn build_parameters(&mut self, _definition: &IncidentDefinition, target: &Target) -> DemoParams {
        DemoParams {
            target: target.clone(),
            points: 100,
        }
    }

    fn scale_intensity(&mut self, _definition: &IncidentDefinition, params: DemoParams) -> DemoParams {
        // Threat grows by a tenth every in-game year
        let years = self.current_tick() / TICKS_PER_YEAR;
        let factor = u32::try_from(years).unwrap_or(u32::MAX).saturating_add(10);
        DemoParams {
            points: params.points.saturating_mul(factor) / 10,
            ..params
        }
    }

    fn execute(&mut self, definition: &IncidentDefinition, params: DemoParams) -> bool {
        info!(
            "Executing {} on {} with {} points at {}",
            definition.name,
            params.target,
            params.points,
            describe_tick(self.current_tick())
        );
        true
    }
}
