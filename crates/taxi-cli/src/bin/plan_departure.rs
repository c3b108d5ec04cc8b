use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use taxi_cli::{load_profile, load_snapshot, DepartureRequest};
use taxi_core::plan_departure_with;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan a gate-to-climb departure route", long_about = None)]
struct Args {
    /// Facility snapshot (JSON)
    snapshot: PathBuf,

    /// Parking spot number to depart from
    #[arg(long)]
    gate: Option<u32>,

    /// Seed for a reproducible random gate (ignored with --gate)
    #[arg(long)]
    seed: Option<u64>,

    /// Runway index (default: longest runway)
    #[arg(long)]
    runway: Option<usize>,

    /// Departure profile overrides (JSON)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Pretty-print the plan
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the plan
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("taxi_core=info".parse()?))
        .init();

    let args = Args::parse();
    let snapshot = load_snapshot(&args.snapshot)?;
    let profile = load_profile(args.profile.as_deref())?;
    let request = DepartureRequest {
        gate: args.gate,
        seed: args.seed,
        runway: args.runway,
    };

    let plan = plan_departure_with(
        &snapshot,
        request.gate_selection(),
        request.runway_selection(),
        &profile,
    )?;

    if plan.diagnostics.is_degraded() {
        tracing::warn!(
            degraded = ?plan.diagnostics.degraded,
            holding_point = ?plan.diagnostics.holding_point,
            "plan is degraded"
        );
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        serde_json::to_string(&plan)?
    };
    println!("{output}");
    Ok(())
}
