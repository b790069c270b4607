//! Telemetry command handlers: one-shot info and continuous watch.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;

use boardwatch_api::{SubmodelClient, SystemInformation};
use boardwatch_core::{DashboardConfig, RamUsage, Sample, TelemetryPoller, TelemetryStore};

use crate::cli::{GlobalOpts, SystemArgs, SystemCommand, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &SubmodelClient,
    dashboard: &DashboardConfig,
    args: SystemArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SystemCommand::Info => info(client, global).await,
        SystemCommand::Watch(watch_args) => watch(client, dashboard, &watch_args, global).await,
    }
}

// ── One-shot info ────────────────────────────────────────────────────

async fn info(client: &SubmodelClient, global: &GlobalOpts) -> Result<(), CliError> {
    let system = client.get_system_information().await?;
    let color = output::should_color(&global.color);

    let view = output::View {
        human: format_detail(&system, color),
        plain: Sample::parse(&system.hardware.processor.cpu_usage).to_string(),
    };

    output::emit(&output::render(&global.output, &system, view), global.quiet);
    Ok(())
}

fn format_detail(system: &SystemInformation, color: bool) -> String {
    let hw = &system.hardware;
    let ram = RamUsage::compute(&hw.memory.ram_free, &hw.memory.ram_installed);

    let mut out = String::new();
    let heading = |s: &str| {
        if color {
            s.bold().to_string()
        } else {
            s.to_owned()
        }
    };

    let _ = writeln!(out, "{}", heading("Hardware"));
    let _ = writeln!(out, "  CPU usage:    {}", hw.processor.cpu_usage);
    let _ = writeln!(out, "  Temperature:  {}", hw.board_temperature);
    let _ = writeln!(out, "{}", heading("Memory"));
    let _ = writeln!(
        out,
        "  Free:         {} ({:.2} GiB)",
        hw.memory.ram_free, ram.free_gib
    );
    let _ = writeln!(out, "  Used:         {:.2} GiB", ram.used_gib);
    if let (Some(used), Some(free)) = (ram.used_pct, ram.free_pct) {
        let _ = writeln!(out, "  Split:        {used:.2}% used / {free:.2}% free");
    } else {
        let _ = writeln!(out, "  Split:        unavailable");
    }
    if let Some(stamp) = system.last_update {
        let _ = writeln!(out, "{} {}", heading("Last update:"), stamp.to_rfc3339());
    }

    out.trim_end().to_owned()
}

// ── Continuous watch ─────────────────────────────────────────────────

async fn watch(
    client: &SubmodelClient,
    dashboard: &DashboardConfig,
    args: &WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.interval == Some(0) {
        return Err(CliError::Validation {
            field: "interval".into(),
            reason: "must be at least 1 second".into(),
        });
    }
    let interval = args
        .interval
        .map_or(dashboard.poll_interval, Duration::from_secs);

    let store = Arc::new(TelemetryStore::new());
    let mut rx = store.subscribe();
    let handle = TelemetryPoller::new(client.clone(), store.clone(), interval).spawn();

    if !global.quiet {
        eprintln!("Watching telemetry (Ctrl-C to stop)");
    }

    let mut applied: u64 = 0;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = rx.borrow_and_update().clone();
                output::emit(&format_watch_line(&snap), global.quiet);

                applied += 1;
                if args.count.is_some_and(|n| applied >= n) {
                    break;
                }
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

fn format_watch_line(snap: &boardwatch_core::TelemetrySnapshot) -> String {
    let stamp = snap
        .fetched_at
        .map_or_else(|| "-".to_owned(), |t| t.format("%H:%M:%S").to_string());
    let ram = snap
        .ram
        .and_then(|r| r.used_pct)
        .map_or_else(|| "-".to_owned(), |p| format!("{p:.2}%"));

    let history = snap
        .cpu
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let cpu = snap.cpu.latest().to_string();
    let temp = snap.temperature.latest().to_string();

    format!("{stamp}  cpu {cpu:>5}  temp {temp:>5}  ram {ram:>7}  history [{history}]")
}
