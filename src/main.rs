use agentstat_charts::*;
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

use agentstat_charts::downsampler::Reducers;
use agentstat_charts::models::AgentStat;
use agentstat_charts::time_window::{Range, TimeWindow};

const USAGE: &str = "usage: agentstat-charts <OBSERVATIONS_JSON> [FROM_MS TO_MS]";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let path = args.get(1).context(USAGE)?;
    let app_config = config::AppConfig::load()?;

    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let stats: Vec<Option<AgentStat>> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?;

    let range = match (args.get(2), args.get(3)) {
        (Some(from), Some(to)) => Range::new(from.parse()?, to.parse()?)?,
        (None, None) => range_of(&stats)?,
        _ => anyhow::bail!(USAGE),
    };
    let window = TimeWindow::new(range, &app_config.window.sampler())?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        observations = stats.len(),
        window_start = window.window_start(),
        window_size = window.window_size(),
        buckets = window.bucket_count(),
        "building charts"
    );

    let reducers = Reducers::from_config(&app_config.sampling);
    let mut group = AgentStatChartGroup::new(window, &reducers);
    group.add_agent_stats(&stats);
    group.build_charts();

    println!("{}", serde_json::to_string_pretty(&group)?);
    Ok(())
}

/// Smallest range covering every observation timestamp.
fn range_of(stats: &[Option<AgentStat>]) -> Result<Range> {
    let mut timestamps = stats.iter().flatten().map(|s| s.timestamp);
    let first = timestamps.next().context("no observations to derive a time range from")?;
    let (from, to) = timestamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    let end = to.checked_add(1).context("observation timestamp out of range")?;
    Ok(Range::new(from, end)?)
}
