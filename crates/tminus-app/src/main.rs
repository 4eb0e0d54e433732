use std::io::Write as _;
use std::time::Duration;

use anyhow::Context as _;
use chrono::Utc;
use tminus_app::config::Settings;
use tminus_app::dashboard::Dashboard;
use tminus_app::fetch::FeedFetcher;
use tminus_app::render::{CLEAR_SCREEN, RenderOptions, render_json, render_text};
use tminus_core::config::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[derive(Debug, Default)]
struct Args {
    once: bool,
    json: bool,
    config: Option<String>,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let mut args = Self::default();
        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--once" => args.once = true,
                "--json" => args.json = true,
                "--config" => {
                    args.config = Some(iter.next().context("--config requires a path")?);
                }
                other => anyhow::bail!("unknown argument: {other}"),
            }
        }
        Ok(args)
    }
}

fn print_snapshot(dashboard: &Dashboard, args: &Args, clear: bool) -> anyhow::Result<()> {
    let now = Utc::now();
    let agenda = dashboard.agenda(now);

    let output = if args.json {
        render_json(&agenda, dashboard.failures(), dashboard.diagnostics(), now)?
    } else {
        let options = RenderOptions {
            show_description: dashboard.settings().display.show_description,
        };
        render_text(
            &agenda,
            dashboard.failures(),
            dashboard.diagnostics(),
            now,
            options,
        )
    };

    let mut stdout = std::io::stdout().lock();
    if clear {
        stdout.write_all(CLEAR_SCREEN.as_bytes())?;
    }
    writeln!(stdout, "{output}")?;
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let args = Args::parse()?;

    tracing::info!("Starting tminus countdown dashboard");

    let config = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => load_config()?,
    };

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let fetcher = FeedFetcher::new()?;
    let mut dashboard = Dashboard::new(config)?;
    dashboard.refresh(&fetcher).await;

    if args.once {
        return print_snapshot(&dashboard, &args, false);
    }

    run(dashboard, &fetcher, &args, tokio::signal::ctrl_c()).await
}

/// Redraws every tick and refetches every refresh period until `shutdown`
/// resolves.
async fn run<F>(
    mut dashboard: Dashboard,
    fetcher: &FeedFetcher,
    args: &Args,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    let refresh_period = Duration::from_secs(dashboard.settings().refresh.interval_secs);
    let tick_period = Duration::from_secs(dashboard.settings().refresh.tick_secs);

    let mut refresh = tokio::time::interval(refresh_period);
    let mut tick = tokio::time::interval(tick_period);
    // Both intervals fire immediately; the first refresh already happened.
    refresh.tick().await;

    // Polled across iterations so a signal during a refresh or redraw is kept.
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                tracing::debug!("Refreshing feeds");
                dashboard.refresh(fetcher).await;
            }
            _ = tick.tick() => {
                print_snapshot(&dashboard, args, !args.json)?;
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "Failed to listen for ctrl-c");
                }
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
