use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use weather_charts::console::{self, ConsoleInput};
use weather_charts::dashboard::{Dashboard, DashboardSettings};
use weather_charts::page::TerminalPage;
use weather_charts::scheduler::{self, SchedulerConfig, SchedulerDeps, SchedulerHandle};
use weather_charts::*;

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

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        version = version::VERSION,
        api = %app_config.api.base_url,
        cadence_secs = app_config.refresh.cadence_secs,
        "Starting {}",
        version::NAME
    );

    let client = client::HttpChartClient::new(&app_config.api)
        .map_err(|e| anyhow::anyhow!("http client: {}", e))?;

    let page = TerminalPage::new(
        app_config.dashboard.mount_points.clone(),
        app_config.dashboard.interval_controls.clone(),
        app_config.dashboard.theme,
    );
    let dashboard = Dashboard::new(page, DashboardSettings::from(&app_config));
    if !dashboard.has_widgets() {
        tracing::warn!("no chart mount points configured; nothing will be fetched");
    }

    let (handle, commands) = scheduler::command_channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let scheduler_handle = scheduler::spawn(
        SchedulerDeps {
            dashboard,
            source: Arc::new(client),
            commands,
            shutdown_rx,
        },
        SchedulerConfig::from(&app_config.refresh),
    );

    tokio::select! {
        _ = read_console(handle) => {
            tracing::info!("Console closed");
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    let _ = shutdown_tx.send(());
    if let Err(e) = scheduler_handle.await {
        tracing::error!(error = %e, operation = "scheduler_join", "scheduler task failed");
    }

    Ok(())
}

/// Forward stdin commands to the scheduler until `quit` or end of input.
async fn read_console(handle: SchedulerHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, operation = "read_stdin", "console read failed");
                return;
            }
        };
        match console::parse_line(&line) {
            Ok(ConsoleInput::Command(command)) => {
                if handle.send(command).await.is_err() {
                    return;
                }
            }
            Ok(ConsoleInput::Quit) => return,
            Ok(ConsoleInput::Nothing) => {}
            Err(e) => eprintln!("{}", e),
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
