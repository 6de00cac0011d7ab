// Refresh scheduler: owns the dashboard in one task and drives it from the cadence timer,
// user commands and finished fetches. Fetches run as their own tasks and report back over a
// channel, so the registry is only ever touched from this loop.

use crate::client::ChartDataSource;
use crate::config::RefreshConfig;
use crate::dashboard::{Applied, Dashboard, RefreshOutcome, RefreshRequest};
use crate::models::{IntervalSelection, Theme};
use crate::page::Page;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};
use tracing::instrument;

/// Commands queued before the loop drains them.
pub const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Shortest cadence the loop runs with; smaller values are raised to it.
pub const MIN_CADENCE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    SelectInterval(IntervalSelection),
    /// Theme flag already changed on the page; restyle.
    ThemeChanged,
    /// Set the page's theme flag, then restyle.
    SetTheme(Theme),
    RefreshNow,
    /// Page shown/hidden. Hidden pauses the cadence timer.
    VisibilityChanged(bool),
}

/// Sender side for commands. Cheap to clone.
#[derive(Clone)]
pub struct SchedulerHandle {
    tx: mpsc::Sender<DashboardCommand>,
}

pub type SendResult = Result<(), mpsc::error::SendError<DashboardCommand>>;

impl SchedulerHandle {
    pub async fn send(&self, command: DashboardCommand) -> SendResult {
        self.tx.send(command).await
    }

    pub async fn select_interval(&self, interval: IntervalSelection) -> SendResult {
        self.send(DashboardCommand::SelectInterval(interval)).await
    }

    pub async fn theme_changed(&self) -> SendResult {
        self.send(DashboardCommand::ThemeChanged).await
    }

    pub async fn set_theme(&self, theme: Theme) -> SendResult {
        self.send(DashboardCommand::SetTheme(theme)).await
    }

    pub async fn refresh_now(&self) -> SendResult {
        self.send(DashboardCommand::RefreshNow).await
    }

    pub async fn set_visible(&self, visible: bool) -> SendResult {
        self.send(DashboardCommand::VisibilityChanged(visible)).await
    }
}

pub fn command_channel() -> (SchedulerHandle, mpsc::Receiver<DashboardCommand>) {
    let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    (SchedulerHandle { tx }, rx)
}

/// Dashboard, data source, command stream, and shutdown for the scheduler.
pub struct SchedulerDeps<P: Page> {
    pub dashboard: Dashboard<P>,
    pub source: Arc<dyn ChartDataSource>,
    pub commands: mpsc::Receiver<DashboardCommand>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct SchedulerConfig {
    /// Automatic refresh period. Raised to [`MIN_CADENCE`] if shorter.
    pub cadence: Duration,
}

impl From<&RefreshConfig> for SchedulerConfig {
    fn from(config: &RefreshConfig) -> Self {
        Self {
            cadence: Duration::from_secs(config.cadence_secs),
        }
    }
}

/// Spawn the scheduler loop. The initial load runs immediately; the join handle yields the
/// dashboard back after shutdown.
pub fn spawn<P: Page + 'static>(
    deps: SchedulerDeps<P>,
    config: SchedulerConfig,
) -> tokio::task::JoinHandle<Dashboard<P>> {
    let SchedulerDeps {
        dashboard,
        source,
        commands,
        shutdown_rx,
    } = deps;
    let SchedulerConfig { cadence } = config;
    let cadence = if cadence < MIN_CADENCE {
        tracing::warn!(
            requested_ms = cadence.as_millis() as u64,
            min_secs = MIN_CADENCE.as_secs(),
            "refresh cadence too short; using minimum"
        );
        MIN_CADENCE
    } else {
        cadence
    };

    tokio::spawn(run(dashboard, source, commands, shutdown_rx, cadence))
}

#[instrument(name = "scheduler", skip_all, fields(cadence_secs = cadence.as_secs()))]
async fn run<P: Page>(
    mut dashboard: Dashboard<P>,
    source: Arc<dyn ChartDataSource>,
    mut commands: mpsc::Receiver<DashboardCommand>,
    mut shutdown_rx: oneshot::Receiver<()>,
    cadence: Duration,
) -> Dashboard<P> {
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<RefreshOutcome>();

    // Initial load: select the default interval once.
    let initial = dashboard.active_interval();
    if let Some(request) = dashboard.select_interval(initial, Utc::now()) {
        launch(&source, request, &outcome_tx);
    }

    let mut tick = interval_at(Instant::now() + cadence, cadence);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut visible = true;
    let mut commands_open = true;

    loop {
        tokio::select! {
            _ = tick.tick(), if visible => {
                if dashboard.has_widgets() {
                    tracing::debug!(interval = %dashboard.active_interval(), "scheduled chart refresh");
                    if let Some(request) = dashboard.begin_refresh(Utc::now()) {
                        launch(&source, request, &outcome_tx);
                    }
                }
            }
            command = commands.recv(), if commands_open => {
                match command {
                    Some(DashboardCommand::SelectInterval(interval)) => {
                        if let Some(request) = dashboard.select_interval(interval, Utc::now()) {
                            launch(&source, request, &outcome_tx);
                        }
                    }
                    Some(DashboardCommand::ThemeChanged) => {
                        dashboard.on_theme_changed();
                    }
                    Some(DashboardCommand::SetTheme(theme)) => {
                        dashboard.page_mut().set_theme(theme);
                        dashboard.on_theme_changed();
                    }
                    Some(DashboardCommand::RefreshNow) => {
                        if let Some(request) = dashboard.begin_refresh(Utc::now()) {
                            launch(&source, request, &outcome_tx);
                        }
                    }
                    Some(DashboardCommand::VisibilityChanged(now_visible)) => {
                        if now_visible && !visible {
                            tracing::debug!("page visible; resuming chart refresh");
                            if let Some(request) = dashboard.begin_refresh(Utc::now()) {
                                launch(&source, request, &outcome_tx);
                            }
                            tick.reset();
                        } else if !now_visible && visible {
                            tracing::debug!("page hidden; pausing chart refresh");
                        }
                        visible = now_visible;
                    }
                    None => {
                        tracing::debug!("command channel closed");
                        commands_open = false;
                    }
                }
            }
            Some(outcome) = outcome_rx.recv() => {
                if let Applied::Rendered { widgets } = dashboard.apply_outcome(outcome) {
                    tracing::trace!(widgets, "refresh rendered");
                }
            }
            _ = &mut shutdown_rx => {
                tracing::debug!("Scheduler shutting down");
                break;
            }
        }
    }

    dashboard
}

/// Run one fetch as its own task. Overlapping fetches are neither merged nor cancelled.
fn launch(
    source: &Arc<dyn ChartDataSource>,
    request: RefreshRequest,
    outcome_tx: &mpsc::UnboundedSender<RefreshOutcome>,
) {
    let source = Arc::clone(source);
    let outcome_tx = outcome_tx.clone();
    tokio::spawn(async move {
        let RefreshRequest { generation, query } = request;
        let result = source.fetch_chart(&query).await;
        if outcome_tx
            .send(RefreshOutcome {
                generation,
                interval: query.interval,
                result,
            })
            .is_err()
        {
            tracing::debug!(generation, "scheduler gone; chart response dropped");
        }
    });
}
