//! Scheduled trigger: a timer task feeding a single bot actor.

use crate::{Pipeline, PipelineMetrics, ScheduleType, Trigger};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Message types for the scheduled bot.
#[derive(Debug)]
pub enum ScheduledMessage {
    /// Run one scheduled post
    Trigger,
    /// Shutdown the bot
    Shutdown,
}

/// Bot that publishes a random post each time it is triggered.
///
/// Messages are handled one at a time, so scheduled runs never overlap.
pub struct ScheduledBot {
    pipeline: Arc<Pipeline>,
    metrics: PipelineMetrics,
    rx: mpsc::Receiver<ScheduledMessage>,
}

impl ScheduledBot {
    /// Creates a new scheduled bot.
    pub fn new(
        pipeline: Arc<Pipeline>,
        metrics: PipelineMetrics,
        rx: mpsc::Receiver<ScheduledMessage>,
    ) -> Self {
        Self {
            pipeline,
            metrics,
            rx,
        }
    }

    /// Runs the bot loop until shutdown or until every sender is dropped.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("Scheduled bot started");

        while let Some(msg) = self.rx.recv().await {
            match msg {
                ScheduledMessage::Trigger => self.publish().await,
                ScheduledMessage::Shutdown => {
                    info!("Scheduled bot shutting down");
                    break;
                }
            }
        }
    }

    async fn publish(&self) {
        self.metrics.record_execution(Trigger::Scheduled);
        let report = self.pipeline.run_scheduled().await;
        if report.is_success() {
            self.metrics.record_success(Trigger::Scheduled);
        } else {
            self.metrics.record_failure(Trigger::Scheduled);
        }
    }
}

/// Spawn the timer that sends [`ScheduledMessage::Trigger`] per `schedule`.
///
/// The task ends when the schedule is exhausted or the bot's channel closes.
pub fn spawn_scheduler(
    schedule: ScheduleType,
    tx: mpsc::Sender<ScheduledMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(schedule = %schedule, "Scheduler started");
        loop {
            let now = Utc::now();
            let Some(delay) = schedule.delay_until_next(now) else {
                warn!(schedule = %schedule, "Schedule has no further runs");
                break;
            };

            debug!(delay_secs = delay.as_secs(), "Next scheduled post");
            sleep(delay).await;

            if tx.send(ScheduledMessage::Trigger).await.is_err() {
                error!("Scheduled bot channel closed");
                break;
            }
        }
    })
}
