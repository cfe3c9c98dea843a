//! Herald server: HTTP API plus the internal scheduler.

use crate::{
    ApiState, HeraldConfig, Pipeline, PipelineMetrics, ScheduledBot, ScheduledMessage,
    create_router, spawn_scheduler,
};
use axum::Router;
use herald_error::{HeraldResult, ServerError, ServerErrorKind};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

/// Bind the HTTP listener.
pub async fn bind_listener(address: &str) -> HeraldResult<TcpListener> {
    TcpListener::bind(address).await.map_err(|e| {
        error!(error = ?e, address, "Failed to bind listener");
        ServerError::new(ServerErrorKind::Bind {
            address: address.to_string(),
            message: e.to_string(),
        })
        .into()
    })
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> HeraldResult<()> {
    if let Ok(address) = listener.local_addr() {
        info!(%address, "HTTP API listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())).into())
}

/// Server that runs the API and, when enabled, the scheduled bot.
pub struct HeraldServer {
    config: HeraldConfig,
    pipeline: Arc<Pipeline>,
    metrics: PipelineMetrics,
}

impl HeraldServer {
    /// Creates a new server around an assembled pipeline.
    pub fn new(config: HeraldConfig, pipeline: Pipeline) -> Self {
        Self {
            config,
            pipeline: Arc::new(pipeline),
            metrics: PipelineMetrics::new(),
        }
    }

    /// Metrics shared by the API and the scheduled bot.
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Starts the server and runs until Ctrl-C.
    #[instrument(skip(self), fields(bind = %self.config.server.bind))]
    pub async fn start(self) -> HeraldResult<()> {
        info!("Starting Herald server");

        let (tx, rx) = mpsc::channel(32);
        let bot_handle = if self.config.schedule.enabled {
            let bot = ScheduledBot::new(Arc::clone(&self.pipeline), self.metrics.clone(), rx);
            let handle = tokio::spawn(async move {
                bot.run().await;
            });
            spawn_scheduler(self.config.schedule.schedule_type(), tx.clone());
            Some(handle)
        } else {
            info!("Internal scheduler disabled");
            None
        };

        let listener = bind_listener(&self.config.server.bind).await?;
        let router = create_router(ApiState::new(Arc::clone(&self.pipeline), self.metrics.clone()));
        let result = serve(listener, router, shutdown_signal()).await;

        if let Some(handle) = bot_handle {
            // Lets an in-flight scheduled run finish before exiting
            let _ = tx.send(ScheduledMessage::Shutdown).await;
            if let Err(e) = handle.await {
                error!(error = ?e, "Scheduled bot task failed");
            }
        }

        info!("Herald server stopped");
        result
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = ?e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
