//! Trigger dispatch, scheduling and HTTP API for the Herald posting bot.
//!
//! A [`Pipeline`] runs one post end to end: generate, authenticate, submit.
//! It is driven from two places that share nothing mutable:
//!
//! - **On demand**: `POST /` on the router from [`create_router`]
//! - **Scheduled**: a [`ScheduledBot`] fed by a timer built from a
//!   [`ScheduleType`], or a single `run-once` invocation
//!
//! [`HeraldServer`] wires both together from a [`HeraldConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod factory;
mod metrics;
mod pipeline;
mod schedule;
mod scheduled;
mod server;

pub use api::{ApiState, LIVENESS_MESSAGE, TriggerRequest, TriggerResponse, create_router};
pub use config::{
    DEFAULT_BIND, DEFAULT_CRON, GeneratorSection, HeraldConfig, HttpSection, LogSection,
    ProviderKind, RedditSection, ScheduleSection, ServerSection, StoreBackend, StoreSection,
};
pub use factory::{
    build_http_client, build_pipeline, build_platform, build_store, build_text_generator,
};
pub use metrics::{MetricsSnapshot, PipelineMetrics, TriggerMetricSnapshot};
pub use pipeline::{Pipeline, PostOutcome, RunReport, Trigger};
pub use schedule::ScheduleType;
pub use scheduled::{ScheduledBot, ScheduledMessage, spawn_scheduler};
pub use server::{HeraldServer, bind_listener, serve};
