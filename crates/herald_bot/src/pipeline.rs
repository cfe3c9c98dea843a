//! The generate, authenticate, submit sequence and its two entry points.

use herald_core::{GeneratedPost, Pillar, PostType, SubmissionResult, find_pillar};
use herald_error::{DispatchError, DispatchErrorKind, HeraldError, HeraldResult};
use herald_models::ContentGenerator;
use herald_social::PostPlatform;
use herald_storage::{ConfigStore, DEFAULT_PILLARS_KEY, load_pillars};
use rand::seq::SliceRandom;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Which entry point started a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Trigger {
    /// `POST /` or `herald post`
    OnDemand,
    /// Internal timer or `herald run-once`
    Scheduled,
}

/// A post that was generated and accepted by the platform.
#[derive(Debug, Clone)]
pub struct PostOutcome {
    /// Pillar the post was written about
    pub pillar: Pillar,
    /// Style of the post
    pub post_type: PostType,
    /// Generated title and body
    pub post: GeneratedPost,
    /// Platform acknowledgment
    pub submission: SubmissionResult,
}

/// Record of one scheduled run, kept for logging and metrics only.
#[derive(Debug)]
pub struct RunReport {
    /// Pillar picked for the run, if any were available
    pub pillar: Option<Pillar>,
    /// Post type picked for the run
    pub post_type: PostType,
    /// Wall-clock duration
    pub elapsed: Duration,
    /// Outcome of the run
    pub result: HeraldResult<PostOutcome>,
}

impl RunReport {
    /// Whether the post was published.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs one post from pillar selection to submission.
///
/// Holds only read-only handles, so a single instance can serve concurrent
/// on-demand requests alongside the scheduler.
pub struct Pipeline {
    store: Arc<dyn ConfigStore>,
    pillars_key: String,
    fallback_pillars: Vec<Pillar>,
    generator: ContentGenerator,
    platform: Arc<dyn PostPlatform>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("store", &self.store.backend_name())
            .field("pillars_key", &self.pillars_key)
            .field("fallback_pillars", &self.fallback_pillars.len())
            .field("generator", &self.generator)
            .field("platform", &self.platform.platform_name())
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline.
    ///
    /// `fallback_pillars` is used whenever the store has no pillar list;
    /// pass [`herald_core::default_pillars`] for the standard five.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        generator: ContentGenerator,
        platform: Arc<dyn PostPlatform>,
        fallback_pillars: Vec<Pillar>,
    ) -> Self {
        Self {
            store,
            pillars_key: DEFAULT_PILLARS_KEY.to_string(),
            fallback_pillars,
            generator,
            platform,
        }
    }

    /// Read the pillar list from `key` instead of the default.
    pub fn with_pillars_key(mut self, key: impl Into<String>) -> Self {
        self.pillars_key = key.into();
        self
    }

    /// Pillar list for on-demand runs.
    ///
    /// Uses the stored list, or the fallback when the key is absent. Store
    /// failures are returned to the caller.
    #[instrument(skip(self), fields(key = %self.pillars_key))]
    pub async fn resolve_pillars(&self) -> HeraldResult<Vec<Pillar>> {
        match load_pillars(self.store.as_ref(), &self.pillars_key).await? {
            Some(pillars) => Ok(pillars),
            None => {
                debug!("Pillar key absent, using fallback list");
                Ok(self.fallback_pillars.clone())
            }
        }
    }

    /// Pillar list for scheduled runs.
    ///
    /// Any problem with the store (absent, empty, unreadable) falls back to
    /// the injected list with a warning.
    async fn scheduled_pillars(&self) -> Vec<Pillar> {
        match load_pillars(self.store.as_ref(), &self.pillars_key).await {
            Ok(Some(pillars)) if !pillars.is_empty() => pillars,
            Ok(Some(_)) => {
                warn!(key = %self.pillars_key, "Stored pillar list is empty, using fallback");
                self.fallback_pillars.clone()
            }
            Ok(None) => {
                warn!(key = %self.pillars_key, "No stored pillar list, using fallback");
                self.fallback_pillars.clone()
            }
            Err(e) => {
                warn!(
                    error = ?e,
                    key = %self.pillars_key,
                    "Failed to read pillar list, using fallback"
                );
                self.fallback_pillars.clone()
            }
        }
    }

    /// Publish one post for a caller-chosen pillar and post type.
    ///
    /// # Errors
    ///
    /// An unknown pillar or post type yields a client error (see
    /// [`HeraldError::is_client_error`]). Every later failure is returned
    /// unchanged.
    #[instrument(skip(self), fields(trigger = %Trigger::OnDemand))]
    pub async fn run_on_demand(
        &self,
        pillar_name: &str,
        post_type: &str,
    ) -> HeraldResult<PostOutcome> {
        let post_type = PostType::from_str(post_type.trim()).map_err(|_| {
            DispatchError::new(DispatchErrorKind::UnknownPostType {
                given: post_type.trim().to_string(),
                expected: PostType::expected_labels(),
            })
        })?;

        let pillars = self.resolve_pillars().await?;
        let pillar = find_pillar(&pillars, pillar_name)
            .cloned()
            .ok_or_else(|| {
                warn!(pillar = pillar_name, "Rejected unknown pillar");
                DispatchError::new(DispatchErrorKind::UnknownPillar(pillar_name.trim().to_string()))
            })?;

        self.execute(pillar, post_type).await
    }

    /// Publish one post for a randomly chosen pillar and post type.
    ///
    /// Never fails outward: the outcome is logged and returned in the
    /// report for metrics.
    #[instrument(skip(self), fields(trigger = %Trigger::Scheduled))]
    pub async fn run_scheduled(&self) -> RunReport {
        let started = Instant::now();
        let pillars = self.scheduled_pillars().await;

        let (pillar, post_type) = {
            let mut rng = rand::thread_rng();
            let post_type = PostType::all()
                .choose(&mut rng)
                .copied()
                .unwrap_or(PostType::Discussion);
            (pillars.choose(&mut rng).cloned(), post_type)
        };

        let result = match pillar.clone() {
            Some(pillar) => self.execute(pillar, post_type).await,
            None => Err(HeraldError::from(DispatchError::new(DispatchErrorKind::NoPillars))),
        };

        let report = RunReport {
            pillar,
            post_type,
            elapsed: started.elapsed(),
            result,
        };

        match &report.result {
            Ok(outcome) => info!(
                pillar = %outcome.pillar,
                post_type = %outcome.post_type,
                id = outcome.submission.id.as_deref().unwrap_or(""),
                elapsed_ms = report.elapsed.as_millis() as u64,
                "Scheduled post published"
            ),
            Err(e) => error!(
                error = ?e,
                pillar = report.pillar.as_ref().map(|p| p.name.as_str()).unwrap_or(""),
                post_type = %report.post_type,
                "Scheduled run failed"
            ),
        }

        report
    }

    /// Generate, authenticate, then submit. The three calls run strictly in
    /// sequence and the token is dropped at the end of the run.
    #[instrument(skip(self, pillar), fields(pillar = %pillar.name, post_type = %post_type))]
    async fn execute(&self, pillar: Pillar, post_type: PostType) -> HeraldResult<PostOutcome> {
        debug!("Starting pipeline run");

        let post = self.generator.generate(&pillar.name, post_type).await?;
        let token = self.platform.authenticate().await?;
        let submission = self
            .platform
            .submit(&post, &token, pillar.category_tag.as_deref())
            .await?;

        info!(
            platform = self.platform.platform_name(),
            target = self.platform.target(),
            "Pipeline run completed"
        );

        Ok(PostOutcome {
            pillar,
            post_type,
            post,
            submission,
        })
    }
}
