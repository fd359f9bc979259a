//! Generation orchestrator.
//!
//! Drives one run at a time through
//! `Idle -> PlanningScene -> RenderingShots(i) -> Complete`, with `Error`
//! reachable from planning or any render. Every state change is published as
//! a [`GenerationSnapshot`] on a watch channel.
//!
//! Each run captures the epoch it was started with. Every publish checks that
//! epoch against the current one under the channel lock, so results of a run
//! that was reset or replaced never reach observers. In-flight remote calls
//! are left to finish; their results are dropped.

use std::sync::Arc;

use shotlist_genai::SceneService;
use shotlist_models::{FormState, GenerationSnapshot, GenerationStatus};
use tokio::sync::watch;
use tracing::{debug, Instrument};

use crate::error::{PipelineError, PipelineResult};
use crate::logging::RunLogger;

pub const PLANNING_LABEL: &str = "Step 1/2: Generating creative scene prompts...";

/// Progress label while rendering shot `index` (0-based) of `total`.
pub fn rendering_label(index: usize, total: usize) -> String {
    format!("Step 2/2: Rendering image {} of {}...", index + 1, total)
}

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every shot was rendered and the snapshot is `Complete`.
    Completed { scene_id: String, rendered: usize },
    /// A reset or newer submit replaced this run; its results were discarded.
    Superseded,
}

pub struct Orchestrator {
    service: Arc<dyn SceneService>,
    state: watch::Sender<GenerationSnapshot>,
}

impl Orchestrator {
    pub fn new(service: Arc<dyn SceneService>) -> Self {
        let (state, _) = watch::channel(GenerationSnapshot::idle(0));
        Self { service, state }
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<GenerationSnapshot> {
        self.state.subscribe()
    }

    /// Number of live receivers from [`Orchestrator::subscribe`].
    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> GenerationSnapshot {
        self.state.borrow().clone()
    }

    /// Start a new run: bump the epoch, clear any scene and error, and enter
    /// `PlanningScene`.
    ///
    /// Returns the run's epoch, to be passed to [`Orchestrator::run`]. Fails
    /// with [`PipelineError::Busy`] while another run is in flight.
    pub fn submit(&self) -> PipelineResult<u64> {
        let mut started = Err(PipelineError::Busy);
        self.state.send_if_modified(|snapshot| {
            if snapshot.is_busy() {
                return false;
            }
            let epoch = snapshot.epoch + 1;
            *snapshot = GenerationSnapshot {
                epoch,
                status: GenerationStatus::PlanningScene,
                progress_label: Some(PLANNING_LABEL.to_string()),
                scene: None,
                error: None,
            };
            started = Ok(epoch);
            true
        });
        started
    }

    /// Drive the run started by [`Orchestrator::submit`] to its end.
    ///
    /// Returns `Err` when the run failed and the error was published. A
    /// failure of a superseded run is not published and yields
    /// `Ok(RunOutcome::Superseded)`.
    pub async fn run(&self, epoch: u64, form: FormState) -> PipelineResult<RunOutcome> {
        let mut logger = RunLogger::new(epoch, "generate");
        let span = logger.create_span();
        logger.log_start(&format!(
            "category={}, images={}",
            form.product_category,
            form.images.len()
        ));

        let plan = self
            .service
            .request_scene_plan(form.product_category, &form.style, &form.images)
            .instrument(span.clone())
            .await;

        let scene = match plan {
            Ok(scene) => scene,
            Err(e) => return self.fail(epoch, PipelineError::Plan(e), &logger),
        };

        logger.set_scene_id(&scene.scene_id);
        let total = scene.shot_count();

        let adopted = self.publish(epoch, |snapshot| {
            snapshot.scene = Some(scene.clone());
            if total == 0 {
                snapshot.status = GenerationStatus::Complete;
                snapshot.progress_label = None;
            } else {
                snapshot.status = GenerationStatus::RenderingShots { index: 0, total };
                snapshot.progress_label = Some(rendering_label(0, total));
            }
        });
        if !adopted {
            return Ok(self.superseded(&logger));
        }
        logger.log_progress(&format!("scene planned with {} shots", total));

        for (index, shot) in scene.shots.iter().enumerate() {
            let labelled = self.publish(epoch, |snapshot| {
                snapshot.status = GenerationStatus::RenderingShots { index, total };
                snapshot.progress_label = Some(rendering_label(index, total));
            });
            if !labelled {
                return Ok(self.superseded(&logger));
            }

            debug!(epoch, index, shot_type = %shot.shot_type, "Requesting shot image");

            let image = match self
                .service
                .request_shot_image(&shot.prompt_text, &shot.shot_type)
                .instrument(span.clone())
                .await
            {
                Ok(image) => image,
                Err(source) => {
                    let error = PipelineError::Image {
                        sequence_number: shot.sequence_number,
                        source,
                    };
                    return self.fail(epoch, error, &logger);
                }
            };

            let stored = self.publish(epoch, |snapshot| {
                let updated = snapshot
                    .scene
                    .as_ref()
                    .and_then(|current| current.with_rendered_image(index, image));
                if let Some(updated) = updated {
                    snapshot.scene = Some(updated);
                }
            });
            if !stored {
                return Ok(self.superseded(&logger));
            }

            logger.log_progress(&format!("rendered image {} of {}", index + 1, total));
        }

        if total > 0 {
            let finished = self.publish(epoch, |snapshot| {
                snapshot.status = GenerationStatus::Complete;
                snapshot.progress_label = None;
            });
            if !finished {
                return Ok(self.superseded(&logger));
            }
        }

        logger.log_completion(&format!("{} shots rendered", total));

        Ok(RunOutcome::Completed {
            scene_id: scene.scene_id.clone(),
            rendered: total,
        })
    }

    /// Submit and run to completion in one call.
    pub async fn generate(&self, form: FormState) -> PipelineResult<RunOutcome> {
        let epoch = self.submit()?;
        self.run(epoch, form).await
    }

    /// Return to `Idle`, discarding the scene, the error and any run in flight.
    ///
    /// Returns the new epoch.
    pub fn reset(&self) -> u64 {
        let mut epoch = 0;
        self.state.send_modify(|snapshot| {
            epoch = snapshot.epoch + 1;
            *snapshot = GenerationSnapshot::idle(epoch);
        });
        debug!(epoch, "Generation reset");
        epoch
    }

    /// Apply `update` if `epoch` is still current. Returns whether it applied.
    fn publish(&self, epoch: u64, update: impl FnOnce(&mut GenerationSnapshot)) -> bool {
        self.state.send_if_modified(|snapshot| {
            if snapshot.epoch != epoch {
                return false;
            }
            update(snapshot);
            true
        })
    }

    fn fail(
        &self,
        epoch: u64,
        error: PipelineError,
        logger: &RunLogger,
    ) -> PipelineResult<RunOutcome> {
        let message = error.user_message();
        let published = self.publish(epoch, |snapshot| {
            snapshot.status = GenerationStatus::Error;
            snapshot.progress_label = None;
            snapshot.error = Some(message);
        });

        if !published {
            logger.log_warning(&format!("discarding failure of superseded run: {}", error));
            return Ok(RunOutcome::Superseded);
        }

        logger.log_error(&error.to_string());
        Err(error)
    }

    fn superseded(&self, logger: &RunLogger) -> RunOutcome {
        logger.log_warning("run superseded, discarding results");
        RunOutcome::Superseded
    }
}
