use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::error::AcquireError;
use crate::image_classifier::interface::ImageClassifier;
use crate::inference_dispatcher::ClassifyTask;
use crate::library::logger::interface::Logger;
use crate::photo_library::interface::PhotoLibrary;
use crate::snack_screen::core::{init, transition, Effect, Msg, State};
use crate::snack_screen::results_panel::ResultsPanel;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

struct PendingClassification {
    request_id: u64,
    task: ClassifyTask,
}

/// What a background worker was doing, so a worker that dies can still be answered.
#[derive(Debug, Clone, Copy)]
pub(super) enum BackgroundWork {
    Listing,
    Acquisition { request_id: u64 },
}

impl BackgroundWork {
    fn lost(self) -> Msg {
        match self {
            BackgroundWork::Listing => Msg::LibraryListed(Err(AcquireError::WorkerLost)),
            BackgroundWork::Acquisition { request_id } => Msg::Acquired {
                request_id,
                result: Err(AcquireError::WorkerLost),
            },
        }
    }
}

struct PendingBackground {
    work: BackgroundWork,
    receiver: Receiver<Msg>,
}

/// Owns the screen state on the UI thread and runs effects off it.
pub struct SnackScreen {
    pub state: State,
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub photo_library: Arc<dyn PhotoLibrary + Send + Sync>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub results_panel: ResultsPanel,
    background: Vec<PendingBackground>,
    pending: Vec<PendingClassification>,
}

impl SnackScreen {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        photo_library: Arc<dyn PhotoLibrary + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        now: Instant,
    ) -> Self {
        let (state, effects) = init(device_camera.is_available());

        let mut screen = Self {
            results_panel: ResultsPanel::new(config.panel.clone()),
            state,
            config,
            logger: logger.with_namespace("snack_screen"),
            device_camera,
            photo_library,
            image_classifier,
            background: Vec::new(),
            pending: Vec::new(),
        };

        screen.interpret_effects(effects, now);
        screen
    }

    pub fn send(&mut self, msg: Msg, now: Instant) {
        let _ = self
            .logger
            .info(&format!("msg: {}", msg.to_display_string()));

        match &msg {
            Msg::Acquired { request_id, .. } if *request_id != self.state.request_id => {
                let _ = self.logger.info(&format!(
                    "Dropping image #{}, latest request is #{}",
                    request_id, self.state.request_id
                ));
            }
            Msg::Acquired {
                result: Err(error), ..
            } => {
                let _ = self.logger.error(&format!("Failed to acquire image: {}", error));
            }
            Msg::LibraryListed(Err(error)) => {
                let _ = self.logger.error(&format!("Failed to list photos: {}", error));
            }
            Msg::ClassifyDone {
                request_id,
                result: Err(error),
            } => {
                let _ = self.logger.error(&format!(
                    "Failed to perform classification #{}: {}",
                    request_id, error
                ));
            }
            Msg::ClassifyDone { request_id, .. } if *request_id != self.state.request_id => {
                let _ = self.logger.info(&format!(
                    "Dropping result #{}, latest request is #{}",
                    request_id, self.state.request_id
                ));
            }
            _ => {}
        }

        let (new_state, effects) = transition(&self.config, self.state.clone(), msg);
        self.state = new_state;

        self.interpret_effects(effects, now);
    }

    /// Feeds finished background work back into the state machine. Call once per frame.
    pub fn poll(&mut self, now: Instant) {
        let mut finished = Vec::new();

        self.background
            .retain(|pending| match pending.receiver.try_recv() {
                Ok(msg) => {
                    finished.push(msg);
                    false
                }
                Err(TryRecvError::Empty) => true,
                Err(TryRecvError::Disconnected) => {
                    finished.push(pending.work.lost());
                    false
                }
            });

        self.pending.retain(|pending| match pending.task.try_result() {
            Some(result) => {
                finished.push(Msg::ClassifyDone {
                    request_id: pending.request_id,
                    result,
                });
                false
            }
            None => true,
        });

        for msg in finished {
            self.send(msg, now);
        }
    }

    /// Whether any background work has not reported back yet.
    pub fn is_busy(&self) -> bool {
        !self.background.is_empty() || !self.pending.is_empty()
    }

    /// Runs `job` on its own thread. Its message comes back through `poll`.
    pub(super) fn spawn_background<F>(&mut self, work: BackgroundWork, job: F)
    where
        F: FnOnce() -> Msg + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(1);
        std::thread::spawn(move || {
            let _ = sender.send(job());
        });
        self.background.push(PendingBackground { work, receiver });
    }

    pub(super) fn track_classification(&mut self, request_id: u64, task: ClassifyTask) {
        self.pending.push(PendingClassification { request_id, task });
    }

    fn interpret_effects(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            let _ = self
                .logger
                .info(&format!("effect: {}", effect.to_display_string()));
            self.interpret_effect(effect, now);
        }
    }
}
