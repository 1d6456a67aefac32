use super::main::{BackgroundWork, SnackScreen};
use crate::inference_dispatcher::dispatch;
use crate::snack_screen::core::{Effect, Msg};
use std::time::Instant;

impl SnackScreen {
    pub(super) fn interpret_effect(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::ShowResults { delay } => self.results_panel.show(now, delay),
            Effect::HideResults => self.results_panel.hide(now),
            Effect::ListLibrary => {
                let photo_library = self.photo_library.clone();
                self.spawn_background(BackgroundWork::Listing, move || {
                    Msg::LibraryListed(photo_library.entries())
                });
            }
            Effect::CaptureFrame { request_id } => {
                let device_camera = self.device_camera.clone();
                self.spawn_background(BackgroundWork::Acquisition { request_id }, move || {
                    Msg::Acquired {
                        request_id,
                        result: device_camera.capture_frame(),
                    }
                });
            }
            Effect::LoadPhoto { request_id, entry } => {
                let photo_library = self.photo_library.clone();
                self.spawn_background(BackgroundWork::Acquisition { request_id }, move || {
                    Msg::Acquired {
                        request_id,
                        result: photo_library.load(&entry),
                    }
                });
            }
            Effect::Classify { request_id, image } => {
                let task = dispatch(self.image_classifier.clone(), image);
                self.track_classification(request_id, task);
            }
        }
    }
}
