use super::core::{LibraryListing, Msg, Picker};
use super::main::SnackScreen;
use crate::snack_image::SnackImage;
use std::time::Instant;

const RESULTS_BOTTOM_MARGIN: f32 = 70.0;

pub struct SnackApp {
    screen: SnackScreen,
    texture: Option<(SnackImage, egui::TextureHandle)>,
    appeared: bool,
}

impl SnackApp {
    pub fn new(screen: SnackScreen) -> Self {
        Self {
            screen,
            texture: None,
            appeared: false,
        }
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        let Some(image) = &self.screen.state.image else {
            self.texture = None;
            return;
        };

        if let Some((shown, _)) = &self.texture {
            if shown.same_pixels(image) {
                return;
            }
        }

        let rgba = image.upright().to_rgba8();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [rgba.width() as usize, rgba.height() as usize],
            rgba.as_raw(),
        );
        let texture = ctx.load_texture("snack_photo", color_image, egui::TextureOptions::LINEAR);
        self.texture = Some((image.clone(), texture));
    }

    fn render_buttons(&self, ctx: &egui::Context, msgs: &mut Vec<Msg>) {
        let state = &self.screen.state;
        let idle = state.picker.is_none();

        egui::TopBottomPanel::bottom("buttons").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let take_picture = ui.add_enabled(
                    idle && state.camera_available,
                    egui::Button::new("Take Picture"),
                );
                if take_picture.clicked() {
                    msgs.push(Msg::TakePicturePressed);
                }

                if ui.add_enabled(idle, egui::Button::new("Choose Photo")).clicked() {
                    msgs.push(Msg::ChoosePhotoPressed);
                }

                if state.classifying {
                    ui.spinner();
                }
            });
            ui.add_space(8.0);
        });
    }

    fn render_photo(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| match &self.texture {
                Some((_, texture)) => {
                    ui.add(egui::Image::new(texture).max_size(ui.available_size()));
                }
                None => {
                    ui.label(egui::RichText::new("No photo yet").weak());
                }
            });
        });
    }

    fn render_picker(&self, ctx: &egui::Context, msgs: &mut Vec<Msg>) {
        let Some(picker) = &self.screen.state.picker else {
            return;
        };

        let title = match picker {
            Picker::Camera => "Camera",
            Picker::PhotoLibrary(_) => "Photo Library",
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                match picker {
                    Picker::Camera => {
                        ui.label("Point the camera at a snack.");
                        if ui.button("Capture").clicked() {
                            msgs.push(Msg::CapturePressed);
                        }
                    }
                    Picker::PhotoLibrary(LibraryListing::Loading) => {
                        ui.spinner();
                    }
                    Picker::PhotoLibrary(LibraryListing::Failed(message)) => {
                        ui.label(format!("Could not open the photo library: {}", message));
                    }
                    Picker::PhotoLibrary(LibraryListing::Loaded(entries)) if entries.is_empty() => {
                        ui.label("No photos found.");
                    }
                    Picker::PhotoLibrary(LibraryListing::Loaded(entries)) => {
                        egui::ScrollArea::vertical()
                            .max_height(320.0)
                            .show(ui, |ui| {
                                for entry in entries {
                                    if ui.button(entry.name.as_str()).clicked() {
                                        msgs.push(Msg::PhotoChosen(entry.clone()));
                                    }
                                }
                            });
                    }
                }

                ui.separator();
                if ui.button("Cancel").clicked() {
                    msgs.push(Msg::PickerCancelled);
                }
            });
    }

    fn render_results(&self, ctx: &egui::Context, now: Instant) {
        let frame = self.screen.results_panel.frame(now);
        if frame.alpha <= 0.0 {
            return;
        }

        let text = self.screen.state.presentation.to_string();

        egui::Area::new(egui::Id::new("results_panel"))
            .anchor(
                egui::Align2::CENTER_BOTTOM,
                egui::vec2(0.0, frame.offset - RESULTS_BOTTOM_MARGIN),
            )
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(egui::Color32::WHITE.gamma_multiply(frame.alpha))
                    .rounding(10.0)
                    .inner_margin(egui::Margin::symmetric(24.0, 12.0))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(text)
                                .size(22.0)
                                .color(egui::Color32::BLACK.gamma_multiply(frame.alpha)),
                        );
                    });
            });
    }
}

impl eframe::App for SnackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if !self.appeared {
            self.appeared = true;
            self.screen.send(Msg::Appeared, now);
        }

        self.screen.poll(now);
        self.sync_texture(ctx);

        let mut msgs = Vec::new();
        self.render_buttons(ctx, &mut msgs);
        self.render_photo(ctx);
        self.render_picker(ctx, &mut msgs);
        self.render_results(ctx, now);

        for msg in msgs {
            self.screen.send(msg, now);
        }

        if self.screen.is_busy() || self.screen.results_panel.is_animating(now) {
            ctx.request_repaint();
        }
    }
}
