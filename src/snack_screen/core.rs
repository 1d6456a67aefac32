use crate::config::Config;
use crate::error::AcquireError;
use crate::inference_dispatcher::ClassifyResult;
use crate::photo_library::interface::PhotoEntry;
use crate::snack_image::SnackImage;
use crate::snack_screen::presentation::Presentation;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryListing {
    Loading,
    Loaded(Vec<PhotoEntry>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Picker {
    Camera,
    PhotoLibrary(LibraryListing),
}

#[derive(Debug, Clone)]
pub struct State {
    pub presentation: Presentation,
    pub picker: Option<Picker>,
    pub image: Option<SnackImage>,
    /// Generation of the most recent acquisition; older results are stale.
    pub request_id: u64,
    pub classifying: bool,
    pub camera_available: bool,
    pub first_appearance: bool,
}

#[derive(Debug)]
pub enum Msg {
    Appeared,
    TakePicturePressed,
    ChoosePhotoPressed,
    LibraryListed(Result<Vec<PhotoEntry>, AcquireError>),
    PhotoChosen(PhotoEntry),
    CapturePressed,
    PickerCancelled,
    Acquired {
        request_id: u64,
        result: Result<SnackImage, AcquireError>,
    },
    ClassifyDone { request_id: u64, result: ClassifyResult },
}

#[derive(Debug, Clone)]
pub enum Effect {
    ShowResults { delay: Duration },
    HideResults,
    ListLibrary,
    CaptureFrame { request_id: u64 },
    LoadPhoto { request_id: u64, entry: PhotoEntry },
    Classify { request_id: u64, image: SnackImage },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Classify { request_id, .. } => {
                format!("Classify {{ request_id: {} }}", request_id)
            }
            effect => format!("{:?}", effect),
        }
    }
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::Acquired {
                request_id,
                result: Ok(_),
            } => format!("Acquired {{ request_id: {}, result: Ok(..) }}", request_id),
            msg => format!("{:?}", msg),
        }
    }
}

pub fn init(camera_available: bool) -> (State, Vec<Effect>) {
    (
        State {
            presentation: Presentation::Hint,
            picker: None,
            image: None,
            request_id: 0,
            classifying: false,
            camera_available,
            first_appearance: true,
        },
        vec![],
    )
}

fn open_picker(state: State, picker: Picker) -> (State, Vec<Effect>) {
    let mut effects = vec![Effect::HideResults];
    if matches!(picker, Picker::PhotoLibrary(_)) {
        effects.push(Effect::ListLibrary);
    }
    (
        State {
            picker: Some(picker),
            ..state
        },
        effects,
    )
}

/// Starts a new acquisition. Anything still in flight for older ids becomes stale.
fn begin_acquisition(state: State, effect: impl FnOnce(u64) -> Effect) -> (State, Vec<Effect>) {
    let request_id = state.request_id + 1;
    (
        State {
            picker: None,
            request_id,
            classifying: true,
            ..state
        },
        vec![effect(request_id)],
    )
}

fn show_presentation(
    config: &Config,
    state: State,
    presentation: Presentation,
) -> (State, Vec<Effect>) {
    (
        State {
            presentation,
            ..state
        },
        vec![Effect::ShowResults {
            delay: config.panel.show_delay,
        }],
    )
}

pub fn transition(config: &Config, state: State, msg: Msg) -> (State, Vec<Effect>) {
    match (state.picker.clone(), msg) {
        (_, Msg::Appeared) => {
            if state.first_appearance {
                (
                    State {
                        first_appearance: false,
                        ..state
                    },
                    vec![Effect::ShowResults {
                        delay: config.panel.first_hint_delay,
                    }],
                )
            } else {
                (state, vec![])
            }
        }

        // Opening a picker
        (None, Msg::TakePicturePressed) if state.camera_available => {
            open_picker(state, Picker::Camera)
        }
        (None, Msg::ChoosePhotoPressed) => {
            open_picker(state, Picker::PhotoLibrary(LibraryListing::Loading))
        }

        // Inside a picker
        (Some(Picker::PhotoLibrary(LibraryListing::Loading)), Msg::LibraryListed(result)) => {
            let listing = match result {
                Ok(entries) => LibraryListing::Loaded(entries),
                Err(error) => LibraryListing::Failed(error.to_string()),
            };
            (
                State {
                    picker: Some(Picker::PhotoLibrary(listing)),
                    ..state
                },
                vec![],
            )
        }
        (Some(Picker::PhotoLibrary(LibraryListing::Loaded(entries))), Msg::PhotoChosen(entry))
            if entries.contains(&entry) =>
        {
            begin_acquisition(state, |request_id| Effect::LoadPhoto { request_id, entry })
        }
        (Some(Picker::Camera), Msg::CapturePressed) => {
            begin_acquisition(state, |request_id| Effect::CaptureFrame { request_id })
        }
        (Some(_), Msg::PickerCancelled) => (
            State {
                picker: None,
                ..state
            },
            vec![],
        ),

        // Acquisition finished
        (
            _,
            Msg::Acquired {
                request_id,
                result: Ok(image),
            },
        ) if request_id == state.request_id => (
            State {
                image: Some(image.clone()),
                ..state
            },
            vec![Effect::HideResults, Effect::Classify { request_id, image }],
        ),
        (
            _,
            Msg::Acquired {
                request_id,
                result: Err(error),
            },
        ) if request_id == state.request_id => {
            let state = State {
                classifying: false,
                ..state
            };
            show_presentation(config, state, Presentation::Error(error.to_string()))
        }

        // Classification finished
        (_, Msg::ClassifyDone { request_id, result }) if request_id == state.request_id => {
            let presentation = Presentation::from_result(&result, config.min_confidence);
            let state = State {
                classifying: false,
                ..state
            };
            show_presentation(config, state, presentation)
        }

        // Stale results and presses that make no sense in the current state
        _ => (state, vec![]),
    }
}
