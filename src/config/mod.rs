pub mod types;

pub use types::{
    ConvertConfig, CopyConfig, DEFAULT_GIF_DURATION_MS, DEFAULT_VIDEO_FPS, OutputType,
    SelectionCriterion,
};
