//! 截圖序列轉換元件
//!
//! 將 `screenshot_seq_<序列>_frame_<幀>.png` 依序列分組，每組輸出一個 GIF 或 MP4

mod ffmpeg_command;
mod gif_encoder;
mod main;
mod media_encoder;
mod sequence_grouper;

pub use ffmpeg_command::{FfmpegCommand, VIDEO_CODEC_TAG, VIDEO_EXTENSION, encode_video};
pub use gif_encoder::encode_gif;
pub use main::{ConvertSummary, SequenceConverter, SequenceOutcome, SequenceStatus};
pub use media_encoder::{ExternalEncoder, MediaEncoder};
pub use sequence_grouper::{
    SCREENSHOT_PREFIX, SCREENSHOT_SUFFIX, ScreenshotFile, Sequence, group_sequences,
    scan_screenshots,
};
