use super::ffmpeg_command::encode_video;
use super::gif_encoder::encode_gif;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// 將排序好的圖片編碼為動畫或影片
pub trait MediaEncoder {
    /// 寫出 `output_path`，每幀顯示 `frame_duration_ms` 毫秒並無限循環
    fn encode_gif(&self, frames: &[PathBuf], output_path: &Path, frame_duration_ms: u32)
    -> Result<()>;

    /// 寫出 `<output_stem>.mp4` 並回傳其路徑
    fn encode_video(&self, frames: &[PathBuf], output_stem: &Path, fps: u32) -> Result<PathBuf>;
}

/// 以 image crate 產生 GIF、以 ffmpeg 產生影片
#[derive(Debug, Default, Clone, Copy)]
pub struct ExternalEncoder;

impl MediaEncoder for ExternalEncoder {
    fn encode_gif(
        &self,
        frames: &[PathBuf],
        output_path: &Path,
        frame_duration_ms: u32,
    ) -> Result<()> {
        encode_gif(frames, output_path, frame_duration_ms)
    }

    fn encode_video(&self, frames: &[PathBuf], output_stem: &Path, fps: u32) -> Result<PathBuf> {
        encode_video(frames, output_stem, fps)
    }
}
