use anyhow::{Context, Result, bail};
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{ChildStderr, Command, Stdio};
use std::thread::{self, JoinHandle};

/// 影片容器的 FourCC
pub const VIDEO_CODEC_TAG: &str = "mp4v";
pub const VIDEO_EXTENSION: &str = "mp4";

/// 從 stdin 讀取 PNG 串流並輸出 MPEG-4 Part 2 影片的 ffmpeg 指令
pub struct FfmpegCommand {
    fps: u32,
    destination_path: PathBuf,
    partial_path: PathBuf,
}

impl FfmpegCommand {
    /// `output_stem` 不含副檔名，實際輸出為 `<output_stem>.mp4`
    #[must_use]
    pub fn new(output_stem: &Path, fps: u32) -> Self {
        Self {
            fps,
            destination_path: Self::append_extension(output_stem, VIDEO_EXTENSION),
            partial_path: Self::append_extension(output_stem, &format!("partial.{VIDEO_EXTENSION}")),
        }
    }

    fn append_extension(stem: &Path, extension: &str) -> PathBuf {
        let mut path: OsString = stem.as_os_str().to_owned();
        path.push(".");
        path.push(extension);
        PathBuf::from(path)
    }

    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    /// 編碼中使用的暫存檔，成功後改名為 `destination_path`
    #[must_use]
    pub fn partial_path(&self) -> &Path {
        &self.partial_path
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new("ffmpeg");
        let fps = self.fps.to_string();

        cmd.args([
            "-hide_banner",
            "-loglevel", "error",
            "-y",
            "-f", "image2pipe",
            "-c:v", "png",
            "-framerate", &fps,
            "-i", "pipe:0",
            "-c:v", "mpeg4",
            "-tag:v", VIDEO_CODEC_TAG,
            "-q:v", "2",
            "-pix_fmt", "yuv420p",
            "-r", &fps,
            "-an",
            "-f", "mp4",
        ]);
        cmd.arg(&self.partial_path);

        cmd
    }
}

/// 以 ffmpeg 將圖片依序編碼為 `<output_stem>.mp4`，回傳實際輸出路徑
///
/// 所有幀的尺寸必須與第一幀相同，不做縮放
pub fn encode_video(
    frames: &[impl AsRef<Path>],
    output_stem: &Path,
    fps: u32,
) -> Result<PathBuf> {
    let Some(first) = frames.first() else {
        bail!("沒有任何幀可編碼");
    };

    let first = first.as_ref();
    let expected = image::image_dimensions(first)
        .with_context(|| format!("無法讀取圖片: {}", first.display()))?;
    for frame in &frames[1..] {
        let frame = frame.as_ref();
        let dimensions = image::image_dimensions(frame)
            .with_context(|| format!("無法讀取圖片: {}", frame.display()))?;
        if dimensions != expected {
            bail!(
                "圖片尺寸不一致: {} 為 {}x{}，第一幀為 {}x{}",
                frame.display(),
                dimensions.0,
                dimensions.1,
                expected.0,
                expected.1
            );
        }
    }

    let ffmpeg = FfmpegCommand::new(output_stem, fps);
    debug!(
        "編碼 {} 幀影片 ({}x{} @ {} fps) -> {}",
        frames.len(),
        expected.0,
        expected.1,
        fps,
        ffmpeg.destination_path().display()
    );

    if let Err(e) = run_ffmpeg(&ffmpeg, frames) {
        let _ = fs::remove_file(ffmpeg.partial_path());
        return Err(e);
    }

    fs::rename(ffmpeg.partial_path(), ffmpeg.destination_path()).with_context(|| {
        format!(
            "無法將暫存檔改名為 {}",
            ffmpeg.destination_path().display()
        )
    })?;

    Ok(ffmpeg.destination_path().to_path_buf())
}

fn run_ffmpeg(ffmpeg: &FfmpegCommand, frames: &[impl AsRef<Path>]) -> Result<()> {
    pipe_frames(ffmpeg.build_command(), frames)
}

/// 將每幀的原始位元組依序寫入子行程的 stdin
///
/// stderr 由背景執行緒持續讀取，子行程輸出大量錯誤訊息時不會卡住寫入
fn pipe_frames(mut cmd: Command, frames: &[impl AsRef<Path>]) -> Result<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("無法執行 {program}，請確認已安裝並在 PATH 中"))?;

    let stderr_reader = child.stderr.take().map(spawn_stderr_reader);

    let write_result = match child.stdin.take() {
        Some(mut stdin) => frames.iter().try_for_each(|frame| {
            let frame = frame.as_ref();
            let bytes = fs::read(frame)
                .with_context(|| format!("無法讀取圖片: {}", frame.display()))?;
            stdin
                .write_all(&bytes)
                .with_context(|| format!("寫入 {program} 輸入失敗"))
        }),
        None => Err(anyhow::anyhow!("無法取得 {program} 標準輸入")),
    };

    // stdin 已在上方離開作用域而關閉，子行程會收到 EOF
    let status = child
        .wait()
        .with_context(|| format!("等待 {program} 結束失敗"))?;
    let stderr = stderr_reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    if !status.success() {
        bail!("{program} 編碼失敗 ({status}): {}", stderr.trim());
    }

    write_result
}

fn spawn_stderr_reader(mut stderr: ChildStderr) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = stderr.read_to_end(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    })
}
