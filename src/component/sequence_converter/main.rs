use super::media_encoder::{ExternalEncoder, MediaEncoder};
use super::sequence_grouper::{Sequence, group_sequences, scan_screenshots};
use crate::config::{ConvertConfig, OutputType};
use crate::error::ToolError;
use crate::tools::{ProgressBarReporter, ProgressReporter, ensure_directory_exists};
use anyhow::Result;
use console::style;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStatus {
    Completed,
    Failed,
}

/// 單一序列的編碼結果
#[derive(Debug)]
pub struct SequenceOutcome {
    pub key: String,
    pub frame_count: usize,
    pub output_path: PathBuf,
    pub status: SequenceStatus,
    pub error_message: Option<String>,
}

#[derive(Debug, Default)]
pub struct ConvertSummary {
    pub outcomes: Vec<SequenceOutcome>,
    /// 收到中斷信號而提前停止
    pub interrupted: bool,
}

impl ConvertSummary {
    #[must_use]
    pub fn completed(&self) -> usize {
        self.count(SequenceStatus::Completed)
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(SequenceStatus::Failed)
    }

    fn count(&self, status: SequenceStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

/// 截圖序列轉 GIF / 影片元件
pub struct SequenceConverter<E = ExternalEncoder> {
    config: ConvertConfig,
    encoder: E,
    shutdown_signal: Arc<AtomicBool>,
}

impl SequenceConverter {
    #[must_use]
    pub const fn new(config: ConvertConfig, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self::with_encoder(config, ExternalEncoder, shutdown_signal)
    }
}

impl<E: MediaEncoder> SequenceConverter<E> {
    pub const fn with_encoder(
        config: ConvertConfig,
        encoder: E,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            encoder,
            shutdown_signal,
        }
    }

    /// 以終端機進度條執行並印出摘要
    pub fn run(&self) -> Result<ConvertSummary> {
        println!(
            "{}",
            style(format!("=== 截圖轉換為 {} ===", self.config.output_type))
                .cyan()
                .bold()
        );

        let progress = ProgressBarReporter::new(0, "編碼序列中...");
        let summary = self.convert(&progress)?;
        self.print_summary(&summary);
        Ok(summary)
    }

    /// 掃描、分組並逐一編碼每個序列
    ///
    /// 檔名格式錯誤會讓整批失敗且不產生任何輸出；單一序列編碼失敗只記錄在結果中
    pub fn convert(&self, progress: &dyn ProgressReporter) -> Result<ConvertSummary> {
        ensure_directory_exists(&self.config.output_folder)?;

        let files = scan_screenshots(&self.config.image_folder)?;
        if files.is_empty() {
            println!("{}", style("找不到任何 screenshot_seq_*.png 檔案").yellow());
            return Ok(ConvertSummary::default());
        }

        let sequences = group_sequences(&files)?;
        info!("共 {} 張截圖，分為 {} 個序列", files.len(), sequences.len());

        let mut summary = ConvertSummary::default();

        for (index, sequence) in sequences.iter().enumerate() {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷信號，停止編碼剩餘序列");
                summary.interrupted = true;
                break;
            }

            summary.outcomes.push(self.encode_sequence(sequence));
            progress.on_progress(index + 1, sequences.len());
        }

        progress.finish();
        Ok(summary)
    }

    fn encode_sequence(&self, sequence: &Sequence) -> SequenceOutcome {
        let output_folder = &self.config.output_folder;
        let result = match self.config.output_type {
            OutputType::Gif => {
                let output_path =
                    output_folder.join(format!("{}.{}", sequence.key, OutputType::Gif.extension()));
                self.encoder
                    .encode_gif(&sequence.files, &output_path, self.config.duration_ms)
                    .map(|()| output_path)
            }
            OutputType::Video => self.encoder.encode_video(
                &sequence.files,
                &output_folder.join(&sequence.key),
                self.config.fps,
            ),
        };

        match result {
            Ok(output_path) => {
                info!("{} 已儲存: {}", sequence.key, output_path.display());
                SequenceOutcome {
                    key: sequence.key.clone(),
                    frame_count: sequence.files.len(),
                    output_path,
                    status: SequenceStatus::Completed,
                    error_message: None,
                }
            }
            Err(e) => {
                let err = ToolError::Encoding {
                    sequence: sequence.key.clone(),
                    reason: format!("{e:#}"),
                };
                error!("{err}");
                SequenceOutcome {
                    key: sequence.key.clone(),
                    frame_count: sequence.files.len(),
                    output_path: PathBuf::new(),
                    status: SequenceStatus::Failed,
                    error_message: Some(err.to_string()),
                }
            }
        }
    }

    fn print_summary(&self, summary: &ConvertSummary) {
        if summary.outcomes.is_empty() && !summary.interrupted {
            return;
        }

        println!();
        for outcome in &summary.outcomes {
            match outcome.status {
                SequenceStatus::Completed => println!(
                    "  {} {} ({} 幀) -> {}",
                    style("✓").green(),
                    outcome.key,
                    outcome.frame_count,
                    outcome.output_path.display()
                ),
                SequenceStatus::Failed => println!(
                    "  {} {}",
                    style("✗").red(),
                    outcome.error_message.as_deref().unwrap_or(&outcome.key)
                ),
            }
        }

        println!();
        println!("{}", style("=== 轉換摘要 ===").cyan().bold());
        println!("  總計: {} 個序列", summary.outcomes.len());
        println!("  成功: {} 個", style(summary.completed()).green());
        if summary.failed() > 0 {
            println!("  失敗: {} 個", style(summary.failed()).red());
        }
        if summary.interrupted {
            println!("{}", style("已中斷，剩餘序列未處理").yellow());
        }

        info!(
            "轉換完成 - 成功: {}, 失敗: {}",
            summary.completed(),
            summary.failed()
        );
    }
}
