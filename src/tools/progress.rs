use indicatif::{ProgressBar, ProgressStyle};

/// 進度回報介面，讓選取與複製邏輯不直接依賴終端機輸出
pub trait ProgressReporter {
    /// 已處理 `done` 個，共 `total` 個
    fn on_progress(&self, done: usize, total: usize);

    fn finish(&self) {}
}

/// 不輸出任何東西
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn on_progress(&self, _done: usize, _total: usize) {}
}

impl<F> ProgressReporter for F
where
    F: Fn(usize, usize),
{
    fn on_progress(&self, done: usize, total: usize) {
        self(done, total);
    }
}

/// 以 indicatif 進度條顯示
pub struct ProgressBarReporter {
    progress_bar: ProgressBar,
}

impl ProgressBarReporter {
    #[must_use]
    pub fn new(total: usize, message: &str) -> Self {
        let progress_bar = ProgressBar::new(total as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress_bar.set_message(message.to_string());
        Self { progress_bar }
    }
}

impl ProgressReporter for ProgressBarReporter {
    fn on_progress(&self, done: usize, total: usize) {
        self.progress_bar.set_length(total as u64);
        self.progress_bar.set_position(done as u64);
    }

    fn finish(&self) {
        self.progress_bar.finish_with_message("完成");
    }
}
