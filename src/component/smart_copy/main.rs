use super::copy_executor::{CopyResult, copy_selected};
use super::destination::prepare_destination;
use super::file_selector::select_files;
use crate::config::{CopyConfig, SelectionCriterion};
use crate::tools::{ProgressBarReporter, ProgressReporter};
use anyhow::Result;
use console::style;
use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 依範圍或百分比選擇性複製檔案元件
pub struct SmartCopy {
    config: CopyConfig,
    shutdown_signal: Arc<AtomicBool>,
}

impl SmartCopy {
    pub const fn new(config: CopyConfig, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    /// 以終端機進度條執行並印出結果
    pub fn run(&self) -> Result<CopyResult> {
        println!("{}", style("=== 選擇性複製檔案 ===").cyan().bold());
        match &self.config.criterion {
            SelectionCriterion::RangeFilter {
                prefix,
                lower_limit,
                upper_limit,
            } => println!(
                "{}",
                style(format!("範圍模式: {prefix}_<{lower_limit}..={upper_limit}>_*")).dim()
            ),
            SelectionCriterion::PercentageSample { percentage } => {
                println!("{}", style(format!("抽樣模式: {percentage}%")).dim());
            }
        }

        let progress = ProgressBarReporter::new(0, "複製檔案中...");
        let result = self.copy(&progress)?;
        self.print_result(&result);
        Ok(result)
    }

    /// 準備目的資料夾、選取並複製
    ///
    /// 目的資料夾不存在且未要求建立時，不會複製任何檔案
    pub fn copy(&self, progress: &dyn ProgressReporter) -> Result<CopyResult> {
        prepare_destination(&self.config.dest_dir, self.config.create_dest)?;

        let selected = select_files(&self.config.source_dir, &self.config.criterion)?;
        info!(
            "從 {} 選取 {} 個項目",
            self.config.source_dir.display(),
            selected.len()
        );

        let result = copy_selected(
            &selected,
            &self.config.dest_dir,
            progress,
            &self.shutdown_signal,
        )?;

        if result.interrupted {
            warn!("收到中斷信號，已複製 {} 個檔案後停止", result.copied);
        }

        Ok(result)
    }

    fn print_result(&self, result: &CopyResult) {
        println!(
            "{}",
            style(format!(
                "Copied {} files to {}",
                result.copied,
                self.config.dest_dir.display()
            ))
            .green()
        );
        if result.skipped > 0 {
            println!(
                "{}",
                style(format!("略過 {} 個非一般檔案", result.skipped)).dim()
            );
        }
        if result.interrupted {
            println!("{}", style("已中斷，剩餘檔案未複製").yellow());
        }
    }
}
