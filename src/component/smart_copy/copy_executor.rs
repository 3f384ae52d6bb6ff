use crate::tools::{DirectoryEntry, ProgressReporter};
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// 複製結果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyResult {
    /// 選取的項目數
    pub selected: usize,
    /// 實際複製的檔案數
    pub copied: usize,
    /// 非一般檔案而略過的項目數
    pub skipped: usize,
    /// 收到中斷信號而提前停止
    pub interrupted: bool,
}

/// 將選取的檔案複製到目的資料夾，保留檔名並覆寫同名檔案
///
/// 資料夾與特殊檔案會被略過；任何複製錯誤都會中止剩餘的複製
pub fn copy_selected(
    selected: &[DirectoryEntry],
    dest_dir: &Path,
    progress: &dyn ProgressReporter,
    shutdown_signal: &AtomicBool,
) -> Result<CopyResult> {
    let mut result = CopyResult {
        selected: selected.len(),
        ..Default::default()
    };

    for (index, entry) in selected.iter().enumerate() {
        if shutdown_signal.load(Ordering::SeqCst) {
            result.interrupted = true;
            break;
        }

        match entry.path.file_name() {
            Some(file_name) if entry.path.is_file() => {
                let target_path = dest_dir.join(file_name);
                fs::copy(&entry.path, &target_path).with_context(|| {
                    format!(
                        "無法複製 {} -> {}",
                        entry.path.display(),
                        target_path.display()
                    )
                })?;
                debug!("已複製: {}", entry.path.display());
                result.copied += 1;
            }
            _ => {
                debug!("略過非一般檔案: {}", entry.path.display());
                result.skipped += 1;
            }
        }

        progress.on_progress(index + 1, selected.len());
    }

    progress.finish();
    Ok(result)
}
