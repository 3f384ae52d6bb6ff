//! 錯誤類型
//!
//! 兩個工具共用的錯誤分類，執行檔依此決定結束代碼

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// 參數組合不完整或數值不合法
    #[error("參數錯誤: {0}")]
    Usage(String),

    /// 目的資料夾不存在且未要求建立
    #[error("目的資料夾不存在: {}", .path.display())]
    MissingDestination { path: PathBuf },

    /// 截圖檔名不符合 screenshot_seq_<序列>_frame_<幀>.png
    #[error("檔名格式錯誤 {name}: {reason}")]
    MalformedFilename { name: String, reason: String },

    /// 編碼器拒絕某個序列（讀取失敗、尺寸不一致等）
    #[error("序列 {sequence} 編碼失敗: {reason}")]
    Encoding { sequence: String, reason: String },
}

impl ToolError {
    /// 對應的行程結束代碼
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// 從 anyhow 錯誤鏈中找出 `ToolError` 並回傳結束代碼，找不到時為 1
#[must_use]
pub fn exit_code_of(error: &anyhow::Error) -> u8 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ToolError>())
        .map_or(1, ToolError::exit_code)
}
