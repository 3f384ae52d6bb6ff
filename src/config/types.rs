use crate::error::ToolError;
use clap::ValueEnum;
use log::warn;
use std::fmt;
use std::path::PathBuf;

/// GIF 每幀預設顯示時間（毫秒）
pub const DEFAULT_GIF_DURATION_MS: u32 = 100;
/// 影片預設幀率
pub const DEFAULT_VIDEO_FPS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    Gif,
    Video,
}

impl OutputType {
    /// 輸出檔的副檔名
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Video => "mp4",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gif => write!(f, "GIF"),
            Self::Video => write!(f, "MP4 影片"),
        }
    }
}

/// 截圖轉換工具的執行設定
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub image_folder: PathBuf,
    pub output_folder: PathBuf,
    pub output_type: OutputType,
    /// 只用於 GIF
    pub duration_ms: u32,
    /// 只用於影片
    pub fps: u32,
}

impl ConvertConfig {
    pub fn new(
        image_folder: PathBuf,
        output_folder: PathBuf,
        output_type: OutputType,
        duration_ms: u32,
        fps: u32,
    ) -> Result<Self, ToolError> {
        if duration_ms == 0 {
            return Err(ToolError::Usage("--duration 必須大於 0".to_string()));
        }
        if fps == 0 {
            return Err(ToolError::Usage("--fps 必須大於 0".to_string()));
        }

        Ok(Self {
            image_folder,
            output_folder,
            output_type,
            duration_ms,
            fps,
        })
    }
}

/// 檔案選取策略，每次執行只有一種
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionCriterion {
    /// 選取以 `<prefix>_<i>_` 開頭的檔案，`lower_limit <= i <= upper_limit`
    RangeFilter {
        prefix: String,
        lower_limit: i64,
        upper_limit: i64,
    },
    /// 依數字排序後均勻抽樣約 `percentage`% 的檔案
    PercentageSample { percentage: f64 },
}

impl SelectionCriterion {
    /// 由命令列的選用參數決定選取策略
    ///
    /// 有 `percentage` 時優先使用百分比模式；否則三個範圍參數必須同時提供
    pub fn resolve(
        prefix: Option<String>,
        lower_limit: Option<i64>,
        upper_limit: Option<i64>,
        percentage: Option<f64>,
    ) -> Result<Self, ToolError> {
        if let Some(percentage) = percentage {
            if !percentage.is_finite() {
                return Err(ToolError::Usage(format!(
                    "--percentage 必須是有限數值，收到 {percentage}"
                )));
            }
            if prefix.is_some() || lower_limit.is_some() || upper_limit.is_some() {
                warn!("已指定 --percentage，忽略範圍參數");
            }
            return Ok(Self::PercentageSample { percentage });
        }

        match (prefix, lower_limit, upper_limit) {
            (Some(prefix), Some(lower_limit), Some(upper_limit)) => Ok(Self::RangeFilter {
                prefix,
                lower_limit,
                upper_limit,
            }),
            _ => Err(ToolError::Usage(
                "必須指定 --percentage，或同時指定 --prefix、--lower-limit 與 --upper-limit"
                    .to_string(),
            )),
        }
    }
}

/// 選擇性複製工具的執行設定
#[derive(Debug, Clone)]
pub struct CopyConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub criterion: SelectionCriterion,
    pub create_dest: bool,
}
