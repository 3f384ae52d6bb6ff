//! 截圖序列分組器
//!
//! 解析 `screenshot_seq_<序列>_frame_<幀>.png` 檔名，依 (序列, 幀) 全域排序後分組

use crate::error::ToolError;
use crate::tools::scan_files_with_affixes;
use anyhow::Result;
use log::{debug, info};
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// 掃描時使用的檔名前綴
pub const SCREENSHOT_PREFIX: &str = "screenshot_seq_";
/// 掃描時使用的副檔名
pub const SCREENSHOT_SUFFIX: &str = ".png";

static REGEX_SCREENSHOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(screenshot_seq_([0-9]+))_frame_([0-9]+)\.png$").expect("Invalid regex")
});

/// 已解析的截圖檔
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotFile {
    pub path: PathBuf,
    /// 檔名前三個底線欄位，例如 `screenshot_seq_3`
    pub sequence_key: String,
    pub sequence_id: u64,
    pub frame_id: u64,
}

impl ScreenshotFile {
    pub fn parse(path: &Path) -> Result<Self, ToolError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let malformed = |reason: &str| ToolError::MalformedFilename {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.split('_').count() < 5 {
            return Err(malformed("底線分隔的欄位少於 5 個"));
        }

        let captures = REGEX_SCREENSHOT
            .captures(&name)
            .ok_or_else(|| malformed("不符合 screenshot_seq_<序列>_frame_<幀>.png"))?;

        let sequence_id = captures[2]
            .parse::<u64>()
            .map_err(|_| malformed("序列編號超出範圍"))?;
        let frame_id = captures[3]
            .parse::<u64>()
            .map_err(|_| malformed("幀編號超出範圍"))?;

        Ok(Self {
            path: path.to_path_buf(),
            sequence_key: captures[1].to_string(),
            sequence_id,
            frame_id,
        })
    }
}

/// 一個序列：同一個 key 的截圖，依幀編號遞增排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub key: String,
    pub files: Vec<PathBuf>,
}

/// 列出資料夾中所有 `screenshot_seq_*.png` 檔案
pub fn scan_screenshots(directory: &Path) -> Result<Vec<PathBuf>> {
    let files = scan_files_with_affixes(directory, SCREENSHOT_PREFIX, SCREENSHOT_SUFFIX)?;
    info!("在 {} 找到 {} 張截圖", directory.display(), files.len());
    Ok(files)
}

/// 將截圖分組為序列
///
/// 先對全部檔案依 `(sequence_id, frame_id)` 穩定排序，再依 key 首次出現的順序分組，
/// 因此每組內部的幀順序與單獨排序該組相同。任何檔名格式錯誤都會讓整批失敗。
pub fn group_sequences(paths: &[PathBuf]) -> Result<Vec<Sequence>, ToolError> {
    let mut screenshots = paths
        .iter()
        .map(|path| ScreenshotFile::parse(path))
        .collect::<Result<Vec<_>, _>>()?;

    screenshots.sort_by_key(|s| (s.sequence_id, s.frame_id));

    let mut sequences: Vec<Sequence> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for screenshot in screenshots {
        match index_by_key.get(&screenshot.sequence_key) {
            Some(&index) => sequences[index].files.push(screenshot.path),
            None => {
                index_by_key.insert(screenshot.sequence_key.clone(), sequences.len());
                sequences.push(Sequence {
                    key: screenshot.sequence_key,
                    files: vec![screenshot.path],
                });
            }
        }
    }

    for sequence in &sequences {
        debug!("序列 {}: {} 幀", sequence.key, sequence.files.len());
    }

    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(name: &str) -> PathBuf {
        PathBuf::from("/shots").join(name)
    }

    fn names(sequence: &Sequence) -> Vec<String> {
        sequence
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_parse_screenshot() {
        let shot = ScreenshotFile::parse(&path("screenshot_seq_12_frame_034.png")).unwrap();
        assert_eq!(shot.sequence_key, "screenshot_seq_12");
        assert_eq!(shot.sequence_id, 12);
        assert_eq!(shot.frame_id, 34);
    }

    #[test]
    fn test_parse_ignores_underscores_in_directory() {
        let p = PathBuf::from("/my_shot_dir_x_y/screenshot_seq_1_frame_2.png");
        let shot = ScreenshotFile::parse(&p).unwrap();
        assert_eq!(shot.sequence_id, 1);
        assert_eq!(shot.frame_id, 2);
    }

    #[test]
    fn test_parse_malformed_names() {
        for name in [
            "screenshot_seq_1.png",
            "screenshot_seq_a_frame_1.png",
            "screenshot_seq_1_frame_x.png",
            "screenshot_seq_1_frame_2_extra.png",
            "screenshot_seq_1_frame_2.jpg",
            "screenshot_seq_99999999999999999999999_frame_1.png",
        ] {
            let err = ScreenshotFile::parse(&path(name)).unwrap_err();
            assert!(
                matches!(err, ToolError::MalformedFilename { .. }),
                "{name} 應該被判定為格式錯誤"
            );
        }
    }

    #[test]
    fn test_group_orders_frames_numerically() {
        let paths = vec![
            path("screenshot_seq_1_frame_10.png"),
            path("screenshot_seq_1_frame_2.png"),
            path("screenshot_seq_1_frame_1.png"),
        ];

        let sequences = group_sequences(&paths).unwrap();

        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].key, "screenshot_seq_1");
        assert_eq!(
            names(&sequences[0]),
            vec![
                "screenshot_seq_1_frame_1.png",
                "screenshot_seq_1_frame_2.png",
                "screenshot_seq_1_frame_10.png",
            ]
        );
    }

    #[test]
    fn test_group_interleaved_sequences() {
        let paths = vec![
            path("screenshot_seq_2_frame_3.png"),
            path("screenshot_seq_1_frame_2.png"),
            path("screenshot_seq_2_frame_1.png"),
            path("screenshot_seq_1_frame_1.png"),
            path("screenshot_seq_2_frame_2.png"),
        ];

        let sequences = group_sequences(&paths).unwrap();

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].key, "screenshot_seq_1");
        assert_eq!(sequences[1].key, "screenshot_seq_2");
        assert_eq!(
            names(&sequences[1]),
            vec![
                "screenshot_seq_2_frame_1.png",
                "screenshot_seq_2_frame_2.png",
                "screenshot_seq_2_frame_3.png",
            ]
        );

        // 不遺失也不重複
        let total: usize = sequences.iter().map(|s| s.files.len()).sum();
        assert_eq!(total, paths.len());
    }

    #[test]
    fn test_group_keeps_raw_sequence_token() {
        let paths = vec![
            path("screenshot_seq_01_frame_1.png"),
            path("screenshot_seq_1_frame_2.png"),
        ];

        let sequences = group_sequences(&paths).unwrap();

        let keys: Vec<&str> = sequences.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["screenshot_seq_01", "screenshot_seq_1"]);
    }

    #[test]
    fn test_group_preserves_duplicate_frames() {
        let paths = vec![
            path("screenshot_seq_1_frame_1.png"),
            path("screenshot_seq_1_frame_01.png"),
        ];

        let sequences = group_sequences(&paths).unwrap();

        assert_eq!(
            names(&sequences[0]),
            vec!["screenshot_seq_1_frame_1.png", "screenshot_seq_1_frame_01.png"]
        );
    }

    #[test]
    fn test_group_fails_on_malformed_file() {
        let paths = vec![
            path("screenshot_seq_1_frame_1.png"),
            path("screenshot_seq_broken.png"),
        ];

        assert!(matches!(
            group_sequences(&paths),
            Err(ToolError::MalformedFilename { .. })
        ));
    }

    #[test]
    fn test_group_empty_input() {
        assert!(group_sequences(&[]).unwrap().is_empty());
    }
}
