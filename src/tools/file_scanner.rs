use super::validate_directory_exists;
use anyhow::{Context, Result};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 資料夾中的一個項目（檔案、資料夾或特殊檔案）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    /// 用於比對與排序的名稱，非 UTF-8 字元以替代字元表示
    pub name: String,
}

impl AsRef<str> for DirectoryEntry {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// 列出資料夾第一層的所有項目，不遞迴，順序為檔案系統原生順序
pub fn list_directory(directory: &Path) -> Result<Vec<DirectoryEntry>> {
    validate_directory_exists(directory)?;

    let mut entries = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.with_context(|| format!("無法讀取資料夾: {}", directory.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push(DirectoryEntry {
            path: entry.into_path(),
            name,
        });
    }

    Ok(entries)
}

/// 列出符合 `<prefix>*<suffix>` 的一般檔案
///
/// 檔名不是合法 UTF-8 的檔案無法比對，記錄警告後略過
pub fn scan_files_with_affixes(
    directory: &Path,
    prefix: &str,
    suffix: &str,
) -> Result<Vec<PathBuf>> {
    let files = list_directory(directory)?
        .into_iter()
        .filter(|entry| entry.path.is_file())
        .filter_map(|entry| match entry.path.file_name().and_then(|n| n.to_str()) {
            Some(name) => {
                let matched = name.len() >= prefix.len() + suffix.len()
                    && name.starts_with(prefix)
                    && name.ends_with(suffix);
                matched.then_some(entry.path)
            }
            None => {
                warn!("略過非 UTF-8 檔名: {}", entry.path.display());
                None
            }
        })
        .collect();

    Ok(files)
}
