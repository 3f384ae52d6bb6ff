//! 檔案選取策略
//!
//! 範圍過濾：名稱以 `<prefix>_<i>_` 開頭且 i 在閉區間內。
//! 百分比抽樣：依數字排序後每隔 step 個取一個。

use crate::config::SelectionCriterion;
use crate::tools::{DirectoryEntry, list_directory, sort_by_numeric_key};
use anyhow::Result;
use log::debug;
use std::path::Path;

/// 依選取策略從來源資料夾挑出檔案
pub fn select_files(
    source_dir: &Path,
    criterion: &SelectionCriterion,
) -> Result<Vec<DirectoryEntry>> {
    let entries = list_directory(source_dir)?;
    let total = entries.len();

    let selected = match criterion {
        SelectionCriterion::RangeFilter {
            prefix,
            lower_limit,
            upper_limit,
        } => filter_by_range(entries, prefix, *lower_limit, *upper_limit),
        SelectionCriterion::PercentageSample { percentage } => {
            sample_by_percentage(entries, *percentage)
        }
    };

    debug!("從 {total} 個項目中選取 {} 個", selected.len());
    Ok(selected)
}

/// 名稱是否以 `<prefix>_<i>_` 開頭，且 `lower_limit <= i <= upper_limit`
///
/// `i` 必須是整數的標準十進位寫法，`seq_05_` 不會被視為 `i = 5`
#[must_use]
pub fn matches_range(name: &str, prefix: &str, lower_limit: i64, upper_limit: i64) -> bool {
    let Some(rest) = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
    else {
        return false;
    };
    let Some((token, _)) = rest.split_once('_') else {
        return false;
    };

    token
        .parse::<i64>()
        .is_ok_and(|i| (lower_limit..=upper_limit).contains(&i) && i.to_string() == token)
}

/// 保留資料夾原生順序
pub fn filter_by_range<T: AsRef<str>>(
    names: impl IntoIterator<Item = T>,
    prefix: &str,
    lower_limit: i64,
    upper_limit: i64,
) -> Vec<T> {
    if lower_limit > upper_limit {
        return Vec::new();
    }

    names
        .into_iter()
        .filter(|name| matches_range(name.as_ref(), prefix, lower_limit, upper_limit))
        .collect()
}

/// 抽樣間隔：`max(1, round(total / target))`，`target = ceil(total * percentage / 100)`
///
/// `target` 為 0 時以 1 代入；負的 `target` 保留原值，得到的負間隔會被提升為 1。
/// 四捨五入採銀行家捨入（2.5 -> 2）
#[must_use]
pub fn sampling_step(total: usize, percentage: f64) -> usize {
    let target = (total as f64 * (percentage / 100.0)).ceil();
    let target = if target == 0.0 { 1.0 } else { target };
    let step = (total as f64 / target).round_ties_even();
    if step.is_nan() || step < 1.0 {
        1
    } else {
        step as usize
    }
}

/// 依數字排序後從索引 0 開始每隔 step 個取一個
pub fn sample_by_percentage<T: AsRef<str>>(
    names: impl IntoIterator<Item = T>,
    percentage: f64,
) -> Vec<T> {
    let mut names: Vec<T> = names.into_iter().collect();
    if names.is_empty() {
        return names;
    }

    sort_by_numeric_key(&mut names, |name| name.as_ref());
    let step = sampling_step(names.len(), percentage);
    debug!("共 {} 個檔案，抽樣間隔 {step}", names.len());

    names.into_iter().step_by(step).collect()
}
