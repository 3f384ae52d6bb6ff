//! 數字感知排序
//!
//! 以檔名中依序出現的數字序列作為排序鍵，`file_2` 排在 `file_10` 之前

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static REGEX_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid regex"));

/// 檔名中的數字序列
///
/// 每段數字去掉前導零後保存為字串，比較時先比長度再比字面，
/// 因此任意長度的數字都不會溢位。只有 ASCII `0-9` 視為數字，
/// 全形或其他文字的數字字元當作一般文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericKey(Vec<String>);

impl NumericKey {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let numbers = REGEX_DIGITS
            .find_iter(name)
            .map(|m| {
                let trimmed = m.as_str().trim_start_matches('0');
                if trimmed.is_empty() {
                    "0".to_string()
                } else {
                    trimmed.to_string()
                }
            })
            .collect();
        Self(numbers)
    }

    #[must_use]
    pub fn numbers(&self) -> &[String] {
        &self.0
    }
}

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // 較短的序列若是較長序列的前綴則排在前面
        self.0
            .iter()
            .map(|n| (n.len(), n.as_str()))
            .cmp(other.0.iter().map(|n| (n.len(), n.as_str())))
    }
}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 依數字序列穩定排序，鍵相同時保留原順序
pub fn sort_by_numeric_key<T>(items: &mut [T], name_of: impl Fn(&T) -> &str) {
    items.sort_by_cached_key(|item| NumericKey::from_name(name_of(item)));
}
