//! 選擇性複製元件
//!
//! 依檔名前綴的數字範圍，或依排序後的百分比均勻抽樣，將檔案複製到目的資料夾

mod copy_executor;
mod destination;
mod file_selector;
mod main;

pub use copy_executor::{CopyResult, copy_selected};
pub use destination::prepare_destination;
pub use file_selector::{
    filter_by_range, matches_range, sample_by_percentage, sampling_step, select_files,
};
pub use main::SmartCopy;
