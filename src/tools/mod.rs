mod file_scanner;
mod numeric_sort;
mod path_validator;
mod progress;

pub use file_scanner::{DirectoryEntry, list_directory, scan_files_with_affixes};
pub use numeric_sort::{NumericKey, sort_by_numeric_key};
pub use path_validator::{ensure_directory_exists, validate_directory_exists};
pub use progress::{NoopProgress, ProgressBarReporter, ProgressReporter};
