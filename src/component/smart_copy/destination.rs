use crate::error::ToolError;
use crate::tools::ensure_directory_exists;
use anyhow::Result;
use log::info;
use std::path::Path;

/// 準備目的資料夾
///
/// `create_dest` 為真時建立資料夾（含上層，已存在也可）；
/// 否則資料夾必須已存在，不存在時回傳 `ToolError::MissingDestination`
pub fn prepare_destination(dest_dir: &Path, create_dest: bool) -> Result<()> {
    if create_dest {
        ensure_directory_exists(dest_dir)?;
        info!("目的資料夾已就緒: {}", dest_dir.display());
        return Ok(());
    }

    if !dest_dir.exists() {
        return Err(ToolError::MissingDestination {
            path: dest_dir.to_path_buf(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_destination_without_create() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("dest");

        let err = prepare_destination(&dest, false).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::MissingDestination { .. })
        ));
        assert!(!dest.exists());
    }

    #[test]
    fn test_create_nested_destination() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("a").join("b");

        prepare_destination(&dest, true).unwrap();
        prepare_destination(&dest, true).unwrap();

        assert!(dest.is_dir());
    }

    #[test]
    fn test_existing_destination() {
        let temp_dir = TempDir::new().unwrap();
        prepare_destination(temp_dir.path(), false).unwrap();
    }
}
