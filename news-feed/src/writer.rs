use crate::types::{FeedError, Result, WriteReport};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Writes the rendered feed to `path`, creating missing parent directories.
///
/// Content goes to a sibling temporary file first and is then renamed over
/// the target, so an interrupted write never leaves a truncated feed behind.
pub async fn write_feed(path: &Path, xml: &str, items_written: usize) -> Result<WriteReport> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| FeedError::io(parent, e))?;
    }

    let temp_path = temp_sibling(path);
    debug!("Writing feed to {}", temp_path.display());

    if let Err(e) = fs::write(&temp_path, xml.as_bytes()).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(FeedError::io(&temp_path, e));
    }
    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(FeedError::io(path, e));
    }

    info!(
        "Wrote {} items ({} bytes) to {}",
        items_written,
        xml.len(),
        path.display()
    );

    Ok(WriteReport {
        path: path.to_path_buf(),
        items_written,
        bytes_written: xml.len(),
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "feed.xml".into());
    name.push(".tmp");
    path.with_file_name(name)
}
