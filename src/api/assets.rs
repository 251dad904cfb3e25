//! Frontend assets served from the static directory on disk

use std::io;
use std::path::Path;
use tower_http::services::ServeDir;

/// Create the static directory if it does not exist yet
pub fn ensure_static_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        tracing::info!(path = %dir.display(), "Created static directory");
    }
    Ok(())
}

/// Service for everything under the static mount
pub fn static_files(dir: &Path) -> ServeDir {
    ServeDir::new(dir)
}

/// Read the landing page
pub async fn get_index_html(dir: &Path) -> io::Result<String> {
    tokio::fs::read_to_string(dir.join("index.html")).await
}
