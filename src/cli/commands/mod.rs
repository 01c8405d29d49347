//! Command handlers, grouped the way the web client groups its pages.

pub mod apps;
pub mod catalog;
pub mod hosts;
pub mod prefs;
pub mod session;
pub mod tasks;

use std::path::{Path, PathBuf};

use crate::cli_output::{icons, print_status};
use crate::error::ProphetResult;
use crate::models::{Download, Pagination};

/// Write an export to `out`, else to the server-suggested name, else `fallback`.
pub(crate) fn save_download(download: &Download, out: Option<&Path>, fallback: &str) -> ProphetResult<PathBuf> {
    let path = download_target(download, out, fallback);
    std::fs::write(&path, &download.bytes)?;
    print_status(
        icons::SUCCESS,
        &format!("Saved {} bytes to {}", download.bytes.len(), path.display()),
    );
    Ok(path)
}

/// Resolve where an export lands. A server-suggested name is reduced to its
/// final path component so it can only ever name a file in the working directory.
pub(crate) fn download_target(download: &Download, out: Option<&Path>, fallback: &str) -> PathBuf {
    if let Some(path) = out {
        return path.to_path_buf();
    }
    let name = download
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..");
    PathBuf::from(name.unwrap_or(fallback))
}

/// `-` for missing values.
pub(crate) fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub(crate) fn page_footer(pagination: Option<&Pagination>, shown: usize, total_label: &str) -> String {
    match pagination {
        Some(p) => format!("{} {} · {}/{}", total_label, p.total, p.page, p.pages.max(1)),
        None => format!("{} {}", total_label, shown),
    }
}
