use std::fs;
use std::path::Path;

use anyhow::Result;
use path_absolutize::Absolutize;

use crate::utils::{
    error::AppError,
    logger::log_error,
    structs::{Diagram, DiagramKind},
};

pub const DIAGRAM_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "pdf"];

/// Maps a file extension onto the diagram kinds the uploader accepts.
pub fn diagram_kind(path: &Path) -> Option<DiagramKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(DiagramKind::Pdf),
        "png" | "jpg" | "jpeg" => Some(DiagramKind::Image),
        _ => None,
    }
}

/// Resolves and checks a diagram path typed by the user.
pub fn read_diagram(raw_path: &str) -> Result<Diagram> {
    let raw_path = raw_path.trim();
    if raw_path.is_empty() {
        return Err(AppError::ValidationError(String::from("Diagram path cannot be empty")).into());
    }

    let path = Path::new(raw_path)
        .absolutize()
        .map_err(|e| AppError::FileError(format!("Failed to resolve '{}': {}", raw_path, e)))?
        .to_path_buf();

    let Some(kind) = diagram_kind(&path) else {
        return Err(AppError::ValidationError(format!(
            "Unsupported diagram type, expected one of: {}",
            DIAGRAM_EXTENSIONS.join(", ")
        ))
        .into());
    };

    let meta = fs::metadata(&path).map_err(|e| {
        log_error(&format!(
            "Failed to read diagram {}: {}",
            path.to_string_lossy(),
            e
        ));
        AppError::FileError(format!(
            "Failed to read diagram {}: {}",
            path.to_string_lossy(),
            e
        ))
    })?;

    if !meta.is_file() {
        return Err(
            AppError::FileError(format!("{} is not a file", path.to_string_lossy())).into(),
        );
    }

    Ok(Diagram {
        path,
        kind,
        size_bytes: meta.len(),
    })
}
