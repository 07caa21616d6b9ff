use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    core::component::get_components,
    utils::{
        error::AppError,
        logger::{log_error, log_info},
        structs::{Component, Project},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectExport {
    pub project: Project,
    pub components: Vec<Component>,
}

/// Project 3 `Plant A/North` becomes `3-Plant_A_North.json`. The id prefix keeps
/// names that sanitize alike from overwriting each other.
pub fn export_file_name(project: &Project) -> String {
    let stem: String = project
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}-{}.json", project.id, stem)
}

/// Writes the project and all its components as pretty JSON into `out_dir`.
pub async fn export_project(
    pool: &SqlitePool,
    project: &Project,
    out_dir: &Path,
) -> Result<PathBuf> {
    let components = get_components(pool, project.id).await?;
    let export = ProjectExport {
        project: project.clone(),
        components,
    };

    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| AppError::UnexpectedError(e.to_string()))?;

    fs::create_dir_all(out_dir).map_err(|e| {
        AppError::FileError(format!(
            "Failed to create export directory {}: {}",
            out_dir.to_string_lossy(),
            e
        ))
    })?;

    let out_path = out_dir.join(export_file_name(project));
    fs::write(&out_path, json).map_err(|e| {
        log_error(&format!(
            "Failed to write export {}: {}",
            out_path.to_string_lossy(),
            e
        ));
        AppError::FileError(format!(
            "Failed to write export {}: {}",
            out_path.to_string_lossy(),
            e
        ))
    })?;

    log_info(&format!(
        "Exported project [{}] with {} components to {}",
        project.name,
        export.components.len(),
        out_path.to_string_lossy()
    ));
    Ok(out_path)
}
