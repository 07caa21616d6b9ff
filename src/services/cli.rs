use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

use crate::{
    core::{component::get_components, project::{get_project_by_name, get_projects}},
    utils::{error::AppError, structs::Project},
};

#[derive(Debug, Parser)]
#[command(name = "pid-labeler", version, about = "Label components on P&ID drawings")]
pub struct Cli {
    /// SQLite file to use instead of the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the interactive labeler (default)
    Tui,
    /// Print every project row
    Projects,
    /// Print the components of one project
    Components { project: String },
    /// Write one project and its components as JSON
    Export {
        project: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// One `(id, 'name')` line per project.
pub async fn project_lines(pool: &SqlitePool) -> Result<Vec<String>> {
    let projects = get_projects(pool).await?;
    Ok(projects
        .iter()
        .map(|p| format!("({}, '{}')", p.id, p.name))
        .collect())
}

pub async fn component_lines(pool: &SqlitePool, project_name: &str) -> Result<Vec<String>> {
    let project = require_project(pool, project_name).await?;
    let components = get_components(pool, project.id).await?;
    Ok(components
        .iter()
        .map(|c| format!("({}, {}, '{}', '{}')", c.id, c.project_id, c.label, c.metadata))
        .collect())
}

pub async fn require_project(pool: &SqlitePool, project_name: &str) -> Result<Project> {
    match get_project_by_name(pool, project_name).await? {
        Some(project) => Ok(project),
        None => Err(AppError::ValidationError(format!("No project named {}", project_name)).into()),
    }
}
