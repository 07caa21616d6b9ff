use crate::utils::{
    error::AppError,
    logger::{log_error, log_info, log_warn},
    structs::Project,
};
use anyhow::Result;
use ratatui::text::Line;
use sqlx::sqlite::SqlitePool;

/// First entry of the project selector; choosing it means "no project yet".
pub const SELECT_PROJECT_SENTINEL: &str = "Select a project";

/// Inserts a project and returns it, or `None` when the name is already taken.
///
/// Duplicates are logged and reported as `Ok(None)` so the caller decides how
/// loudly to surface them. Blank names are a `ValidationError`.
pub async fn store_project(pool: &SqlitePool, name: &str) -> Result<Option<Project>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(
            AppError::ValidationError(String::from("Project name cannot be empty")).into(),
        );
    }

    let result = sqlx::query(
        "INSERT INTO projects (name)
         SELECT $1
         WHERE NOT EXISTS (
             SELECT 1 FROM projects WHERE name = $1
         )",
    )
    .bind(name)
    .execute(pool)
    .await
    .map_err(|err| {
        log_error(&format!("FAILED :: INSERT project name: [{}]", name));
        AppError::DatabaseError(format!(
            "Failed to store project {}. Reason: {}",
            name, err
        ))
    })?;

    if result.rows_affected() == 0 {
        log_warn(&format!("SKIPPED :: INSERT project name: [{}] already exists", name));
        return Ok(None);
    }

    let project = Project {
        id: result.last_insert_rowid(),
        name: name.to_string(),
    };
    log_info(&format!(
        "SUCCESSFUL :: INSERT project id: [{}] name: [{}]",
        project.id, project.name
    ));
    Ok(Some(project))
}

/// Fetches all projects from the database.
pub async fn get_projects(pool: &SqlitePool) -> Result<Vec<Project>> {
    let result = sqlx::query_as::<_, Project>("SELECT id, name FROM projects ORDER BY id;")
        .fetch_all(pool)
        .await;

    match result {
        Ok(projects) => Ok(projects),
        Err(error) => {
            log_error(&format!("Failed to fetch projects: {}", error));
            Err(
                AppError::DatabaseError(format!("Failed to fetch projects. Reason: {}", error))
                    .into(),
            )
        }
    }
}

pub async fn get_project_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Project>> {
    sqlx::query_as::<_, Project>("SELECT id, name FROM projects WHERE name = $1;")
        .bind(name.trim())
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            log_error(&format!("Failed to fetch project {}: {}", name, err));
            AppError::DatabaseError(format!(
                "Failed to fetch project {}. Reason: {}",
                name, err
            ))
            .into()
        })
}

pub fn format_project_title(current_project: Option<&Project>) -> String {
    match current_project {
        Some(project) => format!("[ Selected Project: {} ]", project.name),
        None => "[ Projects ]".to_string(),
    }
}

/// Sidebar entries: the sentinel first, then one line per project.
pub fn build_select_project(projects: &[Project]) -> (Vec<Line<'static>>, Vec<String>) {
    let mut proj_items: Vec<Line> = vec![Line::from(SELECT_PROJECT_SENTINEL)];
    let mut str_items: Vec<String> = vec![SELECT_PROJECT_SENTINEL.to_string()];
    for project in projects {
        let proj_name = format!(" -[ {} ]-", project.name);
        str_items.push(proj_name.to_owned());
        proj_items.push(Line::from(proj_name));
    }
    (proj_items, str_items)
}
