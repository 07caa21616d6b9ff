use crate::utils::{
    error::AppError,
    logger::{log_error, log_info},
    structs::Component,
};
use anyhow::Result;
use sqlx::sqlite::SqlitePool;

/// Inserts a component under `project_id`.
///
/// The connection enforces foreign keys, so an unknown project id fails with
/// a `DatabaseError` instead of leaving an orphan row.
pub async fn store_component(
    pool: &SqlitePool,
    project_id: i64,
    label: &str,
    metadata: &str,
) -> Result<Component> {
    let label = label.trim();
    if label.is_empty() {
        return Err(
            AppError::ValidationError(String::from("Component label cannot be empty")).into(),
        );
    }

    let result = sqlx::query(
        "INSERT INTO components (project_id, label, metadata)
         VALUES ($1, $2, $3)",
    )
    .bind(project_id)
    .bind(label)
    .bind(metadata)
    .execute(pool)
    .await
    .map_err(|err| {
        log_error(&format!(
            "FAILED :: INSERT component label: [{}] project_id: [{}], error: {}",
            label, project_id, err
        ));
        AppError::DatabaseError(format!(
            "Failed to store component {} for project {}. Reason: {}",
            label, project_id, err
        ))
    })?;

    let component = Component {
        id: result.last_insert_rowid(),
        project_id,
        label: label.to_string(),
        metadata: metadata.to_string(),
    };
    log_info(&format!(
        "SUCCESSFUL :: INSERT component id: [{}] project_id: [{}]",
        component.id, project_id
    ));
    Ok(component)
}

/// Components of one project in insertion order. `NULL` metadata reads as "".
pub async fn get_components(pool: &SqlitePool, project_id: i64) -> Result<Vec<Component>> {
    let components = sqlx::query_as::<_, Component>(
        "SELECT id, project_id, label, COALESCE(metadata, '') AS metadata
        FROM components
        WHERE project_id = $1
        ORDER BY id;",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
    .map_err(|err| {
        log_error(&format!(
            "Failed to get components for project_id {}. Reason: {}",
            project_id, err
        ));
        AppError::DatabaseError(format!(
            "Failed to get components for project_id {}. Reason: {}",
            project_id, err
        ))
    })?;

    Ok(components)
}

pub fn format_component(c: &Component) -> (String, String) {
    let l_str = format!(" |- Label: {}", c.label.replace('\n', " "));

    let m_str = if c.metadata.is_empty() {
        String::from(" |  Metadata: (none)")
    } else {
        format!(" |  Metadata: {}", c.metadata.replace('\n', " "))
    };

    (l_str, m_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_component_flattens_newlines() {
        let component = Component {
            id: 1,
            project_id: 1,
            label: "PV-101".to_string(),
            metadata: "Pressure valve.\nRated 10 bar.".to_string(),
        };
        let (l_str, m_str) = format_component(&component);
        assert_eq!(l_str, " |- Label: PV-101");
        assert_eq!(m_str, " |  Metadata: Pressure valve. Rated 10 bar.");
    }

    #[test]
    fn test_format_component_without_metadata() {
        let component = Component {
            id: 2,
            project_id: 1,
            label: "TK-01".to_string(),
            metadata: String::new(),
        };
        assert_eq!(format_component(&component).1, " |  Metadata: (none)");
    }
}
