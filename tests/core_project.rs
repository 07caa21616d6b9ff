#[cfg(test)]
mod tests {
    use pid_labeler::{
        build_select_project, format_project_title,
        core::project::{get_project_by_name, get_projects, store_project},
        utils::{db_utils::get_memory_pool, error::AppError, structs::Project},
    };
    use sqlx::SqlitePool;

    async fn create_test_pool() -> SqlitePool {
        get_memory_pool()
            .await
            .expect("Failed to create database connection pool")
    }

    #[tokio::test]
    async fn test_store_project_appears_in_listing() {
        let pool = create_test_pool().await;

        let stored = store_project(&pool, "Refinery Unit 3").await.unwrap();
        let stored = stored.expect("new name should be inserted");
        assert_eq!(stored.name, "Refinery Unit 3");

        let projects = get_projects(&pool).await.unwrap();
        assert_eq!(projects, vec![stored]);
    }

    #[tokio::test]
    async fn test_store_project_duplicate_is_skipped() {
        let pool = create_test_pool().await;

        let first = store_project(&pool, "Boiler House").await.unwrap();
        assert!(first.is_some());

        // Same name again, with stray whitespace.
        let second = store_project(&pool, "  Boiler House ").await;
        assert!(second.is_ok(), "Duplicate names must not be an error");
        assert_eq!(second.unwrap(), None);

        let projects = get_projects(&pool).await.unwrap();
        assert_eq!(projects.len(), 1);
    }

    #[tokio::test]
    async fn test_store_project_rejects_blank_name() {
        let pool = create_test_pool().await;

        let err = store_project(&pool, "   ").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::ValidationError(_))
        ));
        assert!(get_projects(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_projects_in_insertion_order() {
        let pool = create_test_pool().await;

        for name in ["Zeta", "Alpha", "Mid"] {
            store_project(&pool, name).await.unwrap();
        }

        let names: Vec<String> = get_projects(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[tokio::test]
    async fn test_get_project_by_name() {
        let pool = create_test_pool().await;
        let stored = store_project(&pool, "Tank Farm").await.unwrap().unwrap();

        let found = get_project_by_name(&pool, "Tank Farm").await.unwrap();
        assert_eq!(found, Some(stored));

        let missing = get_project_by_name(&pool, "Cooling Tower").await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_get_projects_without_schema_is_error() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let err = get_projects(&pool).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::DatabaseError(_))
        ));
    }

    #[test]
    fn test_format_project_title() {
        let project = Project {
            id: 1,
            name: "Refinery Unit 3".to_string(),
        };

        let result = format_project_title(Some(&project));
        assert_eq!(result, "[ Selected Project: Refinery Unit 3 ]");

        let result_no_project = format_project_title(None);
        assert_eq!(result_no_project, "[ Projects ]");
    }

    #[test]
    fn test_build_select_project() {
        let projects = vec![
            Project {
                id: 1,
                name: "project_1".to_string(),
            },
            Project {
                id: 2,
                name: "project_2".to_string(),
            },
        ];

        let (line_items, str_items) = build_select_project(&projects);

        assert_eq!(line_items.len(), 3);
        assert_eq!(str_items[0], "Select a project");
        assert_eq!(str_items[1], " -[ project_1 ]-");
        assert_eq!(str_items[2], " -[ project_2 ]-");
    }
}
