use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;

use pid_labeler::{
    services::{
        cli::{component_lines, project_lines, require_project, Cli, Command},
        config::{check_config_files, get_config_dir, read_config},
        export::export_project,
        labeler::Labeler,
        model::OpenAiCompleter,
    },
    utils::{db_utils::get_db_pool, logger::initialize_logger},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let conf_dir = get_config_dir()?;
    initialize_logger(&conf_dir.join("logs"))?;
    check_config_files(&conf_dir)?;
    let config = read_config(&conf_dir)?;

    let db_path = cli.db.clone().unwrap_or_else(|| config.database.clone());
    let pool = get_db_pool(&db_path).await?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let completer = OpenAiCompleter::from_env(&config.model);
            let mut app = Labeler::new(
                config.auto_metadata,
                config.model.max_tokens,
                conf_dir.join("exports"),
            );
            app.run(&pool, &completer).await?;
        }
        Command::Projects => {
            for line in project_lines(&pool).await? {
                println!("{}", line);
            }
        }
        Command::Components { project } => {
            for line in component_lines(&pool, &project).await? {
                println!("{}", line);
            }
        }
        Command::Export { project, out } => {
            let project = require_project(&pool, &project).await?;
            let out_dir = out.unwrap_or_else(|| conf_dir.join("exports"));
            let path = export_project(&pool, &project, &out_dir).await?;
            println!("{}", path.to_string_lossy());
        }
    }

    pool.close().await;
    Ok(())
}
