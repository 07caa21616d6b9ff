use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sqlx::SqlitePool;

use crate::{
    core::{
        component::{get_components, store_component},
        project::{get_projects, store_project},
    },
    services::{
        display::{render, InputEvent},
        export::export_project,
        model::{suggest_metadata, Completer},
    },
    utils::{
        file_utils::read_diagram,
        logger::{log_error, log_info},
        structs::{Component, Diagram, DiagramKind, Project},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    SelectProject,
    NewProject,
    Labeling,
    EnterLabel,
    AttachDiagram,
    Quit,
}

impl AppState {
    /// States where key presses go into the text buffer.
    pub fn is_typing(&self) -> bool {
        matches!(
            self,
            AppState::NewProject | AppState::EnterLabel | AppState::AttachDiagram
        )
    }
}

/// Leaves raw mode and the alternate screen. Every step runs even when an
/// earlier one fails; the first failure is returned.
pub fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen);
    let cursor = execute!(io::stdout(), Show);
    raw?;
    screen?;
    cursor?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Info,
    Warning,
    Error,
}

/// One-line outcome of the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    fn new(kind: BannerKind, message: impl Into<String>) -> Self {
        Banner {
            kind,
            message: message.into(),
        }
    }
}

/// Interactive labeling session. Every action is followed by a full reload
/// of the store state and a redraw.
pub struct Labeler {
    pub state: AppState,
    pub projects: Vec<Project>,
    /// Sidebar cursor; 0 is the "Select a project" entry.
    pub selected: usize,
    pub current_project: Option<Project>,
    pub components: Vec<Component>,
    pub diagram: Option<Diagram>,
    pub input: String,
    pub auto_metadata: bool,
    pub banner: Option<Banner>,
    pub export_dir: PathBuf,
    pub max_tokens: i32,
}

impl Labeler {
    pub fn new(auto_metadata: bool, max_tokens: i32, export_dir: PathBuf) -> Self {
        Labeler {
            state: AppState::SelectProject,
            projects: vec![],
            selected: 0,
            current_project: None,
            components: vec![],
            diagram: None,
            input: String::new(),
            auto_metadata,
            banner: None,
            export_dir,
            max_tokens,
        }
    }

    pub async fn run(&mut self, pool: &SqlitePool, completer: &dyn Completer) -> Result<()> {
        enable_raw_mode()?;
        let result = self.run_on_alternate_screen(pool, completer).await;
        let restored = restore_terminal();

        if let Err(err) = &result {
            log_error(&format!("Labeler stopped: {}", err));
        }
        if let Err(err) = &restored {
            log_error(&format!("Failed to restore terminal: {}", err));
        }
        result.and(restored)
    }

    async fn run_on_alternate_screen(
        &mut self,
        pool: &SqlitePool,
        completer: &dyn Completer,
    ) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        self.event_loop(&mut terminal, pool, completer).await
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        pool: &SqlitePool,
        completer: &dyn Completer,
    ) -> Result<()> {
        while self.state != AppState::Quit {
            self.refresh(pool).await;
            terminal.draw(|f| render(f, &*self))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let input = InputEvent::from_key(key, self.state.is_typing());
                self.handle_input(pool, completer, input).await;
            }
        }
        log_info("Labeler closed");
        Ok(())
    }

    /// Re-reads projects and the current project's components. Listing
    /// failures are already logged and show up as empty lists.
    pub async fn refresh(&mut self, pool: &SqlitePool) {
        self.projects = get_projects(pool).await.unwrap_or_default();
        if self.selected > self.projects.len() {
            self.selected = self.projects.len();
        }

        self.components = match &self.current_project {
            Some(project) => get_components(pool, project.id).await.unwrap_or_default(),
            None => vec![],
        };
    }

    pub async fn handle_input(
        &mut self,
        pool: &SqlitePool,
        completer: &dyn Completer,
        input: InputEvent,
    ) {
        match (self.state, input) {
            (AppState::SelectProject | AppState::Labeling, InputEvent::Up) => {
                self.selected = self.selected.saturating_sub(1);
            }
            (AppState::SelectProject | AppState::Labeling, InputEvent::Down) => {
                if self.selected < self.projects.len() {
                    self.selected += 1;
                }
            }
            (AppState::SelectProject | AppState::Labeling, InputEvent::Select) => {
                self.select_current(pool).await;
            }
            (AppState::SelectProject | AppState::Labeling, InputEvent::New) => {
                self.input.clear();
                self.state = AppState::NewProject;
            }
            (AppState::SelectProject | AppState::Labeling, InputEvent::Quit) => {
                self.state = AppState::Quit;
            }
            (AppState::Labeling, InputEvent::Label) => {
                self.input.clear();
                self.state = AppState::EnterLabel;
            }
            (AppState::Labeling, InputEvent::Attach) => {
                self.input.clear();
                self.state = AppState::AttachDiagram;
            }
            (AppState::Labeling, InputEvent::ToggleAuto) => self.toggle_auto_metadata(),
            (AppState::Labeling, InputEvent::Export) => self.export_json(pool).await,
            (AppState::Labeling, InputEvent::ExportPdf) => self.export_pdf(),
            (AppState::Labeling, InputEvent::Share) => self.share(),
            (AppState::Labeling, InputEvent::Back) => self.close_project(),
            (state, InputEvent::Char(c)) if state.is_typing() => self.input.push(c),
            (state, InputEvent::Backspace) if state.is_typing() => {
                self.input.pop();
            }
            (state, InputEvent::Back) if state.is_typing() => {
                self.input.clear();
                self.state = self.idle_state();
            }
            (AppState::NewProject, InputEvent::Select) => {
                let name = std::mem::take(&mut self.input);
                self.create_project(pool, &name).await;
            }
            (AppState::EnterLabel, InputEvent::Select) => {
                let label = std::mem::take(&mut self.input);
                self.state = AppState::Labeling;
                self.add_label(pool, completer, &label).await;
            }
            (AppState::AttachDiagram, InputEvent::Select) => {
                let raw_path = std::mem::take(&mut self.input);
                self.state = AppState::Labeling;
                self.attach_diagram(&raw_path);
            }
            _ => {}
        }
    }

    fn idle_state(&self) -> AppState {
        if self.current_project.is_some() {
            AppState::Labeling
        } else {
            AppState::SelectProject
        }
    }

    /// Acts on the sidebar cursor: the sentinel opens the new-project input,
    /// anything else becomes the current project.
    pub async fn select_current(&mut self, pool: &SqlitePool) {
        if self.selected == 0 {
            self.input.clear();
            self.state = AppState::NewProject;
            return;
        }

        let Some(project) = self.projects.get(self.selected - 1).cloned() else {
            return;
        };

        if self.current_project.as_ref() != Some(&project) {
            self.diagram = None;
        }
        self.banner = Some(Banner::new(
            BannerKind::Success,
            format!("Selected Project: {}", project.name),
        ));
        self.current_project = Some(project);
        self.state = AppState::Labeling;
        self.refresh(pool).await;
    }

    pub fn close_project(&mut self) {
        self.current_project = None;
        self.components.clear();
        self.diagram = None;
        self.selected = 0;
        self.state = AppState::SelectProject;
    }

    pub async fn create_project(&mut self, pool: &SqlitePool, name: &str) {
        match store_project(pool, name).await {
            Ok(Some(project)) => {
                self.banner = Some(Banner::new(
                    BannerKind::Success,
                    format!("Created project: {}", project.name),
                ));
                self.refresh(pool).await;
                self.selected = self
                    .projects
                    .iter()
                    .position(|p| p.id == project.id)
                    .map(|idx| idx + 1)
                    .unwrap_or(0);
                self.current_project = Some(project);
                self.diagram = None;
                self.state = AppState::Labeling;
                self.refresh(pool).await;
            }
            Ok(None) => {
                self.banner = Some(Banner::new(
                    BannerKind::Error,
                    format!("Project {} already exists", name.trim()),
                ));
                self.state = self.idle_state();
            }
            Err(err) => {
                self.banner = Some(Banner::new(BannerKind::Error, err.to_string()));
                self.state = self.idle_state();
            }
        }
    }

    pub fn attach_diagram(&mut self, raw_path: &str) {
        match read_diagram(raw_path) {
            Ok(diagram) => {
                self.banner = Some(match diagram.kind {
                    DiagramKind::Pdf => {
                        Banner::new(BannerKind::Warning, "PDF rendering coming soon!")
                    }
                    DiagramKind::Image => Banner::new(
                        BannerKind::Success,
                        format!("Uploaded P&ID: {}", diagram.file_name()),
                    ),
                });
                self.diagram = Some(diagram);
            }
            Err(err) => {
                self.banner = Some(Banner::new(BannerKind::Error, err.to_string()));
            }
        }
    }

    /// Stores `label` under the current project, asking the completer for
    /// metadata first when auto-metadata is on. Nothing is stored when the
    /// suggestion fails.
    pub async fn add_label(&mut self, pool: &SqlitePool, completer: &dyn Completer, label: &str) {
        let Some(project) = self.current_project.clone() else {
            self.banner = Some(Banner::new(BannerKind::Error, "Select a project first"));
            return;
        };

        let label = label.trim();
        if label.is_empty() {
            self.banner = Some(Banner::new(BannerKind::Error, "Component label cannot be empty"));
            return;
        }

        let metadata = if self.auto_metadata {
            match suggest_metadata(completer, label, self.max_tokens).await {
                Ok(metadata) => metadata,
                Err(err) => {
                    log_error(&format!("Metadata suggestion for [{}] failed: {}", label, err));
                    self.banner = Some(Banner::new(BannerKind::Error, err.to_string()));
                    return;
                }
            }
        } else {
            String::new()
        };

        match store_component(pool, project.id, label, &metadata).await {
            Ok(component) => {
                self.banner = Some(Banner::new(
                    BannerKind::Success,
                    format!("Added: {}", component.label),
                ));
                self.refresh(pool).await;
            }
            Err(err) => {
                self.banner = Some(Banner::new(BannerKind::Error, err.to_string()));
            }
        }
    }

    pub fn toggle_auto_metadata(&mut self) {
        self.auto_metadata = !self.auto_metadata;
    }

    pub async fn export_json(&mut self, pool: &SqlitePool) {
        let Some(project) = self.current_project.clone() else {
            return;
        };

        self.banner = Some(match export_project(pool, &project, &self.export_dir).await {
            Ok(path) => Banner::new(
                BannerKind::Success,
                format!("Exported to {}", path.to_string_lossy()),
            ),
            Err(err) => Banner::new(BannerKind::Error, err.to_string()),
        });
    }

    pub fn export_pdf(&mut self) {
        self.banner = Some(Banner::new(BannerKind::Info, "Export functionality coming soon!"));
    }

    pub fn share(&mut self) {
        self.banner = Some(Banner::new(BannerKind::Info, "Public sharing features coming soon!"));
    }
}
