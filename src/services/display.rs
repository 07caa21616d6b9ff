use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::{
    core::{
        component::format_component,
        project::{build_select_project, format_project_title},
    },
    services::labeler::{AppState, BannerKind, Labeler},
    utils::structs::DiagramKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Select,
    New,
    Label,
    Attach,
    ToggleAuto,
    Export,
    ExportPdf,
    Share,
    Back,
    Quit,
    Char(char),
    Backspace,
    Invalid,
}

impl InputEvent {
    /// While typing, printable keys are text and only Enter/Esc/Backspace
    /// are commands.
    pub fn from_key(key_event: KeyEvent, typing: bool) -> InputEvent {
        if !typing {
            return InputEvent::from(key_event);
        }
        match key_event.code {
            KeyCode::Enter => InputEvent::Select,
            KeyCode::Esc => InputEvent::Back,
            KeyCode::Backspace => InputEvent::Backspace,
            KeyCode::Char(c) => InputEvent::Char(c),
            _ => InputEvent::Invalid,
        }
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(key_event: KeyEvent) -> InputEvent {
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => InputEvent::Up,
            KeyCode::Down | KeyCode::Char('j') => InputEvent::Down,
            KeyCode::Enter => InputEvent::Select,
            KeyCode::Char('n') => InputEvent::New,
            KeyCode::Char('l') => InputEvent::Label,
            KeyCode::Char('a') => InputEvent::Attach,
            KeyCode::Char('t') => InputEvent::ToggleAuto,
            KeyCode::Char('e') => InputEvent::Export,
            KeyCode::Char('p') => InputEvent::ExportPdf,
            KeyCode::Char('s') => InputEvent::Share,
            KeyCode::Esc => InputEvent::Back,
            KeyCode::Char('q') => InputEvent::Quit,
            _ => InputEvent::Invalid,
        }
    }
}

pub fn render(f: &mut Frame, app: &Labeler) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    render_sidebar(f, layout[0], app);
    render_main(f, layout[1], app);
}

fn render_sidebar(f: &mut Frame, chunk: Rect, app: &Labeler) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(5),    // Projects
                Constraint::Length(3), // New project name
                Constraint::Length(4), // Export options
                Constraint::Length(3), // Public sharing
            ]
            .as_ref(),
        )
        .split(chunk);

    let (lines, _) = build_select_project(&app.projects);
    let items: Vec<ListItem> = lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            let style = if idx == app.selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();
    let title = format_project_title(app.current_project.as_ref());
    let projects = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(projects, chunks[0]);

    let new_name = if app.state == AppState::NewProject {
        format!("{}_", app.input)
    } else {
        String::from("[n] Create Project")
    };
    f.render_widget(
        Paragraph::new(new_name)
            .block(Block::default().borders(Borders::ALL).title("New project name")),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(vec![
            Line::from("[e] Export to JSON"),
            Line::from("[p] Export to PDF"),
        ])
        .block(Block::default().borders(Borders::ALL).title("Export Options")),
        chunks[2],
    );

    f.render_widget(
        Paragraph::new("[s] Public Sharing")
            .block(Block::default().borders(Borders::ALL).title("Public Sharing")),
        chunks[3],
    );
}

fn render_main(f: &mut Frame, chunk: Rect, app: &Labeler) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Diagram
                Constraint::Length(4), // Label input
                Constraint::Min(3),    // Component metadata
                Constraint::Length(1), // Banner
                Constraint::Length(1), // Help
            ]
            .as_ref(),
        )
        .split(chunk);

    let diagram = if app.state == AppState::AttachDiagram {
        format!("Path: {}_", app.input)
    } else {
        match &app.diagram {
            Some(d) if d.kind == DiagramKind::Pdf => {
                format!("{} (PDF, {} bytes)", d.file_name(), d.size_bytes)
            }
            Some(d) => format!("{} ({} bytes)", d.file_name(), d.size_bytes),
            None => String::from("[a] Upload a P&ID (png, jpg, jpeg, pdf)"),
        }
    };
    f.render_widget(
        Paragraph::new(diagram)
            .block(Block::default().borders(Borders::ALL).title("Uploaded P&ID")),
        chunks[0],
    );

    let label_line = if app.state == AppState::EnterLabel {
        format!("Component Label: {}_", app.input)
    } else {
        String::from("[l] Add Label")
    };
    let auto = format!(
        "[t] Auto-generate metadata: {}",
        if app.auto_metadata { "on" } else { "off" }
    );
    f.render_widget(
        Paragraph::new(vec![Line::from(label_line), Line::from(auto)])
            .block(Block::default().borders(Borders::ALL).title("Label P&ID Components")),
        chunks[1],
    );

    let items: Vec<ListItem> = app
        .components
        .iter()
        .map(|c| {
            let (l_str, m_str) = format_component(c);
            ListItem::new(Text::from(vec![Line::from(l_str), Line::from(m_str)]))
        })
        .collect();
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Component Metadata")),
        chunks[2],
    );

    if let Some(banner) = &app.banner {
        let color = match banner.kind {
            BannerKind::Success => Color::Green,
            BannerKind::Info => Color::Blue,
            BannerKind::Warning => Color::Yellow,
            BannerKind::Error => Color::Red,
        };
        f.render_widget(
            Paragraph::new(Span::styled(banner.message.clone(), Style::default().fg(color)))
                .wrap(Wrap { trim: true }),
            chunks[3],
        );
    }

    f.render_widget(Paragraph::new(help_line(app.state)), chunks[4]);
}

pub fn help_line(state: AppState) -> &'static str {
    match state {
        AppState::SelectProject => "[↑/↓] Move  [Enter] Select  [n] New project  [q] Quit",
        AppState::Labeling => "[↑/↓] Move  [Enter] Select  [Esc] Close project  [q] Quit",
        AppState::NewProject | AppState::EnterLabel | AppState::AttachDiagram => {
            "[Enter] Confirm  [Esc] Cancel"
        }
        AppState::Quit => "",
    }
}
