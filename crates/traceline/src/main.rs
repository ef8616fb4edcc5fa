//! Traceline CLI - step-through case-trace timeline viewer TUI

mod app;
mod config;
mod data;
mod theme;
mod ui;
mod views;

use anyhow::{Context, Result};
use app::{App, Focus};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use data::Dataset;
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "traceline")]
#[command(author, version, about = "A step-through case-trace timeline viewer")]
struct Args {
    /// Dataset JSON file (defaults to the bundled case studies)
    #[arg(value_name = "DATASET")]
    dataset: Option<PathBuf>,

    /// Case id to open first
    #[arg(short, long)]
    case: Option<String>,

    /// Theme mode: dark or light
    #[arg(long, value_enum)]
    theme_mode: Option<CliThemeMode>,

    /// Disable animated navigation (every jump snaps)
    #[arg(long)]
    no_animation: bool,

    /// List the dataset's cases and exit
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliThemeMode {
    Dark,
    Light,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::Config::load();

    let dataset = match &args.dataset {
        Some(path) => Dataset::load(path)?,
        None => Dataset::bundled(),
    };
    if dataset.cases.is_empty() {
        anyhow::bail!("Dataset has no cases.");
    }

    if args.list {
        for case in &dataset.cases {
            let span = case
                .span()
                .map(|(first, last)| format!("{first}-{last}"))
                .unwrap_or_default();
            println!("{:<20} {span:<10} {}", case.id, case.title);
        }
        return Ok(());
    }

    config
        .tuning()
        .validate()
        .context("Invalid [scroll]/[playback] configuration")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(dataset, &config);

    // CLI overrides on top of config
    if args.no_animation {
        app.animation_enabled = false;
    }
    let light_mode = match args.theme_mode {
        Some(CliThemeMode::Light) => true,
        Some(CliThemeMode::Dark) => false,
        None => config.is_light_mode(),
    };
    app.theme = Theme::resolve(light_mode);
    if let Some(id) = &args.case {
        if let Some(index) = app.dataset.case_index(id) {
            app.select_case(index);
        }
    }

    // Run event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(16);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // One reconciler frame per paint
        app.on_frame();

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Mouse(me) => {
                    if app.show_help {
                        continue;
                    }
                    match me.kind {
                        MouseEventKind::ScrollUp => {
                            app.handle_scroll(false, me.column, me.row);
                        }
                        MouseEventKind::ScrollDown => {
                            app.handle_scroll(true, me.column, me.row);
                        }
                        _ => {}
                    }
                }
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            if app.show_help {
                                app.show_help = false;
                            } else {
                                return Ok(());
                            }
                        }
                        KeyCode::Char('?') => {
                            app.show_help = !app.show_help;
                        }
                        // Year / case stepping, by focus
                        KeyCode::Down | KeyCode::Char('j') => match app.focus {
                            Focus::Timeline => app.next_year(),
                            Focus::Cases => app.next_case(),
                        },
                        KeyCode::Up | KeyCode::Char('k') => match app.focus {
                            Focus::Timeline => app.prev_year(),
                            Focus::Cases => app.prev_case(),
                        },
                        KeyCode::Home | KeyCode::Char('g') => {
                            app.first_year();
                        }
                        KeyCode::End | KeyCode::Char('G') => {
                            app.last_year();
                        }
                        // Case navigation regardless of focus
                        KeyCode::Char('[') => {
                            app.prev_case();
                        }
                        KeyCode::Char(']') => {
                            app.next_case();
                        }
                        // Page jumps ride the wheel path (page units)
                        KeyCode::PageDown => {
                            app.page_forward();
                        }
                        KeyCode::PageUp => {
                            app.page_back();
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => match app.focus {
                            Focus::Timeline => app.toggle_expanded(),
                            Focus::Cases => app.focus = Focus::Timeline,
                        },
                        KeyCode::Tab => {
                            app.toggle_focus();
                        }
                        KeyCode::Char('f') => {
                            app.case_panel_visible = !app.case_panel_visible;
                            if !app.case_panel_visible {
                                app.focus = Focus::Timeline;
                            }
                        }
                        KeyCode::Char('a') => {
                            app.animation_enabled = !app.animation_enabled;
                        }
                        KeyCode::Char('s') => {
                            app.scrollbar_visible = !app.scrollbar_visible;
                        }
                        KeyCode::Char('r') => {
                            app.renavigate();
                        }
                        _ => {}
                    }
                }
                Event::Resize(_, _) => {
                    app.surface.invalidate();
                    app.controller.notify_layout_changed();
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
