//! Application State
//!
//! Main application state and logic for the TUI. Commands are routed to
//! the shared [`Orchestrator`]; the render loop reads snapshots from it
//! every frame, so producer stages flip to complete on screen in
//! whatever order their latencies finish.

use crate::agents::AgentSet;
use crate::config::Config;
use crate::models::AnalysisRecord;
use crate::orchestrator::Orchestrator;
use crate::report::{self, ReportFormat};
use crate::tui::event::AppAction;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;
use tui_textarea::TextArea;

const INPUT_PLACEHOLDER: &str = "Enter a molecule name, e.g. Metformin...";

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Analysis,
    Help,
}

/// Which pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    History,
}

/// Events from the background run task
#[derive(Debug)]
pub enum AppEvent {
    RunCompleted(AnalysisRecord),
    RunFailed(String),
}

/// Transient status-bar notice
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Main application state
pub struct App {
    pub config: Config,
    pub orchestrator: Arc<Orchestrator>,

    // UI State
    pub view: View,
    pub focus: Focus,
    pub should_quit: bool,
    pub input: TextArea<'static>,
    pub history_index: usize,
    pub scroll_offset: u16,
    pub max_scroll: u16,
    pub notice: Option<Notice>,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        let mut input = TextArea::default();
        input.set_cursor_line_style(ratatui::style::Style::default());
        input.set_placeholder_text(INPUT_PLACEHOLDER);

        let agents = AgentSet::simulated(config.simulation.latency_scale);
        let orchestrator = Arc::new(Orchestrator::new(agents));

        let (tx, rx) = mpsc::channel(100);

        Self {
            config,
            orchestrator,
            view: View::default(),
            focus: Focus::default(),
            should_quit: false,
            input,
            history_index: 0,
            scroll_offset: 0,
            max_scroll: 0,
            notice: None,
            event_rx: rx,
            event_tx: tx,
        }
    }

    /// Poll for async events
    pub fn poll_events(&mut self) {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::RunCompleted(record) => {
                self.notice = Some(Notice::info(format!(
                    "Analysis complete for {}. Confidence ~{:.0}% (indicative).",
                    record.molecule,
                    record.synthesis.confidence_score * 100.0
                )));
                self.history_index = 0;
                self.scroll_offset = 0;
            }
            AppEvent::RunFailed(message) => {
                self.notice = Some(Notice::error(format!(
                    "Analysis failed: {message}. Resubmit to start a fresh run."
                )));
            }
        }
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Submit => match (self.view.clone(), self.focus) {
                (View::Help, _) => self.view = View::Analysis,
                (_, Focus::Input) => self.submit_molecule(),
                (_, Focus::History) => self.select_history_entry(),
            },
            AppAction::ToggleHelp => {
                self.view = if self.view == View::Help {
                    View::Analysis
                } else {
                    View::Help
                };
            }
            AppAction::Escape => {
                if self.view == View::Help {
                    self.view = View::Analysis;
                } else {
                    self.notice = None;
                }
            }
            AppAction::ScrollUp => match self.focus {
                Focus::History => {
                    self.history_index = self.history_index.saturating_sub(1);
                }
                Focus::Input => {
                    self.scroll_offset = self.scroll_offset.saturating_sub(1);
                }
            },
            AppAction::ScrollDown => match self.focus {
                Focus::History => {
                    let len = self.orchestrator.history().len();
                    if self.history_index + 1 < len {
                        self.history_index += 1;
                    }
                }
                Focus::Input => {
                    if self.scroll_offset < self.max_scroll {
                        self.scroll_offset += 1;
                    }
                }
            },
            AppAction::ScrollPageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
            }
            AppAction::ScrollPageDown => {
                self.scroll_offset = (self.scroll_offset + 10).min(self.max_scroll);
            }
            AppAction::NextPane => {
                self.focus = match self.focus {
                    Focus::Input => Focus::History,
                    Focus::History => Focus::Input,
                };
                self.clamp_history_index();
            }
            AppAction::DeleteEntry => self.delete_history_entry(),
            AppAction::ExportText => self.export_current(ReportFormat::Text),
            AppAction::ExportJson => self.export_current(ReportFormat::Json),
            AppAction::Input(key) => {
                if self.view == View::Help {
                    self.view = View::Analysis;
                } else if self.focus == Focus::Input {
                    self.input.input(key);
                }
            }
            AppAction::Tick => {}
        }
    }

    /// Kick off an analysis run for the typed molecule name.
    fn submit_molecule(&mut self) {
        let molecule = self.input.lines().join(" ").trim().to_string();
        if molecule.is_empty() {
            self.notice = Some(Notice::error("Enter a molecule name first."));
            return;
        }
        if self.orchestrator.is_running() {
            self.notice = Some(Notice::error(
                "An analysis run is already in progress.",
            ));
            return;
        }

        self.notice = None;
        self.scroll_offset = 0;

        let orchestrator = self.orchestrator.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match orchestrator.start_run(&molecule).await {
                Ok(record) => {
                    tx.send(AppEvent::RunCompleted(record)).await.ok();
                }
                Err(err) => {
                    warn!(error = %err, "run task failed");
                    tx.send(AppEvent::RunFailed(err.to_string())).await.ok();
                }
            }
        });
    }

    fn select_history_entry(&mut self) {
        let history = self.orchestrator.history();
        let Some(record) = history.get(self.history_index) else {
            return;
        };
        match self.orchestrator.select_from_history(record.id) {
            Ok(record) => {
                self.scroll_offset = 0;
                self.notice = Some(Notice::info(format!(
                    "Showing stored report for {}.",
                    record.molecule
                )));
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
            }
        }
    }

    fn delete_history_entry(&mut self) {
        let history = self.orchestrator.history();
        let Some(record) = history.get(self.history_index) else {
            self.notice = Some(Notice::error("No history entry selected."));
            return;
        };
        match self.orchestrator.delete_from_history(record.id) {
            Ok(()) => {
                self.notice = Some(Notice::info(format!(
                    "Deleted report for {}.",
                    record.molecule
                )));
                self.clamp_history_index();
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
            }
        }
    }

    fn export_current(&mut self, format: ReportFormat) {
        let Some(record) = self.orchestrator.current() else {
            self.notice = Some(Notice::error("No completed report to export."));
            return;
        };
        match report::export(&record, &self.config.report.output_dir, format) {
            Ok(path) => {
                self.notice = Some(Notice::info(format!(
                    "Report written to {}.",
                    path.display()
                )));
            }
            Err(err) => {
                warn!(error = %err, "report export failed");
                self.notice = Some(Notice::error(format!("Export failed: {err}")));
            }
        }
    }

    fn clamp_history_index(&mut self) {
        let len = self.orchestrator.history().len();
        if len == 0 {
            self.history_index = 0;
        } else if self.history_index >= len {
            self.history_index = len - 1;
        }
    }

    /// Update max scroll based on the rendered report height
    pub fn calculate_scroll_bounds(&mut self, terminal_height: u16) {
        let content_height = match self.orchestrator.current() {
            Some(record) => crate::tui::ui::record_lines(&record).len() as u16,
            None => 0,
        };
        // Header, input, progress, status bar and borders around the
        // results pane.
        let viewport_height = terminal_height.saturating_sub(13);
        self.max_scroll = content_height.saturating_sub(viewport_height);
        if self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
    }
}
