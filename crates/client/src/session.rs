//! One viewing session: the open file, viewport state and the control loop.

use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::PathBuf;

use crossterm::event::KeyEvent;
use hexviewer_core::layout::ROWS;
use hexviewer_core::{ByteSource, Result, TextEncoding, ViewportState};
use ratatui::backend::Backend;

use crate::canvas::Canvas;
use crate::keymap::{Command, map_key_event};
use crate::render::{FileInfo, RenderEngine};
use crate::tui::{Input, Tui};

/// Inputs needed to start a session. Validated by the caller.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub path: PathBuf,
    pub encoding: TextEncoding,
    pub rainbow: bool,
}

/// What the control loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns everything a session mutates. There is exactly one per process and
/// it is driven from a single thread.
pub struct Viewer<R> {
    source: ByteSource<R>,
    state: ViewportState,
    engine: RenderEngine,
    canvas: Canvas,
}

impl Viewer<File> {
    /// Open the file described by `config`.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        let mut source = ByteSource::open(&config.path)?;
        let size = source.len()?;
        let info = FileInfo::new(&config.path, size)?;
        tracing::info!(path = %info.path.display(), size, "session opened");
        let engine = RenderEngine::new(config.encoding, info);
        Ok(Self::new(source, engine, config.rainbow))
    }
}

impl<R: Read + Seek> Viewer<R> {
    pub fn new(source: ByteSource<R>, engine: RenderEngine, rainbow: bool) -> Self {
        Self {
            source,
            state: ViewportState::new(rainbow),
            engine,
            canvas: Canvas::new(),
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Redraw the canvas from the current state.
    pub fn render(&mut self) -> Result<()> {
        self.engine
            .render(&mut self.state, &mut self.source, &mut self.canvas)
    }

    /// Apply one command and redraw.
    ///
    /// A stale error overlay is dropped first; `None` still counts as a step.
    pub fn dispatch(&mut self, command: Option<Command>) -> Result<Flow> {
        self.state.clear_error();
        match command {
            None => {}
            Some(Command::Quit) => return Ok(Flow::Quit),
            Some(Command::ScrollUp) => self.scroll(-1),
            Some(Command::PageUp) => self.scroll(-(ROWS as i64)),
            Some(Command::ScrollDown) => {
                if !self.state.is_end() {
                    self.scroll(1);
                }
            }
            Some(Command::PageDown) => {
                if !self.state.is_end() {
                    self.scroll(ROWS as i64);
                }
            }
            Some(Command::ToggleMode) => self.state.toggle_char_mode(),
            Some(Command::ToggleHelp) => self.state.toggle_help(),
        }
        self.render()?;
        Ok(Flow::Continue)
    }

    fn scroll(&mut self, rows: i64) {
        if self.state.help_shown() {
            self.state.toggle_help();
        }
        self.state.scroll_by(rows);
    }

    /// Handle one key. Errors never escape: they become the error overlay.
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match self.dispatch(map_key_event(key)) {
            Ok(flow) => flow,
            Err(err) => {
                self.show_error(&err);
                Flow::Continue
            }
        }
    }

    fn show_error(&mut self, err: &hexviewer_core::ViewerError) {
        tracing::warn!(error = %err, position = self.state.position(), "step failed");
        self.state.fail(err.to_string());
        if let Err(err) = self.render() {
            tracing::error!(error = %err, "cannot draw error overlay");
        }
    }

    /// Run the control loop until quit or until `inputs` runs dry.
    pub fn run<B, I>(&mut self, tui: &mut Tui<B>, inputs: I) -> anyhow::Result<()>
    where
        B: Backend,
        I: IntoIterator<Item = io::Result<Input>>,
    {
        if let Err(err) = self.render() {
            self.show_error(&err);
        }
        tui.present(&self.canvas)?;

        for input in inputs {
            match input? {
                Input::Key(key) => {
                    if self.handle_key(key) == Flow::Quit {
                        break;
                    }
                }
                Input::Resize => tui.lock_size()?,
            }
            tui.present(&self.canvas)?;
        }
        tracing::info!(position_max = self.state.position_max(), "session closed");
        Ok(())
    }
}
