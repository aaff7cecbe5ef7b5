use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetSize, disable_raw_mode, enable_raw_mode,
};
use hexviewer_core::layout::{HEIGHT, WIDTH};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};

use crate::canvas::Canvas;

/// Terminal input the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Resize,
}

/// Blocking stream of key presses and resizes from the real terminal.
pub fn events() -> impl Iterator<Item = io::Result<Input>> {
    std::iter::from_fn(|| {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    return Some(Ok(Input::Key(key)));
                }
                Ok(Event::Resize(..)) => return Some(Ok(Input::Resize)),
                Ok(_) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    })
}

/// Terminal user interface renderer.
pub struct Tui<B: Backend> {
    terminal: Terminal<B>,
    raw_mode: bool,
}

impl Tui<CrosstermBackend<Stdout>> {
    /// Take over stdout: raw mode, alternate screen, hidden cursor and the
    /// fixed window size.
    ///
    /// The guard exists before any mode changes, so a failure halfway
    /// through still restores the terminal on drop.
    pub fn stdout() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let mut tui = Self {
            terminal,
            raw_mode: true,
        };
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        tui.terminal.hide_cursor()?;
        tui.lock_size()?;
        Ok(tui)
    }
}

impl<B: Backend> Tui<B> {
    /// Create a TUI without touching terminal modes (for tests).
    pub fn with_backend(backend: B) -> Result<Self> {
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            raw_mode: false,
        })
    }

    /// Ask the terminal to go back to the fixed window size.
    pub fn lock_size(&mut self) -> Result<()> {
        if self.raw_mode {
            io::stdout().execute(SetSize(WIDTH, HEIGHT))?;
        }
        self.terminal.autoresize()?;
        Ok(())
    }

    /// Copy the canvas to the screen, clipped to the terminal area.
    pub fn present(&mut self, canvas: &Canvas) -> Result<()> {
        self.terminal.draw(|f| {
            let area = f.area();
            if area.width < WIDTH || area.height < HEIGHT {
                tracing::warn!(
                    width = area.width,
                    height = area.height,
                    "terminal smaller than the viewer window"
                );
            }
            let src = canvas.buffer();
            let buf = f.buffer_mut();
            for y in 0..area.height.min(HEIGHT) {
                for x in 0..area.width.min(WIDTH) {
                    buf[(x, y)] = src[(x, y)].clone();
                }
            }
        })?;
        Ok(())
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.terminal.backend_mut()
    }
}

impl<B: Backend> Drop for Tui<B> {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = self.terminal.show_cursor();
            let _ = io::stdout().execute(LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}
