//! Raw-mode terminal with a double buffer and diffed output.

use std::io::{self, Write};
use std::panic;

use crossterm::{
    cursor, event, execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use scrollthumb::Rgb;
use unicode_width::UnicodeWidthChar;

use crate::buffer::{Buffer, Cell};

pub struct Terminal {
    stdout: io::Stdout,
    current: Buffer,
    previous: Buffer,
    /// Forces a full repaint on the next draw.
    dirty: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore();
            original_hook(info);
        }));

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        let setup = execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )
        .and_then(|()| terminal::size());

        let (width, height) = or_restore(setup, restore)?;

        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: Buffer::new(width, height),
            dirty: true,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.current = Buffer::new(width, height);
        self.previous = Buffer::new(width, height);
        self.dirty = true;
    }

    /// Fill the back buffer with `paint` and write the changed cells.
    pub fn draw(&mut self, paint: impl FnOnce(&mut Buffer)) -> io::Result<()> {
        self.current.clear();
        paint(&mut self.current);

        if self.dirty {
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
            self.previous = Buffer::new(self.current.width(), self.current.height());
            // Differs from every real cell, so everything is rewritten
            self.previous.fill(Cell::new(char::MAX));
            self.dirty = false;
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_width: u16 = 1;
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current.diff(&self.previous) {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if last_fg != Some(cell.fg) {
                queue!(self.stdout, SetForegroundColor(to_crossterm(cell.fg)))?;
                last_fg = Some(cell.fg);
            }
            if last_bg != Some(cell.bg) {
                queue!(self.stdout, SetBackgroundColor(to_crossterm(cell.bg)))?;
                last_bg = Some(cell.bg);
            }

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_width = cell.char.width().unwrap_or(1).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = restore();
    }
}

fn to_crossterm(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn restore() -> io::Result<()> {
    restore_steps(terminal::disable_raw_mode, || {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )
    })
}

/// Runs both steps, raw mode first, and reports the first failure. Raw mode
/// is left even when writing the screen reset fails.
fn restore_steps(
    leave_raw: impl FnOnce() -> io::Result<()>,
    reset_screen: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let raw = leave_raw();
    let screen = reset_screen();
    raw.and(screen)
}

/// Pass `result` through, running `undo` first when it failed half way
/// through setup.
fn or_restore<T>(result: io::Result<T>, undo: impl FnOnce() -> io::Result<()>) -> io::Result<T> {
    if result.is_err() {
        let _ = undo();
    }
    result
}
