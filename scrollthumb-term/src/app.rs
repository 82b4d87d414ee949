//! The pager's event loop.
//!
//! Input, timer deadlines and frame ticks are multiplexed with
//! `tokio::select!`. Each wakeup turns into host events that are fed to the
//! thumb, then the screen is redrawn if anything changed or the thumb is
//! still fading.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use log::{debug, error, info, trace};
use scrollthumb::{Fade, HostEvent, ScrollThumb, ThumbConfig, TransitionConfig};
use tokio::time::{sleep_until, MissedTickBehavior};

use crate::document::Document;
use crate::error::AppError;
use crate::host::{cells_for, CellThumb, TermHost, COL_PX, ROW_PX};
use crate::render::{render_document, render_thumb, thumb_span, Theme};
use crate::terminal::Terminal;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: i64 = 3;

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub fps: u32,
    pub reduced_motion: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fps: 60,
            reduced_motion: false,
        }
    }
}

/// What an input event asks the pager to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollBy(i64),
    PageBy(i64),
    Top,
    Bottom,
    Resize(u16, u16),
    Ignore,
}

pub fn action_for(event: &Event) -> Action {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press | KeyEventKind::Repeat,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Down | KeyCode::Char('j') => Action::ScrollBy(1),
            KeyCode::Up | KeyCode::Char('k') => Action::ScrollBy(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => Action::PageBy(1),
            KeyCode::PageUp => Action::PageBy(-1),
            KeyCode::Home | KeyCode::Char('g') => Action::Top,
            KeyCode::End | KeyCode::Char('G') => Action::Bottom,
            _ => Action::Ignore,
        },
        Event::Mouse(MouseEvent { kind, .. }) => match kind {
            MouseEventKind::ScrollDown => Action::ScrollBy(WHEEL_LINES),
            MouseEventKind::ScrollUp => Action::ScrollBy(-WHEEL_LINES),
            _ => Action::Ignore,
        },
        Event::Resize(cols, rows) => Action::Resize(*cols, *rows),
        _ => Action::Ignore,
    }
}

async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}

pub async fn run(document: Document, config: ThumbConfig, options: Options) -> Result<(), AppError> {
    let mut terminal = Terminal::new()?;
    let mut host = TermHost::new(document, terminal.size());
    host.attach_thumb(CellThumb::new(
        cells_for(config.height, ROW_PX),
        cells_for(config.width, COL_PX),
    ));

    let mut thumb = ScrollThumb::new(config);
    let mut fade = Fade::new(TransitionConfig::opacity_fade());
    fade.set_reduced_motion(options.reduced_motion);
    let theme = Theme::default();

    thumb.mount(&mut host);
    info!(
        "pager started: {} lines, {:?} viewport",
        host.document().len(),
        host.size()
    );

    let mut events = EventStream::new();
    let period = Duration::from_secs_f64(1.0 / options.fps.max(1) as f64);
    let mut frame_interval = tokio::time::interval(period);
    frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut needs_render = true;

    loop {
        let now = Instant::now();
        if needs_render || fade.is_animating(now) {
            draw(&mut terminal, &host, &thumb, &fade, &theme, now)?;
            needs_render = false;
        }

        let next_deadline = host.next_deadline();
        let ticking = host.has_pending_frames() || fade.is_animating(now);

        let host_events: Vec<HostEvent> = tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    trace!("terminal event: {event:?}");
                    let action = action_for(&event);
                    match action {
                        Action::Quit => break,
                        Action::Ignore => Vec::new(),
                        Action::Resize(cols, rows) => {
                            terminal.resize(cols, rows);
                            needs_render = true;
                            host.resize(cols, rows)
                        }
                        _ => {
                            needs_render = true;
                            scroll(&mut host, action)
                        }
                    }
                }
                Some(Err(e)) => {
                    error!("event stream error: {e}");
                    Vec::new()
                }
                None => break,
            },

            _ = sleep_until_optional(next_deadline) => host.due_timers(Instant::now()),

            _ = frame_interval.tick(), if ticking => host.take_frames(),
        };

        if host_events.is_empty() {
            continue;
        }
        debug!("dispatching {} host event(s)", host_events.len());
        for event in host_events {
            if thumb.handle(event, &mut host) {
                needs_render = true;
            }
        }
        fade.set_visible(thumb.is_visible(), Instant::now());
    }

    thumb.unmount(&mut host);
    info!("pager stopped");
    Ok(())
}

fn scroll(host: &mut TermHost, action: Action) -> Vec<HostEvent> {
    match action {
        Action::ScrollBy(lines) => host.scroll_by(lines),
        Action::PageBy(pages) => host.scroll_by(pages * host.page_rows()),
        Action::Top => host.scroll_to(0),
        Action::Bottom => host.scroll_to(usize::MAX),
        _ => Vec::new(),
    }
}

fn draw(
    terminal: &mut Terminal,
    host: &TermHost,
    thumb: &ScrollThumb,
    fade: &Fade,
    theme: &Theme,
    now: Instant,
) -> io::Result<()> {
    let placed = thumb.style().and_then(|style| {
        let element = host.thumb_element()?;
        let span = thumb_span(
            &style,
            element.placement(),
            (element.cols(), element.rows()),
            host.size(),
        )?;
        Some((style, span))
    });
    let opacity = fade.value(now);

    terminal.draw(|buf| {
        render_document(host.document(), buf, theme);
        if let Some((style, span)) = &placed {
            render_thumb(buf, *span, style, opacity);
        }
    })
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, MouseButton};

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for(&key(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit);
        assert_eq!(action_for(&key(KeyCode::Esc, KeyModifiers::NONE)), Action::Quit);
        assert_eq!(
            action_for(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('c'), KeyModifiers::NONE)),
            Action::Ignore
        );
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(action_for(&key(KeyCode::Down, KeyModifiers::NONE)), Action::ScrollBy(1));
        assert_eq!(action_for(&key(KeyCode::Char('k'), KeyModifiers::NONE)), Action::ScrollBy(-1));
        assert_eq!(action_for(&key(KeyCode::PageDown, KeyModifiers::NONE)), Action::PageBy(1));
        assert_eq!(action_for(&key(KeyCode::Char(' '), KeyModifiers::NONE)), Action::PageBy(1));
        assert_eq!(action_for(&key(KeyCode::Home, KeyModifiers::NONE)), Action::Top);
        assert_eq!(action_for(&key(KeyCode::End, KeyModifiers::NONE)), Action::Bottom);
    }

    #[test]
    fn test_key_release_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(action_for(&release), Action::Ignore);
    }

    #[test]
    fn test_mouse_wheel() {
        assert_eq!(action_for(&mouse(MouseEventKind::ScrollDown)), Action::ScrollBy(3));
        assert_eq!(action_for(&mouse(MouseEventKind::ScrollUp)), Action::ScrollBy(-3));
        assert_eq!(
            action_for(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Action::Ignore
        );
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(action_for(&Event::Resize(100, 40)), Action::Resize(100, 40));
    }

    #[test]
    fn test_page_scroll_moves_by_viewport() {
        let doc = Document::new((0..100).map(|i| i.to_string()).collect());
        let mut host = TermHost::new(doc, (80, 21));
        scroll(&mut host, Action::PageBy(1));
        assert_eq!(host.document().top(), 20);

        scroll(&mut host, Action::Bottom);
        assert_eq!(host.document().top(), 79);

        scroll(&mut host, Action::Top);
        assert_eq!(host.document().top(), 0);
    }
}
