//! Paint the document and the thumb into a cell buffer.

use scrollthumb::{blend, Anchor, Rgb, ThumbStyle, Transform, EDGE_INSET_PX};
use unicode_width::UnicodeWidthChar;

use crate::buffer::{Buffer, Cell};
use crate::document::Document;
use crate::host::{COL_PX, ROW_PX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Rgb::new(204, 204, 204),
            bg: Rgb::new(24, 24, 27),
        }
    }
}

/// Write the visible lines of `document` into `buf`.
pub fn render_document(document: &Document, buf: &mut Buffer, theme: &Theme) {
    let blank = Cell::new(' ').with_fg(theme.fg).with_bg(theme.bg);
    buf.fill(blank);

    for y in 0..buf.height() {
        let Some(line) = document.line(document.top() + y as usize) else {
            break;
        };

        let mut x: u16 = 0;
        for ch in line.chars() {
            let width = ch.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if x.saturating_add(width) > buf.width() {
                break;
            }

            buf.set(x, y, Cell { char: ch, ..blank });
            if width == 2 {
                buf.set(
                    x + 1,
                    y,
                    Cell {
                        wide_continuation: true,
                        ..blank
                    },
                );
            }
            x += width;
        }
    }
}

/// Cell rectangle the thumb occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbSpan {
    pub x: u16,
    pub y: u16,
    pub cols: u16,
    pub rows: u16,
}

/// Place a thumb of `thumb_rows` by `thumb_cols` cells in a `cols` by `rows`
/// viewport. The box sits at `top_percent` of the viewport and is then moved
/// by `placement`, like the transform on a fixed-position element.
pub fn thumb_span(
    style: &ThumbStyle,
    placement: Transform,
    (thumb_cols, thumb_rows): (u16, u16),
    (cols, rows): (u16, u16),
) -> Option<ThumbSpan> {
    if cols == 0 || rows == 0 {
        return None;
    }
    let thumb_cols = thumb_cols.min(cols);
    let thumb_rows = thumb_rows.min(rows);

    let viewport_px = rows as f64 * ROW_PX;
    let own_px = thumb_rows as f64 * ROW_PX;
    let top_px = style.top_percent / 100.0 * viewport_px + placement.offset_px(own_px);
    let max_y = (rows - thumb_rows) as f64;
    let y = (top_px / ROW_PX).round();
    let y = if y.is_finite() { y.clamp(0.0, max_y) } else { 0.0 } as u16;

    let inset = (EDGE_INSET_PX / COL_PX).round() as u16;
    let x = match style.anchor {
        Anchor::Left => inset.min(cols - thumb_cols),
        Anchor::Right => (cols - thumb_cols).saturating_sub(inset),
    };

    Some(ThumbSpan {
        x,
        y,
        cols: thumb_cols,
        rows: thumb_rows,
    })
}

/// Paint the thumb over what is already in `buf`.
///
/// `opacity` is the current fade value. A negative z-index puts the thumb
/// behind text, so it only shows over blank cells. A border radius rounds the
/// ends with half blocks when the thumb is at least two rows tall.
pub fn render_thumb(buf: &mut Buffer, span: ThumbSpan, style: &ThumbStyle, opacity: f32) {
    let opacity = (opacity * style.background.alpha()).clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }
    let color = style.background.to_rgb();
    let rounded = style.border_radius > 0.0 && span.rows >= 2;
    let behind = style.z_index < 0;

    for dy in 0..span.rows {
        let y = span.y + dy;
        let end = if rounded && dy == 0 {
            Some('▄')
        } else if rounded && dy == span.rows - 1 {
            Some('▀')
        } else {
            None
        };

        for dx in 0..span.cols {
            let x = span.x + dx;
            let Some(&under) = buf.get(x, y) else {
                continue;
            };
            if behind && (under.char != ' ' || under.wide_continuation) {
                continue;
            }

            let tinted = blend(under.bg, color, opacity);
            let cell = match end {
                Some(half) => Cell {
                    char: half,
                    fg: tinted,
                    bg: under.bg,
                    wide_continuation: false,
                },
                None => Cell {
                    char: ' ',
                    fg: under.fg,
                    bg: tinted,
                    wide_continuation: false,
                },
            };
            buf.set(x, y, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use scrollthumb::{Color, TransitionConfig};

    use super::*;

    fn style(top_percent: f64) -> ThumbStyle {
        ThumbStyle {
            top_percent,
            anchor: Anchor::Left,
            width: 6.0,
            height: 64.0,
            background: Color::rgb(37, 99, 235),
            z_index: 50,
            border_radius: 0.0,
            opacity: 1.0,
            transition: TransitionConfig::opacity_fade(),
        }
    }

    fn translate(percent: f64) -> Transform {
        Transform::Translate {
            percent,
            minus_px: 64.0,
        }
    }

    #[test]
    fn test_span_at_top_and_bottom() {
        let top = thumb_span(&style(0.0), Transform::None, (1, 4), (80, 50)).unwrap();
        assert_eq!(top, ThumbSpan { x: 0, y: 0, cols: 1, rows: 4 });

        // 92% is the bottom for a 64px thumb in an 800px viewport
        let bottom = thumb_span(&style(92.0), translate(92.0), (1, 4), (80, 50)).unwrap();
        assert_eq!(bottom.y, 46);
    }

    #[test]
    fn test_span_right_anchor() {
        let mut s = style(0.0);
        s.anchor = Anchor::Right;
        let span = thumb_span(&s, Transform::None, (2, 4), (80, 50)).unwrap();
        assert_eq!(span.x, 78);
    }

    #[test]
    fn test_span_clamped_to_viewport() {
        let span = thumb_span(&style(100.0), Transform::None, (1, 4), (80, 10)).unwrap();
        assert_eq!(span.y, 6);

        let tiny = thumb_span(&style(50.0), Transform::None, (1, 20), (80, 5)).unwrap();
        assert_eq!(tiny.rows, 5);
        assert_eq!(tiny.y, 0);

        assert!(thumb_span(&style(0.0), Transform::None, (1, 4), (0, 0)).is_none());
    }

    #[test]
    fn test_render_document_clips_lines() {
        let doc = Document::new(vec!["hello world".to_string(), "ab".to_string()]);
        let mut buf = Buffer::new(5, 3);
        render_document(&doc, &mut buf, &Theme::default());

        assert_eq!(buf.get(4, 0).map(|c| c.char), Some('o'));
        assert_eq!(buf.get(1, 1).map(|c| c.char), Some('b'));
        assert_eq!(buf.get(0, 2).map(|c| c.char), Some(' '));
    }

    #[test]
    fn test_render_document_wide_chars() {
        let doc = Document::new(vec!["日本".to_string()]);
        let mut buf = Buffer::new(3, 1);
        render_document(&doc, &mut buf, &Theme::default());

        assert_eq!(buf.get(0, 0).map(|c| c.char), Some('日'));
        assert_eq!(buf.get(1, 0).map(|c| c.wide_continuation), Some(true));
        // Second glyph does not fit in the last column
        assert_eq!(buf.get(2, 0).map(|c| c.char), Some(' '));
    }

    #[test]
    fn test_render_thumb_full_opacity() {
        let theme = Theme::default();
        let mut buf = Buffer::new(4, 6);
        render_document(&Document::default(), &mut buf, &theme);

        let span = ThumbSpan { x: 0, y: 1, cols: 1, rows: 4 };
        render_thumb(&mut buf, span, &style(0.0), 1.0);

        assert_eq!(buf.get(0, 1).map(|c| c.bg), Some(Rgb::new(37, 99, 235)));
        assert_eq!(buf.get(0, 4).map(|c| c.bg), Some(Rgb::new(37, 99, 235)));
        assert_eq!(buf.get(0, 0).map(|c| c.bg), Some(theme.bg));
        assert_eq!(buf.get(0, 5).map(|c| c.bg), Some(theme.bg));
    }

    #[test]
    fn test_render_thumb_hidden_draws_nothing() {
        let theme = Theme::default();
        let mut buf = Buffer::new(4, 6);
        render_document(&Document::default(), &mut buf, &theme);
        let before = buf.clone();

        let span = ThumbSpan { x: 0, y: 0, cols: 1, rows: 4 };
        render_thumb(&mut buf, span, &style(0.0), 0.0);

        assert_eq!(buf.diff(&before).count(), 0);
    }

    #[test]
    fn test_render_thumb_rounded_ends() {
        let mut buf = Buffer::new(2, 4);
        let mut s = style(0.0);
        s.border_radius = 2.0;

        let span = ThumbSpan { x: 0, y: 0, cols: 1, rows: 4 };
        render_thumb(&mut buf, span, &s, 1.0);

        assert_eq!(buf.get(0, 0).map(|c| c.char), Some('▄'));
        assert_eq!(buf.get(0, 0).map(|c| c.fg), Some(Rgb::new(37, 99, 235)));
        assert_eq!(buf.get(0, 3).map(|c| c.char), Some('▀'));
        assert_eq!(buf.get(0, 1).map(|c| c.char), Some(' '));
    }

    #[test]
    fn test_hiding_over_wide_char_redraws_glyph() {
        let theme = Theme::default();
        let doc = Document::new(vec!["a日".to_string()]);
        let mut s = style(0.0);
        s.anchor = Anchor::Right;
        let span = thumb_span(&s, Transform::None, (1, 1), (3, 1)).unwrap();
        assert_eq!(span.x, 2);

        let mut shown = Buffer::new(3, 1);
        render_document(&doc, &mut shown, &theme);
        render_thumb(&mut shown, span, &s, 1.0);
        // Covering the right half breaks the glyph
        assert_eq!(shown.get(1, 0).map(|c| c.char), Some(' '));
        assert_eq!(shown.get(2, 0).map(|c| c.wide_continuation), Some(false));

        let mut hidden = Buffer::new(3, 1);
        render_document(&doc, &mut hidden, &theme);

        // The glyph is redrawn whole, which repaints the thumb's column
        let redrawn: Vec<(u16, char)> = hidden.diff(&shown).map(|(x, _, c)| (x, c.char)).collect();
        assert_eq!(redrawn, vec![(1, '日')]);
    }

    #[test]
    fn test_render_thumb_behind_text() {
        let theme = Theme::default();
        let doc = Document::new(vec!["x".to_string()]);
        let mut buf = Buffer::new(2, 2);
        render_document(&doc, &mut buf, &theme);

        let mut s = style(0.0);
        s.z_index = -1;
        let span = ThumbSpan { x: 0, y: 0, cols: 1, rows: 2 };
        render_thumb(&mut buf, span, &s, 1.0);

        assert_eq!(buf.get(0, 0).map(|c| (c.char, c.bg)), Some(('x', theme.bg)));
        assert_eq!(buf.get(0, 1).map(|c| c.bg), Some(Rgb::new(37, 99, 235)));
    }
}
