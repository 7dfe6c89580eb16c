//! BoardView: maps a session snapshot into a terminal framebuffer.
//!
//! Pure (no I/O), so it is unit-tested directly. Board row 0 is the floor and
//! is drawn on the bottom line of the frame.

use crate::engine::{Outcome, SessionSnapshot};
use crate::core::SnapshotCell;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, TileKind};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(80, 80, 110);
const PENDING_BG: Rgb = Rgb::new(150, 120, 40);
const HINT_BG: Rgb = Rgb::new(40, 100, 70);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // Two columns per cell keeps tiles roughly square.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Top-left corner of the board frame (border included).
    pub fn frame_origin(&self, snap: &SessionSnapshot, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(snap);
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    fn frame_size(&self, snap: &SessionSnapshot) -> (u16, u16) {
        (
            snap.board.width as u16 * self.cell_w + 2,
            snap.board.height as u16 + 2,
        )
    }

    /// Screen position of the first column of board cell `pos`.
    pub fn cell_origin(
        &self,
        snap: &SessionSnapshot,
        viewport: Viewport,
        pos: Position,
    ) -> Option<(u16, u16)> {
        if pos.col < 0
            || pos.row < 0
            || pos.col >= snap.board.width as i16
            || pos.row >= snap.board.height as i16
        {
            return None;
        }
        let (x0, y0) = self.frame_origin(snap, viewport);
        let flipped = snap.board.height as u16 - 1 - pos.row as u16;
        Some((x0 + 1 + pos.col as u16 * self.cell_w, y0 + 1 + flipped))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let (x0, y0) = self.frame_origin(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.draw_box(x0, y0, frame_w, frame_h, border);

        for row in 0..snap.board.height as i16 {
            for col in 0..snap.board.width as i16 {
                let pos = Position::new(col, row);
                let Some((x, y)) = self.cell_origin(snap, viewport, pos) else {
                    continue;
                };
                let cell = snap.board.get(pos).unwrap_or_default();
                let bg = highlight(snap, cursor, pos).unwrap_or(PLAY_BG);
                self.draw_cell(fb, x, y, cell, bg);
            }
        }

        self.draw_side_panel(fb, snap, viewport, x0 + frame_w + 2, y0);

        match snap.outcome {
            Outcome::Victory => self.draw_overlay(fb, (x0, y0), (frame_w, frame_h), "VICTORY"),
            Outcome::Defeat => {
                self.draw_overlay(fb, (x0, y0), (frame_w, frame_h), "OUT OF MOVES")
            }
            Outcome::InProgress => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, x: u16, y: u16, cell: SnapshotCell, bg: Rgb) {
        let (glyph, fill, style) = match cell {
            SnapshotCell::Blocked => {
                let style = CellStyle::new(Rgb::new(70, 70, 80), Rgb::new(20, 20, 26));
                ('▒', '▒', style)
            }
            SnapshotCell::Empty => ('·', ' ', CellStyle::new(Rgb::new(90, 90, 100), bg).dim()),
            SnapshotCell::Tile(kind) => ('●', ' ', CellStyle::new(tile_color(kind), bg).bold()),
        };
        fb.put_char(x, y, glyph, style);
        for dx in 1..self.cell_w {
            fb.put_char(x + dx, y, fill, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        x: u16,
        y0: u16,
    ) {
        if x.saturating_add(12) > viewport.width {
            return;
        }
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let help = value.dim();

        let mut y = y0;
        for (name, v) in [
            ("SCORE", snap.points),
            ("GOAL", snap.goal),
            ("MOVES", snap.moves_left),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, v, value);
            y += 3;
        }

        for line in ["arrows move", "space select", "? hint", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, origin: (u16, u16), frame: (u16, u16), text: &str) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str_centered(origin.0, frame.0, origin.1 + frame.1 / 2, text, style);
    }
}

/// Background for a highlighted cell; pending selection wins over the cursor,
/// the cursor over a hint.
fn highlight(snap: &SessionSnapshot, cursor: Option<Position>, pos: Position) -> Option<Rgb> {
    if snap.pending == Some(pos) {
        Some(PENDING_BG)
    } else if cursor == Some(pos) {
        Some(CURSOR_BG)
    } else if snap.hint.is_some_and(|(a, b)| a == pos || b == pos) {
        Some(HINT_BG)
    } else {
        None
    }
}

pub fn tile_color(kind: TileKind) -> Rgb {
    match kind {
        TileKind::Red => Rgb::new(220, 80, 80),
        TileKind::Orange => Rgb::new(255, 165, 0),
        TileKind::Yellow => Rgb::new(240, 220, 80),
        TileKind::Green => Rgb::new(100, 220, 120),
        TileKind::Blue => Rgb::new(80, 120, 220),
        TileKind::Purple => Rgb::new(200, 120, 220),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, BoardSnapshot};

    fn snapshot(rows: &[&str]) -> SessionSnapshot {
        let board = Board::from_rows(rows).unwrap();
        SessionSnapshot {
            board: BoardSnapshot::from(&board),
            points: 12,
            goal: 60,
            moves_left: 7,
            ..SessionSnapshot::default()
        }
    }

    #[test]
    fn test_floor_row_is_drawn_last() {
        let snap = snapshot(&["R#", "GB"]);
        let view = BoardView::default();
        let vp = Viewport::new(40, 12);
        let (_, top) = view.cell_origin(&snap, vp, Position::new(0, 1)).unwrap();
        let (_, floor) = view.cell_origin(&snap, vp, Position::new(0, 0)).unwrap();
        assert_eq!(floor, top + 1);

        let fb = view.render(&snap, None, vp);
        let (x, y) = view.cell_origin(&snap, vp, Position::new(0, 0)).unwrap();
        let cell = fb.get(x, y).unwrap();
        assert_eq!(cell.ch, '●');
        assert_eq!(cell.style.fg, tile_color(TileKind::Green));
        let (x, y) = view.cell_origin(&snap, vp, Position::new(1, 1)).unwrap();
        assert_eq!(fb.get(x, y).unwrap().ch, '▒');
    }

    #[test]
    fn test_pending_beats_cursor() {
        let mut snap = snapshot(&["RG", "GB"]);
        snap.pending = Some(Position::new(1, 0));
        let view = BoardView::default();
        let vp = Viewport::new(40, 12);
        let fb = view.render(&snap, Some(Position::new(1, 0)), vp);
        let (x, y) = view.cell_origin(&snap, vp, Position::new(1, 0)).unwrap();
        assert_eq!(fb.get(x, y).unwrap().style.bg, PENDING_BG);
    }

    #[test]
    fn test_out_of_range_cell_has_no_origin() {
        let snap = snapshot(&["RG"]);
        let view = BoardView::default();
        assert!(view
            .cell_origin(&snap, Viewport::new(20, 5), Position::new(2, 0))
            .is_none());
    }
}
