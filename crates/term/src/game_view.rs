//! GameView: maps game snapshots into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_COLOR};

/// Columns between the board frame and its side panel.
const PANEL_GAP: u16 = 2;
/// Width reserved for the side panel (labels, numbers, next preview).
const PANEL_W: u16 = 12;
/// Columns between two players' blocks.
const PLAYER_GAP: u16 = 4;
/// Start and restart hints per player, matching each player's restart key.
const RESTART_HINTS: [(&str, &str); 2] = [("R: start", "R: restart"), ("O: start", "O: restart")];

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

/// Top-left corner of one player's board frame.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

/// A lightweight terminal renderer for one or more games.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_w(&self) -> u16 {
        (BOARD_WIDTH as u16) * self.cell_w + 2
    }

    fn frame_h(&self) -> u16 {
        (BOARD_HEIGHT as u16) * self.cell_h + 2
    }

    /// Width of one player's frame plus side panel.
    fn block_w(&self) -> u16 {
        self.frame_w() + PANEL_GAP + PANEL_W
    }

    /// Render every snapshot side by side into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snaps: &[GameSnapshot], viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let n = snaps.len() as u16;
        if n == 0 {
            return;
        }
        let total_w = n * self.block_w() + (n - 1) * PLAYER_GAP;
        let left = viewport.width.saturating_sub(total_w) / 2;
        let top = viewport.height.saturating_sub(self.frame_h()) / 2;

        for (i, snap) in snaps.iter().enumerate() {
            let origin = Origin {
                x: left.saturating_add(i as u16 * (self.block_w() + PLAYER_GAP)),
                y: top,
            };
            let label = (n > 1).then_some(i as u32 + 1);
            let hints = RESTART_HINTS[i.min(RESTART_HINTS.len() - 1)];
            self.draw_player(fb, snap, origin, label, hints);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snaps: &[GameSnapshot], viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snaps, viewport, &mut fb);
        fb
    }

    fn draw_player(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        origin: Origin,
        label: Option<u32>,
        (start_hint, restart_hint): (&str, &str),
    ) {
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, origin.x, origin.y, self.frame_w(), self.frame_h(), border);

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_code(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_board_cell(fb, origin, x, y, kind),
                    None => self.draw_empty_cell(fb, origin, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            for (dx, dy) in active.shape.minos() {
                let x = active.x + dx;
                let y = active.y + dy;
                // Rows above the board are not drawn.
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_board_cell(fb, origin, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, origin, label);

        if snap.game_over {
            self.draw_overlay_text(fb, origin, 0, "GAME OVER");
            self.draw_overlay_text(fb, origin, 2, restart_hint);
        } else if snap.paused {
            self.draw_overlay_text(fb, origin, 0, "PAUSED");
        } else if !snap.running {
            self.draw_overlay_text(fb, origin, 0, start_hint);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(60, 66, 80), EMPTY_COLOR.into());
        self.fill_cell_rect(fb, origin, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(kind.color().into(), EMPTY_COLOR.into()).bold();
        self.fill_cell_rect(fb, origin, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin.x + 1 + cell_x * self.cell_w;
        let py = origin.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        origin: Origin,
        label: Option<u32>,
    ) {
        let panel_x = origin.x + self.frame_w() + PANEL_GAP;
        let heading = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::default();

        let mut y = origin.y;
        if let Some(n) = label {
            fb.put_char(panel_x, y, 'P', heading);
            fb.put_u32(panel_x + 1, y, n, heading);
            y += 2;
        }

        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, heading);
            fb.put_u32(panel_x, y + 1, number, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", heading);
        self.draw_preview(fb, panel_x, y + 1, snap.next.kind, &snap.next.shape);
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, shape: &Shape) {
        let style = CellStyle::new(kind.color().into(), Rgb::new(0, 0, 0));
        for (dx, dy) in shape.minos() {
            fb.fill_rect(
                x + dx as u16 * self.cell_w,
                y + dy as u16,
                self.cell_w,
                1,
                '█',
                style,
            );
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, origin: Origin, row_offset: u16, text: &str) {
        let mid_y = origin.y + self.frame_h() / 2 + row_offset;
        let text_w = text.chars().count() as u16;
        let x = origin.x + self.frame_w().saturating_sub(text_w) / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn find_text(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        (0..fb.height()).find_map(|y| {
            let row = fb.row_text(y);
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y))
        })
    }

    #[test]
    fn single_board_is_centered() {
        let view = GameView::default();
        let fb = view.render(&[GameSnapshot::default()], Viewport::new(80, 24));

        // block is 22 + 2 + 12 = 36 wide, frame 22 tall
        assert_eq!(fb.get(22, 1).unwrap().ch, '┌');
        assert_eq!(fb.get(43, 22).unwrap().ch, '┘');
    }

    #[test]
    fn locked_cells_use_piece_color() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = PieceKind::T.code();

        let fb = GameView::default().render(&[snap], Viewport::new(80, 24));

        let cell = fb.get(23, 21).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::from(PieceKind::T.color()));
        assert_eq!(fb.get(24, 21).unwrap().ch, '█');
        assert_eq!(fb.get(25, 21).unwrap().ch, '·');
    }

    #[test]
    fn active_piece_and_panel_are_drawn() {
        let mut game = GameState::new(3);
        game.reset();
        let snap = game.snapshot();

        let fb = GameView::default().render(&[snap], Viewport::new(80, 24));

        let painted = (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| (23..43).contains(&x) && (2..22).contains(&y))
            .filter(|&(x, y)| fb.get(x, y).unwrap().ch == '█')
            .count();
        // four minos, two columns each
        assert_eq!(painted, 8);

        assert!(find_text(&fb, "SCORE").is_some());
        assert!(find_text(&fb, "LEVEL").is_some());
        assert!(find_text(&fb, "LINES").is_some());
        assert!(find_text(&fb, "NEXT").is_some());
    }

    #[test]
    fn overlays_follow_state() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);

        let mut paused = GameSnapshot::default();
        paused.running = true;
        paused.paused = true;
        let fb = view.render(&[paused], vp);
        assert!(find_text(&fb, "PAUSED").is_some());
        assert!(find_text(&fb, "GAME OVER").is_none());

        let mut over = GameSnapshot::default();
        over.game_over = true;
        let fb = view.render(&[over], vp);
        assert!(find_text(&fb, "GAME OVER").is_some());
        assert!(find_text(&fb, "R: restart").is_some());
    }

    #[test]
    fn two_players_render_side_by_side() {
        let snaps = [GameSnapshot::default(), GameSnapshot::default()];
        let fb = GameView::default().render(&snaps, Viewport::new(100, 24));

        let (p1_x, _) = find_text(&fb, "P1").unwrap();
        let (p2_x, _) = find_text(&fb, "P2").unwrap();
        assert_eq!(p2_x - p1_x, 36 + PLAYER_GAP);

        let corners = fb.row_text(1).matches('┌').count();
        assert_eq!(corners, 2);

        // each board names its own restart key
        assert!(find_text(&fb, "R: start").is_some());
        assert!(find_text(&fb, "O: start").is_some());
    }

    #[test]
    fn render_into_resizes_the_buffer() {
        let mut fb = FrameBuffer::new(1, 1);
        GameView::default().render_into(&[GameSnapshot::default()], Viewport::new(50, 30), &mut fb);
        assert_eq!((fb.width(), fb.height()), (50, 30));
    }
}
