use log::warn;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::geometry::CellGeometry;
use crate::game::{Cell, GameState};
use crate::score::Scoreboard;

pub struct Renderer {
    surface_available: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            surface_available: true,
        }
    }

    /// Draw one frame. Returns the board geometry, or None when the board could not be drawn.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        state: &GameState,
        scoreboard: &Scoreboard,
    ) -> Option<CellGeometry> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(scoreboard);
        frame.render_widget(stats, chunks[0]);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);

        if !state.running {
            let game_over = self.render_game_over(state);
            frame.render_widget(game_over, chunks[1]);
            return None;
        }

        let playfield = chunks[1].inner(Margin::new(1, 1));
        let Some(geometry) = CellGeometry::new(playfield, state.columns, state.rows) else {
            if self.surface_available {
                warn!(
                    "{}x{} surface cannot fit a {}x{} grid, skipping board draw",
                    playfield.width, playfield.height, state.columns, state.rows
                );
            }
            self.surface_available = false;
            frame.render_widget(self.render_too_small(), chunks[1]);
            return None;
        };
        self.surface_available = true;

        // Center the board, then re-anchor the geometry on it
        let board = centered(geometry.board_area(), playfield);
        let geometry = CellGeometry::new(board, state.columns, state.rows)?;

        let frame_rect = Rect::new(board.x - 1, board.y - 1, board.width + 2, board.height + 2);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
            frame_rect,
        );
        frame.render_widget(BoardWidget { state, geometry }, board);

        Some(geometry)
    }

    fn render_stats(&self, scoreboard: &Scoreboard) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scoreboard.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scoreboard.best_score().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scoreboard.games_played().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(scoreboard.clock(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.best_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_too_small(&self) -> Paragraph<'_> {
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Terminal too small for the board",
                Style::default().fg(Color::Yellow),
            )),
        ])
        .alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("click", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Paints grid cells onto an area laid out by [`CellGeometry`]
struct BoardWidget<'a> {
    state: &'a GameState,
    geometry: CellGeometry,
}

impl BoardWidget<'_> {
    fn paint(&self, buf: &mut Buffer, cell: Cell, symbol: &str, style: Style) {
        let Some(rect) = self.geometry.cell_rect(cell) else {
            return;
        };

        let fill = symbol.repeat(rect.width as usize);
        for y in rect.top()..rect.bottom() {
            buf.set_string(rect.x, y, &fill, style);
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let empty = Style::default().fg(Color::DarkGray);
        for row in 0..self.state.rows as i32 {
            for col in 0..self.state.columns as i32 {
                if let Some(rect) = self.geometry.cell_rect(Cell::new(col, row)) {
                    buf.set_string(rect.x, rect.y, "·", empty);
                }
            }
        }

        let obstacle = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        for &cell in &self.state.obstacles {
            self.paint(buf, cell, "●", obstacle);
        }

        let body = Style::default().fg(Color::Green);
        for &cell in self.state.snake.cells().skip(1) {
            self.paint(buf, cell, "█", body);
        }

        let head = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        self.paint(buf, self.state.snake.head(), "█", head);
    }
}

fn centered(inner: Rect, outer: Rect) -> Rect {
    let x = outer.x + outer.width.saturating_sub(inner.width) / 2;
    let y = outer.y + outer.height.saturating_sub(inner.height) / 2;
    Rect::new(x, y, inner.width, inner.height)
}
