//! Terminal UI rendering with ratatui

use crate::board::{Cell, BOARD_WIDTH, VISIBLE_HEIGHT};
use crate::game::Snapshot;
use crate::settings::Settings;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Board (10*2 + 2 for borders) + side panel
const GAME_WIDTH: u16 = 22 + 18;
/// Visible rows + 2 for borders
const GAME_HEIGHT: u16 = VISIBLE_HEIGHT as u16 + 2;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();
    let block_char = settings.visual.block_char();

    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // board | stats + controls
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Length(18)])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, block_char);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(6)])
        .split(main_layout[1]);

    render_stats(frame, right_layout[0], snapshot);
    render_controls(frame, right_layout[1], settings);

    let keys = &settings.keys;
    if snapshot.game_over {
        let hint = format!("{} to restart", first(&keys.restart));
        render_overlay(frame, game_area, "GAME OVER", &hint);
    } else if snapshot.paused {
        let hint = format!("{} to resume", first(&keys.pause));
        render_overlay(frame, game_area, "PAUSED", &hint);
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, block_char: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let active = snapshot.active.as_ref();
    let mut lines: Vec<Line> = Vec::with_capacity(VISIBLE_HEIGHT);

    for (row, cells) in snapshot.board.iter().enumerate() {
        let spans: Vec<Span> = (0..BOARD_WIDTH)
            .map(|col| {
                let falling = active
                    .filter(|piece| piece.cells.contains(&(col, row)))
                    .map(|piece| piece.color);
                match (falling, cells[col]) {
                    (Some(color), _) | (None, Cell::Filled(color)) => {
                        Span::styled(block_char, Style::default().fg(color))
                    }
                    (None, Cell::Empty) => Span::raw(EMPTY),
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.lines),
            Style::default().fg(Color::Green),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the key hints
fn render_controls(frame: &mut Frame, area: Rect, settings: &Settings) {
    let block = Block::default()
        .title(" KEYS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let keys = &settings.keys;
    let hints = [
        ("Move", format!("{}/{}", first(&keys.move_left), first(&keys.move_right))),
        ("Rotate", format!("{}/{}", first(&keys.rotate_right), first(&keys.rotate_left))),
        ("Down", first(&keys.soft_drop).to_string()),
        ("Drop", first(&keys.hard_drop).to_string()),
        ("Pause", first(&keys.pause).to_string()),
        ("Restart", first(&keys.restart).to_string()),
        ("Quit", first(&keys.quit).to_string()),
    ];

    let lines: Vec<Line> = hints
        .into_iter()
        .map(|(label, key)| {
            Line::from(vec![
                Span::styled(format!("{:<8}", label), Style::default().fg(Color::Gray)),
                Span::styled(key, Style::default().fg(Color::Magenta)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn first(keys: &[String]) -> &str {
    keys.first().map(String::as_str).unwrap_or("-")
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, Game};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(snapshot: &Snapshot) -> String {
        draw_with(snapshot, &Settings::default())
    }

    fn draw_with(snapshot: &Snapshot, settings: &Settings) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|frame| render_game(frame, snapshot, settings))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_stats_are_drawn() {
        let game = Game::with_seed(1);
        let screen = draw(&game.snapshot());
        assert!(screen.contains("SCORE"));
        assert!(screen.contains("LINES"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_pause_overlay() {
        let mut game = Game::with_seed(1);
        game.process_action(Action::TogglePause);
        let screen = draw(&game.snapshot());
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("p to resume"));
    }

    #[test]
    fn test_overlay_hints_follow_bindings() {
        let mut settings = Settings::default();
        settings.keys.pause = vec!["Tab".to_string()];
        settings.keys.restart = vec!["n".to_string(), "r".to_string()];

        let mut game = Game::with_seed(1);
        game.process_action(Action::TogglePause);
        assert!(draw_with(&game.snapshot(), &settings).contains("Tab to resume"));

        game.process_action(Action::TogglePause);
        while !game.snapshot().game_over {
            game.tick();
        }
        let screen = draw_with(&game.snapshot(), &settings);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("n to restart"));
    }

    #[test]
    fn test_falling_piece_is_drawn_once_visible() {
        let mut game = Game::with_seed(1);
        for _ in 0..4 {
            game.tick();
        }
        let screen = draw(&game.snapshot());
        assert_eq!(screen.matches('█').count(), 8);
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let game = Game::with_seed(1);
        let settings = Settings::default();
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal
            .draw(|frame| render_game(frame, &game.snapshot(), &settings))
            .unwrap();
    }
}
