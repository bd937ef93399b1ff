//! Core game state and logic

use crate::board::{Board, Cell, BOARD_WIDTH, HIDDEN_ROWS, VISIBLE_HEIGHT};
use crate::piece::Piece;
use crate::score::Score;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Pivot where every new piece appears, inside the hidden rows
pub const SPAWN_X: i32 = (BOARD_WIDTH / 2) as i32;
pub const SPAWN_Y: i32 = 1;

/// Where the game is in its lifecycle.
///
/// Locking and line clearing happen inside a single tick or command, so they are never
/// observed from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// The last piece has locked; the next tick spawns a new one
    Spawning,
    Falling,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateRight,
    RotateLeft,
    TogglePause,
    Restart,
    /// Ends the session; handled by the front end
    Quit,
}

/// The falling piece as the renderer sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    /// (column, visible row) of each block below the hidden rows
    pub cells: Vec<(usize, usize)>,
    pub color: ratatui::style::Color,
}

/// Read-only view of everything a frame needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Visible rows only, top to bottom
    pub board: [[Cell; BOARD_WIDTH]; VISIBLE_HEIGHT],
    pub active: Option<ActivePiece>,
    pub score: u64,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current: Piece,
    x: i32,
    y: i32,
    pub score: Score,
    paused: bool,
    game_over: bool,
    /// Set once the current piece has locked and the next tick should spawn
    falling_finished: bool,
    rng: ChaCha8Rng,
}

impl Game {
    /// Create a new game with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a new game whose piece sequence is determined by `seed`
    pub fn with_seed(seed: u64) -> Self {
        let mut game = Self {
            board: Board::new(),
            current: Piece::default(),
            x: SPAWN_X,
            y: SPAWN_Y,
            score: Score::new(),
            paused: false,
            game_over: false,
            falling_finished: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        tracing::debug!(seed, "new game");
        game.start();
        game
    }

    /// Reset everything and spawn the first piece
    pub fn start(&mut self) {
        self.board.reset();
        self.score = Score::new();
        self.paused = false;
        self.game_over = false;
        self.falling_finished = false;
        tracing::info!("game started");
        self.new_piece();
    }

    pub fn state(&self) -> GameState {
        if self.game_over {
            GameState::GameOver
        } else if self.paused {
            GameState::Paused
        } else if self.falling_finished {
            GameState::Spawning
        } else {
            GameState::Falling
        }
    }

    /// Advance one gravity step, or spawn if the last piece has locked
    pub fn tick(&mut self) {
        if self.game_over || self.paused {
            return;
        }
        tracing::trace!(x = self.x, y = self.y, "tick");

        if self.falling_finished {
            self.falling_finished = false;
            self.new_piece();
        } else {
            self.one_line_down();
        }
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::Restart => {
                tracing::info!(score = self.score.points, lines = self.score.lines, "restart");
                self.start();
                return;
            }
            Action::TogglePause => {
                self.toggle_pause();
                return;
            }
            Action::Quit => return,
            _ => {}
        }

        if self.paused || self.game_over || self.falling_finished || self.current.shape().is_empty()
        {
            return;
        }

        match action {
            Action::MoveLeft => {
                self.try_move(self.current, self.x - 1, self.y);
            }
            Action::MoveRight => {
                self.try_move(self.current, self.x + 1, self.y);
            }
            Action::SoftDrop => self.one_line_down(),
            Action::HardDrop => self.drop_down(),
            Action::RotateRight => {
                self.try_move(self.current.rotate_right(), self.x, self.y);
            }
            Action::RotateLeft => {
                self.try_move(self.current.rotate_left(), self.x, self.y);
            }
            Action::TogglePause | Action::Restart | Action::Quit => {}
        }
    }

    /// Copy out what the renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot {
        let mut board = [[Cell::Empty; BOARD_WIDTH]; VISIBLE_HEIGHT];
        for (dst, src) in board.iter_mut().zip(self.board.visible_rows()) {
            *dst = *src;
        }

        let active = if self.falling_finished || self.current.shape().is_empty() {
            None
        } else {
            let cells = self
                .current
                .cells(self.x, self.y)
                .into_iter()
                .filter(|&(_, y)| y >= HIDDEN_ROWS as i32)
                .map(|(x, y)| (x as usize, y as usize - HIDDEN_ROWS))
                .collect();
            Some(ActivePiece {
                cells,
                color: self.current.color(),
            })
        };

        Snapshot {
            board,
            active,
            score: self.score.points,
            lines: self.score.lines,
            paused: self.paused,
            game_over: self.game_over,
        }
    }

    fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
        tracing::debug!(paused = self.paused, "pause toggled");
    }

    /// Spawn a random piece at the top; if it does not fit the game is over
    fn new_piece(&mut self) {
        let mut piece = Piece::default();
        piece.set_random_shape(&mut self.rng);

        if self.try_move(piece, SPAWN_X, SPAWN_Y) {
            tracing::debug!(shape = piece.shape().name(), "spawned");
            return;
        }

        self.game_over = true;
        self.current = Piece::default();
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
        tracing::info!(
            score = self.score.points,
            lines = self.score.lines,
            blocked = piece.shape().name(),
            "game over"
        );
    }

    /// Commit `piece` at (x, y) if it fits there
    fn try_move(&mut self, piece: Piece, x: i32, y: i32) -> bool {
        if !self.board.is_legal_position(&piece, x, y) {
            return false;
        }
        self.current = piece;
        self.x = x;
        self.y = y;
        true
    }

    fn one_line_down(&mut self) {
        if !self.try_move(self.current, self.x, self.y + 1) {
            self.piece_dropped();
        }
    }

    fn drop_down(&mut self) {
        while self.try_move(self.current, self.x, self.y + 1) {}
        self.piece_dropped();
    }

    /// Lock the current piece, clear lines and wait for the next spawn
    fn piece_dropped(&mut self) {
        self.board.lock_piece(&self.current, self.x, self.y);
        tracing::debug!(
            shape = self.current.shape().name(),
            x = self.x,
            y = self.y,
            "locked"
        );

        let lines = self.board.clear_full_lines();
        if lines > 0 {
            let points = self.score.add_clear(lines);
            tracing::debug!(lines, points, total = self.score.points, "lines cleared");
        }

        if !self.game_over {
            self.falling_finished = true;
        }
    }

    /// Test-only: put `piece` at (x, y) without a legality check
    #[cfg(test)]
    pub(crate) fn place(&mut self, piece: Piece, x: i32, y: i32) {
        self.current = piece;
        self.x = x;
        self.y = y;
        self.falling_finished = false;
    }

    #[cfg(test)]
    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn current_piece(&self) -> &Piece {
        &self.current
    }

    /// Pivot of the current piece
    #[cfg(test)]
    pub(crate) fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
