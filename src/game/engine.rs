use super::{
    action::Direction,
    config::GameConfig,
    state::{Cell, CollisionType, GameState, Snake},
};
use crate::error::Result;
use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Length of the snake at the start of every game
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate an obstacle this step
    pub ate_obstacle: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Outcome of an obstacle spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A new obstacle was placed at this cell
    Placed(Cell),
    /// Every cell holds the snake or an obstacle
    GridFull,
    /// The game is over; nothing was placed
    Inactive,
}

/// The game engine that handles all game logic
///
/// The engine holds no game state of its own. Every operation takes the
/// [`GameState`] it acts on, so a host decides when ticks, spawns and
/// input happen.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose obstacle placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game on the configured grid
    pub fn init(&self) -> GameState {
        Self::starting_state(self.config.columns, self.config.rows)
    }

    /// Start over on the same grid, keeping the best score
    pub fn reset(&self, state: &mut GameState) {
        let best_score = state.best_score;
        *state = Self::starting_state(state.columns, state.rows);
        state.best_score = best_score;
        info!("game reset, best score {}", best_score);
    }

    fn starting_state(columns: usize, rows: usize) -> GameState {
        let head = Cell::new((columns / 2 + 1) as i32, (rows / 2) as i32 - 1);
        let snake = Snake::new(head, Direction::Up, INITIAL_SNAKE_LENGTH);

        GameState::new(columns, rows, snake, Direction::Up)
    }

    /// Buffer a direction for the next tick
    ///
    /// Returns false, leaving the state untouched, if `requested` reverses the
    /// committed direction or the game is over.
    pub fn set_direction(&self, state: &mut GameState, requested: Direction) -> bool {
        if !state.running {
            return false;
        }

        if state.direction.is_opposite(requested) {
            debug!(
                "rejected {:?}: reverses committed direction {:?}",
                requested, state.direction
            );
            return false;
        }

        state.pending_direction = requested;
        true
    }

    /// Apply the first acceptable direction out of `candidates`, best first
    pub fn set_direction_ranked(
        &self,
        state: &mut GameState,
        candidates: &[Direction],
    ) -> Option<Direction> {
        candidates
            .iter()
            .copied()
            .find(|&direction| self.set_direction(state, direction))
    }

    /// Execute one simulation tick
    pub fn advance(&self, state: &mut GameState) -> StepResult {
        if !state.running {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_obstacle: false,
                    collision_type: None,
                },
            };
        }

        state.direction = state.pending_direction;
        let new_head = state.snake.head().moved_in_direction(state.direction);

        // A dead snake must not eat, so collisions come first
        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.running = false;
            state.best_score = state.best_score.max(state.score);
            info!(
                "game over ({:?}) at {:?}, score {}, best {}",
                collision_type, new_head, state.score, state.best_score
            );

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_obstacle: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        let ate_obstacle = state.obstacles.remove(&new_head);
        if ate_obstacle {
            state.score += 1;
        }

        state.snake.slither(new_head, ate_obstacle);
        state.ticks += 1;

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_obstacle,
                collision_type: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, cell: Cell) -> Option<CollisionType> {
        if !state.is_in_bounds(cell) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it only moves after the head is placed
        if state.is_occupied_by_snake(cell) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn one obstacle at a random free cell
    pub fn place_obstacle(&mut self, state: &mut GameState) -> Placement {
        if !state.running {
            return Placement::Inactive;
        }

        // Rejection sampling, capped so a crowded board can't spin forever
        for _ in 0..state.cell_count() {
            let cell = Cell::new(
                self.rng.gen_range(0..state.columns) as i32,
                self.rng.gen_range(0..state.rows) as i32,
            );

            if !state.is_occupied(cell) {
                state.obstacles.insert(cell);
                return Placement::Placed(cell);
            }
        }

        match state.free_cells().choose(&mut self.rng) {
            Some(&cell) => {
                debug!("placed obstacle at {:?} after exhausting samples", cell);
                state.obstacles.insert(cell);
                Placement::Placed(cell)
            }
            None => {
                debug!("grid full, no obstacle placed");
                Placement::GridFull
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::seeded(GameConfig::small(), 7).unwrap()
    }

    fn state_with(
        columns: usize,
        rows: usize,
        cells: &[(i32, i32)],
        direction: Direction,
    ) -> GameState {
        let snake = Snake::from_cells(cells.iter().map(|&c| Cell::from(c)));
        GameState::new(columns, rows, snake, direction)
    }

    #[test]
    fn test_init() {
        let engine = GameEngine::seeded(GameConfig::new(31, 31), 0).unwrap();
        let state = engine.init();

        assert!(state.running);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 0);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.pending_direction, Direction::Up);
        assert!(state.obstacles.is_empty());

        let cells: Vec<Cell> = state.snake.cells().copied().collect();
        assert_eq!(
            cells,
            vec![Cell::new(16, 14), Cell::new(16, 15), Cell::new(16, 16)]
        );
    }

    #[test]
    fn test_init_fits_smallest_grid() {
        let engine = GameEngine::seeded(GameConfig::new(3, 3), 0).unwrap();
        let state = engine.init();
        assert!(state.snake.cells().all(|c| state.is_in_bounds(*c)));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        assert!(GameEngine::seeded(GameConfig::new(1, 1), 0).is_err());
    }

    #[test]
    fn test_basic_movement() {
        let engine = engine();
        let mut state = state_with(5, 5, &[(2, 2), (2, 1)], Direction::Down);

        let result = engine.advance(&mut state);

        assert!(!result.terminated);
        assert!(!result.info.ate_obstacle);
        let cells: Vec<Cell> = state.snake.cells().copied().collect();
        assert_eq!(cells, vec![Cell::new(2, 3), Cell::new(2, 2)]);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_wall_collision() {
        let engine = engine();
        let mut state = state_with(5, 5, &[(0, 0), (1, 0)], Direction::Left);
        state.score = 4;
        let snake_before = state.snake.clone();

        let result = engine.advance(&mut state);

        assert!(result.terminated);
        assert!(!state.running);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake, snake_before);
        assert_eq!(state.best_score, 4);
    }

    #[test]
    fn test_upper_bound_is_exclusive() {
        let engine = engine();
        let mut state = state_with(5, 5, &[(4, 2), (3, 2)], Direction::Right);

        let result = engine.advance(&mut state);

        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
    }

    #[test]
    fn test_self_collision() {
        let engine = engine();
        // Head at (2,2) facing Right, body curls around so Down hits (2,3)
        let mut state = state_with(
            5,
            5,
            &[(2, 2), (1, 2), (1, 3), (2, 3), (3, 3)],
            Direction::Right,
        );

        assert!(engine.set_direction(&mut state, Direction::Down));
        let result = engine.advance(&mut state);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_moving_into_tail_collides() {
        let engine = engine();
        let mut state = state_with(
            5,
            5,
            &[(1, 1), (2, 1), (2, 2), (1, 2)],
            Direction::Left,
        );
        engine.set_direction(&mut state, Direction::Down);

        let result = engine.advance(&mut state);

        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_obstacle_consumption() {
        let engine = engine();
        let mut state = state_with(5, 5, &[(3, 2), (3, 1)], Direction::Down);
        state.obstacles.insert(Cell::new(3, 3));

        let result = engine.advance(&mut state);

        assert!(result.info.ate_obstacle);
        assert!(state.running);
        assert_eq!(state.score, 1);
        assert!(state.obstacles.is_empty());
        let cells: Vec<Cell> = state.snake.cells().copied().collect();
        assert_eq!(
            cells,
            vec![Cell::new(3, 3), Cell::new(3, 2), Cell::new(3, 1)]
        );
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let engine = engine();
        let mut state = engine.init();

        assert!(!engine.set_direction(&mut state, Direction::Down));
        assert_eq!(state.pending_direction, Direction::Up);
    }

    #[test]
    fn test_direction_buffered_until_tick() {
        let engine = engine();
        let mut state = engine.init();

        assert!(engine.set_direction(&mut state, Direction::Left));
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.pending_direction, Direction::Left);

        engine.advance(&mut state);
        assert_eq!(state.direction, Direction::Left);
    }

    #[test]
    fn test_reversal_checked_against_committed_direction() {
        let engine = engine();
        let mut state = engine.init();

        // Left is pending, but Up is still committed, so Right is allowed
        engine.set_direction(&mut state, Direction::Left);
        assert!(engine.set_direction(&mut state, Direction::Right));
        assert_eq!(state.pending_direction, Direction::Right);
    }

    #[test]
    fn test_ranked_directions() {
        let engine = engine();
        let mut state = engine.init();

        let applied =
            engine.set_direction_ranked(&mut state, &[Direction::Down, Direction::Left]);
        assert_eq!(applied, Some(Direction::Left));
        assert_eq!(state.pending_direction, Direction::Left);

        let applied = engine.set_direction_ranked(&mut state, &[Direction::Down]);
        assert_eq!(applied, None);
        assert_eq!(state.pending_direction, Direction::Left);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.init();
        state.running = false;
        let before = state.clone();

        let result = engine.advance(&mut state);
        assert!(result.terminated);
        assert_eq!(result.info.collision_type, None);

        assert!(!engine.set_direction(&mut state, Direction::Left));
        assert_eq!(engine.place_obstacle(&mut state), Placement::Inactive);
        assert_eq!(state, before);
    }

    #[test]
    fn test_place_obstacle_avoids_occupied_cells() {
        let mut engine = engine();
        let mut state = engine.init();

        for _ in 0..50 {
            match engine.place_obstacle(&mut state) {
                Placement::Placed(cell) => {
                    assert!(state.is_in_bounds(cell));
                    assert!(!state.is_occupied_by_snake(cell));
                }
                other => panic!("unexpected placement {:?}", other),
            }
        }
        assert_eq!(state.obstacles.len(), 50);
    }

    #[test]
    fn test_place_obstacle_on_full_grid() {
        let mut engine = engine();
        let mut state = state_with(3, 3, &[(1, 1), (1, 2), (2, 2)], Direction::Up);
        for cell in state.free_cells() {
            state.obstacles.insert(cell);
        }
        let obstacles_before = state.obstacles.clone();

        assert_eq!(engine.place_obstacle(&mut state), Placement::GridFull);
        assert_eq!(state.obstacles, obstacles_before);
    }

    #[test]
    fn test_place_obstacle_finds_last_free_cell() {
        let mut engine = engine();
        let mut state = state_with(3, 3, &[(1, 1)], Direction::Up);
        for cell in state.free_cells() {
            if cell != Cell::new(0, 2) {
                state.obstacles.insert(cell);
            }
        }

        assert_eq!(
            engine.place_obstacle(&mut state),
            Placement::Placed(Cell::new(0, 2))
        );
        assert!(state.free_cells().is_empty());
    }

    #[test]
    fn test_reset_keeps_best_score_and_grid() {
        let engine = engine();
        let mut state = state_with(9, 7, &[(0, 0)], Direction::Up);
        state.score = 6;
        state.obstacles.insert(Cell::new(3, 3));
        engine.advance(&mut state);
        assert!(!state.running);

        engine.reset(&mut state);

        assert!(state.running);
        assert_eq!(state.best_score, 6);
        assert_eq!(state.score, 0);
        assert_eq!((state.columns, state.rows), (9, 7));
        assert!(state.obstacles.is_empty());
        assert_eq!(state.snake.head(), Cell::new(5, 2));
        assert_eq!(state.direction, Direction::Up);
    }

    #[test]
    fn test_best_score_never_decreases() {
        let engine = engine();
        let mut state = state_with(5, 5, &[(0, 0)], Direction::Up);
        state.best_score = 10;
        state.score = 3;

        engine.advance(&mut state);

        assert_eq!(state.best_score, 10);
    }
}
