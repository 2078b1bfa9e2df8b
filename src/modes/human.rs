use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, error, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEngine, GameState, Placement};
use crate::input::{InputHandler, KeyAction, rank_directions};
use crate::render::{CellGeometry, Renderer};
use crate::score::{BestScoreStore, ScoreSink, Scoreboard};

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    scoreboard: Scoreboard,
    renderer: Renderer,
    input_handler: InputHandler,
    store: Box<dyn BestScoreStore>,
    /// Best score as last written to the store
    saved_best: u32,
    /// Board layout from the last frame, used to place pointer input
    geometry: Option<CellGeometry>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(
        config: GameConfig,
        store: Box<dyn BestScoreStore>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed),
            None => GameEngine::new(config),
        }
        .context("Invalid game configuration")?;

        let saved_best = store.load().unwrap_or_else(|e| {
            warn!("Could not load best score, starting from 0: {}", e);
            0
        });

        let mut state = engine.init();
        state.best_score = saved_best;

        Ok(Self {
            engine,
            state,
            scoreboard: Scoreboard::new(saved_best),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            store,
            saved_best,
            geometry: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // A half-finished setup must not leave the shell in raw mode
        let mut terminal = restore_on_error(setup_terminal(), restore_terminal)?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let config = self.engine.config().clone();
        let mut tick_timer = interval(config.tick_interval());
        let mut spawn_timer = interval(config.spawn_interval());
        let mut render_timer = interval(config.render_interval());
        // A slow frame should not be followed by a burst of catch-up ticks
        for timer in [&mut tick_timer, &mut spawn_timer, &mut render_timer] {
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        info!(
            "starting {}x{} game, tick {:?}, spawn {:?}",
            config.columns,
            config.rows,
            config.tick_interval(),
            config.spawn_interval()
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Obstacle spawn
                _ = spawn_timer.tick() => {
                    self.spawn_obstacle();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let mut geometry = None;
                    terminal.draw(|frame| {
                        geometry = self.renderer.render(frame, &self.state, &self.scoreboard);
                    }).context("Failed to draw frame")?;
                    self.geometry = geometry;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(direction) => {
                        self.engine.set_direction(&mut self.state, direction);
                    }
                    KeyAction::Restart => self.reset_game(),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => self.handle_pointer(mouse),
            _ => {}
        }
    }

    fn handle_pointer(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let Some(geometry) = self.geometry else {
            return;
        };

        let target = geometry.cell_at(mouse.column, mouse.row);
        let candidates = rank_directions(self.state.snake.head(), target);
        let applied = self
            .engine
            .set_direction_ranked(&mut self.state, &candidates);
        debug!("pointer at {:?}: {:?} -> {:?}", target, candidates, applied);
    }

    fn update_game(&mut self) {
        if !self.state.running {
            return;
        }

        let result = self.engine.advance(&mut self.state);
        self.scoreboard
            .publish(self.state.score, self.state.best_score);

        if result.terminated {
            self.scoreboard.game_over(self.state.score);
            self.persist_best_score();
        }
    }

    fn spawn_obstacle(&mut self) {
        if let Placement::GridFull = self.engine.place_obstacle(&mut self.state) {
            debug!("no room for another obstacle");
        }
    }

    fn persist_best_score(&mut self) {
        if self.state.best_score <= self.saved_best {
            return;
        }

        match self.store.save(self.state.best_score) {
            Ok(()) => {
                info!("new best score {}", self.state.best_score);
                self.saved_best = self.state.best_score;
            }
            Err(e) => error!("Error saving best score: {}", e),
        }
    }

    fn reset_game(&mut self) {
        self.engine.reset(&mut self.state);
        self.scoreboard.game_started();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Undo whatever part of `setup_terminal` went through. Errors are ignored,
/// the setup error is the one worth reporting.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture);
}

fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}
