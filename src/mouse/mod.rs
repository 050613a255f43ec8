//! Mouse control: jump-sized directional moves, clicks, chunked scrolling,
//! and the persisted named-spot store.

pub mod spots;

pub use spots::SpotStore;

use crate::core::config::EngineConfig;
use crate::core::error::{Result, SniperError};
use crate::core::types::{Direction, MouseButton, Point};
use crate::input::ActionExecutor;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct MouseState {
    /// Last known cursor position
    position: Point,
    /// Pixels per directional step
    jump: i32,
}

pub struct Mouse {
    executor: Arc<dyn ActionExecutor>,
    state: Mutex<MouseState>,
    move_delay: Duration,
    click_spacing: Duration,
    scroll_chunk: u32,
    scroll_step_delay: Duration,
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}

impl Mouse {
    pub fn new(executor: Arc<dyn ActionExecutor>, config: &EngineConfig) -> Result<Self> {
        let position = executor.mouse_position()?;
        Ok(Self {
            executor,
            state: Mutex::new(MouseState {
                position,
                jump: config.jump,
            }),
            move_delay: config.move_delay(),
            click_spacing: config.click_spacing(),
            scroll_chunk: config.scroll_chunk.max(1),
            scroll_step_delay: config.scroll_step_delay(),
        })
    }

    fn state(&self) -> MutexGuard<'_, MouseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached cursor position (as of the last move or sync)
    pub fn position(&self) -> Point {
        self.state().position
    }

    /// Re-read the live cursor position into the cache
    pub fn sync(&self) -> Result<Point> {
        let live = self.executor.mouse_position()?;
        self.state().position = live;
        Ok(live)
    }

    pub fn jump(&self) -> i32 {
        self.state().jump
    }

    pub fn set_jump(&self, pixels: i32) -> Result<()> {
        if pixels <= 0 {
            return Err(SniperError::Config(format!(
                "jump ({}) must be positive",
                pixels
            )));
        }
        self.state().jump = pixels;
        tracing::debug!(pixels, "mouse jump set");
        Ok(())
    }

    /// Move one jump in `direction`, clamped to the screen edge
    pub fn step(&self, direction: Direction) -> Result<Point> {
        let mut state = self.state();
        // The user may have moved the mouse by hand since our last move
        let current = self.executor.mouse_position()?;
        let screen = self.executor.screen_size()?;
        let jump = state.jump;

        let target = match direction {
            Direction::Left => Point::new(current.x.saturating_sub(jump), current.y),
            Direction::Right => Point::new(current.x.saturating_add(jump), current.y),
            Direction::Up => Point::new(current.x, current.y.saturating_sub(jump)),
            Direction::Down => Point::new(current.x, current.y.saturating_add(jump)),
        }
        .clamped(screen.width, screen.height);

        self.executor.move_mouse(target)?;
        state.position = target;
        drop(state);

        pause(self.move_delay);
        Ok(target)
    }

    /// Move to an absolute position
    pub fn move_to(&self, target: Point) -> Result<()> {
        let mut state = self.state();
        self.executor.move_mouse(target)?;
        state.position = target;
        drop(state);
        pause(self.move_delay);
        Ok(())
    }

    pub fn click(&self) -> Result<()> {
        self.click_times(MouseButton::Left, 1)
    }

    pub fn double_click(&self) -> Result<()> {
        self.click_times(MouseButton::Left, 2)
    }

    pub fn triple_click(&self) -> Result<()> {
        self.click_times(MouseButton::Left, 3)
    }

    pub fn right_click(&self) -> Result<()> {
        self.click_times(MouseButton::Right, 1)
    }

    fn click_times(&self, button: MouseButton, times: usize) -> Result<()> {
        for i in 0..times {
            if i > 0 {
                pause(self.click_spacing);
            }
            self.executor.click(button)?;
        }
        Ok(())
    }

    /// Scroll `amount` units, one notch per chunk, pausing between notches
    pub fn scroll(&self, direction: Direction, amount: u32) -> Result<()> {
        let steps = amount.div_ceil(self.scroll_chunk);
        let (dx, dy) = match direction {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        };
        tracing::debug!(?direction, amount, steps, "scroll");
        for _ in 0..steps {
            self.executor.scroll(dx, dy)?;
            pause(self.scroll_step_delay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ScreenSize;
    use crate::input::{InputEvent, RecordingExecutor};

    fn mouse_at(x: i32, y: i32, jump: i32) -> (Arc<RecordingExecutor>, Mouse) {
        let exec = Arc::new(RecordingExecutor::with_screen(
            ScreenSize::new(800, 600),
            Point::new(x, y),
        ));
        let config = EngineConfig {
            jump,
            ..EngineConfig::without_delays()
        };
        let mouse = Mouse::new(exec.clone(), &config).unwrap();
        (exec, mouse)
    }

    #[test]
    fn test_step_moves_one_jump() {
        let (exec, mouse) = mouse_at(400, 300, 50);
        mouse.step(Direction::Left).unwrap();
        assert_eq!(exec.cursor(), Point::new(350, 300));
        mouse.step(Direction::Down).unwrap();
        assert_eq!(exec.cursor(), Point::new(350, 350));
        assert_eq!(mouse.position(), Point::new(350, 350));
    }

    #[test]
    fn test_step_clamps_at_edges() {
        let (exec, mouse) = mouse_at(10, 590, 50);
        mouse.step(Direction::Left).unwrap();
        assert_eq!(exec.cursor().x, 0);
        mouse.step(Direction::Down).unwrap();
        assert_eq!(exec.cursor().y, 599);
    }

    #[test]
    fn test_huge_jump_clamps_instead_of_overflowing() {
        let (exec, mouse) = mouse_at(400, 300, 10);
        mouse.set_jump(i32::MAX).unwrap();
        mouse.step(Direction::Right).unwrap();
        assert_eq!(exec.cursor(), Point::new(799, 300));
        mouse.step(Direction::Down).unwrap();
        assert_eq!(exec.cursor(), Point::new(799, 599));
        mouse.step(Direction::Left).unwrap();
        mouse.step(Direction::Up).unwrap();
        assert_eq!(exec.cursor(), Point::new(0, 0));
    }

    #[test]
    fn test_step_resyncs_after_manual_move() {
        let (exec, mouse) = mouse_at(400, 300, 10);
        exec.nudge_cursor(Point::new(100, 100));
        mouse.step(Direction::Right).unwrap();
        assert_eq!(exec.cursor(), Point::new(110, 100));
    }

    #[test]
    fn test_triple_click_clicks_three_times() {
        let (exec, mouse) = mouse_at(0, 0, 10);
        mouse.triple_click().unwrap();
        let clicks = exec
            .events()
            .iter()
            .filter(|e| matches!(e, InputEvent::Click { button: MouseButton::Left }))
            .count();
        assert_eq!(clicks, 3);
    }

    #[test]
    fn test_scroll_is_chunked() {
        let (exec, mouse) = mouse_at(0, 0, 10);
        mouse.scroll(Direction::Down, 35).unwrap();
        assert_eq!(exec.events().len(), 4);
        assert!(exec
            .events()
            .iter()
            .all(|e| *e == InputEvent::Scroll { dx: 0, dy: 1 }));
    }

    #[test]
    fn test_rejects_bad_jump() {
        let (_, mouse) = mouse_at(0, 0, 10);
        assert!(mouse.set_jump(0).is_err());
        mouse.set_jump(25).unwrap();
        assert_eq!(mouse.jump(), 25);
    }
}
