//! Playback cursor over a materialized trace
//!
//! [`Player`] holds the current position into a [`Trace`] and the play/pause
//! and speed settings a front end needs. It owns no timers: a front end calls
//! [`Player::tick`] once per [`Speed::interval_ms`] while playing.
//!
//! Manual navigation (`next`, `previous`, `seek`, `reset`) always pauses
//! playback, matching how scrubbing behaves in a media player.

use crate::engine::errors::TraceError;
use crate::snapshot::Trace;
use crate::step::Step;

/// Playback speed level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    VerySlow,
    #[default]
    Slow,
    Normal,
    Fast,
    VeryFast,
}

impl Speed {
    /// Delay between automatic steps
    pub fn interval_ms(self) -> u64 {
        match self {
            Speed::VerySlow => 200,
            Speed::Slow => 150,
            Speed::Normal => 100,
            Speed::Fast => 50,
            Speed::VeryFast => 20,
        }
    }

    /// Speed for a 1-based level, clamped to `1..=5`
    pub fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => Speed::VerySlow,
            2 => Speed::Slow,
            3 => Speed::Normal,
            4 => Speed::Fast,
            _ => Speed::VeryFast,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::VerySlow => "Very Slow",
            Speed::Slow => "Slow",
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
            Speed::VeryFast => "Very Fast",
        }
    }
}

/// Navigation state over one trace
#[derive(Debug, Clone)]
pub struct Player<T = f64> {
    trace: Trace<T>,
    position: usize,
    playing: bool,
    speed: Speed,
}

impl<T> Player<T> {
    pub fn new(trace: Trace<T>) -> Self {
        Player {
            trace,
            position: 0,
            playing: false,
            speed: Speed::default(),
        }
    }

    /// Step under the cursor
    pub fn current(&self) -> Option<&Step<T>> {
        self.trace.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    pub fn trace(&self) -> &Trace<T> {
        &self.trace
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn at_start(&self) -> bool {
        self.position == 0
    }

    pub fn at_end(&self) -> bool {
        self.position + 1 >= self.trace.len()
    }

    /// 1-based position and total, as shown next to a scrubber
    pub fn progress(&self) -> (usize, usize) {
        if self.trace.is_empty() {
            (0, 0)
        } else {
            (self.position + 1, self.trace.len())
        }
    }

    /// Step forward; returns false at the last step
    pub fn next(&mut self) -> bool {
        self.playing = false;
        self.advance()
    }

    /// Step backward; returns false at the first step
    pub fn previous(&mut self) -> bool {
        self.playing = false;
        if self.at_start() {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Jump to `index`
    pub fn seek(&mut self, index: usize) -> Result<&Step<T>, TraceError> {
        self.playing = false;
        let len = self.trace.len();
        let step = self
            .trace
            .get(index)
            .ok_or(TraceError::SeekOutOfRange { index, len })?;
        self.position = index;
        Ok(step)
    }

    /// Rewind to the first step
    pub fn reset(&mut self) {
        self.playing = false;
        self.position = 0;
    }

    /// Start automatic playback; refused on an empty trace or at the last step
    pub fn play(&mut self) -> bool {
        self.playing = !self.at_end();
        self.playing
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Advance one step if playing; playback stops on reaching the last step
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        let moved = self.advance();
        if self.at_end() {
            self.playing = false;
        }
        moved
    }

    fn advance(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.position += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Algorithm;

    fn player(input: &[i32]) -> Player<i32> {
        let trace = Trace::materialize(Algorithm::Bubble.run(input).unwrap()).unwrap();
        Player::new(trace)
    }

    #[test]
    fn test_speed_levels() {
        assert_eq!(Speed::default().interval_ms(), 150);
        assert_eq!(Speed::from_level(1), Speed::VerySlow);
        assert_eq!(Speed::from_level(9), Speed::VeryFast);
        assert_eq!(Speed::from_level(3).label(), "Normal");
    }

    #[test]
    fn test_single_step_trace_cannot_play() {
        let mut player = player(&[7]);
        assert_eq!(player.len(), 1);
        assert!(!player.play());
        assert!(!player.tick());
        assert!(!player.next());
        assert_eq!(player.progress(), (1, 1));
    }

    #[test]
    fn test_navigation_pauses_playback() {
        let mut player = player(&[3, 2, 1]);
        assert!(player.play());
        assert!(player.tick());
        assert!(player.next());
        assert!(!player.is_playing());
        assert_eq!(player.position(), 2);

        player.play();
        assert!(player.previous());
        assert!(!player.is_playing());
        assert_eq!(player.position(), 1);
    }
}
