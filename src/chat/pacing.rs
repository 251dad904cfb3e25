//! Typing-cadence pacing for streamed replies

use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

/// When to flush buffered text and how long to "type" before each flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Flush once this many characters are buffered
    pub flush_chars: usize,
    /// Flush once this long has passed since the previous flush
    pub flush_interval: Duration,
    /// Lower bound (inclusive) of the delay before a flush
    pub min_delay: Duration,
    /// Upper bound (exclusive) of the delay before a flush
    pub max_delay: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            flush_chars: 3,
            flush_interval: Duration::from_millis(100),
            min_delay: Duration::from_millis(50),
            max_delay: Duration::from_millis(150),
        }
    }
}

impl PacingConfig {
    /// Same flush policy, no artificial delay
    #[cfg(test)]
    pub fn instant() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Draw a delay uniformly from `[min_delay, max_delay)`
    pub fn typing_delay(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        rand::thread_rng().gen_range(self.min_delay..self.max_delay)
    }
}

/// Accumulates upstream fragments until the flush policy says to emit
#[derive(Debug)]
pub(super) struct FragmentBuffer {
    config: PacingConfig,
    pending: String,
    last_flush: Instant,
}

impl FragmentBuffer {
    pub(super) fn new(config: PacingConfig) -> Self {
        Self {
            config,
            pending: String::new(),
            last_flush: Instant::now(),
        }
    }

    /// Buffer `text`; returns true when the buffer should be flushed now
    pub(super) fn push(&mut self, text: &str) -> bool {
        self.pending.push_str(text);
        !self.pending.is_empty()
            && (self.pending.chars().count() >= self.config.flush_chars
                || self.last_flush.elapsed() >= self.config.flush_interval)
    }

    /// Take the buffered text, if any, and restart the flush clock
    pub(super) fn take(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        self.last_flush = Instant::now();
        Some(std::mem::take(&mut self.pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = PacingConfig::default();
        assert_eq!(config.flush_chars, 3);
        assert_eq!(config.flush_interval, Duration::from_millis(100));
        assert_eq!(config.min_delay, Duration::from_millis(50));
        assert_eq!(config.max_delay, Duration::from_millis(150));
    }

    #[test]
    fn test_typing_delay_within_bounds() {
        let config = PacingConfig::default();
        for _ in 0..200 {
            let delay = config.typing_delay();
            assert!(delay >= config.min_delay);
            assert!(delay < config.max_delay);
        }
    }

    #[test]
    fn test_instant_has_no_delay() {
        assert_eq!(PacingConfig::instant().typing_delay(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_flush_on_char_count() {
        let mut buffer = FragmentBuffer::new(PacingConfig::instant());

        assert!(!buffer.push("H"));
        assert!(!buffer.push("i"));
        assert!(buffer.push("!"));
        assert_eq!(buffer.take().as_deref(), Some("Hi!"));
        assert!(buffer.take().is_none());
    }

    #[tokio::test]
    async fn test_counts_chars_not_bytes() {
        let mut buffer = FragmentBuffer::new(PacingConfig::instant());
        assert!(!buffer.push("é🌟"));
        assert!(buffer.push("x"));
    }

    #[tokio::test]
    async fn test_flush_on_interval() {
        let config = PacingConfig {
            flush_interval: Duration::from_millis(20),
            ..PacingConfig::instant()
        };
        let mut buffer = FragmentBuffer::new(config);

        assert!(!buffer.push("a"));
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(buffer.push("b"));
        assert_eq!(buffer.take().as_deref(), Some("ab"));
    }

    #[tokio::test]
    async fn test_empty_fragment_never_flushes_empty_buffer() {
        let config = PacingConfig {
            flush_interval: Duration::ZERO,
            ..PacingConfig::instant()
        };
        let mut buffer = FragmentBuffer::new(config);
        assert!(!buffer.push(""));
        assert!(buffer.take().is_none());
    }
}
