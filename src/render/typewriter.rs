//! Character-by-character text reveal

use crate::config::TimingConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

const NORMAL: u8 = 0;
const HURRIED: u8 = 1;
const SKIPPED: u8 = 2;

/// Shared flag that speeds up or collapses a running reveal
///
/// Clones share the flag, so input handling can hold one while the
/// typewriter polls another. A skip always wins over a hurry.
#[derive(Debug, Clone, Default)]
pub struct SkipSignal(Arc<AtomicU8>);

impl SkipSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the rest of the reveal to the fast delay
    pub fn hurry(&self) {
        self.0.fetch_max(HURRIED, Ordering::SeqCst);
    }

    pub fn skip(&self) {
        self.0.store(SKIPPED, Ordering::SeqCst);
    }

    pub fn is_hurried(&self) -> bool {
        self.0.load(Ordering::SeqCst) == HURRIED
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst) == SKIPPED
    }

    pub fn reset(&self) {
        self.0.store(NORMAL, Ordering::SeqCst);
    }
}

/// Reveals text at a per-character delay
///
/// The signal is never reset here; callers reset it once per piece of text
/// they consider a single reveal.
#[derive(Debug, Clone)]
pub struct Typewriter {
    delay: Duration,
    fast_delay: Duration,
    skip: SkipSignal,
}

impl Typewriter {
    pub fn new(char_delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(char_delay_ms),
            fast_delay: Duration::from_millis(char_delay_ms),
            skip: SkipSignal::new(),
        }
    }

    pub fn from_timing(timing: &TimingConfig) -> Self {
        Self::new(timing.typewriter_speed).with_fast_delay(timing.typewriter_speed_fast)
    }

    /// Per-character delay once the signal is hurried
    pub fn with_fast_delay(mut self, char_delay_ms: u64) -> Self {
        self.fast_delay = Duration::from_millis(char_delay_ms);
        self
    }

    pub fn skip_signal(&self) -> SkipSignal {
        self.skip.clone()
    }

    /// Feed `text` to `emit` one character at a time
    ///
    /// Once the skip signal is set, the rest of the text goes out in a single
    /// chunk. Either way every character is emitted exactly once.
    pub async fn reveal<F>(&self, text: &str, mut emit: F)
    where
        F: FnMut(&str),
    {
        for (i, c) in text.char_indices() {
            if self.skip.is_set() {
                emit(&text[i..]);
                return;
            }
            emit(&text[i..i + c.len_utf8()]);
            let delay = if self.skip.is_hurried() {
                self.fast_delay
            } else {
                self.delay
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}
