use std::time::{Duration, Instant};

pub const NOTICE_TTL: Duration = Duration::from_secs(2);
pub const FLASH_TTL: Duration = Duration::from_millis(500);

/// A transient message that dismisses itself
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<(String, Instant)>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Replace the current message
    pub fn show(&mut self, text: impl Into<String>, now: Instant) {
        self.current = Some((text.into(), now + self.ttl));
    }

    pub fn current(&self, now: Instant) -> Option<&str> {
        match &self.current {
            Some((text, expires)) if now < *expires => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn expire(&mut self, now: Instant) {
        if self.current(now).is_none() {
            self.current = None;
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Highlight for a rejected row
#[derive(Debug, Clone, Default)]
pub struct RowFlash {
    active: Option<(usize, Instant)>,
}

impl RowFlash {
    pub fn trigger(&mut self, row: usize, now: Instant) {
        self.active = Some((row, now + FLASH_TTL));
    }

    pub fn row(&self, now: Instant) -> Option<usize> {
        match self.active {
            Some((row, until)) if now < until => Some(row),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}
