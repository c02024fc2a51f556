//! Transient notice shown by the interactive session: at most one visible
//! at a time, replaced by any newer notice, self-clearing after a fixed TTL.

use std::time::{Duration, Instant};

use crate::commands::CmdMessage;

/// How long a notice stays visible.
pub const BANNER_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
pub struct Banner {
    current: Option<(CmdMessage, Instant)>,
}

impl Banner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice, replacing whatever was visible.
    pub fn show(&mut self, message: CmdMessage, now: Instant) {
        self.current = Some((message, now + BANNER_TTL));
    }

    /// The notice to render, if it has not expired.
    pub fn current(&mut self, now: Instant) -> Option<&CmdMessage> {
        if let Some((_, expires)) = &self.current {
            if now >= *expires {
                self.current = None;
            }
        }
        self.current.as_ref().map(|(message, _)| message)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clears_itself_after_the_ttl() {
        let mut banner = Banner::new();
        let t0 = Instant::now();

        banner.show(CmdMessage::success("Student added successfully!"), t0);
        assert!(banner.current(t0 + Duration::from_secs(2)).is_some());
        assert!(banner.current(t0 + Duration::from_secs(3)).is_none());
        // Stays gone.
        assert!(banner.current(t0 + Duration::from_secs(4)).is_none());
    }

    #[test]
    fn newer_notice_replaces_and_restarts_the_clock() {
        let mut banner = Banner::new();
        let t0 = Instant::now();

        banner.show(CmdMessage::error("first"), t0);
        banner.show(CmdMessage::success("second"), t0 + Duration::from_secs(2));

        let visible = banner.current(t0 + Duration::from_secs(4)).unwrap();
        assert_eq!(visible.content, "second");
        assert!(banner.current(t0 + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn manual_clear_hides_the_notice() {
        let mut banner = Banner::new();
        let t0 = Instant::now();

        banner.show(CmdMessage::info("hi"), t0);
        banner.clear();
        assert!(banner.current(t0).is_none());
    }
}
