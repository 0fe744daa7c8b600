//! Developer diagnostics sampled from the frame loop: a frames-per-second counter and a
//! once-a-second widget/viewport poll.
//!
//! Both samplers are plain values owned by the app. Dropping one is the cancellation: the
//! app holds them in an `Option` and clears it in the frame its flag turns off.

use crate::constants::{BREAKPOINT_LG, BREAKPOINT_MD, INSPECTOR_POLL_SECS};
use std::fmt;

/// Counts frames over consecutive one-second windows.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame at `now` (seconds) and returns the latest full-second rate.
    ///
    /// The first tick opens the window. When at least one second has elapsed the frames counted
    /// in the window become the reported rate and a new window starts.
    pub fn tick(&mut self, now: f64) -> u32 {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        if now - start >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Some(now);
        }
        self.fps
    }

    /// Rate of the last completed window; zero before the first one completes.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Layout class derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Small,
    Medium,
    Large,
}

impl Breakpoint {
    pub fn from_width(width: f32) -> Self {
        if width < BREAKPOINT_MD {
            Self::Small
        } else if width < BREAKPOINT_LG {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Small => "SM (Mobile)",
            Self::Medium => "MD (Tablet)",
            Self::Large => "LG (Desktop)",
        })
    }
}

/// One inspector sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InspectorStats {
    /// Widgets registered in the sampled frame
    pub widgets: usize,
    pub width: f32,
    pub height: f32,
}

impl InspectorStats {
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::from_width(self.width)
    }
}

/// Refreshes [`InspectorStats`] at most once per poll interval.
#[derive(Debug, Clone, Default)]
pub struct InspectorPoller {
    last_poll: Option<f64>,
    stats: InspectorStats,
}

impl InspectorPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a fresh sample if the interval has elapsed (or nothing was sampled yet).
    ///
    /// `sample` is only called when a poll is due.
    pub fn poll(&mut self, now: f64, sample: impl FnOnce() -> InspectorStats) -> InspectorStats {
        let due = self
            .last_poll
            .is_none_or(|last| now - last >= INSPECTOR_POLL_SECS);
        if due {
            self.stats = sample();
            self.last_poll = Some(now);
        }
        self.stats
    }

    pub fn stats(&self) -> InspectorStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counts_frames_in_each_full_second() {
        let mut counter = FpsCounter::new();
        // 60 frames spread over the first second, then one frame closing the window
        for i in 0..60 {
            assert_eq!(counter.tick(f64::from(i) / 60.0), 0);
        }
        assert_eq!(counter.tick(1.0), 61);

        for i in 1..=30 {
            counter.tick(1.0 + f64::from(i) / 30.0);
        }
        assert_eq!(counter.fps(), 30);
    }

    #[test]
    fn breakpoints_follow_viewport_width() {
        assert_eq!(Breakpoint::from_width(500.0), Breakpoint::Small);
        assert_eq!(Breakpoint::from_width(767.9), Breakpoint::Small);
        assert_eq!(Breakpoint::from_width(768.0), Breakpoint::Medium);
        assert_eq!(Breakpoint::from_width(1023.0), Breakpoint::Medium);
        assert_eq!(Breakpoint::from_width(1024.0), Breakpoint::Large);
        assert_eq!(Breakpoint::Large.to_string(), "LG (Desktop)");
    }

    #[test]
    fn inspector_polls_once_per_interval() {
        let mut poller = InspectorPoller::new();
        let mut calls = 0;
        let mut sample = |widgets| {
            calls += 1;
            InspectorStats {
                widgets,
                width: 1280.0,
                height: 720.0,
            }
        };

        assert_eq!(poller.poll(0.0, || sample(10)).widgets, 10);
        assert_eq!(poller.poll(0.5, || sample(20)).widgets, 10);
        assert_eq!(poller.poll(1.0, || sample(30)).widgets, 30);
        drop(sample);
        assert_eq!(calls, 2);
        assert_eq!(poller.stats().breakpoint(), Breakpoint::Large);
    }
}
