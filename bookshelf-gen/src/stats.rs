//! Byte accounting for a generation run.
//!
//! One [`RenderStats`] is owned by a run and shared (behind an `Arc`) with
//! every render call, including those on chapter worker threads.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters updated by the render sink.
#[derive(Debug, Default)]
pub struct RenderStats {
    html_bytes: AtomicU64,
    minified_bytes: AtomicU64,
    pages_written: AtomicU64,
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful minification: `raw` bytes in, `minified` out.
    pub fn record_minified(&self, raw: usize, minified: usize) {
        self.html_bytes.fetch_add(raw as u64, Ordering::Relaxed);
        self.minified_bytes.fetch_add(minified as u64, Ordering::Relaxed);
    }

    pub fn record_page(&self) {
        self.pages_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            html_bytes: self.html_bytes.load(Ordering::Relaxed),
            minified_bytes: self.minified_bytes.load(Ordering::Relaxed),
            pages_written: self.pages_written.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`RenderStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Bytes before minification, counted only for pages that were minified.
    pub html_bytes: u64,
    pub minified_bytes: u64,
    pub pages_written: u64,
}

impl StatsSnapshot {
    /// Share of bytes removed by minification, `None` if nothing was minified.
    pub fn savings_percent(&self) -> Option<f64> {
        if self.html_bytes == 0 {
            return None;
        }
        let saved = self.html_bytes.saturating_sub(self.minified_bytes) as f64;
        Some(saved * 100.0 / self.html_bytes as f64)
    }
}
