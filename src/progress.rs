//! Progress display for bundle collection

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display while bundle files are collected into the project
pub struct ProgressDisplay {
    bundle_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total bundle count
    pub fn new(total_bundles: u64) -> Self {
        let bundle_pb = ProgressBar::new(total_bundles);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bundle_pb.set_style(style.progress_chars("#>-"));
        }
        Self { bundle_pb }
    }

    /// A display that draws nothing, for non-interactive runs
    pub fn hidden() -> Self {
        Self {
            bundle_pb: ProgressBar::hidden(),
        }
    }

    /// Update to show the bundle currently being collected
    pub fn update_bundle(&self, bundle_path: &str, current: usize, total: usize) {
        // Truncate long paths for display
        let display_path = match bundle_path.char_indices().rev().nth(46) {
            Some((start, _)) if bundle_path.chars().count() > 50 => {
                format!("...{}", &bundle_path[start..])
            }
            _ => bundle_path.to_string(),
        };
        self.bundle_pb
            .set_message(format!("({}/{}) {}", current, total, display_path));
    }

    pub fn inc_bundle(&self) {
        self.bundle_pb.inc(1);
    }

    pub fn finish(&self) {
        self.bundle_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.bundle_pb.abandon();
    }

    pub fn position(&self) -> u64 {
        self.bundle_pb.position()
    }
}
