//! Layout metrics and voice timing knobs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Fixed desktop chrome measurements in CSS pixels.
pub struct ShellMetrics {
    /// Height of the top menu bar.
    pub menu_bar_height: i32,
    /// Height reserved for the dock when centering new windows.
    pub dock_height: i32,
    /// Space kept free below maximized and snapped windows.
    pub bottom_reserve: i32,
    /// Gap between the menu bar and the highest allowed window top.
    pub top_padding: i32,
    /// Distance from a viewport side at which a drag arms a snap.
    pub snap_threshold: i32,
    /// Maximum placement jitter applied to each axis of a new window.
    pub placement_jitter: i32,
}

impl ShellMetrics {
    /// Smallest `y` a newly placed window may have.
    pub const fn min_window_top(self) -> i32 {
        self.menu_bar_height + self.top_padding
    }
}

impl Default for ShellMetrics {
    fn default() -> Self {
        Self {
            menu_bar_height: 32,
            dock_height: 80,
            bottom_reserve: 70,
            top_padding: 10,
            snap_threshold: 50,
            placement_jitter: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// How the dispatcher hands a command to an app that may still be mounting.
pub enum DeliveryMode {
    /// Stash until the app acknowledges mount, then deliver.
    #[default]
    Ready,
    /// Write the slot after a fixed settle delay. Racy: a slow mount misses the write.
    Delayed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Delays used by the voice assistant, in milliseconds.
pub struct VoiceTimings {
    /// Settle delay after opening an app, [`DeliveryMode::Delayed`] only.
    pub settle_after_open_ms: u32,
    /// Settle delay when the app was already open, [`DeliveryMode::Delayed`] only.
    pub settle_when_open_ms: u32,
    /// Delay before restarting an ended or aborted session.
    pub restart_delay_ms: u32,
    /// Delay before retrying a restart that failed.
    pub restart_retry_ms: u32,
    /// Delay between mount and the automatic first start.
    pub auto_start_delay_ms: u32,
    /// Lifetime of short acknowledgements.
    pub feedback_short_ms: u32,
    /// Lifetime of regular messages.
    pub feedback_medium_ms: u32,
    /// Lifetime of answers the user needs time to read.
    pub feedback_long_ms: u32,
    /// Strategy for slot delivery.
    pub delivery: DeliveryMode,
}

impl Default for VoiceTimings {
    fn default() -> Self {
        Self {
            settle_after_open_ms: 300,
            settle_when_open_ms: 50,
            restart_delay_ms: 50,
            restart_retry_ms: 500,
            auto_start_delay_ms: 500,
            feedback_short_ms: 1500,
            feedback_medium_ms: 2000,
            feedback_long_ms: 4000,
            delivery: DeliveryMode::Ready,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_bar_stays_below_menu_bar() {
        assert_eq!(ShellMetrics::default().min_window_top(), 42);
    }
}
