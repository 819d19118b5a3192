//! Visible desktop area.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Inner size of the browser viewport in CSS pixels.
pub struct ViewportSize {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl ViewportSize {
    /// Creates a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// Host service reporting the current viewport.
pub trait ViewportService {
    /// Current viewport size.
    fn viewport(&self) -> ViewportSize;
}

#[derive(Debug, Clone, Copy, Default)]
/// Viewport with a constant size.
pub struct FixedViewport(pub ViewportSize);

impl ViewportService for FixedViewport {
    fn viewport(&self) -> ViewportSize {
        self.0
    }
}
