use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use desktop_app_contract::{AppData, AppId, CommandSlots, DataMutation, TodoTask};
use platform_host::ViewportSize;
use serde::{Deserialize, Serialize};

use crate::config::ShellMetrics;

pub const INITIAL_Z_INDEX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub icon_id: String,
    /// Restored geometry. Maximized geometry is derived from the viewport when rendering.
    pub rect: WindowRect,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub next_z_index: u32,
    pub windows: Vec<WindowRecord>,
    pub focused: Option<WindowId>,
    /// Windows whose app acknowledged mount.
    pub mounted: BTreeSet<WindowId>,
    /// Commands visible to mounted apps.
    pub slots: CommandSlots,
    /// Commands waiting for their app to mount.
    pub stashed: CommandSlots,
    pub wallpaper_index: usize,
    pub app_data: AppData,
    pub todos: Vec<TodoTask>,
    pub metrics: ShellMetrics,
    /// Persisted records are still loading.
    pub boot_pending: bool,
    /// Mutations applied while loading, replayed over the loaded records.
    pub pre_boot_mutations: Vec<PendingMutation>,
}

#[derive(Debug, Clone, PartialEq)]
/// A record mutation held for replay after boot hydration.
pub struct PendingMutation {
    pub mutation: DataMutation,
    pub now: DateTime<Utc>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            next_z_index: INITIAL_Z_INDEX,
            windows: Vec::new(),
            focused: None,
            mounted: BTreeSet::new(),
            slots: CommandSlots::default(),
            stashed: CommandSlots::default(),
            wallpaper_index: 0,
            app_data: AppData::default(),
            todos: Vec::new(),
            metrics: ShellMetrics::default(),
            boot_pending: false,
            pre_boot_mutations: Vec::new(),
        }
    }
}

impl DesktopState {
    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    /// First window of `app_id` in open order, minimized or not.
    pub fn first_window_of(&self, app_id: AppId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app_id == app_id)
    }

    pub fn is_app_running(&self, app_id: AppId) -> bool {
        self.first_window_of(app_id).is_some()
    }

    /// Whether some window of `app_id` is mounted and can receive slot writes.
    pub fn has_mounted_window(&self, app_id: AppId) -> bool {
        self.windows
            .iter()
            .any(|w| w.app_id == app_id && self.mounted.contains(&w.id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything needed to place a new window.
pub struct OpenWindowRequest {
    pub app_id: AppId,
    pub title: Option<String>,
    pub size: Option<(i32, i32)>,
    pub viewport: ViewportSize,
    /// Placement jitter per axis, expected within `±ShellMetrics::placement_jitter`.
    pub jitter: (i32, i32),
    pub maximized: bool,
}

impl OpenWindowRequest {
    pub fn new(app_id: AppId, viewport: ViewportSize) -> Self {
        Self {
            app_id,
            title: None,
            size: None,
            viewport,
            jitter: (0, 0),
            maximized: false,
        }
    }

    pub fn with_jitter(mut self, dx: i32, dy: i32) -> Self {
        self.jitter = (dx, dy);
        self
    }

    pub fn maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    /// Live position shown while dragging; committed on release.
    pub preview: WindowRect,
    pub snap_zone: Option<SnapSide>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    pub fn snap_zone(&self) -> Option<SnapSide> {
        self.dragging.as_ref().and_then(|session| session.snap_zone)
    }

    /// Geometry to render for `window_id`, preferring an in-progress drag preview.
    pub fn preview_rect(&self, window_id: WindowId) -> Option<WindowRect> {
        self.dragging
            .as_ref()
            .filter(|session| session.window_id == window_id)
            .map(|session| session.preview)
    }
}
