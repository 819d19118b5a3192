//! Window-store transitions shared by the desktop reducer.
//!
//! Every function here treats an unknown window id as a no-op and reports whether anything
//! changed. z-order comes from a store-wide counter that only ever grows.

use desktop_app_contract::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use platform_host::ViewportSize;

use crate::{
    config::ShellMetrics,
    model::{DesktopState, OpenWindowRequest, SnapSide, WindowId, WindowRecord, WindowRect},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How [`open_window`] satisfied a request.
pub enum OpenOutcome {
    /// A visible window of the app already existed and was raised.
    Focused(WindowId),
    /// A minimized window of the app was restored and raised.
    Restored(WindowId),
    /// A new window was created.
    Created(WindowId),
}

impl OpenOutcome {
    pub const fn window_id(self) -> WindowId {
        match self {
            Self::Focused(id) | Self::Restored(id) | Self::Created(id) => id,
        }
    }
}

/// Centered placement for a new window, nudged by the request jitter and kept below the menu bar.
pub fn placement_rect(request: &OpenWindowRequest, metrics: ShellMetrics) -> WindowRect {
    let (w, h) = request
        .size
        .unwrap_or_else(|| request.app_id.default_size());
    let span = metrics.placement_jitter;
    let (jx, jy) = (
        request.jitter.0.clamp(-span, span),
        request.jitter.1.clamp(-span, span),
    );
    let min_top = metrics.min_window_top();
    let center_x = (request.viewport.width - w) / 2;
    let center_y = ((request.viewport.height - h - metrics.dock_height) / 2).max(min_top);
    WindowRect {
        x: (center_x + jx).max(0),
        y: (center_y + jy).max(min_top),
        w,
        h,
    }
}

/// Geometry of a maximized window. Not stored; recomputed from the viewport on render.
pub fn maximized_rect(viewport: ViewportSize, metrics: ShellMetrics) -> WindowRect {
    WindowRect {
        x: 0,
        y: metrics.menu_bar_height,
        w: viewport.width,
        h: viewport.height - metrics.bottom_reserve,
    }
}

/// Half of the usable screen on `side`.
pub fn snap_rect(side: SnapSide, viewport: ViewportSize, metrics: ShellMetrics) -> WindowRect {
    let half = viewport.width / 2;
    WindowRect {
        x: match side {
            SnapSide::Left => 0,
            SnapSide::Right => half,
        },
        y: metrics.menu_bar_height,
        w: half,
        h: viewport.height - metrics.bottom_reserve - metrics.menu_bar_height,
    }
}

/// Snap zone armed by a pointer at horizontal position `pointer_x`.
pub fn snap_zone_for(
    pointer_x: i32,
    viewport: ViewportSize,
    metrics: ShellMetrics,
) -> Option<SnapSide> {
    if pointer_x < metrics.snap_threshold {
        Some(SnapSide::Left)
    } else if pointer_x > viewport.width - metrics.snap_threshold {
        Some(SnapSide::Right)
    } else {
        None
    }
}

/// Keeps a dragged window reachable: title bar below the menu bar, a grab area on screen.
pub fn clamp_drag_rect(rect: WindowRect, viewport: ViewportSize, metrics: ShellMetrics) -> WindowRect {
    WindowRect {
        x: rect.x.min(viewport.width - MIN_WINDOW_WIDTH).max(0),
        y: rect
            .y
            .min(viewport.height - MIN_WINDOW_HEIGHT)
            .max(metrics.menu_bar_height),
        ..rect
    }
}

/// Opens `request.app_id` with the unified dedupe rule: raise a visible window, else restore a
/// minimized one, else create.
pub fn open_window(state: &mut DesktopState, request: &OpenWindowRequest) -> OpenOutcome {
    let app_id = request.app_id;
    let visible = state
        .windows
        .iter()
        .find(|w| w.app_id == app_id && !w.minimized)
        .map(|w| w.id);
    if let Some(window_id) = visible {
        focus_window(state, window_id);
        return OpenOutcome::Focused(window_id);
    }

    let minimized = state
        .windows
        .iter()
        .find(|w| w.app_id == app_id && w.minimized)
        .map(|w| w.id);
    if let Some(window_id) = minimized {
        focus_window(state, window_id);
        return OpenOutcome::Restored(window_id);
    }

    let window_id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    let z_index = take_z_index(state);
    state.windows.push(WindowRecord {
        id: window_id,
        app_id,
        title: request
            .title
            .clone()
            .unwrap_or_else(|| app_id.title().to_string()),
        icon_id: app_id.icon_id().to_string(),
        rect: placement_rect(request, state.metrics),
        z_index,
        minimized: false,
        maximized: request.maximized,
    });
    state.focused = Some(window_id);
    OpenOutcome::Created(window_id)
}

/// Raises `window_id` above every other window and restores it if minimized.
pub fn focus_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    if state.window(window_id).is_none() {
        return false;
    }
    let z_index = take_z_index(state);
    if let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) {
        window.z_index = z_index;
        window.minimized = false;
    }
    state.focused = Some(window_id);
    true
}

/// Removes `window_id`, returning the removed record.
pub fn close_window(state: &mut DesktopState, window_id: WindowId) -> Option<WindowRecord> {
    let index = state.windows.iter().position(|w| w.id == window_id)?;
    let record = state.windows.remove(index);
    state.mounted.remove(&window_id);
    if state.focused == Some(window_id) {
        state.focused = None;
    }
    Some(record)
}

/// Removes every window, returning them in open order.
pub fn close_all_windows(state: &mut DesktopState) -> Vec<WindowRecord> {
    state.focused = None;
    state.mounted.clear();
    std::mem::take(&mut state.windows)
}

/// Hides `window_id`, keeping its geometry and maximized flag.
pub fn minimize_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };
    window.minimized = true;
    if state.focused == Some(window_id) {
        state.focused = None;
    }
    true
}

/// Flips the maximized flag.
pub fn toggle_maximize(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };
    window.maximized = !window.maximized;
    true
}

/// Moves `window_id` into half of the usable screen and clears its maximized flag.
pub fn snap_window(
    state: &mut DesktopState,
    window_id: WindowId,
    side: SnapSide,
    viewport: ViewportSize,
) -> bool {
    let rect = snap_rect(side, viewport, state.metrics);
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };
    window.rect = rect;
    window.maximized = false;
    true
}

pub fn set_window_position(state: &mut DesktopState, window_id: WindowId, x: i32, y: i32) -> bool {
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };
    window.rect.x = x;
    window.rect.y = y;
    true
}

/// Resizes `window_id`, never below the minimum window size.
pub fn set_window_size(state: &mut DesktopState, window_id: WindowId, w: i32, h: i32) -> bool {
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };
    window.rect = WindowRect { w, h, ..window.rect }.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
    true
}

fn take_z_index(state: &mut DesktopState) -> u32 {
    let z_index = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z_index
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::AppId;
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: ViewportSize = ViewportSize::new(1280, 800);

    fn open(state: &mut DesktopState, app_id: AppId) -> OpenOutcome {
        open_window(state, &OpenWindowRequest::new(app_id, VIEWPORT))
    }

    #[test]
    fn placement_centers_window_above_dock() {
        let rect = placement_rect(
            &OpenWindowRequest::new(AppId::Calculator, VIEWPORT),
            ShellMetrics::default(),
        );
        assert_eq!(rect, WindowRect { x: 440, y: 60, w: 400, h: 600 });
    }

    #[test]
    fn placement_never_hides_title_bar() {
        let request = OpenWindowRequest::new(AppId::Markdown, ViewportSize::new(900, 600))
            .with_jitter(-20, -20);
        let rect = placement_rect(&request, ShellMetrics::default());
        assert_eq!(rect.y, 42);
        assert_eq!(rect.x, 0);
    }

    #[test]
    fn placement_jitter_is_bounded() {
        let wild = OpenWindowRequest::new(AppId::Calculator, VIEWPORT).with_jitter(500, -500);
        let rect = placement_rect(&wild, ShellMetrics::default());
        assert_eq!((rect.x, rect.y), (460, 42));
    }

    #[test]
    fn focus_assigns_strictly_increasing_z_indexes() {
        let mut state = DesktopState::default();
        let a = open(&mut state, AppId::Notes).window_id();
        let b = open(&mut state, AppId::Clock).window_id();
        assert_eq!(state.window(a).map(|w| w.z_index), Some(100));
        assert_eq!(state.window(b).map(|w| w.z_index), Some(101));

        let mut seen = Vec::new();
        for id in [a, a, b, a, b, b] {
            assert!(focus_window(&mut state, id));
            seen.push(state.window(id).map(|w| w.z_index).unwrap_or_default());
        }
        assert!(seen.windows(2).all(|pair| pair[0] < pair[1]), "{seen:?}");
        assert_eq!(state.focused, Some(b));
    }

    #[test]
    fn opening_twice_reuses_the_window() {
        let mut state = DesktopState::default();
        let first = open(&mut state, AppId::Notes);
        let second = open(&mut state, AppId::Notes);
        assert_eq!(second, OpenOutcome::Focused(first.window_id()));
        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn opening_a_minimized_app_restores_it() {
        let mut state = DesktopState::default();
        let id = open(&mut state, AppId::Music).window_id();
        assert!(minimize_window(&mut state, id));
        assert_eq!(state.focused, None);

        assert_eq!(open(&mut state, AppId::Music), OpenOutcome::Restored(id));
        assert_eq!(state.windows.len(), 1);
        assert_eq!(state.window(id).map(|w| w.minimized), Some(false));
        assert_eq!(state.focused, Some(id));
    }

    #[test]
    fn window_ids_stay_unique_across_rapid_opens_and_closes() {
        let mut state = DesktopState::default();
        let mut ids = Vec::new();
        for _ in 0..5 {
            let id = open(&mut state, AppId::Snake).window_id();
            ids.push(id);
            close_window(&mut state, id);
        }
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn close_clears_focus_only_for_the_focused_window() {
        let mut state = DesktopState::default();
        let a = open(&mut state, AppId::Notes).window_id();
        let b = open(&mut state, AppId::Files).window_id();
        close_window(&mut state, a);
        assert_eq!(state.focused, Some(b));
        close_window(&mut state, b);
        assert_eq!(state.focused, None);
    }

    #[test]
    fn unknown_ids_are_ignored_after_close_all() {
        let mut state = DesktopState::default();
        let id = open(&mut state, AppId::Terminal).window_id();
        assert_eq!(close_all_windows(&mut state).len(), 1);
        let before = state.clone();

        assert!(!focus_window(&mut state, id));
        assert_eq!(close_window(&mut state, id), None);
        assert!(!minimize_window(&mut state, id));
        assert!(!toggle_maximize(&mut state, id));
        assert!(!snap_window(&mut state, id, SnapSide::Left, VIEWPORT));
        assert_eq!(state, before);
    }

    #[test]
    fn maximize_toggles_and_survives_minimize() {
        let mut state = DesktopState::default();
        let id = open(&mut state, AppId::Paint).window_id();
        toggle_maximize(&mut state, id);
        minimize_window(&mut state, id);
        focus_window(&mut state, id);
        let window = state.window(id).cloned().expect("window");
        assert!(window.maximized);
        assert!(!window.minimized);
        toggle_maximize(&mut state, id);
        assert_eq!(state.window(id).map(|w| w.maximized), Some(false));
    }

    #[test]
    fn snapping_fills_half_of_usable_screen() {
        let mut state = DesktopState::default();
        let id = open(&mut state, AppId::Files).window_id();
        toggle_maximize(&mut state, id);
        snap_window(&mut state, id, SnapSide::Right, VIEWPORT);
        let window = state.window(id).cloned().expect("window");
        assert_eq!(window.rect, WindowRect { x: 640, y: 32, w: 640, h: 698 });
        assert!(!window.maximized);
    }

    #[test]
    fn snap_zone_follows_pointer_edges() {
        let metrics = ShellMetrics::default();
        assert_eq!(snap_zone_for(10, VIEWPORT, metrics), Some(SnapSide::Left));
        assert_eq!(snap_zone_for(50, VIEWPORT, metrics), None);
        assert_eq!(snap_zone_for(1231, VIEWPORT, metrics), Some(SnapSide::Right));
    }

    #[test]
    fn resize_respects_minimum_size() {
        let mut state = DesktopState::default();
        let id = open(&mut state, AppId::Clock).window_id();
        set_window_size(&mut state, id, 120, 90);
        let rect = state.window(id).map(|w| w.rect).expect("window");
        assert_eq!((rect.w, rect.h), (300, 200));
    }

    #[test]
    fn maximized_geometry_comes_from_the_viewport() {
        assert_eq!(
            maximized_rect(VIEWPORT, ShellMetrics::default()),
            WindowRect { x: 0, y: 32, w: 1280, h: 730 }
        );
    }
}
