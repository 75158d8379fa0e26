//! WebView placement inside the window.

use winit::dpi::PhysicalSize;

/// Bounds covering the whole client area of a window of `size`.
pub(in crate::app_state) fn window_bounds(size: PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}
