//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::WebAgentApp;
use super::webview_bridge::bounds::window_bounds;

impl ApplicationHandler for WebAgentApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.initialize_window(event_loop) {
            tracing::error!("Failed to initialize window: {e}");
            self.should_exit = true;
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(ref handle) = self.webview {
                        if let Err(e) = handle.set_bounds(window_bounds(size)) {
                            tracing::warn!(error = %e, "Failed to resize webview");
                        }
                    }
                }
            }

            WindowEvent::Focused(true) => {
                if let Some(ref handle) = self.webview {
                    if let Err(e) = handle.focus() {
                        tracing::debug!(error = %e, "Failed to focus webview");
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
