//! WebAgentApp struct definition and constructor.

use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedReceiver;
use winit::window::Window;

use webagent_common::{OutputEvent, Transcript};
use webagent_config::schema::WebAgentConfig;
use webagent_host::{HostController, LaunchPaths};
use webagent_webview::{WebViewHandle, WebViewManager};

/// Top-level application state.
pub struct WebAgentApp {
    pub(super) config: WebAgentConfig,

    // Agent process
    pub(super) controller: HostController,
    pub(super) output_rx: UnboundedReceiver<OutputEvent>,
    /// Everything published so far, for replay into a freshly loaded page.
    pub(super) transcript: Transcript,
    pub(super) tokio_runtime: Option<Runtime>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) webviews: Option<WebViewManager>,
    pub(super) webview: Option<WebViewHandle>,
    /// Output is delivered only once the UI has finished loading.
    pub(super) page_loaded: bool,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl WebAgentApp {
    pub fn new(config: WebAgentConfig, runtime: Runtime) -> Self {
        let paths = LaunchPaths::detect(&config.agent);
        tracing::debug!(
            app_dir = %paths.app_dir.display(),
            resources_dir = %paths.resources_dir.display(),
            "Launch paths detected"
        );
        Self::with_paths(config, paths, runtime)
    }

    pub(super) fn with_paths(config: WebAgentConfig, paths: LaunchPaths, runtime: Runtime) -> Self {
        let controller = HostController::new(config.agent.clone(), paths, runtime.handle().clone())
            .with_mirror_output(config.logging.mirror_agent_output);
        let output_rx = controller.subscribe();

        Self {
            config,
            controller,
            output_rx,
            transcript: Transcript::new(),
            tokio_runtime: Some(runtime),
            window: None,
            webviews: None,
            webview: None,
            page_loaded: false,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}

#[cfg(test)]
pub(super) mod test_support {
    use webagent_config::schema::{LaunchMode, WebAgentConfig};
    use webagent_host::LaunchPaths;

    use super::WebAgentApp;

    /// App without a window whose agent is `sh <dir>/app/webautomate_ai/agent.py`.
    pub(in crate::app_state) fn headless_app(dir: &std::path::Path) -> WebAgentApp {
        let mut config = WebAgentConfig::default();
        config.agent.mode = LaunchMode::Unpackaged;
        config.agent.interpreter = "sh".into();
        config.logging.mirror_agent_output = false;

        let paths = LaunchPaths {
            app_dir: dir.join("app"),
            resources_dir: dir.join("resources"),
            home_dir: Some(dir.to_path_buf()),
        };
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        WebAgentApp::with_paths(config, paths, runtime)
    }

    pub(in crate::app_state) fn write_agent_script(dir: &std::path::Path, body: &str) {
        let source = dir.join("app").join("webautomate_ai");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("agent.py"), body).unwrap();
    }
}
