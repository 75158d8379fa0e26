//! Agent process configuration types.

use serde::{Deserialize, Serialize};

/// How the agent executable is located.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LaunchMode {
    /// Packaged in release builds, unpackaged in debug builds.
    #[default]
    Auto,
    /// Run the prebuilt standalone binary from the resources directory.
    Packaged,
    /// Run the agent script through an interpreter.
    Unpackaged,
}

impl LaunchMode {
    /// Collapse `Auto` into a concrete decision for this build.
    pub fn is_packaged(self) -> bool {
        match self {
            LaunchMode::Auto => !cfg!(debug_assertions),
            LaunchMode::Packaged => true,
            LaunchMode::Unpackaged => false,
        }
    }
}

/// Agent launch settings.
///
/// Controls where the packaged binary lives, which interpreter and script
/// run in unpackaged mode, and where the environment file is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub mode: LaunchMode,
    /// Name used in status messages ("Starting WebAgent...").
    pub display_name: String,
    /// Bundle resources directory. `None` means derive from the binary location.
    pub resources_dir: Option<String>,
    /// Subdirectory of the resources directory holding the packaged agent.
    pub executable_dir: String,
    /// Packaged binary name, without the `.exe` suffix.
    pub executable_name: String,
    /// Interpreter used in unpackaged mode.
    pub interpreter: String,
    /// Script passed to the interpreter. `None` means `webautomate_ai/agent.py`
    /// under the application directory.
    pub script: Option<String>,
    /// Environment file override. `None` means the mode's default location.
    pub env_file: Option<String>,
    /// Browser bundle subdirectory exported in packaged mode.
    pub browsers_dir: String,
    /// Working directory override. `None` means the user's home directory.
    pub working_directory: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            mode: LaunchMode::Auto,
            display_name: "WebAgent".into(),
            resources_dir: None,
            executable_dir: "python-executable".into(),
            executable_name: "WebAgent".into(),
            interpreter: "python3".into(),
            script: None,
            env_file: None,
            browsers_dir: "playwright-browsers".into(),
            working_directory: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
