//! Launch plan resolution: which program, which arguments, where, and with
//! what environment.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use webagent_common::HostError;
use webagent_config::schema::AgentConfig;

use crate::envfile;
use crate::environment::Environment;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Variable pointing the agent's browser automation at the bundled browsers.
pub const BROWSERS_PATH_VAR: &str = "PLAYWRIGHT_BROWSERS_PATH";

/// Directory holding the agent sources in unpackaged mode.
const SOURCE_DIR: &str = "webautomate_ai";

/// Entry script inside [`SOURCE_DIR`].
const ENTRY_SCRIPT: &str = "agent.py";

const ENV_FILE_NAME: &str = ".env";

// =============================================================================
// LAUNCH PATHS
// =============================================================================

/// Filesystem anchors a launch plan is resolved against.
#[derive(Debug, Clone)]
pub struct LaunchPaths {
    /// Application directory (agent sources live below it in unpackaged mode).
    pub app_dir: PathBuf,
    /// Bundle resources directory (packaged agent lives below it).
    pub resources_dir: PathBuf,
    /// The user's home directory, the agent's default working directory.
    pub home_dir: Option<PathBuf>,
}

impl LaunchPaths {
    /// Detect paths for this host process, honoring config overrides.
    ///
    /// Anchored on the binary's location, never on the working directory
    /// the host was launched from.
    pub fn detect(config: &AgentConfig) -> Self {
        let exe_dir = exe_dir();
        let app_dir = default_app_dir(&exe_dir);
        let resources_dir = config
            .resources_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| default_resources_dir(&exe_dir));

        Self {
            app_dir,
            resources_dir,
            home_dir: dirs::home_dir(),
        }
    }
}

/// Directory holding the running binary.
fn exe_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        Err(e) => {
            warn!(error = %e, "could not locate the running binary, using '.'");
            PathBuf::from(".")
        }
    }
}

/// Workspace root of a development checkout (two levels above this crate).
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// Application directory the unpackaged agent sources live under.
///
/// Debug builds run out of `target/debug`, so they use the checkout's
/// workspace root. Release builds use the binary's directory.
fn default_app_dir(exe_dir: &Path) -> PathBuf {
    if cfg!(debug_assertions) {
        workspace_root()
    } else {
        exe_dir.to_path_buf()
    }
}

/// Resources directory next to the running binary.
///
/// - macOS app bundle: `Foo.app/Contents/Resources`
/// - elsewhere: `<binary dir>/resources`
fn default_resources_dir(exe_dir: &Path) -> PathBuf {
    if cfg!(target_os = "macos") && exe_dir.ends_with("Contents/MacOS") {
        if let Some(contents) = exe_dir.parent() {
            return contents.join("Resources");
        }
    }
    exe_dir.join("resources")
}

/// Platform file name of the packaged agent binary.
pub fn executable_file_name(base: &str) -> String {
    if cfg!(windows) {
        format!("{base}.exe")
    } else {
        base.to_string()
    }
}

// =============================================================================
// LAUNCH PLAN
// =============================================================================

/// Everything needed to spawn one agent process. Immutable once resolved.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: Environment,
    /// Whether `program` is the packaged binary (existence is checked before spawn).
    pub packaged: bool,
    /// Env file consulted for overrides (it may not exist).
    pub env_file: PathBuf,
}

impl LaunchPlan {
    /// Resolve a plan from config and paths, reading the env file if present.
    pub fn resolve(config: &AgentConfig, paths: &LaunchPaths) -> Result<Self, HostError> {
        let packaged = config.mode.is_packaged();
        let bundle_dir = paths.resources_dir.join(&config.executable_dir);
        let source_dir = paths.app_dir.join(SOURCE_DIR);

        let (program, args) = if packaged {
            (
                bundle_dir.join(executable_file_name(&config.executable_name)),
                Vec::new(),
            )
        } else {
            let script = config
                .script
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| source_dir.join(ENTRY_SCRIPT));
            (
                PathBuf::from(&config.interpreter),
                vec![script.to_string_lossy().into_owned()],
            )
        };

        let working_dir = match &config.working_directory {
            Some(dir) => PathBuf::from(dir),
            None => paths
                .home_dir
                .clone()
                .ok_or_else(|| HostError::Launch("could not determine home directory".into()))?,
        };

        let env_file = config.env_file.as_ref().map(PathBuf::from).unwrap_or_else(|| {
            if packaged {
                bundle_dir.join(ENV_FILE_NAME)
            } else {
                source_dir.join(ENV_FILE_NAME)
            }
        });

        let mut env = Environment::inherited();
        match envfile::load_env_file(&env_file) {
            Ok(Some(pairs)) => {
                debug!(path = %env_file.display(), count = pairs.len(), "loaded env file");
                env.overlay(pairs);
            }
            Ok(None) => debug!(path = %env_file.display(), "no env file"),
            Err(e) => warn!(path = %env_file.display(), error = %e, "failed to read env file"),
        }
        if packaged {
            env.set(BROWSERS_PATH_VAR, bundle_dir.join(&config.browsers_dir));
        }

        Ok(Self {
            program,
            args,
            working_dir,
            env,
            packaged,
            env_file,
        })
    }
}

// =============================================================================
// EXECUTABLE PERMISSIONS
// =============================================================================

/// Make sure the packaged binary carries an execute bit.
///
/// Files unpacked from archives sometimes lose it. Only touches the mode
/// when no execute bit is set.
#[cfg(unix)]
pub fn ensure_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    if perms.mode() & 0o111 == 0 {
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)?;
        debug!(path = %path.display(), "set executable permissions");
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn ensure_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
