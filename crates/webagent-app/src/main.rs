mod app_state;
mod cli;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};
use winit::event_loop::EventLoop;

use webagent_common::{ConfigError, PlatformError};
use webagent_config::schema::WebAgentConfig;
use webagent_config::{toml_loader, validation};

const DEFAULT_DIRECTIVE: &str = "webagent=info";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "WebAgent crashed");
        default_hook(info);
    }));
}

/// Load the config named on the command line, or the default one.
fn read_config(args: &cli::Args) -> Result<WebAgentConfig, ConfigError> {
    match &args.config {
        Some(path) => {
            let config = toml_loader::load_from_path(path)?;
            validation::validate(&config)?;
            Ok(config)
        }
        None => webagent_config::load_config(),
    }
}

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(config: &mut WebAgentConfig, args: &cli::Args) {
    if let Some(mode) = args.mode {
        config.agent.mode = mode.into();
    }
}

/// `--log-level` wins, then `[logging] level`.
fn log_directive(args: &cli::Args, config: &WebAgentConfig) -> String {
    args.log_level
        .clone()
        .unwrap_or_else(|| config.logging.directive())
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// `RUST_LOG` plus `directive`, falling back to [`DEFAULT_DIRECTIVE`].
fn env_filter(directive: &str) -> EnvFilter {
    let directive = directive.parse().unwrap_or_else(|_| {
        eprintln!("invalid log directive '{directive}', using {DEFAULT_DIRECTIVE}");
        DEFAULT_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into())
    });
    EnvFilter::from_default_env().add_directive(directive)
}

/// Install the global subscriber. The returned handle swaps the filter
/// once the config's `[logging] level` is known.
fn init_logging(directive: &str) -> FilterHandle {
    let (filter, handle) = reload::Layer::new(env_filter(directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
    handle
}

fn print_config(args: &cli::Args) {
    let mut config = read_config(args).unwrap_or_else(|e| {
        eprintln!("Config load failed, showing defaults: {e}");
        WebAgentConfig::default()
    });
    apply_overrides(&mut config, args);
    println!("{}", webagent_config::config_to_json(&config));
}

fn main() {
    let args = cli::parse();

    // Keep stdout clean for the JSON dump.
    if args.print_config {
        print_config(&args);
        return;
    }

    // Up before the config loader so its messages are not lost.
    let filter = init_logging(args.log_level.as_deref().unwrap_or(DEFAULT_DIRECTIVE));
    install_panic_hook();

    tracing::info!("WebAgent v{} starting...", env!("CARGO_PKG_VERSION"));
    let mut config = read_config(&args).unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        WebAgentConfig::default()
    });
    apply_overrides(&mut config, &args);

    if args.log_level.is_none() {
        let directive = log_directive(&args, &config);
        if let Err(e) = filter.reload(env_filter(&directive)) {
            tracing::warn!(error = %e, "could not apply configured log level");
        }
    }
    tracing::info!(
        mode = ?config.agent.mode,
        packaged = config.agent.mode.is_packaged(),
        "Config loaded"
    );

    if let Err(e) = run(config) {
        tracing::error!("WebAgent failed: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

/// Build the runtime and event loop, then run the app until it exits.
fn run(config: WebAgentConfig) -> webagent_common::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("webagent-io")
        .build()?;

    let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
    let mut app = app_state::WebAgentApp::new(config, runtime);

    tracing::info!("Entering event loop");
    let result = event_loop.run_app(&mut app);
    app.shutdown();
    result.map_err(|e| PlatformError::EventLoop(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use webagent_config::schema::{LaunchMode, LogLevel};

    use super::*;

    fn args(argv: &[&str]) -> cli::Args {
        let mut full = vec!["webagent"];
        full.extend_from_slice(argv);
        cli::Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn log_flag_beats_config_level() {
        let mut config = WebAgentConfig::default();
        config.logging.level = LogLevel::Error;
        assert_eq!(log_directive(&args(&[]), &config), "webagent=error");
        assert_eq!(
            log_directive(&args(&["--log-level", "webagent=trace"]), &config),
            "webagent=trace"
        );
    }

    #[test]
    fn filter_reload_applies_configured_level() {
        let (filter, handle) = reload::Layer::new(env_filter(DEFAULT_DIRECTIVE));
        let subscriber = tracing_subscriber::registry().with(filter);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "webagent_app", tracing::Level::INFO));
            assert!(!tracing::enabled!(target: "webagent_app", tracing::Level::TRACE));

            handle.reload(env_filter("webagent=trace")).unwrap();
            assert!(tracing::enabled!(target: "webagent_app", tracing::Level::TRACE));
        });
    }

    #[test]
    fn invalid_directive_falls_back_to_default() {
        let filter = env_filter("webagent=[[nope");
        assert!(filter.to_string().contains("webagent=info"));
    }

    #[test]
    fn mode_flag_overrides_config() {
        let mut config = WebAgentConfig::default();
        apply_overrides(&mut config, &args(&[]));
        assert_eq!(config.agent.mode, LaunchMode::Auto);
        apply_overrides(&mut config, &args(&["--mode", "packaged"]));
        assert_eq!(config.agent.mode, LaunchMode::Packaged);
    }

    #[test]
    fn explicit_config_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webagent.toml");
        std::fs::write(
            &path,
            "[agent]\ninterpreter = \"python3.12\"\n[window]\ntitle = \"Agent\"\n",
        )
        .unwrap();

        let config = read_config(&args(&["--config", path.to_str().unwrap()])).unwrap();
        assert_eq!(config.agent.interpreter, "python3.12");
        assert_eq!(config.window.title, "Agent");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = read_config(&args(&["--config", path.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn invalid_explicit_config_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webagent.toml");
        std::fs::write(&path, "[window]\nwidth = 10\n").unwrap();
        let err = read_config(&args(&["--config", path.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
