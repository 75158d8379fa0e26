use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use webagent_config::schema::LaunchMode;

/// WebAgent — desktop shell for the browser automation agent.
#[derive(Parser, Debug)]
#[command(name = "webagent", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How to launch the agent (overrides `[agent] mode`).
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Log filter override, e.g. `debug` or `webagent=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Auto,
    Packaged,
    Unpackaged,
}

impl From<ModeArg> for LaunchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => LaunchMode::Auto,
            ModeArg::Packaged => LaunchMode::Packaged,
            ModeArg::Unpackaged => LaunchMode::Unpackaged,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_is_all_defaults() {
        let args = Args::try_parse_from(["webagent"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.mode.is_none());
        assert!(args.log_level.is_none());
        assert!(!args.print_config);
    }

    #[test]
    fn parses_every_flag() {
        let args = Args::try_parse_from([
            "webagent",
            "--config",
            "/tmp/webagent.toml",
            "--mode",
            "unpackaged",
            "--log-level",
            "debug",
            "--print-config",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/webagent.toml")));
        assert_eq!(args.mode.map(LaunchMode::from), Some(LaunchMode::Unpackaged));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.print_config);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Args::try_parse_from(["webagent", "--mode", "docker"]).is_err());
    }
}
