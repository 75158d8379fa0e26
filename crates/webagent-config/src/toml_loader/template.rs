//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# WebAgent Shell Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[agent]
# mode = "auto"                       # auto, packaged, unpackaged
# display_name = "WebAgent"
# resources_dir = "/path/to/resources" # default: next to the binary
# executable_dir = "python-executable"
# executable_name = "WebAgent"         # ".exe" is appended on Windows
# interpreter = "python3"              # unpackaged mode only
# script = "/path/to/agent.py"         # default: webautomate_ai/agent.py
# env_file = "/path/to/.env"           # default depends on mode
# browsers_dir = "playwright-browsers" # packaged mode only
# working_directory = "/path"          # default: home directory

[window]
# title = "WebAgent"
# width = 1200          # 320-7680
# height = 800          # 240-4320
# devtools = true       # default: on when unpackaged

[logging]
# level = "INFO"        # TRACE, DEBUG, INFO, WARNING, ERROR
# mirror_agent_output = true
"##
    .to_string()
}
