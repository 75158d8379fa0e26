//! Full configuration validation.
//!
//! Checks numeric ranges and required strings, collecting every problem
//! into a single `ConfigError`.

mod helpers;


use crate::schema::WebAgentConfig;
use webagent_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WebAgentConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_agent(&mut errors, config);
    validate_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_agent(errors: &mut Vec<String>, config: &WebAgentConfig) {
    let agent = &config.agent;
    validate_non_empty(errors, "agent.display_name", &agent.display_name);
    validate_non_empty(errors, "agent.executable_dir", &agent.executable_dir);
    validate_non_empty(errors, "agent.executable_name", &agent.executable_name);
    validate_non_empty(errors, "agent.interpreter", &agent.interpreter);
    validate_non_empty(errors, "agent.browsers_dir", &agent.browsers_dir);

    if agent.executable_name.contains(['/', '\\']) {
        errors.push(format!(
            "agent.executable_name = {:?} must be a file name, not a path",
            agent.executable_name
        ));
    }
}

fn validate_window(errors: &mut Vec<String>, config: &WebAgentConfig) {
    validate_range(errors, "window.width", config.window.width, 320, 7680);
    validate_range(errors, "window.height", config.window.height, 240, 4320);
}
