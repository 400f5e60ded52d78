//! Config command handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = crate::config::config_path();
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Show => {
            let mut cfg = crate::config::load_config_or_default();

            // Never echo stored keys.
            for profile in cfg.profiles.values_mut() {
                if profile.api_key.is_some() {
                    profile.api_key = Some("(redacted)".into());
                }
            }

            let rendered = toml::to_string_pretty(&cfg)?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }
    }
}
