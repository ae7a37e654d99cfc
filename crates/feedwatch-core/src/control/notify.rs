use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FeedwatchError, Result};

/// Outbound status messages. Delivery is best effort; the controller logs
/// failures and carries on.
pub trait Notifier {
    fn send_text(&self, message: &str) -> Result<()>;
    fn send_image_with_caption(&self, image: &Path, caption: &str) -> Result<()>;
}

/// Commands used to deliver notifications.
///
/// Arguments may contain the placeholders `{message}`, `{image}` and `{caption}`.
/// With both commands empty, notifications only go to the log.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub text_command: Vec<String>,
    #[serde(default)]
    pub image_command: Vec<String>,
}

pub fn build_notifier(config: &NotifierConfig) -> Box<dyn Notifier> {
    if config.text_command.is_empty() && config.image_command.is_empty() {
        Box::new(LogNotifier)
    } else {
        Box::new(CommandNotifier::new(config.clone()))
    }
}

/// Writes notifications to the log only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send_text(&self, message: &str) -> Result<()> {
        info!(message, "Notification");
        Ok(())
    }

    fn send_image_with_caption(&self, image: &Path, caption: &str) -> Result<()> {
        info!(image = %image.display(), caption, "Notification");
        Ok(())
    }
}

/// Delivers notifications by spawning a user-supplied program
/// (for example a `curl` call to a chat bot).
#[derive(Clone, Debug)]
pub struct CommandNotifier {
    config: NotifierConfig,
}

impl CommandNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self { config }
    }
}

impl Notifier for CommandNotifier {
    fn send_text(&self, message: &str) -> Result<()> {
        run_template(&self.config.text_command, &[("{message}", message)])
    }

    fn send_image_with_caption(&self, image: &Path, caption: &str) -> Result<()> {
        if self.config.image_command.is_empty() {
            return self.send_text(caption);
        }
        let image = image.display().to_string();
        run_template(
            &self.config.image_command,
            &[
                ("{image}", image.as_str()),
                ("{caption}", caption),
                ("{message}", caption),
            ],
        )
    }
}

/// Substitute placeholders into `template` and run it to completion.
fn run_template(template: &[String], substitutions: &[(&str, &str)]) -> Result<()> {
    let args: Vec<String> = template
        .iter()
        .map(|arg| {
            substitutions
                .iter()
                .fold(arg.clone(), |acc, &(key, value)| acc.replace(key, value))
        })
        .collect();

    let Some((program, rest)) = args.split_first() else {
        return Err(FeedwatchError::Notification("no command configured".into()));
    };

    let output = Command::new(program)
        .args(rest)
        .output()
        .map_err(|e| FeedwatchError::Notification(format!("cannot run {program}: {e}")))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(FeedwatchError::Notification(format!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}
