//! Compiled-in shell settings.

use std::path::PathBuf;

use mata_common::types::LogicalSize;

use crate::cli::Args;

pub const DEFAULT_TITLE: &str = "My Application";
pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 720;
/// Content directory, relative to the working directory.
pub const DEFAULT_CONTENT_ROOT: &str = "app";

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub content_root: PathBuf,
    pub debug: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            content_root: PathBuf::from(DEFAULT_CONTENT_ROOT),
            debug: false,
        }
    }
}

impl ShellConfig {
    pub fn from_args(args: Args) -> Self {
        Self {
            debug: args.debug,
            ..Default::default()
        }
    }

    pub fn logical_size(&self) -> LogicalSize {
        LogicalSize::new(self.width, self.height)
    }

    /// Filter directive for the log subscriber.
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "mata=debug"
        } else {
            "mata=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.title, "My Application");
        assert_eq!(config.logical_size(), LogicalSize::new(1280, 720));
        assert_eq!(config.content_root, PathBuf::from("app"));
        assert!(!config.debug);
        assert_eq!(config.log_directive(), "mata=info");
    }

    #[test]
    fn debug_raises_log_level() {
        let config = ShellConfig::from_args(Args { debug: true });
        assert!(config.debug);
        assert_eq!(config.log_directive(), "mata=debug");
        assert_eq!(config.title, DEFAULT_TITLE);
    }
}
