use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::recommend::ModelHandle;

pub struct AppContext {
    pub project_root: PathBuf,
    pub config: Config,
    /// Shared embedding model, loaded on first semantic request
    pub model: ModelHandle,
    pub robot_mode: bool,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &project_root)?;
        Ok(Self::new(project_root, config, cli.robot, cli.verbose))
    }

    #[must_use]
    pub fn new(project_root: PathBuf, config: Config, robot_mode: bool, verbosity: u8) -> Self {
        let model = ModelHandle::new(config.semantic.clone());
        Self {
            project_root,
            config,
            model,
            robot_mode,
            verbosity,
        }
    }
}
