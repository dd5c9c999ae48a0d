//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use engine_scene::BuildOptions;

#[derive(Debug, Parser)]
#[command(
    name = "engine_app",
    about = "Build a scene document and print the instantiated entity hierarchy"
)]
pub struct AppConfig {
    /// Directory scene and template documents are read from
    #[arg(short = 'd', long, default_value = ".")]
    pub scene_dir: PathBuf,

    /// Name of the scene document, with or without its .json extension
    pub scene: String,

    /// Number of times to instantiate the built scene
    #[arg(short, long, default_value_t = 1)]
    pub copies: usize,

    /// Maximum node nesting depth
    #[arg(long, default_value_t = BuildOptions::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl AppConfig {
    #[must_use]
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new().with_max_depth(self.max_depth)
    }
}
