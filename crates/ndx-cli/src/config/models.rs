use makendx::engine::config::WorkflowConfig;
use std::path::PathBuf;

#[derive(Debug)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub core_config: WorkflowConfig,
}
