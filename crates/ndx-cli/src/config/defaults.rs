use makendx::core::io::ndx::DEFAULT_CHUNK_SIZE;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub output: PathBuf,
    pub combine: String,
    pub chunk_size: usize,
    pub backup: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("index.ndx"),
            combine: "resnum".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            backup: true,
        }
    }
}
