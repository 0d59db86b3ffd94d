use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::MakeArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use makendx::engine::config::{ConfigError, WorkflowConfigBuilder};
use makendx::engine::grouping::CombineStrategy;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn build_config(args: &MakeArgs) -> Result<AppConfig> {
    let file_config = FileConfig::load(args.config.as_deref())?;
    merge(args, file_config, DefaultsConfig::default())
}

fn merge(args: &MakeArgs, file_config: FileConfig, defaults: DefaultsConfig) -> Result<AppConfig> {
    let file_config = apply_set_values(file_config, &args.set_values)?;

    let output_path = args
        .output
        .clone()
        .or(file_config.output)
        .unwrap_or(defaults.output);
    let combine = args
        .combine
        .clone()
        .or(file_config.combine)
        .unwrap_or(defaults.combine);
    let chunk_size = args
        .chunk_size
        .or(file_config.chunk_size)
        .unwrap_or(defaults.chunk_size);
    let backup = !args.no_backup && file_config.backup.unwrap_or(defaults.backup);

    check_extension(&args.input, "gro", "input")?;
    check_extension(&output_path, "ndx", "output")?;

    let strategy: CombineStrategy = combine
        .parse()
        .map_err(|e: ConfigError| CliError::Config(e.to_string()))?;

    let core_config = WorkflowConfigBuilder::new()
        .strategy(strategy)
        .chunk_size(chunk_size)
        .backup(backup)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!("Resolved workflow configuration: {:?}", core_config);

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path,
        core_config,
    })
}

fn check_extension(path: &Path, expected: &str, role: &str) -> Result<()> {
    if path.extension().and_then(|ext| ext.to_str()) == Some(expected) {
        Ok(())
    } else {
        Err(CliError::Config(format!(
            "The {} file must have a .{} extension: '{}'",
            role,
            expected,
            path.display()
        )))
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        let invalid = |e: parser::ParseError| CliError::Config(e.to_string());

        match key {
            "output" => config.output = Some(PathBuf::from(value)),
            "combine" => config.combine = Some(value.to_string()),
            "chunk-size" => {
                config.chunk_size = Some(parser::parse_value(key, value, "integer").map_err(invalid)?)
            }
            "backup" => {
                config.backup = Some(parser::parse_value(key, value, "boolean").map_err(invalid)?)
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
