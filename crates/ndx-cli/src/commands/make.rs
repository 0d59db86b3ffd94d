use crate::cli::MakeArgs;
use crate::config::{self, AppConfig};
use crate::error::{CliError, Result};
use crate::ui::ConsolePrompter;
use crate::utils::progress::CliProgressHandler;
use makendx::engine::progress::ProgressReporter;
use makendx::engine::prompt::{Prompter, ScriptedPrompter};
use makendx::workflows::make_ndx::{self, MakeNdxReport};
use std::fs::File;
use std::io::{self, BufReader};
use tracing::{info, warn};

pub fn run(args: MakeArgs) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let app = config::build_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let report = match &args.responses {
        Some(path) => {
            info!("Answering prompts from {:?}", path);
            let access = |source| CliError::FileAccess {
                path: path.clone(),
                source,
            };
            let file = File::open(path).map_err(access)?;
            let mut prompter = ScriptedPrompter::from_reader(BufReader::new(file)).map_err(access)?;
            let report = execute(&app, &mut prompter, &reporter)?;
            if prompter.remaining() > 0 {
                warn!(
                    "{} response line(s) were left unused in {:?}.",
                    prompter.remaining(),
                    path
                );
            }
            report
        }
        None => {
            let mut prompter = ConsolePrompter::new(io::stdin().lock(), io::stdout().lock());
            execute(&app, &mut prompter, &reporter)?
        }
    };

    print_summary(&app, &report);
    Ok(())
}

fn execute<P: Prompter + ?Sized>(
    app: &AppConfig,
    prompter: &mut P,
    reporter: &ProgressReporter,
) -> Result<MakeNdxReport> {
    info!(
        "Building index from {:?} into {:?} ({} strategy).",
        app.input_path, app.output_path, app.core_config.strategy
    );
    let report = make_ndx::make_index_file(
        &app.input_path,
        &app.output_path,
        &app.core_config,
        prompter,
        reporter,
    )?;
    Ok(report)
}

fn summary_lines(app: &AppConfig, report: &MakeNdxReport) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(backup) = &report.write.backup {
        lines.push(format!(
            "Back Off! I just backed up {} to {}",
            app.output_path.display(),
            backup.display()
        ));
    }
    if report.groups.is_empty() {
        lines.push("Warning: no groups were selected; the index file is empty.".to_string());
    }
    lines.push(format!(
        "✓ Wrote {} group(s) with {} atom entries from {} atoms to {}",
        report.write.groups_written,
        report.groups.member_count(),
        report.atoms_read,
        report.write.path.display()
    ));
    lines
}

fn print_summary(app: &AppConfig, report: &MakeNdxReport) {
    for line in summary_lines(app, report) {
        println!("{}", line);
    }
}
