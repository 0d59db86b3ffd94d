use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use makendx::core::io::ndx::{IndexFile, IndexGroup};
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Reading index file {:?}", &args.file);
    let groups = IndexFile::read_from_path(&args.file).map_err(|e| CliError::FileParsing {
        path: args.file.clone(),
        source: e.into(),
    })?;

    for line in listing(&groups) {
        println!("{}", line);
    }
    Ok(())
}

fn listing(groups: &[IndexGroup]) -> Vec<String> {
    let width = groups.iter().map(|g| g.name.len()).max().unwrap_or(0);
    let mut lines: Vec<String> = groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            format!(
                "Group {:>4} ({:<width$}) has {:>6} elements",
                i,
                group.name,
                group.members.len(),
                width = width
            )
        })
        .collect();
    let total: usize = groups.iter().map(|g| g.members.len()).sum();
    lines.push(format!("{} group(s), {} atom entries in total", groups.len(), total));
    lines
}
