use std::fs;
use std::path::Path;

use log::info;

use crate::bench::Gauntlet;
use crate::config::GauntletConfig;
use crate::report::format_table;
use crate::store::StorageAdapter;
use crate::{BenchDbError, Result};

/// Run the gauntlet against `adapter`, print the report and write it to
/// `output`, replacing any existing file.
///
/// Returns the rendered report.
pub fn run_backend<A: StorageAdapter>(
    config: &GauntletConfig,
    adapter: &mut A,
    output: &Path,
) -> Result<String> {
    let mut gauntlet = Gauntlet::new(config.clone())?;
    let results = gauntlet.run(adapter)?;
    let rendered = format_table(adapter.name(), &results);

    println!("{}", rendered);
    fs::write(output, &rendered).map_err(|e| {
        BenchDbError::ReportError(format!("Failed to write {}: {}", output.display(), e))
    })?;
    info!("{}: report written to {}", adapter.name(), output.display());

    Ok(rendered)
}
