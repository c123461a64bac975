use std::fs;
use std::io::{self, Write};

use apk_file::Exported;

use crate::context::{OutputSettings, OutputTarget};
use crate::error::CliError;

/// Writes the rendered export to the configured sink.
pub fn emit(
    exported: &Exported,
    settings: &OutputSettings,
    records: usize,
) -> Result<(), CliError> {
    match settings.target {
        OutputTarget::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&exported.bytes)?;
            stdout.flush()?;
        }
        OutputTarget::File => {
            let path = settings.file_path();
            if !settings.prefix.as_os_str().is_empty() {
                fs::create_dir_all(&settings.prefix)?;
            }
            fs::write(&path, &exported.bytes)?;
            tracing::info!(
                path = %path.display(),
                content_type = exported.content_type,
                "wrote export"
            );
            println!("Wrote {records} record(s) to {}", path.display());
        }
    }
    Ok(())
}
