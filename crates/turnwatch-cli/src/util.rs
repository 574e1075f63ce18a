use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Installs the stderr log subscriber.
///
/// The default level is `info`, or `debug` with `verbose`; `RUST_LOG`
/// takes precedence over both.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Writes `value` as pretty JSON to `path`, replacing it in one step.
///
/// The JSON is written to a temporary sibling file which is renamed over
/// `path` once fully flushed, so readers never observe a partial file.
/// Missing parent directories are created.
pub fn save_json_atomic<T>(value: &T, path: &Path) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let tmp_path = temporary_sibling(path)?;
    let result = write_json(value, &tmp_path).and_then(|()| {
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to move {} to {}",
                tmp_path.display(),
                path.display()
            )
        })
    });
    match &result {
        Ok(()) => tracing::debug!("Wrote {}", path.display()),
        Err(_) => {
            let _ = fs::remove_file(&tmp_path);
        }
    }
    result
}

fn temporary_sibling(path: &Path) -> anyhow::Result<PathBuf> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Output path has no file name: {}", path.display()))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn write_json<T>(value: &T, path: &Path) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writeln!(writer)
        .with_context(|| format!("Failed to write newline after JSON to {}", path.display()))?;
    let file = writer
        .into_inner()
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync output to {}", path.display()))?;
    Ok(())
}
