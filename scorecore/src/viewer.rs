//! Launching the external notation editor

use crate::error::{Result, ScoreError};
use std::path::Path;
use std::process::Command;

/// Run `executable` with `file` as its only argument and wait for it.
///
/// Fails with `ExternalToolNotFound` when the executable is missing and with
/// `ExternalTool` when it cannot be started or exits non-zero.
pub fn launch_viewer(executable: &Path, file: &Path) -> Result<()> {
    if !executable.exists() {
        return Err(ScoreError::ExternalToolNotFound(executable.to_path_buf()));
    }

    log::info!("opening {} with {}", file.display(), executable.display());
    let status = Command::new(executable)
        .arg(file)
        .status()
        .map_err(|e| ScoreError::ExternalTool {
            tool: executable.to_path_buf(),
            reason: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ScoreError::ExternalTool {
            tool: executable.to_path_buf(),
            reason: match status.code() {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by a signal".to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable() {
        let result = launch_viewer(
            Path::new("/definitely/not/a/viewer"),
            Path::new("score.musicxml"),
        );
        assert!(matches!(result, Err(ScoreError::ExternalToolNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_checked() {
        let file = Path::new("score.musicxml");
        assert!(launch_viewer(Path::new("/bin/true"), file).is_ok());
        assert!(matches!(
            launch_viewer(Path::new("/bin/false"), file),
            Err(ScoreError::ExternalTool { .. })
        ));
    }
}
