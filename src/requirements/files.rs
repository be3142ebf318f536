use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{RequirementsError, RequirementsResult};

/// Reads the requirement lines of an existing requirements file.
///
/// Blank lines and `#` comments are skipped. A missing file yields an empty list.
pub fn read_current_requirements(path: &Path) -> RequirementsResult<Vec<String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no current requirements file");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(RequirementsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut requirements: Vec<String> = raw
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(str::to_owned)
        .collect();
    requirements.sort();
    Ok(requirements)
}

pub fn write_requirements(path: &Path, requirements: &[String]) -> RequirementsResult<()> {
    fs::write(path, requirements.join("\n")).map_err(|source| RequirementsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        count = requirements.len(),
        "wrote requirements file"
    );
    Ok(())
}
