//! Keeps a requirements file in line with a packaging descriptor.

mod descriptor;
mod diff;
mod files;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::RequirementsResult;

pub use descriptor::{RequirementsDescriptor, casefold_sorted};
pub use diff::compare_requirements;
pub use files::{read_current_requirements, write_requirements};

pub const DEFAULT_OUTPUT_PATH: &str = "./requirements-all.txt";
pub const DEFAULT_DESCRIPTOR_PATH: &str = "./setup.json";
pub const DEFAULT_EXTRA: &str = "all";

/// What to do with the corrected requirement list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Return the list without touching the output file.
    Print,
    /// Report differences without touching the output file.
    Diff,
    /// Rewrite the output file when it differs.
    Write,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub descriptor: PathBuf,
    pub output: PathBuf,
    pub extra: String,
    pub include_base: bool,
    pub mode: SyncMode,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            descriptor: PathBuf::from(DEFAULT_DESCRIPTOR_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            extra: DEFAULT_EXTRA.to_owned(),
            include_base: true,
            mode: SyncMode::Write,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Printed(Vec<String>),
    UpToDate,
    DiffReported(Vec<String>),
    Written { path: PathBuf, count: usize },
}

impl SyncOutcome {
    /// Process exit code: `1` when the current file was out of date.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Printed(_) | Self::UpToDate => 0,
            Self::DiffReported(_) | Self::Written { .. } => 1,
        }
    }
}

pub fn collect_requirements(
    descriptor_path: &Path,
    extra: &str,
    include_base: bool,
) -> RequirementsResult<Vec<String>> {
    RequirementsDescriptor::load(descriptor_path)?.collect(extra, include_base)
}

pub fn sync_requirements(options: &SyncOptions) -> RequirementsResult<SyncOutcome> {
    let corrected = collect_requirements(&options.descriptor, &options.extra, options.include_base)?;
    if options.mode == SyncMode::Print {
        return Ok(SyncOutcome::Printed(corrected));
    }

    let current = read_current_requirements(&options.output)?;
    let diff = compare_requirements(&corrected, &current);
    if diff.is_empty() {
        info!(path = %options.output.display(), "requirements are up to date");
        return Ok(SyncOutcome::UpToDate);
    }

    if options.mode == SyncMode::Diff {
        return Ok(SyncOutcome::DiffReported(diff));
    }

    write_requirements(&options.output, &corrected)?;
    info!(
        path = %options.output.display(),
        count = corrected.len(),
        "requirements file updated"
    );
    Ok(SyncOutcome::Written {
        path: options.output.clone(),
        count: corrected.len(),
    })
}
