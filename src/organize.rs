//! Copy captures into per-game directories under the output root,
//! tracking progress through an explicit job state machine.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use unicode_normalization::UnicodeNormalization;

use crate::capture::{Capture, CaptureFile};
use crate::catalog::Catalog;
use crate::scan;

/// Name of the directory created under the scan root for organized output.
/// Directories with this name are excluded from scans.
pub const OUTPUT_DIR_NAME: &str = "Organized";

/// Job lifecycle. States only move forward; a new job is needed to run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Scanning,
    Ready,
    Organizing,
    Done,
}

/// Options for the copy phase.
#[derive(Debug, Clone, Copy)]
pub struct OrganizeOptions {
    /// Overwrite existing destination files instead of skipping them.
    pub overwrite: bool,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// A capture that could not be organized.
#[derive(Debug)]
pub struct OrganizeFailure {
    pub filename: String,
    pub reason: String,
}

/// Outcome of a completed organize run.
/// Per-file failures do not abort the batch; they are collected here.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    /// Number of copied files per resolved game name.
    pub organized: BTreeMap<String, u64>,
    /// Total bytes copied.
    pub bytes_copied: u64,
    /// Files skipped because the destination already existed.
    pub skipped: u64,
    pub failures: Vec<OrganizeFailure>,
}

impl OrganizeReport {
    #[must_use]
    pub fn total_organized(&self) -> u64 {
        self.organized.values().sum()
    }
}

enum CopyOutcome {
    Copied { game_name: String, bytes: u64 },
    SkippedExisting,
}

/// Ordered capture candidates plus a cursor marking how many have been processed.
///
/// The cursor only ever increases and the state only moves forward:
/// `Idle → Scanning → Ready → Organizing → Done`.
#[derive(Debug, Default)]
pub struct OrganizeJob {
    captures: Vec<CaptureFile>,
    cursor: usize,
    state: JobState,
}

impl OrganizeJob {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> JobState {
        self.state
    }

    /// Number of captures processed so far.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    #[must_use]
    pub fn captures(&self) -> &[CaptureFile] {
        &self.captures
    }

    /// Walk `root` and load capture candidates, resetting the cursor.
    /// Returns the walk errors encountered so they can be reported.
    ///
    /// # Errors
    /// Returns an error if the job has already scanned.
    pub fn scan(&mut self, root: &Path) -> Result<Vec<String>> {
        ensure!(self.state == JobState::Idle, "Scan can only run on an idle job");
        self.state = JobState::Scanning;
        let result = scan::collect_captures(root);
        self.captures = result.captures;
        self.cursor = 0;
        self.state = JobState::Ready;
        Ok(result.errors)
    }

    /// Copy every candidate into `<root>/Organized/<game name>/`, in order,
    /// one file at a time. `on_progress` is called with the number of
    /// processed captures after each file.
    ///
    /// Per-file failures are recorded in the report and the batch continues;
    /// only an uncreatable output root is fatal.
    ///
    /// # Errors
    /// Returns an error if the job is not ready or the output root
    /// cannot be created.
    pub fn organize<F>(
        &mut self,
        root: &Path,
        catalog: &Catalog,
        options: OrganizeOptions,
        mut on_progress: F,
    ) -> Result<OrganizeReport>
    where
        F: FnMut(usize, &CaptureFile),
    {
        ensure!(self.state == JobState::Ready, "Organize requires a completed scan");
        self.state = JobState::Organizing;

        let output_root = root.join(OUTPUT_DIR_NAME);
        fs::create_dir_all(&output_root)
            .with_context(|| format!("Failed to create output directory: {}", output_root.display()))?;

        let mut report = OrganizeReport::default();
        for index in 0..self.captures.len() {
            let file = &self.captures[index];
            match organize_one(file, &output_root, catalog, options) {
                Ok(CopyOutcome::Copied { game_name, bytes }) => {
                    *report.organized.entry(game_name).or_default() += 1;
                    report.bytes_copied += bytes;
                }
                Ok(CopyOutcome::SkippedExisting) => {
                    report.skipped += 1;
                }
                Err(error) => {
                    report.failures.push(OrganizeFailure {
                        filename: file.filename.clone(),
                        reason: error.to_string(),
                    });
                }
            }
            self.cursor = index + 1;
            on_progress(self.cursor, file);
        }

        self.state = JobState::Done;
        Ok(report)
    }
}

/// Copy a single capture into the game directory for its resolved name.
fn organize_one(
    file: &CaptureFile,
    output_root: &Path,
    catalog: &Catalog,
    options: OrganizeOptions,
) -> Result<CopyOutcome> {
    let capture = Capture::parse(file)?;
    let game_name = catalog.resolve(&capture.game_id);

    let game_dir = output_root.join(game_directory_name(game_name));
    fs::create_dir_all(&game_dir)
        .with_context(|| format!("Failed to create game directory: {}", game_dir.display()))?;

    let destination = game_dir.join(&file.filename);
    if !options.overwrite && destination.exists() {
        return Ok(CopyOutcome::SkippedExisting);
    }

    let bytes = fs::copy(&file.path, &destination)
        .with_context(|| format!("Failed to copy {} to {}", file.path.display(), destination.display()))?;

    Ok(CopyOutcome::Copied {
        game_name: game_name.to_string(),
        bytes,
    })
}

/// Directory name for a resolved game name:
/// NFC-normalized, with characters that are invalid in directory names replaced.
fn game_directory_name(game_name: &str) -> String {
    game_name
        .nfc()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
