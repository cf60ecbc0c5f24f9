use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use nxshot::capture::{Capture, CaptureKind};
use nxshot::catalog::Catalog;
use nxshot::organize::{OrganizeJob, OrganizeOptions, OrganizeReport};
use nxshot::{format_size, path_to_string_relative, print_bold, print_error, print_warning};

use crate::config::Config;

const PROGRESS_BAR_CHARS: &str = "=>-";
const PROGRESS_BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:80.magenta/blue} {pos}/{len} {percent}%";

/// Main entry point for the nxshot CLI.
pub fn run(config: Config) -> anyhow::Result<()> {
    if config.debug {
        eprintln!("Config: {config:#?}");
    }

    let catalog = Catalog::load(config.catalog.as_deref())?;
    if config.verbose {
        println!("Catalog contains {} games", catalog.len());
    }

    let mut job = OrganizeJob::new();
    let scan_errors = job.scan(&config.path)?;
    for error in &scan_errors {
        print_warning!("Scan: {error}");
    }

    if job.is_empty() {
        println!("No capture files found in {}", path_to_string_relative(&config.path));
        return Ok(());
    }

    let images = job
        .captures()
        .iter()
        .filter(|file| file.kind == CaptureKind::Image)
        .count();
    let videos = job.len() - images;
    print_bold!("Found {} capture files ({images} images, {videos} videos)", job.len());

    if config.dryrun {
        print_candidates(&job, &catalog, config.verbose);
        return Ok(());
    }

    let progress_bar = ProgressBar::new(job.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .expect("Failed to set progress bar template")
            .progress_chars(PROGRESS_BAR_CHARS),
    );

    let options = OrganizeOptions {
        overwrite: !config.skip_existing,
    };
    let report = job.organize(&config.path, &catalog, options, |_, _| {
        progress_bar.inc(1);
    })?;
    progress_bar.finish_and_clear();

    print_summary(&report);

    if report.failures.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} capture files failed to organize", report.failures.len())
    }
}

/// List each candidate with its resolved game name without copying anything.
fn print_candidates(job: &OrganizeJob, catalog: &Catalog, verbose: bool) {
    println!("{}", "Dryrun:".cyan().bold());
    for file in job.captures() {
        match Capture::parse(file) {
            Ok(capture) => {
                let game = catalog.resolve(&capture.game_id);
                if verbose && let Some(datetime) = capture.datetime() {
                    println!(
                        "  {}  [{}]  ==>  {}",
                        file.filename,
                        datetime.format("%Y-%m-%d %H:%M:%S"),
                        game.cyan()
                    );
                } else {
                    println!("  {}  ==>  {}", file.filename, game.cyan());
                }
            }
            Err(error) => print_error!("{error}"),
        }
    }
}

fn print_summary(report: &OrganizeReport) {
    print_bold!(
        "Organized {} captures ({}) into {} game directories:",
        report.total_organized(),
        format_size(report.bytes_copied),
        report.organized.len()
    );
    for (game, count) in &report.organized {
        println!("  {}: {count}", game.cyan());
    }
    if report.skipped > 0 {
        println!("Skipped {} existing files", report.skipped);
    }
    for failure in &report.failures {
        print_error!("{}: {}", failure.filename, failure.reason);
    }
}
