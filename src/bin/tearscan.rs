//! tearscan - batch split detection over decoded image files
//!
//! For each input image this binary:
//! 1. Decodes the file into an RGB frame
//! 2. Runs the split detector
//! 3. Logs a one-line summary
//! 4. Writes an annotated copy (marker at the split column when corrupt)
//! 5. Optionally hands the winning column's profile to a CSV sink
//!
//! Interrupts set a cancellation flag that the loop checks between frames;
//! frames already scanned keep their outputs.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use tearscan::{
    annotate, collect_image_paths, load_frame, CsvProfileWriter, ProfileSink, SplitDetector,
    TearscanConfig, Ui,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image files to scan.
    inputs: Vec<PathBuf>,
    /// Also scan every PNG/JPEG directly under this directory.
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Fraction of the width excluded from each edge before searching.
    #[arg(long)]
    search_frac: Option<f64>,
    /// Minimum mean diff at the winning column.
    #[arg(long)]
    diff_threshold: Option<f64>,
    /// Per-row diff at or above which a row counts as affected.
    #[arg(long)]
    row_threshold: Option<f64>,
    /// Minimum fraction of affected rows.
    #[arg(long)]
    row_ratio_threshold: Option<f64>,
    /// Directory for annotated copies.
    #[arg(long)]
    annotated_out: Option<PathBuf>,
    /// Directory for per-row profile CSVs. Omit to skip profile export.
    #[arg(long)]
    profiles_out: Option<PathBuf>,
    /// Skip writing annotated copies.
    #[arg(long)]
    no_annotate: bool,
    /// Progress display: auto, plain, or pretty.
    #[arg(long, env = "TEARSCAN_UI")]
    ui: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut cfg = TearscanConfig::load()?;
    if let Some(value) = args.search_frac {
        cfg.params.search_frac = value;
    }
    if let Some(value) = args.diff_threshold {
        cfg.params.diff_threshold = value;
    }
    if let Some(value) = args.row_threshold {
        cfg.params.row_threshold = value;
    }
    if let Some(value) = args.row_ratio_threshold {
        cfg.params.row_ratio_threshold = value;
    }
    if let Some(dir) = args.annotated_out {
        cfg.annotated_dir = dir;
    }
    if let Some(dir) = &args.profiles_out {
        cfg.profile_dir = dir.clone();
    }

    let detector = SplitDetector::new(cfg.params)?;

    let mut paths = args.inputs.clone();
    if let Some(dir) = &args.dir {
        paths.extend(collect_image_paths(dir)?);
    }
    if paths.is_empty() {
        return Err(anyhow!("no input images; pass files or --dir"));
    }

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.store(true, Ordering::SeqCst))
            .context("installing interrupt handler")?;
    }

    let ui = Ui::from_flag(args.ui.as_deref(), std::io::stderr().is_terminal());
    let progress = ui.batch(paths.len() as u64);

    let mut profile_sink = args
        .profiles_out
        .is_some()
        .then(|| CsvProfileWriter::new(cfg.profile_dir.clone()));

    let mut scanned = 0usize;
    let mut corrupt = 0usize;
    let mut skipped = 0usize;

    for path in &paths {
        if cancel.load(Ordering::SeqCst) {
            log::warn!("interrupted after {scanned} of {} frames", paths.len());
            break;
        }

        let frame = match load_frame(path) {
            Ok(frame) => frame,
            Err(err) => {
                log::error!("skipping {}: {err:#}", path.display());
                skipped += 1;
                progress.advance("skipped");
                continue;
            }
        };

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("frame");

        let detected = match profile_sink.as_mut() {
            Some(sink) => {
                sink.set_label(stem);
                detector.detect_observed(&frame, |report, profile| {
                    if let Err(err) = sink.record(report, profile) {
                        log::warn!("profile sink failed for {}: {err:#}", path.display());
                    }
                })
            }
            None => detector.detect(&frame),
        };
        let report = match detected {
            Ok(report) => report,
            Err(err) => {
                log::error!("skipping {}: {err}", path.display());
                skipped += 1;
                progress.advance("skipped");
                continue;
            }
        };

        scanned += 1;
        if report.is_corrupt {
            corrupt += 1;
        }

        log::info!(
            "{}: corrupt={}, x={}, diff={:.1}, rows={:.2}, time={:.2} ms",
            path.display(),
            report.is_corrupt,
            report.split_column,
            report.max_mean_diff,
            report.row_ratio,
            report.elapsed.as_secs_f64() * 1000.0
        );

        if !args.no_annotate {
            let out = annotate(&frame, &report);
            std::fs::create_dir_all(&cfg.annotated_dir).with_context(|| {
                format!("creating annotated directory {}", cfg.annotated_dir.display())
            })?;
            let out_path = cfg
                .annotated_dir
                .join(format!("annotated_{}_{}.png", stem, report.status()));
            out.save(&out_path)
                .with_context(|| format!("writing {}", out_path.display()))?;
        }

        progress.advance(report.status());
    }

    progress.finish();
    log::info!("scanned {scanned} frames: {corrupt} corrupt, {skipped} skipped");
    Ok(())
}
