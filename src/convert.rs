//! Conversion runs
//!
//! This module ties the pieces together: extract an export, index it, load
//! and project its object records and write the resulting table.

use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::archive::{default_work_dir, ensure_directories, extract_archive};
use crate::counters::UnresolvedCounters;
use crate::decoder::{DateZone, FieldDecoder};
use crate::dump::{dump_collection, DUMP_COLLECTIONS};
use crate::index::ReferenceIndex;
use crate::projector::{project, ProjectionFilter};
use crate::resolver::Resolver;
use crate::sink::write_table;
use crate::snapshot::{load_record, Record};
use crate::tree::{Collection, ExportTree};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Options for a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Object type names to export (all when `None`)
    pub types: Option<Vec<String>>,
    /// Column names to export (all when `None`)
    pub fields: Option<Vec<String>>,
    /// Dump raw records and print unresolved counters
    pub debug: bool,
    /// Time zone for date fields
    pub zone: DateZone,
    /// Work directory (defaults to `<archive dir>/<archive stem>`)
    pub output_dir: Option<PathBuf>,
}

/// Outcome of a conversion run
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// The CSV file written
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub unresolved: UnresolvedCounters,
}

/// Extract `archive_path` and convert its objects to CSV
pub fn convert_archive(archive_path: &Path, options: &ConvertOptions) -> Result<ConversionReport> {
    let work_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| default_work_dir(archive_path));

    println!("Extracting {}...", archive_path.display());
    let extracted = extract_archive(archive_path, &work_dir, options.debug)?;
    info!("Extracted {} files to {}", extracted, work_dir.display());

    build_csv(&work_dir, options)
}

/// Convert an already extracted export in `work_dir` to CSV
pub fn build_csv(work_dir: &Path, options: &ConvertOptions) -> Result<ConversionReport> {
    let (csv_dir, data_dir) = ensure_directories(work_dir)
        .with_context(|| format!("Failed to prepare {}", work_dir.display()))?;

    let tree = ExportTree::new(work_dir)?;
    let index = ReferenceIndex::build(&tree);
    info!(
        "Indexed {} types, {} relations and {} objects",
        index.types.len(),
        index.relations.len(),
        index.objects.len()
    );

    let records = load_objects(&tree)?;

    let filter = ProjectionFilter::new(options.types.clone(), options.fields.clone());
    let mut unresolved = UnresolvedCounters::new();
    let mut decoder = FieldDecoder::new(Resolver::new(&tree), options.zone);

    let pb = progress_bar(records.len())?;
    pb.set_message("Converting");
    let table = project(
        pb.wrap_iter(records.iter()),
        &index,
        &mut decoder,
        &filter,
        &mut unresolved,
    );
    pb.finish_and_clear();
    let table = table?;

    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let output = csv_dir.join(format!("any2csv-output-{}.csv", stamp));
    write_table(&table, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let report = ConversionReport {
        output,
        rows: table.len(),
        columns: table.columns().len(),
        unresolved,
    };
    println!(
        "Saved {} rows ({} columns) to {}",
        report.rows,
        report.columns,
        report.output.display()
    );

    if options.debug {
        for collection in DUMP_COLLECTIONS {
            let dumped = dump_collection(&tree, collection, &data_dir)?;
            info!("Dumped {} {} records", dumped, collection.dir_name());
        }
        print!("{}", report.unresolved);
    }

    Ok(report)
}

/// Load all object records in file order, skipping absent ones
fn load_objects(tree: &ExportTree) -> Result<Vec<Record>> {
    let files = tree.record_files(Collection::Objects);

    let pb = progress_bar(files.len())?;
    pb.set_message("Loading objects");
    let records: Vec<Record> = pb.wrap_iter(files.iter()).filter_map(load_record).collect();
    pb.finish_and_clear();

    info!("Loaded {} of {} object records", records.len(), files.len());
    Ok(records)
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(ProgressStyle::with_template(PROGRESS_TEMPLATE)?.progress_chars("#>-"));
    Ok(pb)
}
