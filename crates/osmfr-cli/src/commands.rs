//! Subcommand implementations.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use osmfr_core::{classify_key, FoldedSet, KeyClass};
use osmfr_ingest::{write_sample, RecordReader};
use osmfr_model::AnomalySet;
use osmfr_standards::{Catalogs, WayTypeCatalog};
use osmfr_transform::{write_json_lines, CorrectionMappings, Shaper};
use osmfr_validate::{write_candidates, Auditor};

use crate::cli::{AuditArgs, SampleArgs, ShapeArgs, TagsArgs};

/// Result of an audit run.
pub struct AuditOutcome {
    pub anomalies: AnomalySet,
    pub records: usize,
    pub written: Vec<PathBuf>,
}

/// Result of a shape run.
pub struct ShapeOutcome {
    pub records: usize,
    pub skipped: usize,
    pub output: PathBuf,
}

/// Key census counts per grammar class.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TagCensus {
    pub lower: usize,
    pub lower_colon: usize,
    pub problem: usize,
    pub other: usize,
}

pub fn run_audit(args: &AuditArgs) -> Result<AuditOutcome> {
    let catalogs = Catalogs::load(&args.way_types, &args.fantoir, &args.area, &args.postal)
        .context("load reference catalogs")?;
    info!(
        way_types = catalogs.way_types.len(),
        streets = catalogs.streets.len(),
        postcodes = catalogs.postal.len(),
        "reference catalogs loaded"
    );

    let reader = RecordReader::from_path(&args.osm_file)
        .with_context(|| format!("open {}", args.osm_file.display()))?;
    let auditor = Auditor::new(&catalogs);

    let bar = spinner("auditing records");
    let mut records = 0usize;
    let anomalies = auditor
        .audit(reader.inspect(|result| {
            if result.is_ok() {
                records += 1;
                bar.inc(1);
            }
        }))
        .context("audit pass failed")?;
    bar.finish_and_clear();
    info!(records, anomalies = anomalies.total(), "audit pass finished");

    let written = if args.init_mapping {
        fs::create_dir_all(&args.update_dir)
            .with_context(|| format!("create {}", args.update_dir.display()))?;
        write_candidates(&anomalies, &args.update_dir).context("write candidate files")?
    } else {
        Vec::new()
    };

    Ok(AuditOutcome {
        anomalies,
        records,
        written,
    })
}

pub fn run_shape(args: &ShapeArgs) -> Result<ShapeOutcome> {
    let mappings =
        CorrectionMappings::load(&args.update_dir).context("load correction mappings")?;
    info!(corrections = mappings.len(), "correction mappings loaded");

    let street_tokens = match &args.way_types {
        Some(path) => WayTypeCatalog::load(path)
            .context("load way-type nomenclature")?
            .street_tokens(),
        None => FoldedSet::default(),
    };

    let shaper = Shaper::new(mappings, street_tokens);
    let output = args.output.clone().unwrap_or_else(|| {
        let mut name = args.osm_file.clone().into_os_string();
        name.push(".json");
        PathBuf::from(name)
    });
    let sink = File::create(&output).with_context(|| format!("create {}", output.display()))?;
    let mut sink = BufWriter::new(sink);

    let reader = RecordReader::from_path(&args.osm_file)
        .with_context(|| format!("open {}", args.osm_file.display()))?;

    let bar = spinner("shaping records");
    let mut written = 0usize;
    let mut skipped = 0usize;
    for result in reader {
        let record = result.context("shape pass failed")?;
        match shaper.shape(&record).context("shape record")? {
            Some(canonical) => {
                written += write_json_lines([canonical], &mut sink, args.pretty)
                    .context("write output record")?;
                bar.inc(1);
            }
            None => skipped += 1,
        }
    }
    bar.finish_and_clear();
    info!(written, skipped, output = %output.display(), "shape pass finished");

    Ok(ShapeOutcome {
        records: written,
        skipped,
        output,
    })
}

pub fn run_tags(args: &TagsArgs) -> Result<TagCensus> {
    let reader = RecordReader::from_path(&args.osm_file)
        .with_context(|| format!("open {}", args.osm_file.display()))?;

    let mut census = TagCensus::default();
    for result in reader {
        let record = result.context("key census failed")?;
        for (key, _) in &record.tags {
            match classify_key(key) {
                KeyClass::Lower => census.lower += 1,
                KeyClass::LowerColon => census.lower_colon += 1,
                KeyClass::Problem => census.problem += 1,
                KeyClass::Other => census.other += 1,
            }
        }
    }
    Ok(census)
}

pub fn run_sample(args: &SampleArgs) -> Result<usize> {
    write_sample(&args.osm_file, &args.output, args.step)
        .with_context(|| format!("sample {}", args.osm_file.display()))
}

fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({pos})") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
