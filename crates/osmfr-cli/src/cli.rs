//! CLI argument definitions for the osmfr toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "osmfr",
    version,
    about = "Audit and normalize French OSM address data",
    long_about = "Audit free-text address fields of an OpenStreetMap export against\n\
                  the FANTOIR way registry and the La Poste postal registry, then\n\
                  normalize them with operator-reviewed correction mappings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Audit address fields against the reference catalogs.
    Audit(AuditArgs),

    /// Normalize records using reviewed correction mappings.
    Shape(ShapeArgs),

    /// Count tag keys per grammar class.
    Tags(TagsArgs),

    /// Cut a sample file out of a large export.
    Sample(SampleArgs),
}

#[derive(Parser)]
pub struct AuditArgs {
    /// Path to the OSM export to audit.
    #[arg(value_name = "OSM_FILE")]
    pub osm_file: PathBuf,

    /// FANTOIR nature-of-way nomenclature (TYPE;TYPE_NAME CSV).
    #[arg(long = "way-types", value_name = "CSV")]
    pub way_types: PathBuf,

    /// FANTOIR fixed-width way registry file.
    #[arg(long = "fantoir", value_name = "FILE")]
    pub fantoir: PathBuf,

    /// La Poste postal-code/locality export (semicolon CSV).
    #[arg(long = "postal", value_name = "CSV")]
    pub postal: PathBuf,

    /// Department prefix selecting the covered area.
    #[arg(long = "area", value_name = "CODE", default_value = "974")]
    pub area: String,

    /// Directory receiving the correction-candidate files.
    #[arg(long = "update-dir", value_name = "DIR", default_value = "data")]
    pub update_dir: PathBuf,

    /// Seed <category>-update.csv candidate files for manual review.
    #[arg(long = "init-mapping")]
    pub init_mapping: bool,
}

#[derive(Parser)]
pub struct ShapeArgs {
    /// Path to the OSM export to normalize.
    #[arg(value_name = "OSM_FILE")]
    pub osm_file: PathBuf,

    /// Directory holding the reviewed <category>-update.csv mappings.
    #[arg(long = "update-dir", value_name = "DIR", default_value = "data")]
    pub update_dir: PathBuf,

    /// FANTOIR nature-of-way nomenclature, used for street re-rendering.
    #[arg(long = "way-types", value_name = "CSV")]
    pub way_types: Option<PathBuf>,

    /// Output file (default: <OSM_FILE>.json).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Indent every output document instead of one line per record.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Parser)]
pub struct TagsArgs {
    /// Path to the OSM export to census.
    #[arg(value_name = "OSM_FILE")]
    pub osm_file: PathBuf,
}

#[derive(Parser)]
pub struct SampleArgs {
    /// Path to the OSM export to sample.
    #[arg(value_name = "OSM_FILE")]
    pub osm_file: PathBuf,

    /// Output file for the sample document.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Keep every k-th top-level element.
    #[arg(short = 'k', long = "step", value_name = "N", default_value_t = 10)]
    pub step: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
