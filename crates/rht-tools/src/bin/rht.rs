use clap::{Args, Parser, Subcommand};
use log::info;
use rht_tools::compare::{DifferenceKind, EmptySelectionPolicy, MeanKind};
use rht_tools::{
    backproj_output_path, batch_backproject, merge_missing_header_keys, run_backproject,
    run_compare, BackprojectReport, CompareReport, Header, RhtIoError, RhtRunConfig, RhtTable,
    SharedSelection,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "rht",
    version,
    about = "Rolling Hough Transform backprojection and angle matching"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); `RUST_LOG`
    /// overrides it in tracing builds.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Backproject one RHT table into a JSON report.
    Backproject {
        table: PathBuf,
        /// Report path (default: `<stem>_backproj.json` next to the table).
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Compare the angle fields of two RHT tables (A - B).
    Compare {
        table_a: PathBuf,
        table_b: PathBuf,
        #[arg(short, long, default_value = "rht_compare_report.json")]
        out: PathBuf,
        /// Use a circular mean on the half-polar axis.
        #[arg(long)]
        circular: bool,
        /// Wrap differences to [-period/2, period/2).
        #[arg(long)]
        wrap: bool,
        /// Fail when a field has no positive-intensity angle at a pixel.
        #[arg(long)]
        strict: bool,
        /// Only compare pixels non-zero in both backprojections.
        #[arg(long)]
        nonzero_only: bool,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Backproject every table in a directory.
    Batch {
        dir: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Add header keys missing from a table's header.
    MergeHeader {
        table: PathBuf,
        /// JSON object of header keys to add.
        header: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// JSON run configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the backprojection edge exclusion.
    #[arg(long)]
    edge_exclusion: Option<usize>,
}

impl RunArgs {
    fn load(&self) -> Result<RhtRunConfig, RhtIoError> {
        let mut cfg = match &self.config {
            Some(path) => RhtRunConfig::load_json(path)?,
            None => RhtRunConfig::default(),
        };
        if let Some(e) = self.edge_exclusion {
            cfg.backproject.edge_exclusion = e;
        }
        Ok(cfg)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = rht_tools::core::level_from_verbosity(verbose);
    #[cfg(feature = "tracing")]
    rht_tools::core::init_tracing(false, level);
    #[cfg(not(feature = "tracing"))]
    let _ = rht_tools::core::init_with_level(level);
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Backproject { table, out, run } => {
            let cfg = run.load()?;
            let out = out.unwrap_or_else(|| backproj_output_path(&table));
            backproject_cmd(&table, &out, &cfg)
        }
        Command::Compare {
            table_a,
            table_b,
            out,
            circular,
            wrap,
            strict,
            nonzero_only,
            run,
        } => {
            let mut cfg = run.load()?;
            if circular {
                cfg.compare.mean = MeanKind::Circular;
            }
            if wrap {
                cfg.compare.difference = DifferenceKind::Wrapped;
            }
            if strict {
                cfg.compare.empty_selection = EmptySelectionPolicy::Error;
            }
            if nonzero_only {
                cfg.shared = SharedSelection::NonzeroBackprojection;
            }
            compare_cmd(&table_a, &table_b, &out, &cfg)
        }
        Command::Batch { dir, run } => {
            let cfg = run.load()?;
            let entries = batch_backproject(&dir, &cfg)?;
            let failed = entries.iter().filter(|e| e.error.is_some()).count();
            for e in &entries {
                match (&e.output, &e.error) {
                    (Some(out), _) => println!("{} -> {}", e.input.display(), out.display()),
                    (None, Some(err)) => println!("{}: {err}", e.input.display()),
                    (None, None) => {}
                }
            }
            println!("{} tables, {} failed", entries.len(), failed);
            Ok(())
        }
        Command::MergeHeader { table, header } => {
            let mut rht = RhtTable::load_json(&table)?;
            let incoming: Header = serde_json::from_str(&fs::read_to_string(&header)?)?;
            let summary = merge_missing_header_keys(&mut rht.header, &incoming);
            rht.write_json(&table)?;
            println!(
                "added {} header keys, skipped {}",
                summary.added.len(),
                summary.skipped.len()
            );
            Ok(())
        }
    }
}

fn backproject_cmd(
    table_path: &Path,
    out: &Path,
    cfg: &RhtRunConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = RhtTable::load_json(table_path)?;
    let mut report = BackprojectReport::new(table_path, &table, &cfg.backproject);
    match run_backproject(&table, cfg) {
        Ok(image) => {
            let nonzero = image.nonzero_count();
            report.set_image(image);
            report.write_json(out)?;
            info!("wrote {}", out.display());
            println!(
                "backprojected {} pixels into {}x{}: {} non-zero, total intensity {:.3}",
                report.num_pixels, table.naxis1, table.naxis2, nonzero, report.total_intensity
            );
            Ok(())
        }
        Err(err) => {
            report.set_error(&err);
            report.write_json(out)?;
            Err(err.into())
        }
    }
}

fn compare_cmd(
    path_a: &Path,
    path_b: &Path,
    out: &Path,
    cfg: &RhtRunConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let table_a = RhtTable::load_json(path_a)?;
    let table_b = RhtTable::load_json(path_b)?;
    let mut report = CompareReport::new(path_a, path_b, cfg);
    match run_compare(&table_a, &table_b, cfg) {
        Ok(result) => {
            report.set_result(result);
            report.write_json(out)?;
            info!("wrote {}", out.display());
            println!(
                "compared {} pixels ({} NaN)",
                report.num_compared, report.num_nan
            );
            Ok(())
        }
        Err(err) => {
            report.set_error(&err);
            report.write_json(out)?;
            Err(err.into())
        }
    }
}
