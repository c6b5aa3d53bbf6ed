use clap::{Parser, Subcommand};
use egov_convert::pipeline::{self, InputArchive};
use egov_convert::xslt::XrustEngine;
use egov_convert::output;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "egov-convert")]
#[command(about = "Convert e-Gov XML/XSL procedure archives to readable HTML")]
#[command(long_about = "\
Convert e-Gov XML/XSL procedure archives to readable HTML

Each input ZIP holds structured XML documents and the XSL style sheets that
render them. For every document the converter picks a style sheet — the
declared xml-stylesheet reference first, then a same-named template, then
the first template in the archive — applies it, and packs originals plus
rendered HTML into one combined result ZIP:

  result.zip
  ├── procedure-a/               # One directory per input archive
  │   ├── form.xml               # Originals, paths preserved
  │   ├── notify.xsl
  │   └── form_ge.html           # Rendered output per document
  └── procedure-b/
      └── ...

Documents with no template in their archive are skipped and reported.
Run 'egov-convert inspect <FILE>' to preview matching without converting.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one or more archives into a combined result ZIP
    Convert {
        /// Input ZIP files
        files: Vec<PathBuf>,

        /// Also convert every *.zip found under this directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Output path (default: egov_converted_<timestamp>.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the conversion report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Per-file size limit in MiB
        #[arg(long, default_value_t = 100)]
        max_size: u64,
    },
    /// Show documents, templates, and matching decisions for one archive
    Inspect {
        /// Input ZIP file
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            files,
            dir,
            output,
            report,
            max_size,
        } => {
            let inputs = gather_inputs(&files, dir.as_deref(), max_size * 1024 * 1024)?;
            if inputs.is_empty() {
                return Err("no input archives given (pass files or --dir)".into());
            }

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    println!("{}", output::format_progress(&event));
                }
            });

            let engine = XrustEngine::new();
            let result = pipeline::run(&inputs, &engine, Some(tx));
            printer.join().unwrap();
            let result = result?;

            let out_path = output.unwrap_or_else(default_output_name);
            std::fs::write(&out_path, &result.bytes)?;

            output::print_run_output(&result.report);
            println!("Wrote {}", out_path.display());

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&result.report)?;
                std::fs::write(&report_path, json)?;
                println!("Report: {}", report_path.display());
            }
        }
        Command::Inspect { file } => {
            let input = load_input(&file, u64::MAX)?;
            let report = pipeline::inspect(&input)?;
            output::print_inspect_output(&report);
        }
    }

    Ok(())
}

/// Collect explicit files plus every `*.zip` under `dir`, in a stable
/// order: files as given, then directory finds sorted by path.
fn gather_inputs(
    files: &[PathBuf],
    dir: Option<&Path>,
    max_bytes: u64,
) -> Result<Vec<InputArchive>, Box<dyn std::error::Error>> {
    let mut paths: Vec<PathBuf> = files.to_vec();

    if let Some(dir) = dir {
        let mut found: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("zip"))
                    .unwrap_or(false)
            })
            .collect();
        found.sort();
        paths.extend(found);
    }

    paths
        .iter()
        .map(|path| load_input(path, max_bytes))
        .collect()
}

fn load_input(path: &Path, max_bytes: u64) -> Result<InputArchive, Box<dyn std::error::Error>> {
    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(format!(
            "{} is {size} bytes, over the {max_bytes} byte limit (raise --max-size?)",
            path.display()
        )
        .into());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "archive.zip".to_string());

    Ok(InputArchive {
        name,
        bytes: std::fs::read(path)?,
    })
}

fn default_output_name() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("egov_converted_{stamp}.zip"))
}
