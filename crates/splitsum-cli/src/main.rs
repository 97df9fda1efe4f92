//! `splitsum` — split large files into bounded-size parts, merge them
//! back, and verify part integrity against a SHA-256 manifest.
//!
//! Thin wrapper: argument and size-unit parsing happen here, then
//! everything is delegated to `splitsum-core` with already-validated
//! parameters.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use splitsum_core::{catalog_from_paths, merge, split, verify, write_manifest};
use tracing_subscriber::EnvFilter;

mod size;

use size::parse_size;

#[derive(Debug, Default)]
struct CliConfig {
    split_size: Option<u64>,
    merge: bool,
    checksum: bool,
    output: Option<PathBuf>,
    inputs: Vec<PathBuf>,
}

fn print_help() {
    let help = "\
splitsum — splitting/merging/checksumming files

USAGE:
    splitsum [OPTIONS] <PATH>...

OPTIONS:
    -s, --split <MAXSIZE>   Split the input into parts of at most MAXSIZE
                            bytes. MAXSIZE accepts an optional B/K/M/G
                            suffix (powers of 1024).
    -m, --merge             Merge the input parts, in the order given,
                            into a single file.
    -c, --checksum          With --split: write a SHA-256 manifest for
                            the fresh parts. Alone: verify the input
                            parts against an existing manifest.
    -o, --output <PATH>     Output prefix (split), destination file
                            (merge), or manifest path (checksum).
    -h, --help              Show this help
";
    println!("{help}");
}

fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut config = CliConfig::default();

    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "-s" | "--split" => {
                index += 1;
                if index >= args.len() {
                    return Err("--split requires a MAXSIZE value".to_owned());
                }
                config.split_size = Some(parse_size(&args[index])?);
            }
            "-m" | "--merge" => config.merge = true,
            "-c" | "--checksum" => config.checksum = true,
            "-o" | "--output" => {
                index += 1;
                if index >= args.len() {
                    return Err("--output requires a value".to_owned());
                }
                config.output = Some(PathBuf::from(&args[index]));
            }
            "-h" | "--help" => {
                print_help();
                return Err(String::new());
            }
            unknown if unknown.starts_with('-') => {
                return Err(format!("unknown option: {unknown}"));
            }
            path => config.inputs.push(PathBuf::from(path)),
        }
        index += 1;
    }

    if config.split_size.is_some() && config.merge {
        return Err("merge and split options can't be used simultaneously".to_owned());
    }
    if config.split_size.is_none() && !config.merge && !config.checksum {
        return Err("nothing to do: pass --split, --merge, or --checksum".to_owned());
    }
    if config.inputs.is_empty() {
        return Err("at least one input path is required".to_owned());
    }
    if config.split_size.is_some() && config.inputs.len() > 1 {
        return Err("you can only split one file at a time".to_owned());
    }

    Ok(config)
}

/// Manifest path for checksum mode: `--output` when given, otherwise
/// the given base path with `.sum` appended.
fn manifest_path(config: &CliConfig, base: &Path) -> PathBuf {
    config.output.clone().unwrap_or_else(|| {
        let mut path = base.as_os_str().to_owned();
        path.push(".sum");
        PathBuf::from(path)
    })
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;

    if let Some(max_size) = config.split_size {
        let source = &config.inputs[0];
        let prefix = config.output.clone().unwrap_or_else(|| source.clone());
        let mut catalog =
            split(source, &prefix, max_size).map_err(|error| error.to_string())?;
        for segment in &catalog {
            println!("{}", segment.path().display());
        }
        if config.checksum {
            let manifest = {
                let mut path = prefix.into_os_string();
                path.push(".sum");
                PathBuf::from(path)
            };
            write_manifest(&mut catalog, &manifest).map_err(|error| error.to_string())?;
            println!("{}", manifest.display());
        }
        return Ok(());
    }

    if config.merge {
        let destination = config
            .output
            .clone()
            .ok_or_else(|| "merge requires --output <PATH>".to_owned())?;
        let catalog =
            catalog_from_paths(&config.inputs).map_err(|error| error.to_string())?;
        let written = merge(&catalog, &destination).map_err(|error| error.to_string())?;
        println!("{} ({written} bytes)", destination.display());
        return Ok(());
    }

    // Standalone checksum: verify the inputs against an existing manifest.
    let manifest = manifest_path(&config, &config.inputs[0]);
    let mut catalog =
        catalog_from_paths(&config.inputs).map_err(|error| error.to_string())?;
    let report = verify(&mut catalog, &manifest).map_err(|error| error.to_string())?;

    for status in &report.segments {
        println!("{}: {}", status.name, status.outcome);
    }
    println!("{} of {} segments verified", report.passed(), report.total());

    if report.all_ok() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} segments failed verification",
            report.total() - report.passed(),
            report.total()
        ))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if error.is_empty() => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("splitsum: {error}");
            ExitCode::FAILURE
        }
    }
}
