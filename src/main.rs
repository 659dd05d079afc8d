//zcode-basics/src/main.rs
//! 试运行：把预设应用到内存宿主，输出报告与宿主快照（JSON）

use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use zcode_basics::kernel::services::adapters::{load_overrides, load_overrides_from, HostSnapshot};
use zcode_basics::kernel::{ApplyReport, Basics, HostVersion, MemoryHost};

mod logging;

const USAGE: &str = "usage: zcode-basics [--config <path>] [--host-version <x.y.z>] [--verbose]";

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    host_version: HostVersion,
    verbose: bool,
}

#[derive(Serialize)]
struct DryRun<'a> {
    report: &'a ApplyReport,
    host: HostSnapshot,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().ok_or("--config needs a path")?;
                out.config = Some(PathBuf::from(path));
            }
            "--host-version" => {
                let value = args.next().ok_or("--host-version needs a value")?;
                out.host_version = HostVersion::parse(&value)
                    .ok_or_else(|| format!("invalid host version: {}", value))?;
            }
            "--verbose" | "-v" => out.verbose = true,
            "--help" | "-h" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument: {}\n{}", other, USAGE)),
        }
    }
    Ok(out)
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };

    let logging_guard = logging::init(args.verbose);
    if let (true, Some(guard)) = (args.verbose, &logging_guard) {
        eprintln!("logs: {}", guard.log_dir().display());
    }

    let overrides = match &args.config {
        Some(path) => load_overrides_from(path),
        None => load_overrides(),
    };
    let overrides = match overrides {
        Ok(overrides) => overrides,
        Err(e) => {
            tracing::error!(error = %e, "load settings failed");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut host = MemoryHost::new(args.host_version);
    let basics = match Basics::setup(&mut host, overrides.as_ref()) {
        Ok(basics) => basics,
        Err(e) => {
            tracing::error!(error = %e, "setup failed");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let output = DryRun {
        report: basics.report(),
        host: host.snapshot(),
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
