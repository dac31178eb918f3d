//! `srz`: validate, inspect, resolve, collapse, and expand fixtures
//! against `srz-kernel` without writing a host harness.

use std::env;
use std::fs;
use std::process::ExitCode;

use srz_cli::commands;
use srz_cli::error::CliError;
use srz_cli::fixture::Fixture;

fn usage() {
    eprintln!("srz commands:");
    eprintln!("  validate --fixture <path>");
    eprintln!("  inspect --fixture <path> --{{zone|assignment|policy|log|region}} <name> [--budget N]");
    eprintln!("  resolve --fixture <path> --region <name> [--tick N] [--delta N] [--budget N] [--inactive N]");
    eprintln!("  collapse --fixture <path> --region <name>");
    eprintln!("  expand --fixture <path> --region <name>");
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1)).map(String::as_str)
}

fn find_arg_u64(args: &[String], flag: &str, fallback: u64) -> u64 {
    find_arg(args, flag).and_then(|v| v.parse().ok()).unwrap_or(fallback)
}

fn find_arg_u32(args: &[String], flag: &str, fallback: u32) -> u32 {
    find_arg(args, flag).and_then(|v| v.parse().ok()).unwrap_or(fallback)
}

fn load_fixture(args: &[String]) -> Result<Fixture, CliError> {
    let path = find_arg(args, "--fixture").ok_or(CliError::UsageError)?;
    let text = fs::read_to_string(path).map_err(|_| CliError::FixtureLoadFailed { path: path.to_string() })?;
    Fixture::parse(&text).ok_or_else(|| CliError::FixtureLoadFailed { path: path.to_string() })
}

fn run(args: &[String]) -> Result<i32, CliError> {
    let Some(command) = args.first() else {
        return Err(CliError::UsageError);
    };
    let rest = &args[1..];

    if command == "validate" {
        let fixture = load_fixture(rest)?;
        return Ok(commands::run_validate(&fixture));
    }

    if command == "inspect" {
        let fixture = load_fixture(rest)?;
        let budget = find_arg_u32(rest, "--budget", fixture.policy_override.map_or(0, |p| p.cost_full));
        if let Some(name) = find_arg(rest, "--zone") {
            return Ok(commands::run_inspect_zone(&fixture, name, budget));
        }
        if let Some(name) = find_arg(rest, "--assignment") {
            return Ok(commands::run_inspect_assignment(&fixture, name, budget));
        }
        if let Some(name) = find_arg(rest, "--policy") {
            return Ok(commands::run_inspect_policy(&fixture, name, budget));
        }
        if let Some(name) = find_arg(rest, "--log") {
            return Ok(commands::run_inspect_log(&fixture, name, budget));
        }
        if let Some(name) = find_arg(rest, "--region") {
            return Ok(commands::run_inspect_region(&fixture, name, budget));
        }
        return Err(CliError::MissingArg {
            detail: "inspect requires one of --zone/--assignment/--policy/--log/--region".to_string(),
        });
    }

    if command == "resolve" {
        let fixture = load_fixture(rest)?;
        let region = find_arg(rest, "--region").ok_or_else(|| CliError::MissingArg {
            detail: "resolve requires --region".to_string(),
        })?;
        let tick = find_arg_u64(rest, "--tick", 0);
        let tick_delta = find_arg_u64(rest, "--delta", 1);
        let budget = find_arg_u32(rest, "--budget", fixture.policy_override.map_or(0, |p| p.cost_full));
        let inactive = find_arg_u32(rest, "--inactive", 0);
        return Ok(commands::run_resolve(&fixture, region, tick, tick_delta, budget, inactive));
    }

    if command == "collapse" {
        let fixture = load_fixture(rest)?;
        let region = find_arg(rest, "--region").ok_or_else(|| CliError::MissingArg {
            detail: "collapse requires --region".to_string(),
        })?;
        return Ok(commands::run_collapse(&fixture, region));
    }

    if command == "expand" {
        let fixture = load_fixture(rest)?;
        let region = find_arg(rest, "--region").ok_or_else(|| CliError::MissingArg {
            detail: "expand requires --region".to_string(),
        })?;
        return Ok(commands::run_expand(&fixture, region));
    }

    Err(CliError::UsageError)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(status) => {
            if status == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(status as u8)
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            usage();
            ExitCode::from(2)
        }
    }
}
