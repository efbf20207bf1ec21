//! CLI entry point for posture.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `posture-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use posture_app::{
    EvaluateInput, ExplainOutput, format_list, parse_report_json, render_annotations,
    render_markdown, run_evaluate, run_explain, run_list, runtime_error_report, serialize_report,
    to_renderable, verdict_exit_code,
};
use posture_settings::Overrides;
use posture_types::PostureReport;
use std::io::Read;

#[derive(Parser, Debug)]
#[command(
    name = "posture",
    version,
    about = "Security posture decisions for cloud and source-control resources"
)]
struct Cli {
    /// Path to posture config TOML (a missing file is allowed).
    #[arg(long, default_value = "posture.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|standard|audit).
    #[arg(long)]
    profile: Option<String>,

    /// Override the lowest deny severity that fails the run (never|info|low|medium|high|critical).
    #[arg(long)]
    fail_on: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate requests and write artifacts.
    Evaluate {
        /// Requests as a JSON array or JSON Lines; `-` reads stdin.
        #[arg(long)]
        input: String,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/posture/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/posture/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/posture/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/posture/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check kind with remediation guidance.
    Explain {
        /// The check kind (e.g., "aws_s3_bucket_encryption_enabled").
        kind: String,
    },

    /// List the built-in checks.
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Evaluate {
            ref input,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => cmd_evaluate(&cli, input, report_out, write_markdown, markdown_out),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { kind } => cmd_explain(&kind),
        Commands::List => {
            print!("{}", format_list(&run_list()));
            Ok(())
        }
    }
}

fn cmd_evaluate(
    cli: &Cli,
    input: &str,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        // Missing config file is allowed (defaults apply).
        let cfg_text = if cli.config.exists() {
            std::fs::read_to_string(&cli.config)
                .with_context(|| format!("read config: {}", cli.config))?
        } else {
            String::new()
        };

        let requests_text = read_input(input)?;

        let output = run_evaluate(EvaluateInput {
            requests_text: &requests_text,
            config_text: &cfg_text,
            overrides: Overrides {
                profile: cli.profile.clone(),
                fail_on: cli.fail_on.clone(),
            },
        })?;
        let report = output.report;

        write_report_file(report_out, &report).context("write report json")?;

        if write_markdown {
            let md = render_markdown(&to_renderable(&report));
            write_text_file(markdown_out, &md).context("write markdown")?;
        }

        for err in &report.errors {
            eprintln!("posture: {}: {}", err.kind, err.message);
        }
        eprintln!(
            "posture: verdict {}: {} allowed, {} denied, {} skipped, {} errors",
            report.verdict.as_str(),
            report.summary.allowed,
            report.summary.denied,
            report.summary.skipped,
            report.summary.errors
        );

        Ok(verdict_exit_code(report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("posture error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read requests from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("read requests: {input}"))
}

fn write_report_file(path: &Utf8Path, report: &PostureReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(report_path: &Utf8Path) -> anyhow::Result<PostureReport> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    parse_report_json(&report_text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let annotations = render_annotations(&to_renderable(&report), max);

    for annotation in annotations {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(kind: &str) -> anyhow::Result<()> {
    match run_explain(kind) {
        ExplainOutput::Found(exp) => {
            print!("{}", posture_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            kind,
            available_kinds,
        } => {
            eprint!("{}", posture_app::format_not_found(&kind, available_kinds));
            std::process::exit(1);
        }
    }
}
