use crate::fetch::CheckService;
use crate::render::{self, TextOptions, markdown};
use crate::types::{Submission, ViolationRecord};
use anyhow::{Context, bail};
use std::io::Write;
use tracing::{error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_VIOLATIONS: i32 = 2;

/// Result of a one-shot check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Violations(usize),
    Failed,
}

impl Outcome {
    pub fn exit_code(self, strict: bool) -> i32 {
        match self {
            Outcome::Clean => EXIT_SUCCESS,
            Outcome::Violations(_) if strict => EXIT_VIOLATIONS,
            Outcome::Violations(_) => EXIT_SUCCESS,
            Outcome::Failed => EXIT_FAILURE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Markdown,
    Json,
}

impl OutputFormat {
    fn from_path(path: &str) -> anyhow::Result<Self> {
        if path.ends_with(".json") {
            Ok(OutputFormat::Json)
        } else if path.ends_with(".md") {
            Ok(OutputFormat::Markdown)
        } else {
            bail!("Output file must end with .md or .json: {}", path)
        }
    }
}

/// Submit `source` once, then print the result to `out` or write it to `output`
pub async fn run_check<S: CheckService, W: Write>(
    service: &S,
    source: String,
    tab_size: u8,
    output: Option<&str>,
    options: TextOptions,
    out: &mut W,
) -> anyhow::Result<Outcome> {
    // Reject a bad output path before anything is sent
    let format = output.map(OutputFormat::from_path).transpose()?;

    let submission = Submission {
        id: 1,
        source,
        tab_size,
    };
    info!("Checking {} bytes of source", submission.source.len());

    let violations = match service.check(&submission).await {
        Ok(violations) => violations,
        Err(e) => {
            error!("Check failed: {}", e);
            writeln!(
                out,
                "{}",
                render::format_failure(e.kind(), &e.to_string(), options.color)
            )?;
            return Ok(Outcome::Failed);
        }
    };
    info!("Found {} violations", violations.len());

    match (output, format) {
        (Some(path), Some(format)) => write_output(path, format, &violations)?,
        _ => writeln!(out, "{}", render::format_text(&violations, options))?,
    }

    if violations.is_empty() {
        Ok(Outcome::Clean)
    } else {
        Ok(Outcome::Violations(violations.len()))
    }
}

fn write_output(
    path: &str,
    format: OutputFormat,
    violations: &[ViolationRecord],
) -> anyhow::Result<()> {
    let content = match format {
        OutputFormat::Json => render::format_json(violations)?,
        OutputFormat::Markdown => markdown::format_markdown(violations),
    };
    std::fs::write(path, content).with_context(|| format!("Failed to write output file {}", path))?;
    info!("Results written to {}", path);
    Ok(())
}
