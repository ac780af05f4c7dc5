use anyhow::{bail, Context, Result};
use oai_payloads::util::{init_tracing, read_input, PayloadConfig};
use oai_payloads::{ModerationReport, ToolOutput, ToolOutputSubmission};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "usage:
  oai-payloads moderation <file|->
  oai-payloads tool-outputs <call_id=output>...";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = PayloadConfig::from_env();

    let outcome = match args.first().map(String::as_str) {
        Some("moderation") => moderation(&args[1..]),
        Some("tool-outputs") => tool_outputs(&args[1..], &config),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn moderation(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        bail!("moderation: missing input path\n{USAGE}");
    };
    let text = read_input(path).with_context(|| format!("Failed to read {path}"))?;
    let report = ModerationReport::from_json(&text)
        .with_context(|| format!("Failed to decode moderation report from {path}"))?;

    println!("id: {}", report.id);
    println!("model: {}", report.model);
    for (index, result) in report.results.iter().enumerate() {
        let (top, score) = result.top_category();
        let flagged: Vec<&str> = result
            .flagged_categories()
            .into_iter()
            .map(|c| c.as_str())
            .collect();
        println!(
            "result[{index}]: flagged={} categories=[{}] top={top} ({score:.4})",
            result.flagged,
            flagged.join(", ")
        );
    }
    println!("flagged: {}", report.is_flagged());
    Ok(())
}

fn tool_outputs(args: &[String], config: &PayloadConfig) -> Result<()> {
    let mut submission = ToolOutputSubmission::default();
    for arg in args {
        let Some((id, output)) = arg.split_once('=') else {
            bail!("tool-outputs: expected <call_id=output>, got {arg:?}");
        };
        submission.push(ToolOutput::new(id, output));
    }
    if submission.is_empty() {
        tracing::warn!("submitting an empty tool_outputs list");
    }

    let json = if config.pretty {
        submission.to_json_pretty()?
    } else {
        submission.to_json()?
    };
    println!("{json}");
    Ok(())
}
