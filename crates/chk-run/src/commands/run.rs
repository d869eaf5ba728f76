use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chk_assert::{run_cases, CaseFile, Policy, SinkKind};
use chk_core::errors::ChkError;
use clap::{Args, ValueEnum};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML or JSON case file.
    #[arg(long)]
    pub cases: PathBuf,
    /// Policy YAML controlling label, halting and success criterion.
    #[arg(long)]
    pub policy: Option<PathBuf>,
    /// Directory where `assert_report.json` is written.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Overrides the diagnostic sink selected by the policy.
    #[arg(long, value_enum)]
    pub sink: Option<SinkArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SinkArg {
    Stderr,
    Tracing,
    Silent,
}

impl From<SinkArg> for SinkKind {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Stderr => SinkKind::Stderr,
            SinkArg::Tracing => SinkKind::Tracing,
            SinkArg::Silent => SinkKind::Silent,
        }
    }
}

fn load_policy(args: &RunArgs) -> Result<Policy, ChkError> {
    let mut policy = match &args.policy {
        Some(path) => Policy::load(path)?,
        None => Policy::default(),
    };
    if let Some(sink) = args.sink {
        policy.sink = sink.into();
    }
    Ok(policy)
}

/// Runs a case file and reports whether it succeeded under the policy.
pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let policy = load_policy(args)?;
    let file = CaseFile::load(&args.cases)?;
    let source = args.cases.display().to_string();
    tracing::info!(cases = file.cases.len(), %source, "running case file");

    let report = run_cases(&file, &source, &policy, policy.sink.build())?;
    if let Some(out) = &args.out {
        fs::create_dir_all(out).map_err(|err| ChkError::io(out, err))?;
        let path = out.join("assert_report.json");
        fs::write(&path, report.to_bytes()?).map_err(|err| ChkError::io(&path, err))?;
    }

    let summary = report.summary;
    println!(
        "{} checks: {} passed, {} soft failures, {} hard failures",
        summary.total, summary.passed, summary.soft_failures, summary.hard_failures
    );
    if !report.is_success(&policy) {
        return Err(report
            .error
            .unwrap_or_else(|| "assertion run failed".to_string())
            .into());
    }
    Ok(())
}
