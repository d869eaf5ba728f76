use std::error::Error;

use chk_assert::DEFAULT_LABEL;
use chk_core::serde::to_canonical_json_bytes;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit JSON metadata instead of the bare version.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    default_label: &'static str,
    sinks: Vec<&'static str>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        default_label: DEFAULT_LABEL,
        sinks: vec!["stderr", "tracing", "silent"],
    };
    println!("{}", String::from_utf8(to_canonical_json_bytes(&info)?)?);
    Ok(())
}
