//! Custom enable/disable prefixes for boolean switches.
//!
//! ```text
//! cargo run --example boolean_prefix -- --on-tracing --off-cache --yes-audit
//! ```
#![expect(clippy::print_stdout, reason = "examples print their result")]

use argify::{ArgParser, BuildOptions, Schema};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize, Schema)]
#[argify(cli_enable_prefix = "--on-", cli_disable_prefix = "--off-")]
struct Toggles {
    /// Emit trace output.
    #[argify(default = false)]
    tracing: bool,
    /// Reuse cached results.
    #[argify(default = true)]
    cache: bool,
    /// Record an audit trail. Must be chosen explicitly.
    #[argify(cli_enable_prefix = "--yes-", cli_disable_prefix = "--no-")]
    audit: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let parser = ArgParser::for_schema::<Toggles>("boolean-prefix", &BuildOptions::default())?;
    let toggles: Toggles = parser.parse_from(std::env::args_os()).into_construct()?;
    println!("{toggles:#?}");
    Ok(())
}
