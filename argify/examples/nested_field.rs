//! Nested records become dotted flags; optional records may be left out.
//!
//! ```text
//! cargo run --example nested_field -- --listen.host 0.0.0.0 --tls.cert cert.pem --tls.key key.pem
//! ```
#![expect(clippy::print_stdout, reason = "examples print their result")]

use std::path::PathBuf;

use argify::{ArgParser, BuildOptions, Schema};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize, Schema)]
struct Listen {
    #[argify(default = "127.0.0.1")]
    host: String,
    #[argify(default = 8443)]
    port: u16,
}

#[derive(Debug, Deserialize, Schema)]
struct Tls {
    cert: PathBuf,
    key: PathBuf,
}

#[derive(Debug, Deserialize, Schema)]
struct Proxy {
    listen: Listen,
    /// Serve HTTPS when both files are given.
    tls: Option<Tls>,
    #[serde(default)]
    upstreams: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let parser = ArgParser::for_schema::<Proxy>("nested-field", &BuildOptions::default())?;
    let proxy: Proxy = parser.parse_from(std::env::args_os()).into_construct()?;
    println!("{proxy:#?}");
    Ok(())
}
