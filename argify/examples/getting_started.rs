//! Derive a parser from a schema and parse the process arguments.
//!
//! ```text
//! cargo run --example getting_started -- --name ada --times 2 --enable-shout
//! ```
#![expect(clippy::print_stdout, reason = "examples print their result")]

use argify::{ArgParser, BuildOptions, Schema};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Greets somebody a number of times.
#[derive(Debug, Deserialize, Schema)]
struct Greeting {
    /// Who to greet.
    name: String,
    /// How many times to repeat the greeting.
    #[argify(default = 1)]
    times: u32,
    /// Greet loudly.
    #[argify(default = false)]
    shout: bool,
    /// Optional sign-off line.
    sign_off: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let parser = ArgParser::for_schema::<Greeting>("getting-started", &BuildOptions::default())?;
    let greeting: Greeting = parser.parse_from(std::env::args_os()).into_construct()?;

    let text = format!("Hello, {}!", greeting.name);
    let line = if greeting.shout {
        text.to_uppercase()
    } else {
        text
    };
    for _ in 0..greeting.times {
        println!("{line}");
    }
    if let Some(sign_off) = greeting.sign_off {
        println!("{sign_off}");
    }
    Ok(())
}
