//! A registry of sub-commands, each with its own schema.
//!
//! ```text
//! cargo run --example sub_commands -- push --remote origin --enable-force
//! cargo run --example sub_commands -- status
//! ```
#![expect(clippy::print_stdout, reason = "examples print their result")]

use argify::{BuildOptions, CommandRegistry, Schema};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize, Schema)]
struct Push {
    /// Remote to push to.
    #[argify(default = "origin")]
    remote: String,
    #[argify(default = false)]
    force: bool,
}

#[derive(Debug, Deserialize, Schema)]
struct Tag {
    name: String,
    #[argify(alias = "msg")]
    #[serde(alias = "msg")]
    message: Option<String>,
}

fn push(args: Push) -> std::io::Result<()> {
    println!("pushing to {} (force: {})", args.remote, args.force);
    Ok(())
}

fn tag(args: Tag) -> std::io::Result<()> {
    match args.message {
        Some(message) => println!("tagging {}: {message}", args.name),
        None => println!("tagging {}", args.name),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut registry = CommandRegistry::new("sub-commands");
    registry
        .sub_command::<Push, _, _>("push", push)?
        .sub_command::<Tag, _, _>("tag", tag)?
        .sub_command_bare("status", || {
            println!("nothing to report");
            Ok::<(), std::io::Error>(())
        })?;
    registry.run(&BuildOptions::default())?;
    Ok(())
}
