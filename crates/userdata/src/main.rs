//! `userdata` - build cloud-init multipart user data from local files.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod assemble;
mod cli;
mod manifest;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userdata_mime::MediaType;

use cli::{Cli, Commands};
use manifest::Manifest;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries the document, so log to stderr
    let default_filter = match cli.verbose {
        0 => "userdata=info,userdata_mime=info",
        1 => "userdata=debug,userdata_mime=debug",
        _ => "userdata=trace,userdata_mime=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Some(Commands::ListTypes) => list_types(),
        None => build(&cli),
    }
}

fn list_types() -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    for media_type in MediaType::ALL {
        writeln!(out, "{media_type}")?;
    }
    Ok(())
}

fn build(cli: &Cli) -> anyhow::Result<()> {
    let mut specs = Vec::new();
    let mut boundary = None;

    if let Some(path) = &cli.manifest {
        let manifest = Manifest::load(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        specs.extend(manifest.part_specs(base)?);
        boundary = manifest.boundary;
    }
    specs.extend(cli.parts.iter().cloned());
    if let Some(b) = &cli.boundary {
        boundary = Some(b.clone());
    }

    if specs.is_empty() {
        anyhow::bail!("no parts given; pass TYPE=PATH arguments or --manifest");
    }

    let doc = assemble::assemble(boundary.as_deref(), &specs)?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            doc.render(&mut writer)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writer
                .flush()
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), parts = doc.len(), "User data written");
        }
        None => {
            let mut out = std::io::stdout().lock();
            doc.render(&mut out).context("failed to write to stdout")?;
            out.flush().context("failed to write to stdout")?;
        }
    }

    Ok(())
}
