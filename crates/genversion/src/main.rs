// genversion: Release tag and version artifact generator.
// Copyright (C) 2024 International Digital Economy Academy
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//
// For inquiries, you can contact us via e-mail at jichuruanjian@idea.edu.cn.

use std::{io::IsTerminal, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use genversion::{DEFAULT_OUTPUT, ReleaseStamp, write_version};

/// Print the release tag of this build and write the version artifact.
#[derive(Debug, clap::Parser)]
#[command(name = "genversion", version)]
struct Cli {
    /// Path of the generated source file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Stamp the release with this Unix timestamp instead of the current time
    #[arg(long, allow_hyphen_values = true)]
    source_date_epoch: Option<i64>,
}

/// Log to stderr so stdout carries nothing but the release lines.
///
/// `RUST_LOG` filters the output (default: warnings only) and switches on
/// targets, timestamps and line numbers.
fn init_tracing() {
    let log_env_set = std::env::var("RUST_LOG").is_ok();
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_line_number(log_env_set)
        .with_level(true)
        .with_writer(std::io::stderr);
    if log_env_set {
        fmt.compact().init();
    } else {
        fmt.with_target(false).without_time().init();
    }
}

fn generate(cli: &Cli) -> anyhow::Result<()> {
    let stamp = match cli.source_date_epoch {
        Some(secs) => ReleaseStamp::from_source_date_epoch(secs)?,
        None => ReleaseStamp::now(),
    };
    tracing::debug!("release instant: {}", stamp.instant());

    println!("Release-Tag: {}", stamp.tag());
    println!("Release-Version: {}", stamp.http_date());

    write_version(&cli.output, &stamp.version())
        .context("failed to generate version artifact")?;
    println!("Successfully generated '{}'", cli.output.display());
    Ok(())
}

pub fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = generate(&cli) {
        let label = if std::io::stdout().is_terminal() {
            "error".red().bold()
        } else {
            "error".normal()
        };
        println!("{label}: {e:#}");
        std::process::exit(1);
    }
}
