// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sentinel certificate CLI (`sentinel-cert`).
//!
//! Computes `BLAKE3(prop ‖ trace)` for files, stdin, or inline JSON, and checks a
//! recorded digest against recomputed inputs.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sentinel_cert::{cert_hash, verify_cert_hash, CertHash};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sentinel-cert", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the certificate digest as lowercase hex
    Hash(Inputs),
    /// Recompute the digest and compare it with a recorded value
    Verify {
        #[command(flatten)]
        inputs: Inputs,
        /// Expected digest (64 hex characters)
        #[arg(long)]
        expected: String,
    },
}

#[derive(Args, Debug)]
struct Inputs {
    /// Property JSON file (`-` for stdin)
    #[arg(long, conflicts_with = "prop_json", required_unless_present = "prop_json")]
    prop: Option<PathBuf>,
    /// Property JSON given inline
    #[arg(long)]
    prop_json: Option<String>,
    /// Trace JSON file (`-` for stdin)
    #[arg(long, conflicts_with = "trace_json", required_unless_present = "trace_json")]
    trace: Option<PathBuf>,
    /// Trace JSON given inline
    #[arg(long)]
    trace_json: Option<String>,
}

impl Inputs {
    fn load(self) -> Result<(Vec<u8>, Vec<u8>)> {
        if is_stdin(self.prop.as_ref()) && is_stdin(self.trace.as_ref()) {
            bail!("only one of --prop and --trace may read from stdin");
        }
        let prop = read_input("prop", self.prop, self.prop_json)?;
        let trace = read_input("trace", self.trace, self.trace_json)?;
        debug!(prop_len = prop.len(), trace_len = trace.len(), "loaded inputs");
        Ok((prop, trace))
    }
}

fn is_stdin(path: Option<&PathBuf>) -> bool {
    path.is_some_and(|p| p.as_os_str() == "-")
}

fn read_input(label: &str, path: Option<PathBuf>, inline: Option<String>) -> Result<Vec<u8>> {
    let bytes = match (path, inline) {
        (_, Some(text)) => text.into_bytes(),
        (Some(path), None) if path.as_os_str() == "-" => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .with_context(|| format!("failed to read {label} from stdin"))?;
            buf
        }
        (Some(path), None) => std::fs::read(&path)
            .with_context(|| format!("failed to read {label} from {}", path.display()))?,
        (None, None) => bail!("missing --{label} or --{label}-json"),
    };
    if bytes.contains(&0) {
        // The C ABI stops at the first NUL; a digest over these bytes would not
        // be reproducible through `sentinel_cert_hash`.
        warn!(input = label, "input contains a NUL byte");
    }
    Ok(bytes)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match cli.cmd {
        Command::Hash(inputs) => {
            let (prop, trace) = inputs.load()?;
            let hash = cert_hash(&prop, &trace);
            writeln!(io::stdout().lock(), "{hash}")?;
        }
        Command::Verify { inputs, expected } => {
            let expected: CertHash = expected
                .trim()
                .parse()
                .context("--expected is not a valid digest")?;
            let (prop, trace) = inputs.load()?;
            if !verify_cert_hash(&prop, &trace, &expected) {
                let computed = cert_hash(&prop, &trace);
                bail!("certificate digest mismatch: expected {expected}, computed {computed}");
            }
            writeln!(io::stdout().lock(), "OK {expected}")?;
        }
    }
    Ok(())
}
