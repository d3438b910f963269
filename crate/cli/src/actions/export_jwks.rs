use std::{
    fmt, fs,
    io::Write,
    path::{Path, PathBuf},
};

use clap::Parser;
use seatrace_jwks::{DEFAULT_EXPORT_KID, export_public_jwks};
use seatrace_logger::{debug, info};
use tempfile::NamedTempFile;

use crate::{
    cli_ensure,
    error::{
        CliError,
        result::{CliResult, CliResultHelper},
    },
};

/// Export the public JWKS of a RSA or EC private key.
///
/// Only the public components are written; the output is refused if any
/// private member (`d`, `p`, `q`, `dp`, `dq`, `qi`) shows up in the JWK.
///
/// Example:
///   export-jwks ./keys/private.pem ./staging/.well-known/jwks.json kid-001
#[derive(Parser, Debug)]
#[command(name = "export-jwks", version, about, verbatim_doc_comment)]
pub struct ExportJwksAction {
    /// Path to the private key file (PEM format)
    #[clap(value_name = "PRIVATE_KEY_PEM")]
    pub private_key_file: PathBuf,

    /// Output path of the JWKS file
    #[clap(value_name = "OUT_JSON")]
    pub output_file: PathBuf,

    /// Key ID
    #[clap(default_value = DEFAULT_EXPORT_KID, value_name = "KID")]
    pub key_id: String,
}

/// What was written, reported once the export succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_file: PathBuf,
    pub kid: String,
    pub alg: String,
    pub kty: String,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SUCCESS!")?;
        writeln!(f, "   JWKS written to: {}", self.output_file.display())?;
        writeln!(f, "   Key ID (kid): {}", self.kid)?;
        writeln!(f, "   Algorithm: {}", self.alg)?;
        writeln!(f, "   Key type: {}", self.kty)?;
        writeln!(f)?;
        writeln!(f, "Next steps:")?;
        writeln!(
            f,
            "  1. Serve this file at: https://your-domain/.well-known/jwks.json"
        )?;
        writeln!(f, "  2. Keep private key secure (never commit to git!)")?;
        write!(f, "  3. Point the token verifiers at this JWKS endpoint")
    }
}

impl ExportJwksAction {
    /// Run the export.
    ///
    /// # Errors
    ///
    /// * `CliError::InputNotFound` if the private key file does not exist
    /// * `CliError::UnsupportedKeyType` for anything but a RSA or EC private key
    /// * `CliError::SecurityCheck` if a private component leaked into the JWK
    /// * any other error if the key cannot be read or the file cannot be written
    pub fn run(&self) -> CliResult<ExportSummary> {
        cli_ensure!(
            self.private_key_file.exists(),
            CliError::InputNotFound(self.private_key_file.clone())
        );

        info!("Loading private key from: {}", self.private_key_file.display());
        let pem_bytes = fs::read(&self.private_key_file)
            .with_context(|| format!("cannot read {}", self.private_key_file.display()))?;

        let exported = export_public_jwks(&pem_bytes, &self.key_id)?;
        info!("Key type detected: {} ({})", exported.kty, exported.alg);
        info!("Security check passed: no private key components in output");

        let json = exported.document.to_pretty_json()?;
        write_atomically(&self.output_file, json.as_bytes())?;

        Ok(ExportSummary {
            output_file: self.output_file.clone(),
            kid: exported.kid,
            alg: exported.alg,
            kty: exported.kty,
        })
    }
}

/// Write `content` to `path` through a temporary file of the same directory,
/// creating the directory when needed.
fn write_atomically(path: &Path, content: &[u8]) -> CliResult<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !directory.exists() {
        info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    debug!("JWKS persisted to {}", path.display());
    Ok(())
}
