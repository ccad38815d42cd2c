//! hpke-unwrap CLI — recover HPKE-wrapped keys
//!
//! Usage:
//!   hpke-unwrap unwrap  --key <FILE> [--format any|pem|der|x963] --enc-request <B64> --wrapped-key <B64>
//!   hpke-unwrap archive --key <FILE> [--format any|pem|der|x963] <ARCHIVE>
//!   hpke-unwrap inspect <ARCHIVE>

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use hpke_unwrap::aea::{ArchiveHeader, FIELD_FCS_RESPONSE};
use hpke_unwrap::{unwrap_archive_key, AuthData, KeyUnwrapper, PrivateKeyFormat};

#[derive(Parser)]
#[command(name = "hpke-unwrap", version, about = "Unwrap HPKE-wrapped keys (P-256 / HKDF-SHA256 / AES-256-GCM)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Unwrap a key from base64 encapsulated key + wrapped key
    Unwrap {
        /// Recipient private key file
        #[arg(short, long, env = "HPKE_UNWRAP_KEY")]
        key: PathBuf,
        /// Private key encoding
        #[arg(short, long, env = "HPKE_UNWRAP_KEY_FORMAT", default_value = "any")]
        format: PrivateKeyFormat,
        /// Base64 HPKE encapsulated key
        #[arg(long)]
        enc_request: String,
        /// Base64 wrapped key (48 bytes decoded)
        #[arg(long)]
        wrapped_key: String,
    },
    /// Unwrap the key carried in an AEA1 archive header
    Archive {
        #[arg(short, long, env = "HPKE_UNWRAP_KEY")]
        key: PathBuf,
        #[arg(short, long, env = "HPKE_UNWRAP_KEY_FORMAT", default_value = "any")]
        format: PrivateKeyFormat,
        /// Encrypted archive
        archive: PathBuf,
    },
    /// Show archive auth-data fields (no decryption)
    Inspect {
        archive: PathBuf,
    },
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Unwrap {
            key,
            format,
            enc_request,
            wrapped_key,
        } => cmd_unwrap(&key, format, &enc_request, &wrapped_key),
        Command::Archive {
            key,
            format,
            archive,
        } => cmd_archive(&key, format, &archive),
        Command::Inspect { archive } => cmd_inspect(&archive),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let log_format = std::env::var("HPKE_UNWRAP_LOG_FORMAT").unwrap_or_else(|_| "pretty".into());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hpke_unwrap=warn".into());
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }
}

fn read_key(path: &Path) -> Result<Zeroizing<Vec<u8>>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path).map_err(|e| format!("read {}: {}", path.display(), e))?;
    Ok(Zeroizing::new(bytes))
}

fn print_key(key: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    let encoded = Zeroizing::new(STANDARD.encode(key));
    let mut out = io::stdout().lock();
    writeln!(out, "{}", encoded.as_str())?;
    Ok(())
}

fn cmd_unwrap(
    key_path: &Path,
    format: PrivateKeyFormat,
    enc_request: &str,
    wrapped_key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw_key = read_key(key_path)?;
    let enc = STANDARD
        .decode(enc_request.trim())
        .map_err(|_| "--enc-request is not valid base64")?;
    let wrapped = STANDARD
        .decode(wrapped_key.trim())
        .map_err(|_| "--wrapped-key is not valid base64")?;

    let key = KeyUnwrapper::new().unwrap(&raw_key, format, &enc, &wrapped)?;
    print_key(&key)
}

fn cmd_archive(
    key_path: &Path,
    format: PrivateKeyFormat,
    archive_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw_key = read_key(key_path)?;
    let archive = fs::read(archive_path).map_err(|e| format!("read {}: {}", archive_path.display(), e))?;

    let key = unwrap_archive_key(&raw_key, format, &archive)?;
    print_key(&key)
}

fn cmd_inspect(archive_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let archive = fs::read(archive_path).map_err(|e| format!("read {}: {}", archive_path.display(), e))?;
    let header = ArchiveHeader::parse(&archive)?;
    let auth = AuthData::parse(&archive)?;

    println!("AEA1 Archive");
    println!("============");
    println!("Profile:         {}", header.profile);
    println!("Auth Data:       {} bytes, {} fields", header.auth_data_len, auth.len());
    for name in auth.keys() {
        println!("  - {}", name);
    }
    println!();
    match auth.key_url() {
        Ok(url) => println!("Key URL:         {}", url),
        Err(_) => println!("Key URL:         (none)"),
    }
    match auth.fcs_response() {
        Ok(resp) => {
            println!("Enc Request:     {} bytes", resp.encapsulated_key.len());
            println!("Wrapped Key:     {} bytes", resp.wrapped_key.len());
        }
        Err(e) => println!("{}: {}", FIELD_FCS_RESPONSE, e),
    }

    Ok(())
}
