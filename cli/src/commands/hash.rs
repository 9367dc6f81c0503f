//! Hash Command
//!
//! File hashing, one backend session per file, files in parallel via Rayon.

use anyhow::{Context, Result};
use clap::ValueEnum;
use rayon::prelude::*;
use sha1_kernel::{Backend, Digest, Hasher};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Read buffer per file: 128 KB.
const BUFFER_SIZE: usize = 128 * 1024;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum BackendChoice {
    /// Compiled-in backend, falling back to portable if the kernel lacks AF_ALG
    Auto,
    /// Kernel crypto API only (fails if unavailable)
    Kernel,
    /// Pure Rust implementation
    Portable,
}

impl BackendChoice {
    fn open(self) -> Result<Hasher> {
        let hasher = match self {
            Self::Auto => {
                let hasher = sha1_kernel::open_or_portable(Backend::compiled())?;
                if hasher.backend() != Backend::compiled() {
                    warn!(
                        "{} backend unavailable, using {}",
                        Backend::compiled(),
                        hasher.backend()
                    );
                }
                hasher
            }
            Self::Kernel => Hasher::with_backend(Backend::Kernel)?,
            Self::Portable => Hasher::with_backend(Backend::Portable)?,
        };
        debug!(backend = %hasher.backend(), "opened hasher");
        Ok(hasher)
    }
}

/// Stream `reader` through a fresh hasher.
pub fn hash_reader(mut reader: impl Read, choice: BackendChoice) -> Result<Digest> {
    let mut hasher = choice.open()?;
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.write_all(&buffer[..n])?;
    }

    let digest = hasher.finalize()?;
    hasher.close();
    Ok(digest)
}

/// Hash one file.
pub fn hash_path(path: &Path, choice: BackendChoice) -> Result<Digest> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open: {}", path.display()))?;
    hash_reader(file, choice).with_context(|| format!("Failed to hash: {}", path.display()))
}

/// Hash standard input.
pub fn hash_stdin(choice: BackendChoice) -> Result<()> {
    let digest = hash_reader(std::io::stdin().lock(), choice)?;
    println!("{}  -", hex::encode(digest));
    Ok(())
}

/// Hash files (Rayon parallelizes automatically when beneficial).
pub fn hash_files(files: &[PathBuf], choice: BackendChoice) -> Result<()> {
    let results = Mutex::new(Vec::with_capacity(files.len()));
    let errors = Mutex::new(Vec::new());

    files
        .par_iter()
        .enumerate()
        .for_each(|(index, file_path)| match hash_path(file_path, choice) {
            Ok(digest) => lock(&results).push((index, hex::encode(digest))),
            Err(e) => lock(&errors).push((index, e)),
        });

    // Print in original order
    let mut results = results.into_inner().unwrap_or_else(|e| e.into_inner());
    results.sort_by_key(|(index, _)| *index);

    for (index, hex_digest) in results {
        println!("{}  {}", hex_digest, files[index].display());
    }

    let mut errors = errors.into_inner().unwrap_or_else(|e| e.into_inner());
    errors.sort_by_key(|(index, _)| *index);
    for (_, error) in &errors {
        eprintln!("Error: {error:#}");
    }

    if !errors.is_empty() {
        anyhow::bail!("Failed to hash {} file(s)", errors.len());
    }

    Ok(())
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}
