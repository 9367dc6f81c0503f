//! sha1-kernel Basic Example
//!
//! Minimal usage: `let digest = sha1_kernel::digest(&data)?;`

#![allow(clippy::pedantic, clippy::nursery)]

fn main() -> Result<(), sha1_kernel::Error> {
    let data = b"Hello, World!";
    let digest = sha1_kernel::digest(data)?;

    println!("Backend: {}", sha1_kernel::active_backend());
    println!("Data:    {:?}", String::from_utf8_lossy(data));
    println!("SHA-1:   {}", hex::encode(digest));
    Ok(())
}
