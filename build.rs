//! Build script for tidalplayer.
//!
//! Copies the `.env.example` configuration template into the local data
//! directory, next to where the application looks for its `.env` file:
//! - Linux: `~/.local/share/tidalplayer/.env.example`
//! - macOS: `~/Library/Application Support/tidalplayer/.env.example`
//! - Windows: `%LOCALAPPDATA%/tidalplayer/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("tidalplayer");

    if env_example_path.is_file() {
        fs::create_dir_all(&out_dir)?;
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
