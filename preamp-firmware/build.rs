//! Build script for preamp-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates preamp.toml and compiles it into `config.rs`
//! - Captures the firmware identity (version, git hash) into `version.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    setup_linker(&out_dir);
    generate_config(&out_dir);
    generate_version(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated board configuration
struct BoardConfig {
    address: u8,
    poll_budget: u32,
    refresh_ms: u64,
}

/// Validate preamp.toml and write it out as Rust constants
fn generate_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=preamp.toml");

    let config_path = Path::new("preamp.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: preamp.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a preamp.toml configuration file in the   ║\n\
            ║  preamp-firmware directory.                                      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&[format!("Failed to read preamp.toml: {}", e).as_str()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail(&lines)
        }
    };

    let board = validate(&config);

    let generated = format!(
        "/// 7-bit slave address on the controller bus\n\
         pub const SLAVE_ADDRESS_7BIT: u8 = 0x{:02x};\n\
         /// Spins allowed per bus wait (0 = wait forever)\n\
         pub const POLL_BUDGET: u32 = {};\n\
         /// Sensor refresh interval\n\
         pub const SENSOR_REFRESH_MS: u64 = {};\n",
        board.address, board.poll_budget, board.refresh_ms
    );
    fs::write(out_dir.join("config.rs"), generated).unwrap();

    println!("cargo:warning=preamp.toml validated successfully");
}

fn validate(config: &toml::Value) -> BoardConfig {
    let mut errors: Vec<String> = Vec::new();

    let address = match config.get("i2c").and_then(|t| t.get("address")) {
        Some(toml::Value::Integer(a)) if (0x08..=0x77).contains(a) => *a as u8,
        Some(toml::Value::Integer(a)) => {
            errors.push(format!(
                "i2c.address 0x{:x} is reserved or not a 7-bit address (0x08..=0x77)",
                a
            ));
            0
        }
        Some(_) => {
            errors.push("i2c.address must be an integer".to_string());
            0
        }
        None => {
            errors.push("Missing [i2c] address".to_string());
            0
        }
    };

    let poll_budget = match config.get("i2c").and_then(|t| t.get("poll_budget")) {
        Some(toml::Value::Integer(b)) if (0..=u32::MAX as i64).contains(b) => *b as u32,
        Some(_) => {
            errors.push("i2c.poll_budget must be an integer in 0..=4294967295".to_string());
            0
        }
        None => 0,
    };

    let refresh_ms = match config.get("sensors").and_then(|t| t.get("refresh_ms")) {
        Some(toml::Value::Integer(ms)) if (10..=10_000).contains(ms) => *ms as u64,
        Some(_) => {
            errors.push("sensors.refresh_ms must be between 10 and 10000".to_string());
            100
        }
        None => 100,
    };

    if !errors.is_empty() {
        let lines: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail(&lines);
    }

    if poll_budget != 0 {
        println!(
            "cargo:warning=i2c.poll_budget = {}: bus waits are bounded, stalled transactions are dropped",
            poll_budget
        );
    }

    BoardConfig {
        address,
        poll_budget,
        refresh_ms,
    }
}

/// Abort the build with a boxed list of problems
fn fail(lines: &[&str]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid preamp.toml                                      ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        body
    );
}

/// Capture package version and git state as `FirmwareVersion` inputs
///
/// Builds outside a git checkout report hash 0, clean.
fn generate_version(out_dir: &Path) {
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");

    let major: u8 = env::var("CARGO_PKG_VERSION_MAJOR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let minor: u8 = env::var("CARGO_PKG_VERSION_MINOR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let git_hash = git(&["rev-parse", "--short=7", "HEAD"])
        .and_then(|h| u32::from_str_radix(h.trim(), 16).ok())
        .unwrap_or(0);
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false);

    let generated = format!(
        "pub const VERSION_MAJOR: u8 = {};\n\
         pub const VERSION_MINOR: u8 = {};\n\
         pub const GIT_HASH: u32 = 0x{:07x};\n\
         pub const GIT_DIRTY: bool = {};\n",
        major, minor, git_hash, dirty
    );
    fs::write(out_dir.join("version.rs"), generated).unwrap();
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}
