//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Added as a dev-dependency in the top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["serde"] }
//! ```
//!
//! Then in tests:
//! ```rust,ignore
//! use test_support::{cmd_bin, init_tracing, tempdir};
//!
//! #[test]
//! fn example() {
//!     init_tracing();
//!     let td = tempdir();
//!     cmd_bin("review-matrix").current_dir(td.path()).arg("--help").assert().success();
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::env;
#[cfg(feature = "serde")]
use std::path::{Path, PathBuf};

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Snapshot settings shared by every snapshot test.
///
/// - Centralizes snapshot files in `tests/snapshots` (relative to the test file under `tests/integration/`)
/// - Omits `expression:` in snapshot headers for cleaner diffs
///
/// Settings are thread-local in insta, so bind them around each assertion:
/// `insta_settings().bind(|| insta::assert_snapshot!(...))`.
pub fn insta_settings() -> insta::Settings {
    let mut settings = insta::Settings::clone_current();
    settings.set_snapshot_path("../snapshots");
    settings.set_omit_expression(true);
    settings
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Set multiple environment variables for the duration of the returned guard.
///
/// Process-wide; pair with `#[serial_test::serial]`.
pub fn with_env(vars: &[(&str, &str)]) -> EnvGuard {
    EnvGuard::set_many(vars)
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// Credentials and fixture selection from the developer's shell are cleared so
/// every test states exactly which backend it uses.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN")
        .env_remove("RVM_TEST_API_FIXTURE")
        .env("RUST_LOG", "review_matrix=info");
    cmd
}

/// Write `value` as pretty JSON to `dir/name` and return the full path.
#[cfg(feature = "serde")]
pub fn write_json<T: serde::Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
    let path = dir.join(name);
    let body = serde_json::to_vec_pretty(value).expect("serialize fixture");
    std::fs::write(&path, body)
        .unwrap_or_else(|e| panic!("failed to write fixture {}: {e}", path.display()));
    path
}

/// Read and parse a JSON file written by the binary under test.
#[cfg(feature = "serde")]
pub fn read_json(path: &Path) -> serde_json::Value {
    let data = std::fs::read(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_slice(&data)
        .unwrap_or_else(|e| panic!("failed to parse JSON {}: {e}", path.display()))
}

/// Guard for temporarily setting environment variables.
pub struct EnvGuard {
    prev: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn set_many(kv: &[(&str, &str)]) -> Self {
        let mut prev = Vec::with_capacity(kv.len());
        for (k, v) in kv {
            let k_owned = k.to_string();
            prev.push((k_owned.clone(), env::var(k).ok()));
            env::set_var(k, v);
        }
        Self { prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, old) in self.prev.drain(..) {
            match old {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }
}
