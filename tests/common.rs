//! Test utilities & fixtures.
//! Provides access to static world descriptions under `tests/fixtures`.

use std::path::{Path, PathBuf};

/// Return the path to the static fixture directory.
/// Kept small & deterministic. Tests should copy to a temp dir if they mutate.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}
