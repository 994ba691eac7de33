//! Default filesystem locations
//!
//! ```text
//! repo/
//! ├── minutes-digest.toml          # optional config
//! ├── data/
//! │   ├── state.json               # processing pointer (lastProcessedAt, lastCommentId)
//! │   └── changes.json             # latest weekly digest
//! └── content/
//!     └── proposals/
//!         └── 61405.json           # one file per proposal
//! ```

use std::path::PathBuf;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "minutes-digest.toml";

/// Default state file
pub const STATE_FILE: &str = "data/state.json";

/// Default digest file
pub const DIGEST_FILE: &str = "data/changes.json";

/// Default per-proposal content directory
pub const CONTENT_DIR: &str = "content/proposals";

/// Path to the config file in the working directory
#[must_use]
pub fn config_file() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}
