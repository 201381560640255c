//! Test helpers for building export workspaces and stub sources.

use camino::Utf8PathBuf;
use reachmap_core::ReachPage;
use reachmap_core::test_support::{StubReachSource, sample_reach};
use tempfile::TempDir;

/// Temporary directory with a UTF-8 root for export output.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8PathBuf {
        &self.root
    }

    pub(super) fn output_dir(&self) -> Utf8PathBuf {
        self.root.join("data")
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace").field("root", &self.root).finish()
    }
}

/// Single-page source holding one Rogue reach in Oregon.
pub(super) fn rogue_source() -> StubReachSource {
    StubReachSource::with_pages(vec![ReachPage {
        reaches: vec![sample_reach("20", "Rogue")],
        has_more_pages: false,
    }])
}
