#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

pub const HOME_VALUES_HEADER: &str =
    "RegionID,SizeRank,RegionName,RegionType,StateName,2010-01-31,2010-02-28,2010-03-31";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes a small home-value table with three complete regions, one
    /// region with a zero value and one with a gap.
    pub fn write_home_values(&self, name: &str) -> PathBuf {
        let rows = [
            HOME_VALUES_HEADER,
            "101,1,Austin,city,TX,1000,1200,1500",
            "102,2,Boise,city,ID,2000,1900,1800",
            "103,3,Cleveland,city,OH,500,520,500",
            "104,4,Denver,city,CO,0,10,900000",
            "105,5,Eugene,city,OR,300,,330",
        ];
        self.write(name, &format!("{}\n", rows.join("\n")))
    }
}
