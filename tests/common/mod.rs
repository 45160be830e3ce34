//! Stand-in ffmpeg executables for driving the pipeline without real media.
//!
//! All scripts are written once, before any test spawns a process, so no
//! child can inherit a script that is still open for writing.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

pub struct FakeTools {
    dir: TempDir,
}

impl FakeTools {
    /// Writes a small file to its last argument and exits 0
    pub fn ok(&self) -> PathBuf {
        self.dir.path().join("ffmpeg-ok")
    }

    /// Fails every call with a message on stderr
    pub fn fail(&self) -> PathBuf {
        self.dir.path().join("ffmpeg-fail")
    }

    /// Fails when normalizing a source named `tail.mp4`
    pub fn fail_on_tail(&self) -> PathBuf {
        self.dir.path().join("ffmpeg-fail-tail")
    }

    /// Normalizes fine, writes a partial file and fails during concat
    pub fn fail_concat(&self) -> PathBuf {
        self.dir.path().join("ffmpeg-fail-concat")
    }

    /// Like `ok`, but appends every argument list to `calls.log` and keeps a
    /// copy of the concat manifest as `manifest.log`
    pub fn recording(&self) -> PathBuf {
        self.dir.path().join("ffmpeg-recording")
    }

    pub fn calls_log(&self) -> PathBuf {
        self.dir.path().join("calls.log")
    }

    pub fn manifest_log(&self) -> PathBuf {
        self.dir.path().join("manifest.log")
    }
}

const WRITE_LAST: &str = "for last; do :; done\nprintf 'fake media\\n' > \"$last\"\n";

fn write_script(path: &Path, body: &str) {
    std::fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

pub fn fake_tools() -> &'static FakeTools {
    static TOOLS: OnceLock<FakeTools> = OnceLock::new();
    TOOLS.get_or_init(|| {
        let tools = FakeTools {
            dir: tempfile::tempdir().unwrap(),
        };

        write_script(&tools.ok(), &format!("{}exit 0\n", WRITE_LAST));
        write_script(
            &tools.fail(),
            "echo 'boom: Invalid data found when processing input' >&2\nexit 1\n",
        );
        write_script(
            &tools.fail_on_tail(),
            &format!(
                "case \"$*\" in\n  *tail.mp4*) echo 'tail: moov atom not found' >&2; exit 1 ;;\nesac\n{}exit 0\n",
                WRITE_LAST
            ),
        );
        write_script(
            &tools.fail_concat(),
            "for last; do :; done\n\
             case \" $* \" in\n  \
             *\" -f concat \"*) printf 'partial' > \"$last\"; echo 'concat: Non-monotonous DTS' >&2; exit 1 ;;\n\
             esac\n\
             printf 'fake media\\n' > \"$last\"\nexit 0\n",
        );
        write_script(
            &tools.recording(),
            &format!(
                "echo \"$*\" >> '{log}'\n\
                 if [ \"$1\" = \"-f\" ]; then cp \"$6\" '{manifest}'; fi\n\
                 {write}exit 0\n",
                log = tools.calls_log().display(),
                manifest = tools.manifest_log().display(),
                write = WRITE_LAST
            ),
        );
        tools
    })
}

/// Input and tail sources inside a fresh directory
pub struct Workspace {
    pub dir: TempDir,
    pub input: PathBuf,
    pub tail: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.mp4");
        let tail = dir.path().join("tail.mp4");
        std::fs::write(&input, b"input").unwrap();
        std::fs::write(&tail, b"tail").unwrap();
        let output = dir.path().join("joined.mp4");
        Self {
            dir,
            input,
            tail,
            output,
        }
    }

    /// File names in the workspace, sorted
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
