//! A single filesystem object read from a directory.

use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One filesystem object plus its resolved absolute path.
///
/// Built once from the non-following metadata of a directory read and never
/// mutated afterwards. `size` is only meaningful when the entry is not a
/// directory.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
    is_symlink: bool,
    effective_dir: bool,
    size: u64,
    modified: SystemTime,
    mode: u32,
    nlink: u64,
    uid: u32,
    gid: u32,
    link_target: Option<PathBuf>,
}

impl Entry {
    /// Build an entry from a raw directory-read result.
    pub fn from_dir_entry(entry: &DirEntry) -> io::Result<Self> {
        let metadata = entry.metadata()?;
        let name = entry.file_name().to_string_lossy().into_owned();
        Ok(Self::from_metadata(name, entry.path(), &metadata))
    }

    /// Build an entry for an explicit path without following a final symlink.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::symlink_metadata(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_metadata(name, path.to_path_buf(), &metadata))
    }

    /// Build an entry from metadata that has already been fetched.
    pub fn from_metadata(name: String, path: PathBuf, metadata: &Metadata) -> Self {
        let is_dir = metadata.is_dir();
        let mut is_symlink = metadata.file_type().is_symlink();

        // An unreadable link is treated as a plain entry.
        let link_target = if is_symlink {
            match fs::read_link(&path) {
                Ok(target) => Some(target),
                Err(e) => {
                    log::trace!("read_link {}: {}", path.display(), e);
                    is_symlink = false;
                    None
                }
            }
        } else {
            None
        };

        let effective_dir = is_dir
            || (is_symlink && fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false));

        let (mode, nlink, uid, gid) = raw_attributes(metadata);

        Self {
            name,
            path,
            is_dir,
            is_symlink,
            effective_dir,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            mode,
            nlink,
            uid,
            gid,
            link_target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the entry itself is a directory (symlinks are not followed).
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    /// Directory, or symlink whose target is a directory.
    ///
    /// Used for recursion queueing, counting, and directory decoration.
    pub fn is_effective_dir(&self) -> bool {
        self.effective_dir
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Raw mode bits: `st_mode` on Unix, file attribute bits on Windows.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn nlink(&self) -> u64 {
        self.nlink
    }

    pub fn uid(&self) -> u32 {
        self.uid
    }

    pub fn gid(&self) -> u32 {
        self.gid
    }

    pub fn link_target(&self) -> Option<&Path> {
        self.link_target.as_deref()
    }

    /// Extension including the leading dot, taken from the last `.` of the name.
    ///
    /// `.bashrc` has extension `.bashrc`; a name without a dot has none.
    pub fn extension(&self) -> &str {
        self.name.rfind('.').map(|i| &self.name[i..]).unwrap_or("")
    }
}

#[cfg(unix)]
fn raw_attributes(metadata: &Metadata) -> (u32, u64, u32, u32) {
    use std::os::unix::fs::MetadataExt;
    (metadata.mode(), metadata.nlink(), metadata.uid(), metadata.gid())
}

#[cfg(windows)]
fn raw_attributes(metadata: &Metadata) -> (u32, u64, u32, u32) {
    use std::os::windows::fs::MetadataExt;
    (metadata.file_attributes(), 1, 0, 0)
}

#[cfg(not(any(unix, windows)))]
fn raw_attributes(metadata: &Metadata) -> (u32, u64, u32, u32) {
    let mode = if metadata.permissions().readonly() { 0o444 } else { 0o644 };
    (mode, 1, 0, 0)
}
