//! Operating-system attribute queries consumed by the listing engine.

use std::io;
use std::path::Path;

use crate::entry::Entry;

/// Environment variable overriding filename case sensitivity.
pub const CASE_SENSITIVE_ENV: &str = "DIRX_CASE_SENSITIVE";

/// Volume label and serial number of the volume holding a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeInfo {
    pub name: String,
    pub serial: u32,
}

/// Attribute queries the walker needs but does not implement itself.
///
/// Query failures are returned as errors; the filter pipeline turns them
/// into a warning and skips the entry.
pub trait AttributeProvider {
    fn is_hidden(&self, entry: &Entry) -> io::Result<bool>;

    fn is_system(&self, entry: &Entry) -> io::Result<bool>;

    fn is_read_only(&self, entry: &Entry) -> io::Result<bool>;

    fn volume_info(&self, _path: &Path) -> Option<VolumeInfo> {
        None
    }

    /// Bytes available to an unprivileged user on the volume holding `path`.
    fn free_space(&self, path: &Path) -> io::Result<u64> {
        fs4::available_space(path)
    }
}

/// Attribute queries backed by the host operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformAttributes;

#[cfg(unix)]
impl AttributeProvider for PlatformAttributes {
    fn is_hidden(&self, entry: &Entry) -> io::Result<bool> {
        Ok(entry.name().starts_with('.'))
    }

    fn is_system(&self, _entry: &Entry) -> io::Result<bool> {
        Ok(false)
    }

    fn is_read_only(&self, entry: &Entry) -> io::Result<bool> {
        Ok(entry.mode() & 0o222 == 0)
    }
}

#[cfg(windows)]
impl AttributeProvider for PlatformAttributes {
    fn is_hidden(&self, entry: &Entry) -> io::Result<bool> {
        const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
        windows_attributes(entry).map(|a| a & FILE_ATTRIBUTE_HIDDEN != 0)
    }

    fn is_system(&self, entry: &Entry) -> io::Result<bool> {
        const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;
        windows_attributes(entry).map(|a| a & FILE_ATTRIBUTE_SYSTEM != 0)
    }

    fn is_read_only(&self, entry: &Entry) -> io::Result<bool> {
        const FILE_ATTRIBUTE_READONLY: u32 = 0x1;
        windows_attributes(entry).map(|a| a & FILE_ATTRIBUTE_READONLY != 0)
    }
}

#[cfg(windows)]
fn windows_attributes(entry: &Entry) -> io::Result<u32> {
    use std::os::windows::fs::MetadataExt;
    std::fs::symlink_metadata(entry.path()).map(|m| m.file_attributes())
}

#[cfg(not(any(unix, windows)))]
impl AttributeProvider for PlatformAttributes {
    fn is_hidden(&self, entry: &Entry) -> io::Result<bool> {
        Ok(entry.name().starts_with('.'))
    }

    fn is_system(&self, _entry: &Entry) -> io::Result<bool> {
        Ok(false)
    }

    fn is_read_only(&self, entry: &Entry) -> io::Result<bool> {
        Ok(entry.mode() & 0o222 == 0)
    }
}

/// Whether filenames should be matched case-sensitively.
///
/// `DIRX_CASE_SENSITIVE` wins when it holds a recognizable boolean;
/// otherwise Linux and other Unixes are case-sensitive, Windows and macOS
/// are not.
pub fn filename_case_sensitive() -> bool {
    std::env::var(CASE_SENSITIVE_ENV)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(cfg!(not(any(windows, target_os = "macos"))))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
