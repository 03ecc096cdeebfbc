//! Unix `ls -l`-style long listing

use chrono::{DateTime, Local};

use crate::entry::Entry;

use super::utils::{display_name, link_suffix};
use super::{FormatContext, ListingFormat};

const S_IFMT: u32 = 0o170_000;
const S_IFDIR: u32 = 0o040_000;
const S_IFLNK: u32 = 0o120_000;
const S_IFCHR: u32 = 0o020_000;
const S_IFBLK: u32 = 0o060_000;
const S_IFIFO: u32 = 0o010_000;
const S_IFSOCK: u32 = 0o140_000;

pub struct UnixLongFormat {
    pub numeric_mode: bool,
}

/// `drwxr-xr-x` style permission string, including setuid/setgid/sticky.
pub fn symbolic_mode(mode: u32) -> String {
    let kind = match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFLNK => 'l',
        S_IFCHR => 'c',
        S_IFBLK => 'b',
        S_IFIFO => 'p',
        S_IFSOCK => 's',
        _ => '-',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for (shift, special, lower, upper) in [
        (6, 0o4000, 's', 'S'),
        (3, 0o2000, 's', 'S'),
        (0, 0o1000, 't', 'T'),
    ] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        let exec = bits & 0o1 != 0;
        out.push(match (mode & special != 0, exec) {
            (true, true) => lower,
            (true, false) => upper,
            (false, true) => 'x',
            (false, false) => '-',
        });
    }
    out
}

/// `0755` style permission string.
pub fn numeric_mode(mode: u32) -> String {
    format!("{:04o}", mode & 0o7777)
}

#[cfg(unix)]
fn owner_name(uid: u32) -> String {
    uzers::get_user_by_uid(uid)
        .map(|u| u.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| uid.to_string())
}

#[cfg(unix)]
fn group_name(gid: u32) -> String {
    uzers::get_group_by_gid(gid)
        .map(|g| g.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| gid.to_string())
}

#[cfg(not(unix))]
fn owner_name(uid: u32) -> String {
    uid.to_string()
}

#[cfg(not(unix))]
fn group_name(gid: u32) -> String {
    gid.to_string()
}

impl ListingFormat for UnixLongFormat {
    fn format(&self, entries: &[Entry], ctx: &FormatContext<'_>) -> Vec<String> {
        let rows: Vec<[String; 5]> = entries
            .iter()
            .map(|entry| {
                let mode = if self.numeric_mode {
                    numeric_mode(entry.mode())
                } else {
                    symbolic_mode(entry.mode())
                };
                [
                    mode,
                    entry.nlink().to_string(),
                    owner_name(entry.uid()),
                    group_name(entry.gid()),
                    entry.size().to_string(),
                ]
            })
            .collect();

        let mut widths = [0usize; 5];
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        entries
            .iter()
            .zip(rows)
            .map(|(entry, [mode, nlink, owner, group, size])| {
                let time: DateTime<Local> = entry.modified().into();
                format!(
                    "{} {:>w1$} {:<w2$} {:<w3$} {:>w4$} {} {}{}",
                    mode,
                    nlink,
                    owner,
                    group,
                    size,
                    time.format("%Y-%m-%d %H:%M"),
                    display_name(entry, ctx.config.path_display, ctx.cwd),
                    link_suffix(entry),
                    w1 = widths[1],
                    w2 = widths[2],
                    w3 = widths[3],
                    w4 = widths[4],
                )
            })
            .collect()
    }
}
