//! Static content shown by the applications: the about document, the
//! project cards and the virtual file system.

use crate::apps::AppId;

include!(concat!(env!("OUT_DIR"), "/generated_about.rs"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

pub const PROJECTS: [Project; 4] = [
    Project {
        title: "Retro Game",
        description: "A 8-bit platformer built with Phaser.",
        link: "https://github.com",
    },
    Project {
        title: "Weather App",
        description: "Real-time weather data visualization.",
        link: "https://github.com",
    },
    Project {
        title: "E-Commerce",
        description: "Full stack shop with cart functionality.",
        link: "https://github.com",
    },
    Project {
        title: "Portfolio v1",
        description: "My previous portfolio site.",
        link: "https://github.com",
    },
];

pub const ROOT_FOLDER: &str = "This PC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Drive,
    Folder,
    /// A document opened by `app`, with an optional init argument.
    File { app: AppId, arg: Option<&'static str> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsEntry {
    pub name: &'static str,
    pub kind: EntryKind,
}

impl FsEntry {
    pub fn is_container(&self) -> bool {
        matches!(self.kind, EntryKind::Drive | EntryKind::Folder)
    }

    pub fn glyph(&self) -> &'static str {
        match self.kind {
            EntryKind::Drive => "▣",
            EntryKind::Folder => "▰",
            EntryKind::File { .. } => "▯",
        }
    }
}

const THIS_PC: &[FsEntry] = &[FsEntry {
    name: "Local Disk (C:)",
    kind: EntryKind::Drive,
}];

const LOCAL_DISK: &[FsEntry] = &[
    FsEntry {
        name: "About Me",
        kind: EntryKind::Folder,
    },
    FsEntry {
        name: "Projects",
        kind: EntryKind::Folder,
    },
];

const ABOUT_FOLDER: &[FsEntry] = &[FsEntry {
    name: "aboutme.txt",
    kind: EntryKind::File {
        app: AppId::Notepad,
        arg: None,
    },
}];

const PROJECTS_FOLDER: &[FsEntry] = &[FsEntry {
    name: "projects.html",
    kind: EntryKind::File {
        app: AppId::Chrome,
        arg: Some("projects"),
    },
}];

/// Entries of `folder`. Unknown folders are empty.
pub fn list_folder(folder: &str) -> &'static [FsEntry] {
    match folder {
        "This PC" => THIS_PC,
        "Local Disk (C:)" => LOCAL_DISK,
        "About Me" => ABOUT_FOLDER,
        "Projects" => PROJECTS_FOLDER,
        _ => &[],
    }
}

/// Folder one level up, or `None` at the root and for unknown folders.
pub fn parent_of(folder: &str) -> Option<&'static str> {
    match folder {
        "About Me" | "Projects" => Some("Local Disk (C:)"),
        "Local Disk (C:)" => Some(ROOT_FOLDER),
        _ => None,
    }
}
