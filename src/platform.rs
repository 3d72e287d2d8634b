//! Per-platform defaults: where Odia fonts usually live, and how big they render.

use std::path::PathBuf;

use crate::error::{CloudError, Result};

const MACOS_FONTS: &[&str] = &["/System/Library/Fonts/NotoSansOriya.ttc"];

const WINDOWS_FONTS: &[&str] = &["C:/Windows/Fonts/Kalinga.ttf", "C:/Windows/Fonts/Nirmala.ttc"];

const LINUX_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/lohit-oriya/Lohit-Odia.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansOriya-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansOriya-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoSansOriya-Regular.ttf",
];

/// The operating system this binary was built for, as used by the functions below.
pub fn current_os() -> &'static str {
    std::env::consts::OS
}

/// Known font locations for `os` (an `std::env::consts::OS` value).
pub fn font_candidates(os: &str) -> Result<&'static [&'static str]> {
    match os {
        "macos" => Ok(MACOS_FONTS),
        "windows" => Ok(WINDOWS_FONTS),
        "linux" => Ok(LINUX_FONTS),
        other => Err(CloudError::UnsupportedPlatform(other.to_owned())),
    }
}

/// The candidates for `os` that exist on this machine.
pub fn installed_fonts(os: &str) -> Result<Vec<PathBuf>> {
    let found: Vec<PathBuf> = font_candidates(os)?
        .iter()
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .collect();
    if found.is_empty() {
        return Err(CloudError::NoFonts);
    }
    Ok(found)
}

/// Rendering adjustments that differ between platform font stacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformMetrics {
    /// Extra pixels added to the right of every word image.
    pub extra_padding: u32,
    /// Pixels per em for each unit of nominal font size.
    pub size_scale: f32,
}

impl Default for PlatformMetrics {
    fn default() -> Self {
        PlatformMetrics {
            extra_padding: 0,
            size_scale: 1.0,
        }
    }
}

impl PlatformMetrics {
    pub fn for_os(os: &str) -> PlatformMetrics {
        match os {
            "macos" => PlatformMetrics {
                extra_padding: 15,
                size_scale: 1.0,
            },
            "linux" => PlatformMetrics {
                extra_padding: 10,
                size_scale: 54.0 / 64.0,
            },
            _ => PlatformMetrics::default(),
        }
    }

    pub fn current() -> PlatformMetrics {
        PlatformMetrics::for_os(current_os())
    }
}
