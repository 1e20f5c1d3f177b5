//! SceneClip: one demo scene as a concatenated frame sequence on disk.
//!
//! Each frame file packs 5 equal-width channel segments side by side
//! (RGB | material | E | density | nu). The clip only discovers and indexes
//! frame files; decoding happens in the loader workers.

use anyhow::{bail, Context};
use log::info;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::manifest::SceneDecl;
use crate::split::SEGMENT_COUNT;

/// One scene: ordered frame files plus probed resolution.
#[derive(Debug, Clone)]
pub struct SceneClip {
    pub name: String,
    pub label: String,
    pub thumbnail: PathBuf,
    pub fps: f32,
    pattern: String,
    files: Vec<PathBuf>,
    width: u32,
    height: u32,
}

impl SceneClip {
    /// Build a clip from its manifest declaration.
    ///
    /// A pattern that resolves to zero files is a configuration error, not a
    /// runtime condition: the scene was declared, so its frames must exist.
    pub fn from_decl(decl: &SceneDecl) -> anyhow::Result<Self> {
        let files = discover(&decl.frames)
            .with_context(|| format!("Scene '{}'", decl.name))?;
        if files.is_empty() {
            bail!("Scene '{}': pattern '{}' matched no frames", decl.name, decl.frames);
        }

        // Probe resolution from the first frame header (no full decode)
        let (width, height) = image::image_dimensions(&files[0]).with_context(|| {
            format!("Scene '{}': cannot probe {}", decl.name, files[0].display())
        })?;
        if width % SEGMENT_COUNT as u32 != 0 {
            log::warn!(
                "Scene '{}': width {} is not a multiple of {} segments",
                decl.name, width, SEGMENT_COUNT
            );
        }

        info!(
            "Scene '{}': {} frames, {}x{} ({} segments of {}px)",
            decl.name,
            files.len(),
            width,
            height,
            SEGMENT_COUNT,
            width / SEGMENT_COUNT as u32
        );

        Ok(Self {
            name: decl.name.clone(),
            label: decl.display_label().to_string(),
            thumbnail: PathBuf::from(&decl.thumbnail),
            fps: decl.fps,
            pattern: decl.frames.clone(),
            files,
            width,
            height,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of frames in the loop
    pub fn frame_count(&self) -> usize {
        self.files.len()
    }

    /// Path of frame `idx`, or None past the end
    pub fn frame_path(&self, idx: usize) -> Option<&Path> {
        self.files.get(idx).map(|p| p.as_path())
    }

    /// Full concatenated frame resolution
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Resolve a frame pattern to a sorted file list.
///
/// Supports glob ("concat.*.png") and printf-style ("concat.%04d.png")
/// patterns; anything else is treated as a literal single file.
fn discover(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let glob_pattern = if pattern.contains('%') {
        // printf-style: frame.%04d.png -> frame.*.png
        let re = Regex::new(r"%0?\d*d").expect("static regex");
        re.replace_all(pattern, "*").to_string()
    } else {
        pattern.to_string()
    };

    let mut files = Vec::new();
    if glob_pattern.contains('*') {
        for entry in glob::glob(&glob_pattern)
            .with_context(|| format!("Bad pattern '{}'", glob_pattern))?
        {
            files.push(entry?);
        }
        // Glob order is platform-dependent; frame order must be stable
        files.sort();
    } else {
        files.push(PathBuf::from(pattern));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::DEFAULT_FPS;

    /// Write `count` tiny frames into a fresh temp dir, return the dir
    fn write_frames(tag: &str, count: usize) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wipeview-scene-{}", tag));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..count {
            let img = image::RgbaImage::from_pixel(10, 2, image::Rgba([10, 20, 30, 255]));
            img.save(dir.join(format!("concat.{:04}.png", i))).unwrap();
        }
        dir
    }

    #[test]
    fn test_glob_pattern_discovers_all_frames() {
        let dir = write_frames("glob", 3);
        let decl = SceneDecl {
            name: "t".to_string(),
            frames: dir.join("concat.*.png").to_string_lossy().to_string(),
            thumbnail: String::new(),
            label: None,
            fps: DEFAULT_FPS,
        };
        let clip = SceneClip::from_decl(&decl).unwrap();
        assert_eq!(clip.frame_count(), 3);
        assert_eq!(clip.resolution(), (10, 2));
        // Sorted order: frame 0 first
        assert!(clip
            .frame_path(0)
            .unwrap()
            .to_string_lossy()
            .ends_with("concat.0000.png"));
        assert!(clip.frame_path(3).is_none());
    }

    #[test]
    fn test_printf_pattern_discovers_frames() {
        let dir = write_frames("printf", 2);
        let decl = SceneDecl {
            name: "t".to_string(),
            frames: dir.join("concat.%04d.png").to_string_lossy().to_string(),
            thumbnail: String::new(),
            label: None,
            fps: DEFAULT_FPS,
        };
        let clip = SceneClip::from_decl(&decl).unwrap();
        assert_eq!(clip.frame_count(), 2);
    }

    #[test]
    fn test_empty_pattern_is_error() {
        let decl = SceneDecl {
            name: "missing".to_string(),
            frames: "/nonexistent/wipeview/concat.*.png".to_string(),
            thumbnail: String::new(),
            label: None,
            fps: DEFAULT_FPS,
        };
        let err = SceneClip::from_decl(&decl).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
