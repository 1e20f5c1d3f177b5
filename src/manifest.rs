//! Scene manifest: declarative configuration for scenes and channels.
//!
//! Replaces ad-hoc per-widget data attributes with a single JSON document
//! consumed by the library/widget constructors. Every scene declares a frame
//! pattern and a thumbnail; every channel declares a label. Order matters:
//! carousel buttons and radio indices follow declaration order.

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::split::SEGMENT_COUNT;

/// Default fps for scenes that do not declare one
pub const DEFAULT_FPS: f32 = 30.0;

/// One demo scene: a looping sequence of concatenated frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDecl {
    /// Scene identity (unique within a manifest)
    pub name: String,
    /// Frame file pattern: glob ("concat.*.png") or printf ("concat.%04d.png")
    pub frames: String,
    /// Thumbnail image path for the carousel
    pub thumbnail: String,
    /// Human-readable label shown under the thumbnail
    #[serde(default)]
    pub label: Option<String>,
    /// Playback rate
    #[serde(default = "default_fps")]
    pub fps: f32,
}

fn default_fps() -> f32 {
    DEFAULT_FPS
}

impl SceneDecl {
    /// Label for display; falls back to the scene name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// One auxiliary channel selectable for the right pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelDecl {
    pub label: String,
}

/// Root manifest document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub scenes: Vec<SceneDecl>,
    pub channels: Vec<ChannelDecl>,
    /// Label over the left (RGB) pane
    pub before_label: String,
    /// Label over the right (selected channel) pane
    pub after_label: String,
    /// Title shown next to the channel radio group
    pub switcher_title: String,
}

impl Default for Manifest {
    fn default() -> Self {
        // Stock scene list of the research demo page, in carousel order
        let scene_names = [
            "bouquet",
            "bonsai",
            "vasedeck",
            "burger_combine",
            "bun",
            "dog",
        ];

        let scenes = scene_names
            .iter()
            .map(|name| SceneDecl {
                name: name.to_string(),
                frames: format!("scenes/{}/concat.*.png", name),
                thumbnail: format!("scenes/{}/thumb.png", name),
                label: None,
                fps: DEFAULT_FPS,
            })
            .collect();

        let channels = ["Material", "Young's modulus (E)", "Density", "Poisson's ratio (nu)"]
            .iter()
            .map(|label| ChannelDecl {
                label: label.to_string(),
            })
            .collect();

        Self {
            scenes,
            channels,
            before_label: "Render".to_string(),
            after_label: "Property".to_string(),
            switcher_title: "Property".to_string(),
        }
    }
}

impl Manifest {
    /// Load manifest from a JSON file.
    pub fn from_json(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read manifest {}: {}", path.display(), e))?;
        let manifest: Manifest = serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Failed to parse manifest {}: {}", path.display(), e))?;
        manifest.validate()?;
        info!(
            "Loaded manifest {} ({} scenes, {} channels)",
            path.display(),
            manifest.scenes.len(),
            manifest.channels.len()
        );
        Ok(manifest)
    }

    /// Reject manifests the viewer cannot meaningfully present.
    ///
    /// An empty scene list is allowed (viewer starts idle); duplicate scene
    /// names, an empty channel list, or more channels than the fixed frame
    /// layout holds are configuration errors.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.channels.is_empty() {
            anyhow::bail!("Manifest declares no channels");
        }
        // Segment 0 is RGB; only the remaining segments can carry channels
        let max_channels = SEGMENT_COUNT - 1;
        if self.channels.len() > max_channels {
            anyhow::bail!(
                "Manifest declares {} channels; the frame layout holds at most {}",
                self.channels.len(),
                max_channels
            );
        }
        for (i, scene) in self.scenes.iter().enumerate() {
            if scene.frames.is_empty() {
                anyhow::bail!("Scene '{}' declares an empty frame pattern", scene.name);
            }
            if self.scenes[..i].iter().any(|s| s.name == scene.name) {
                anyhow::bail!("Duplicate scene name '{}'", scene.name);
            }
        }
        Ok(())
    }
}
