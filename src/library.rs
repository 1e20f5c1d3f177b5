//! Scene library: the ordered registry of scene clips plus the active
//! selection.
//!
//! Mirrors the manifest's declaration order so carousel indices, clip
//! indices, and cache keys all agree. The active index is mutated only by
//! carousel selection; once scenes are loaded it always points at a valid
//! clip.

use log::{error, info};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::cache::{FrameCache, FrameKey};
use crate::frame::Frame;
use crate::manifest::Manifest;
use crate::scene::SceneClip;
use crate::workers::Workers;

/// Frames scheduled ahead of the playhead per prefetch pass
pub const PREFETCH_WINDOW: usize = 12;

/// Ordered scene clips + single active selection.
pub struct SceneLibrary {
    clips: Vec<SceneClip>,
    active: Option<usize>,
}

impl SceneLibrary {
    /// Library with no scenes: every per-scene operation is a no-op.
    pub fn empty() -> Self {
        Self {
            clips: Vec::new(),
            active: None,
        }
    }

    /// Build one clip per declared scene, in manifest order.
    ///
    /// Any scene that fails to resolve aborts the load: a declared scene
    /// with no frames is a configuration error, not a runtime condition.
    pub fn load(manifest: &Manifest) -> anyhow::Result<Self> {
        let mut clips = Vec::with_capacity(manifest.scenes.len());
        for decl in &manifest.scenes {
            clips.push(SceneClip::from_decl(decl)?);
        }
        let active = if clips.is_empty() { None } else { Some(0) };
        info!("Scene library loaded: {} scenes", clips.len());
        Ok(Self { clips, active })
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn clips(&self) -> &[SceneClip] {
        &self.clips
    }

    pub fn active_idx(&self) -> Option<usize> {
        self.active
    }

    pub fn active_clip(&self) -> Option<&SceneClip> {
        self.active.and_then(|i| self.clips.get(i))
    }

    /// Carousel selection. Out-of-range indices are rejected, preserving
    /// the invariant that `active` always indexes a valid clip.
    pub fn select(&mut self, idx: usize) -> bool {
        if idx >= self.clips.len() {
            log::warn!("Scene index {} out of range ({} scenes)", idx, self.clips.len());
            return false;
        }
        self.active = Some(idx);
        info!("Activated scene {} ('{}')", idx, self.clips[idx].name);
        true
    }

    /// Schedule decoding of the frames ahead of the playhead for the active
    /// scene (wrapping: scenes are loops). Claims stop duplicate decodes;
    /// a generation re-check at run time drops jobs that outlived a scene
    /// switch.
    pub fn prefetch(
        &self,
        playhead: usize,
        workers: &Workers,
        cache: &Arc<FrameCache>,
    ) {
        let Some(scene_idx) = self.active else {
            return;
        };
        let clip = &self.clips[scene_idx];
        let count = clip.frame_count();
        if count == 0 {
            return;
        }

        let generation = workers.current_generation();
        for offset in 0..PREFETCH_WINDOW.min(count) {
            let frame_idx = (playhead + offset) % count;
            let key = FrameKey {
                scene: scene_idx,
                frame: frame_idx,
            };
            if !cache.try_claim(key) {
                continue;
            }
            let Some(path) = clip.frame_path(frame_idx) else {
                cache.release(key);
                continue;
            };
            let path = path.to_path_buf();
            let cache = Arc::clone(cache);
            let gen_ref = workers.generation_ref();
            workers.execute(move || {
                if generation != gen_ref.load(Ordering::Relaxed) {
                    cache.release(key);
                    return;
                }
                match Frame::load(&path) {
                    Ok(frame) => cache.insert(key, frame),
                    Err(e) => {
                        error!("Frame load failed: {}", e);
                        cache.release(key);
                    }
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Manifest, SceneDecl, DEFAULT_FPS};
    use std::path::PathBuf;
    use std::time::Duration;

    fn write_scene(tag: &str, count: usize) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wipeview-lib-{}", tag));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..count {
            let img = image::RgbaImage::from_pixel(10, 2, image::Rgba([i as u8, 0, 0, 255]));
            img.save(dir.join(format!("concat.{:04}.png", i))).unwrap();
        }
        dir
    }

    fn manifest_for(dirs: &[PathBuf]) -> Manifest {
        let mut manifest = Manifest::default();
        manifest.scenes = dirs
            .iter()
            .enumerate()
            .map(|(i, dir)| SceneDecl {
                name: format!("scene{}", i),
                frames: dir.join("concat.*.png").to_string_lossy().to_string(),
                thumbnail: String::new(),
                label: None,
                fps: DEFAULT_FPS,
            })
            .collect();
        manifest
    }

    #[test]
    fn test_one_clip_per_declared_scene() {
        let dirs = vec![write_scene("a", 2), write_scene("b", 3)];
        let manifest = manifest_for(&dirs);
        let library = SceneLibrary::load(&manifest).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.clips()[0].pattern(), manifest.scenes[0].frames);
        assert_eq!(library.clips()[1].frame_count(), 3);
        // First scene active by construction
        assert_eq!(library.active_idx(), Some(0));
    }

    #[test]
    fn test_select_rejects_out_of_range() {
        let dirs = vec![write_scene("sel", 1)];
        let mut library = SceneLibrary::load(&manifest_for(&dirs)).unwrap();
        assert!(library.select(0));
        assert!(!library.select(1));
        assert_eq!(library.active_idx(), Some(0));
    }

    #[test]
    fn test_empty_library_is_inert() {
        let library = SceneLibrary::empty();
        assert!(library.is_empty());
        assert!(library.active_clip().is_none());
        // Prefetch on an empty library must be a silent no-op
        let workers = Workers::new(1);
        let cache = Arc::new(FrameCache::new(4));
        library.prefetch(0, &workers, &cache);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_prefetch_fills_cache() {
        let dirs = vec![write_scene("pf", 4)];
        let library = SceneLibrary::load(&manifest_for(&dirs)).unwrap();
        let workers = Workers::new(2);
        let cache = Arc::new(FrameCache::new(16));

        library.prefetch(0, &workers, &cache);

        // Poll until the loaders have decoded all 4 frames
        for _ in 0..200 {
            if cache.len() == 4 {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(cache.len(), 4);
        assert!(cache.get(FrameKey { scene: 0, frame: 3 }).is_some());
    }

    #[test]
    fn test_stale_prefetch_is_dropped() {
        let dirs = vec![write_scene("stale", 2)];
        let library = SceneLibrary::load(&manifest_for(&dirs)).unwrap();
        // Single loader thread: park it so the prefetch jobs queue behind
        let workers = Workers::new(1);
        let cache = Arc::new(FrameCache::new(16));

        let (block_tx, block_rx) = crossbeam_channel::bounded::<()>(0);
        workers.execute(move || {
            let _ = block_rx.recv();
        });

        library.prefetch(0, &workers, &cache);
        // Scene switch invalidates everything scheduled above
        workers.bump_generation();
        block_tx.send(()).unwrap();

        std::thread::sleep(Duration::from_millis(100));
        assert!(cache.is_empty());
        // Claims were released, so the frames can be rescheduled
        assert!(cache.try_claim(FrameKey { scene: 0, frame: 0 }));
    }
}
