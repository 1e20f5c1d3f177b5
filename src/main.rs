use wipeview::cache::{FrameCache, FrameKey, DEFAULT_CAPACITY};
use wipeview::cli::Args;
use wipeview::library::SceneLibrary;
use wipeview::manifest::Manifest;
use wipeview::player::Player;
use wipeview::state::ViewerState;
use wipeview::widgets::carousel::ThumbEntry;
use wipeview::widgets::{
    channel_switcher, compare_view, scene_carousel, transport_controls, TransportAction,
};
use wipeview::workers::Workers;

use clap::Parser;
use eframe::egui;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main application state
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct WipeviewApp {
    /// Persisted UI state (display level survives restarts)
    viewer: ViewerState,
    #[serde(skip)]
    manifest: Manifest,
    #[serde(skip)]
    library: SceneLibrary,
    #[serde(skip)]
    player: Player,
    #[serde(skip)]
    cache: Arc<FrameCache>,
    #[serde(skip)]
    workers: Arc<Workers>,
    /// Texture holding the last uploaded concatenated frame
    #[serde(skip)]
    frame_texture: Option<egui::TextureHandle>,
    /// (scene, frame) currently uploaded, to skip redundant uploads
    #[serde(skip)]
    displayed: Option<(usize, usize)>,
    #[serde(skip)]
    thumbs: Vec<ThumbEntry>,
    #[serde(skip)]
    thumbs_loaded: bool,
    #[serde(skip)]
    is_fullscreen: bool,
    #[serde(skip)]
    error_msg: Option<String>,
}

impl Default for WipeviewApp {
    fn default() -> Self {
        let num_workers = (num_cpus::get() * 3 / 4).max(1);
        Self {
            viewer: ViewerState::default(),
            manifest: Manifest::default(),
            library: SceneLibrary::empty(),
            player: Player::new(),
            cache: Arc::new(FrameCache::new(DEFAULT_CAPACITY)),
            workers: Arc::new(Workers::new(num_workers)),
            frame_texture: None,
            displayed: None,
            thumbs: Vec::new(),
            thumbs_loaded: false,
            is_fullscreen: false,
            error_msg: None,
        }
    }
}

impl WipeviewApp {
    /// Swap in a manifest: rebuild the library, drop scheduled loads, reset
    /// playback and per-scene UI caches.
    fn apply_manifest(&mut self, manifest: Manifest) {
        match SceneLibrary::load(&manifest) {
            Ok(library) => {
                self.library = library;
                self.error_msg = None;
            }
            Err(e) => {
                // Configuration error: surface it, keep the viewer up
                error!("{:#}", e);
                self.error_msg = Some(format!("{:#}", e));
                self.library = SceneLibrary::empty();
            }
        }
        self.viewer.sanitize(manifest.channels.len());
        self.manifest = manifest;
        self.workers.bump_generation();
        self.player = Player::new();
        self.displayed = None;
        self.thumbs.clear();
        self.thumbs_loaded = false;
    }

    /// Carousel activation: switch scene, rewind, play.
    fn select_scene(&mut self, idx: usize) {
        if !self.library.select(idx) {
            return;
        }
        // Invalidate loads queued for the previous scene
        self.workers.bump_generation();
        self.player.restart();
        self.library
            .prefetch(self.player.playhead(), &self.workers, &self.cache);
    }

    /// Decode carousel thumbnails into textures (once per manifest).
    fn ensure_thumbnails(&mut self, ctx: &egui::Context) {
        if self.thumbs_loaded {
            return;
        }
        self.thumbs = self
            .library
            .clips()
            .iter()
            .map(|clip| {
                let texture = match image::open(&clip.thumbnail) {
                    Ok(img) => {
                        let rgba = img.to_rgba8();
                        let size = [rgba.width() as usize, rgba.height() as usize];
                        let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                        Some(ctx.load_texture(
                            format!("thumb_{}", clip.name),
                            color,
                            egui::TextureOptions::LINEAR,
                        ))
                    }
                    Err(e) => {
                        warn!("Thumbnail for '{}' not loaded: {}", clip.name, e);
                        None
                    }
                };
                ThumbEntry {
                    texture,
                    label: clip.label.clone(),
                }
            })
            .collect();
        self.thumbs_loaded = true;
    }

    /// Upload the playhead frame if the loaders have decoded it. A missing
    /// frame keeps the previous texture on screen (no black flash).
    fn sync_frame_texture(&mut self, ctx: &egui::Context) {
        let Some(scene_idx) = self.library.active_idx() else {
            return;
        };
        let key = FrameKey {
            scene: scene_idx,
            frame: self.player.playhead(),
        };
        if self.displayed == Some((key.scene, key.frame)) {
            return;
        }
        let Some(frame) = self.cache.get(key) else {
            return;
        };

        let size = [frame.width() as usize, frame.height() as usize];
        let color = egui::ColorImage::from_rgba_unmultiplied(size, frame.pixels());
        match &mut self.frame_texture {
            Some(tex) => tex.set(color, egui::TextureOptions::LINEAR),
            None => {
                self.frame_texture =
                    Some(ctx.load_texture("concat_frame", color, egui::TextureOptions::LINEAR))
            }
        }
        self.displayed = Some((key.scene, key.frame));
    }

    fn set_fullscreen(&mut self, ctx: &egui::Context, enabled: bool) {
        self.is_fullscreen = enabled;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(enabled));
        ctx.request_repaint();
    }

    fn apply_transport(&mut self, ctx: &egui::Context, action: TransportAction) {
        // Both controls are no-ops without an active scene
        let Some(clip) = self.library.active_clip() else {
            return;
        };
        match action {
            TransportAction::TogglePlay => {
                let count = clip.frame_count();
                self.player.play_pause(count);
            }
            TransportAction::ToggleFullscreen => {
                let enabled = !self.is_fullscreen;
                self.set_fullscreen(ctx, enabled);
            }
        }
    }

    fn open_manifest_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Scene manifest", &["json"])
            .pick_file()
        {
            info!("Manifest selected: {}", path.display());
            match Manifest::from_json(&path) {
                Ok(manifest) => self.apply_manifest(manifest),
                Err(e) => {
                    error!("{:#}", e);
                    self.error_msg = Some(format!("{:#}", e));
                }
            }
        }
    }
}

impl eframe::App for WipeviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_thumbnails(ctx);

        // Playback + prefetch for the active scene
        if let Some(clip) = self.library.active_clip() {
            let count = clip.frame_count();
            let fps = clip.fps;
            self.player.update(count, fps);
            self.library
                .prefetch(self.player.playhead(), &self.workers, &self.cache);
        }
        self.sync_frame_texture(ctx);

        // ESC leaves fullscreen (quit is the window close button)
        if self.is_fullscreen && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.set_fullscreen(ctx, false);
        }

        let mut transport_action = None;
        let mut selected_scene = None;

        if !self.is_fullscreen {
            egui::TopBottomPanel::top("controls").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    transport_action = transport_controls(ui, &self.player);
                    ui.separator();
                    channel_switcher(
                        ui,
                        &self.manifest.switcher_title,
                        &self.manifest.channels,
                        &mut self.viewer.display_level,
                    );
                });
            });

            egui::TopBottomPanel::bottom("carousel").show(ctx, |ui| {
                selected_scene = scene_carousel(
                    ui,
                    &self.thumbs,
                    self.library.active_idx(),
                    &mut self.viewer.carousel_offset,
                );
            });
        }

        let central = if self.is_fullscreen {
            egui::CentralPanel::default().frame(egui::Frame::new().fill(egui::Color32::BLACK))
        } else {
            egui::CentralPanel::default()
        };
        let mut open_dialog = false;
        central.show(ctx, |ui| {
            if let Some(error) = &self.error_msg {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(egui::Color32::RED, error);
                });
            } else if self.library.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("No scenes loaded. Double-click to open a manifest.");
                });
                let response = ui.interact(
                    ui.max_rect(),
                    ui.id().with("empty_viewer"),
                    egui::Sense::click(),
                );
                open_dialog = response.double_clicked();
            } else {
                let response = compare_view(
                    ui,
                    self.frame_texture.as_ref(),
                    &mut self.viewer,
                    &self.manifest.before_label,
                    &self.manifest.after_label,
                );
                open_dialog = response.double_clicked;
            }
        });

        if open_dialog {
            self.open_manifest_dialog();
        }
        if let Some(idx) = selected_scene {
            self.select_scene(idx);
        }
        if let Some(action) = transport_action {
            self.apply_transport(ctx, action);
        }

        if self.player.is_playing {
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
            debug!("App state saved: display_level={}", self.viewer.display_level);
        }
    }
}

/// Map -v counts to a log level (warn by default, like a quiet CLI tool)
fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn init_logging(args: &Args) {
    let level = log_level(args.verbosity);

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("wipeview.log"));
        match std::fs::File::create(&log_path) {
            Ok(file) => {
                env_logger::Builder::new()
                    .filter_level(level)
                    .filter_module("egui", log::LevelFilter::Info) // suppress egui DEBUG spam
                    .format_timestamp_millis()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
                info!("Logging to file: {} (level: {:?})", log_path.display(), level);
            }
            Err(e) => {
                eprintln!("Cannot create log file {}: {}", log_path.display(), e);
                env_logger::Builder::new().filter_level(level).init();
            }
        }
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }
}

fn load_manifest(path: Option<&Path>) -> Manifest {
    match path {
        Some(path) => match Manifest::from_json(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                // Bad explicit manifest is fatal-ish: fall back but shout
                error!("{:#}", e);
                eprintln!("Error: {:#}", e);
                Manifest::default()
            }
        },
        None => {
            info!("No manifest given, using built-in scene list");
            Manifest::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args);

    info!("Wipeview split-compare viewer starting...");
    debug!("Command-line args: {:?}", args);

    let manifest = load_manifest(args.manifest.as_deref());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "Wipeview v{} \u{2022} drag the divider to compare",
                env!("CARGO_PKG_VERSION")
            ))
            .with_inner_size(egui::vec2(1100.0, 760.0))
            .with_resizable(true),
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Wipeview",
        native_options,
        Box::new(move |cc| {
            // Restore persisted UI state if available
            let mut app: WipeviewApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted state found, creating default app");
                    WipeviewApp::default()
                });

            app.apply_manifest(manifest);

            // Startup scene: CLI override, else scene 0
            if let Some(idx) = args.scene {
                if !app.library.select(idx) {
                    warn!("--scene {} out of range, keeping scene 0", idx);
                }
            }

            // Load-time default: the active scene autoplays
            if !app.library.is_empty() && !args.no_autoplay {
                app.player.restart();
            }
            app.library
                .prefetch(app.player.playhead(), &app.workers, &app.cache);

            if args.fullscreen {
                app.set_fullscreen(&cc.egui_ctx, true);
            }

            Ok(Box::new(app))
        }),
    )?;

    info!("Application exiting");
    Ok(())
}
