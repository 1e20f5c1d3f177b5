//! WIPEVIEW - Split-compare viewer library
//!
//! Re-exports all modules for use by the binary target.

pub mod cache;
pub mod cli;
pub mod frame;
pub mod library;
pub mod manifest;
pub mod player;
pub mod scene;
pub mod split;
pub mod spring;
pub mod state;
pub mod widgets;
pub mod workers;

// Re-export commonly used types
pub use cache::{FrameCache, FrameKey};
pub use frame::Frame;
pub use library::SceneLibrary;
pub use manifest::{ChannelDecl, Manifest, SceneDecl};
pub use player::Player;
pub use scene::SceneClip;
pub use split::SplitGeometry;
pub use spring::DividerSpring;
pub use state::ViewerState;
pub use workers::Workers;
