//! UI widgets: compare canvas, scene carousel, channel switcher, transport.

pub mod carousel;
pub mod compare;
pub mod switcher;
pub mod transport;

pub use carousel::scene_carousel;
pub use compare::compare_view;
pub use switcher::channel_switcher;
pub use transport::{transport_controls, TransportAction};
