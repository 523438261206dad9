pub mod audio;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod layout;
pub mod lyrics;
pub mod params;
pub mod uniforms;

pub use audio::*;
pub use camera::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use geometry::*;
pub use layout::*;
pub use lyrics::*;
pub use params::*;
pub use uniforms::*;

// Caption track bundled with both front-ends
pub static DEMO_CAPTIONS_LRC: &str = include_str!("../assets/demo.lrc");
