// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const LYRICS_ID: &str = "lyrics-display";
pub const PANEL_ID: &str = "settings-panel";

/// Track loaded into the `<audio>` element on the first click.
pub const TRACK_URL: &str = "Beats.mp3";

// Settings panel sliders
pub const SLIDER_STEP: f32 = 0.01;
