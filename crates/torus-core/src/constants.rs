// Shared visual/audio tuning constants used by both web and native frontends.

// Responsive layout
pub const COMPACT_MAX_WIDTH: f32 = 400.0; // viewport widths at or below this are "compact"
pub const COMPACT_MESH_SCALE: f32 = 0.5; // mesh scale applied on resize while compact
pub const FULL_MESH_SCALE: f32 = 1.0;

// Camera
pub const CAMERA_START: [f32; 3] = [0.0, -2.0, 14.0];
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Camera drift easing per tick; Y converges ~10x faster than X
pub const CAMERA_DRIFT_X: f32 = 0.05;
pub const CAMERA_DRIFT_Y: f32 = 0.5;
pub const POINTER_DIVISOR: f32 = 100.0; // client pixels per world unit of pointer offset

// Torus geometry
pub const TORUS_RADIUS: f32 = 2.0;
pub const TORUS_RADIUS_COMPACT: f32 = 1.0;
pub const TORUS_TUBE: f32 = 3.0;
pub const TORUS_RADIAL_SEGMENTS: u32 = 8;
pub const TORUS_TUBULAR_SEGMENTS: u32 = 100;

// Default parameter values
pub const DEFAULT_RED: f32 = 1.0;
pub const DEFAULT_GREEN: f32 = 1.0;
pub const DEFAULT_BLUE: f32 = 1.0;
pub const DEFAULT_BLOOM_THRESHOLD: f32 = 0.5;
pub const DEFAULT_BLOOM_STRENGTH: f32 = 0.4;
pub const DEFAULT_BLOOM_RADIUS: f32 = 0.8;
pub const BLOOM_STRENGTH_MAX: f32 = 3.0;

// Audio analysis (WebAudio analyser defaults)
pub const ANALYSER_FFT_SIZE: usize = 32;
pub const ANALYSER_MIN_DB: f32 = -100.0;
pub const ANALYSER_MAX_DB: f32 = -30.0;

// Vertex displacement divisor applied to the frequency uniform in the shader
pub const FREQUENCY_DISPLACEMENT_DIVISOR: f32 = 30.0;

// Captions
pub const IDLE_CAPTION: &str = "Lyrics will appear here...";
