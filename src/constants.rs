use ratatui::style::Color;

pub const COLORS: [Color; 12] = [
    Color::Rgb(0, 176, 80),
    Color::Rgb(128, 255, 0),
    Color::Rgb(255, 255, 0),
    Color::Rgb(255, 204, 0),
    Color::Rgb(255, 153, 0),
    Color::Rgb(255, 51, 0),
    Color::Rgb(255, 0, 0),
    Color::Rgb(153, 0, 255),
    Color::Rgb(102, 51, 255),
    Color::Rgb(0, 0, 255),
    Color::Rgb(0, 153, 255),
    Color::Rgb(0, 255, 255),
];

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    warmup_ms: 5000,
    not_started_ms: 1000,
    in_progress_ms: 2000,
    late_ms: 3000,
    target_fps: 24,
};

pub const PIE_SETTINGS: PieSettings = PieSettings {
    // Terminal cells are roughly twice as tall as they are wide.
    aspect_ratio: 2.0,
    inner_fraction: 0.7,
    // 0 degrees points at 12 o'clock, sweeping clockwise.
    start_offset_degrees: -90.0,
};

pub const DEMO_RESET_COUNTS: [f64; 4] = [11.0, 4.0, 1.0, 11.0];

pub struct TimeSettings {
    pub warmup_ms: u64,
    pub not_started_ms: u64,
    pub in_progress_ms: u64,
    pub late_ms: u64,
    pub target_fps: u64,
}

pub struct PieSettings {
    pub aspect_ratio: f64,
    pub inner_fraction: f64,
    pub start_offset_degrees: f64,
}
