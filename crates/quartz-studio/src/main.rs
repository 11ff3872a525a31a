use quartz_engine::logging::{init_logging, LoggingConfig};
use quartz_ui::prelude::*;

const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn main() {
    init_logging(LoggingConfig::default());

    let face = ClockFace::default();
    let side = f64::from(face.radius * 2.0);

    Application::new()
        .title("Quartz Clock")
        .size(side, side)
        .font("numerals", load_font())
        .run_widget(move |fonts: &FontMap| ClockView::new(face, fonts.get("numerals")).into());
}

fn load_font() -> Vec<u8> {
    match FONT_PATHS.iter().find_map(|p| std::fs::read(p).ok()) {
        Some(bytes) => bytes,
        None => {
            log::warn!("no system font found; the clock will be drawn without numerals");
            Vec::new()
        }
    }
}
