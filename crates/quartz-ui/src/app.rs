use std::collections::HashMap;

use winit::dpi::LogicalSize;
use winit::window::WindowId;

use quartz_engine::coords::Vec2;
use quartz_engine::core::{App as EngineApp, AppControl, FrameCtx};
use quartz_engine::device::GpuInit;
use quartz_engine::paint::Color;
use quartz_engine::render::SceneRenderer;
use quartz_engine::text::FontId;
use quartz_engine::window::{Runtime, RuntimeConfig};

use crate::scene::UiScene;
use crate::state::SavedState;
use crate::widget::Element;

// ── FontMap ───────────────────────────────────────────────────────────────

/// A name-keyed map of loaded font handles.
///
/// Passed to the builder closure in [`Application::run_widget`] so the
/// application can retrieve [`FontId`] values by name.
///
/// ```rust,ignore
/// .run_widget(|fonts: &FontMap| MyWidget::new(fonts.get("body")).into())
/// ```
#[derive(Debug, Default)]
pub struct FontMap(HashMap<String, FontId>);

impl FontMap {
    /// Returns the [`FontId`] registered under `name`, or `None` if the name
    /// was not registered or the font failed to load.
    pub fn get(&self, name: &str) -> Option<FontId> {
        self.0.get(name).copied()
    }
}

// ── Application ───────────────────────────────────────────────────────────

/// Top-level UI application builder.
///
/// Configure the window and fonts, then start the event loop with
/// [`run_widget`](Self::run_widget).
///
/// ```rust,ignore
/// Application::new()
///     .title("Clock")
///     .size(400.0, 400.0)
///     .font("numerals", load_font())
///     .run_widget(|fonts| ClockView::new(ClockFace::default(), fonts.get("numerals")).into());
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    fonts: Vec<(String, Vec<u8>)>,
    clear_color: Color,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "quartz".to_string(),
            width: 400.0,
            height: 400.0,
            fonts: Vec::new(),
            clear_color: Color::WHITE,
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Register a named font, retrievable through [`FontMap::get`].
    ///
    /// Fonts that fail to load are skipped with a warning.
    pub fn font(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.fonts.push((name.into(), data));
        self
    }

    /// Color the window is cleared to before the widget paints.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Start the event loop with a custom root widget.
    ///
    /// `build` is called once after fonts are loaded; the returned [`Element`]
    /// persists across frames.
    ///
    /// This never returns.
    pub fn run_widget<F>(self, build: F) -> !
    where
        F: FnOnce(&FontMap) -> Element,
    {
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };
        let state = UiAppState::new(self, build);

        match Runtime::run(config, GpuInit::default(), state) {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                log::error!("quartz runtime error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

fn load_fonts(ui_scene: &mut UiScene, fonts: &[(String, Vec<u8>)]) -> FontMap {
    let mut map = FontMap::default();
    for (name, bytes) in fonts {
        match ui_scene.load_font(bytes) {
            Ok(id) => {
                map.0.insert(name.clone(), id);
            }
            Err(e) => log::warn!("failed to load font '{name}': {e}"),
        }
    }
    map
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Internal state that implements `quartz_engine::core::App`.
///
/// Maps host lifecycle onto the root widget: suspend saves its state, resume
/// restores it, closing the window detaches it.
struct UiAppState {
    ui_scene: UiScene,
    renderer: SceneRenderer,
    root: Element,
    clear_color: Color,
    /// State captured on suspend, parked as JSON until resume.
    parked: Option<String>,
}

impl UiAppState {
    fn new<F>(app: Application, build: F) -> Self
    where
        F: FnOnce(&FontMap) -> Element,
    {
        let mut ui_scene = UiScene::new();
        let font_map = load_fonts(&mut ui_scene, &app.fonts);
        let root = build(&font_map);

        Self {
            ui_scene,
            renderer: SceneRenderer::new(),
            root,
            clear_color: app.clear_color,
            parked: None,
        }
    }

    fn park(&mut self) {
        let Some(state) = self.root.save_state() else { return };
        match state.to_json() {
            Ok(json) => {
                log::debug!("saved widget state ({})", state.tag());
                self.parked = Some(json);
            }
            Err(e) => log::warn!("{e}"),
        }
    }

    fn unpark(&mut self) {
        let Some(json) = self.parked.take() else { return };
        match SavedState::from_json(&json) {
            Ok(state) => {
                log::debug!("restoring widget state ({})", state.tag());
                self.root.restore_state(&state);
            }
            Err(e) => log::warn!("discarding saved widget state: {e}"),
        }
    }
}

impl EngineApp for UiAppState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let viewport = Vec2::new(w, h);

        // ── Layout + paint ────────────────────────────────────────────────
        let _ = self.ui_scene.frame(&mut self.root, viewport, ctx.scheduler);

        // ── Render ────────────────────────────────────────────────────────
        let dl = &mut self.ui_scene.draw_list;
        let fs = &self.ui_scene.font_system;
        let renderer = &mut self.renderer;

        ctx.render(self.clear_color, |rctx, target| {
            renderer.render(rctx, target, dl, fs);
        })
    }

    fn on_suspend(&mut self) {
        self.park();
    }

    fn on_resume(&mut self) {
        self.unpark();
    }

    fn on_close(&mut self, window_id: WindowId) {
        log::debug!("detaching root widget of window {window_id:?}");
        self.root.detach();
    }
}
