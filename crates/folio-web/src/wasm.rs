#![forbid(unsafe_code)]

use std::sync::Arc;

use folio_app::{PortfolioApp, PortfolioContent};
use folio_core::event::Event;
use folio_layout::DisplayMetrics;
use folio_runtime::UriOpener;
use js_sys::Uint32Array;
use wasm_bindgen::prelude::*;

use crate::StepProgram;
use crate::input::{dom_key_event, dom_modifiers, dom_mouse_down, dom_wheel};

/// Opens links in a new browser tab.
#[derive(Debug, Default, Clone, Copy)]
struct WindowUriOpener;

impl UriOpener for WindowUriOpener {
    fn open_uri(&mut self, uri: &str) {
        let Some(window) = web_sys::window() else {
            tracing::warn!(uri, "no window to open link in");
            return;
        };
        if let Err(err) = window.open_with_url_and_target(uri, "_blank") {
            tracing::warn!(uri, error = ?err, "window.open failed");
        }
    }
}

fn js_error(err: impl core::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The portfolio mounted on a cell grid in the page.
///
/// The page owns the frame loop: forward DOM input, call `step`, then draw
/// `flatCells` when `step` reports a new frame. Presses and keys are handled
/// inside the DOM handler that forwards them, so links they activate open
/// while the browser still treats the gesture as user-initiated.
#[wasm_bindgen]
pub struct FolioWeb {
    program: StepProgram<PortfolioApp>,
    opener: WindowUriOpener,
}

#[wasm_bindgen]
impl FolioWeb {
    /// `cell_width_px` is the CSS width of one cell, used as dp.
    #[wasm_bindgen(constructor)]
    pub fn new(cols: u16, rows: u16, cell_width_px: f32) -> Result<FolioWeb, JsValue> {
        let app = PortfolioApp::new(
            Arc::new(PortfolioContent::builtin()),
            DisplayMetrics::new(cell_width_px),
        );
        let mut program = StepProgram::new(app, cols, rows);
        program.init().map_err(js_error)?;
        Ok(Self {
            program,
            opener: WindowUriOpener,
        })
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.program.resize(cols, rows);
    }

    /// Pointer press at cell `(x, y)` with DOM `button` numbering.
    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(
        &mut self,
        x: u16,
        y: u16,
        button: i16,
        shift: bool,
    ) -> Result<(), JsValue> {
        let mods = dom_modifiers(shift, false, false, false);
        match dom_mouse_down(x, y, button, mods) {
            Some(mouse) => self.dispatch(Event::Mouse(mouse)),
            None => Ok(()),
        }
    }

    pub fn wheel(&mut self, x: u16, y: u16, delta_x: f64, delta_y: f64, shift: bool) {
        let mods = dom_modifiers(shift, false, false, false);
        if let Some(mouse) = dom_wheel(x, y, delta_x, delta_y, mods) {
            self.program.push_event(Event::Mouse(mouse));
        }
    }

    /// DOM `keydown`. Returns whether the key was forwarded, so the page
    /// can call `preventDefault`.
    pub fn key(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> Result<bool, JsValue> {
        let mods = dom_modifiers(shift, ctrl, alt, meta);
        match dom_key_event(key, mods) {
            Some(event) => {
                self.dispatch(Event::Key(event))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Process queued input and report whether a new frame is ready.
    pub fn step(&mut self) -> Result<bool, JsValue> {
        let result = self.program.step().map_err(js_error)?;
        self.open_links();
        Ok(result.rendered)
    }


    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.program.is_running()
    }

    /// Last frame as `[bg, fg, glyph, attrs]` words per cell, row-major.
    #[wasm_bindgen(js_name = flatCells)]
    pub fn flat_cells(&self) -> Uint32Array {
        Uint32Array::from(self.program.outputs().flat_cells().as_slice())
    }

    pub fn cols(&self) -> u16 {
        self.program.size().0
    }

    pub fn rows(&self) -> u16 {
        self.program.size().1
    }

    /// Current view tree as JSON, for DOM mounting.
    #[wasm_bindgen(js_name = viewTreeJson)]
    pub fn view_tree_json(&self) -> Result<String, JsValue> {
        self.program.model().tree().to_json().map_err(js_error)
    }

    #[wasm_bindgen(js_name = platformName)]
    pub fn platform_name() -> String {
        crate::platform_name().to_string()
    }
}

impl FolioWeb {
    fn dispatch(&mut self, event: Event) -> Result<(), JsValue> {
        self.program.dispatch(event).map_err(js_error)?;
        self.open_links();
        Ok(())
    }

    fn open_links(&mut self) {
        for uri in self.program.take_open_requests() {
            self.opener.open_uri(&uri);
        }
    }
}
