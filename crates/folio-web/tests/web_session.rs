//! A browser session driven only through DOM-shaped input.

use std::sync::Arc;

use folio_app::{PortfolioApp, PortfolioContent};
use folio_core::event::{Event, Modifiers};
use folio_layout::{DisplayMetrics, LayoutVariant};
use folio_web::input::{dom_key_event, dom_modifiers, dom_mouse_down, dom_wheel};
use folio_web::{CELL_WORDS, StepProgram, platform_name};
use pretty_assertions::assert_eq;

fn session(cols: u16, rows: u16, cell_width_px: f32) -> StepProgram<PortfolioApp> {
    let app = PortfolioApp::new(
        Arc::new(PortfolioContent::builtin()),
        DisplayMetrics::new(cell_width_px),
    );
    let mut prog = StepProgram::new(app, cols, rows);
    prog.init().unwrap();
    prog
}

fn press(prog: &mut StepProgram<PortfolioApp>, key: &str, mods: Modifiers) {
    let event = dom_key_event(key, mods).unwrap();
    prog.push_event(Event::Key(event));
}

#[test]
fn css_cell_width_drives_layout() {
    // 100 cells of 9px: 900 dp.
    let prog = session(100, 40, 9.0);
    assert_eq!(prog.model().layout(), LayoutVariant::Desktop);

    // 100 cells of 8px: exactly 800 dp stays on the single column.
    let prog = session(100, 40, 8.0);
    assert_eq!(prog.model().layout(), LayoutVariant::Mobile);
}

#[test]
fn tab_enter_then_shift_tab_space() {
    let mut prog = session(80, 30, 8.0);
    let none = Modifiers::NONE;
    press(&mut prog, "Tab", none);
    press(&mut prog, "Tab", none);
    press(&mut prog, "Enter", none);
    press(&mut prog, "Tab", dom_modifiers(true, false, false, false));
    press(&mut prog, " ", none);
    let result = prog.step().unwrap();

    assert_eq!(result.events_processed, 5);
    assert_eq!(
        prog.take_open_requests(),
        vec![
            "https://github.com/TU_USUARIO/PROYECTO_2".to_string(),
            "https://github.com/TU_USUARIO/PROYECTO_1".to_string(),
        ]
    );
}

#[test]
fn wheel_scrolls_and_frame_updates() {
    let mut prog = session(80, 24, 8.0);
    let before = prog.outputs().flat_cells();

    prog.push_event(Event::Mouse(
        dom_wheel(10, 10, 0.0, 100.0, Modifiers::NONE).unwrap(),
    ));
    assert!(prog.step().unwrap().rendered);
    assert!(prog.model().scroll() > 0);

    let after = prog.outputs().flat_cells();
    assert_eq!(after.len(), 80 * 24 * CELL_WORDS);
    assert_ne!(before, after);
}

#[test]
fn right_click_on_a_button_opens_nothing() {
    let mut prog = session(200, 120, 8.0);
    let metrics = prog.model().layout_metrics();
    let card = *metrics.card(0).unwrap();
    let y = metrics.screen_row(card.button_row(), 0).unwrap();
    let x = metrics.viewport.right() - 4;

    prog.push_event(Event::Mouse(dom_mouse_down(x, y, 2, Modifiers::NONE).unwrap()));
    prog.step().unwrap();
    assert!(prog.outputs().open_requests.is_empty());

    prog.push_event(Event::Mouse(dom_mouse_down(x, y, 0, Modifiers::NONE).unwrap()));
    prog.step().unwrap();
    assert_eq!(prog.outputs().open_requests.len(), 1);
}

#[test]
fn escape_ends_the_session() {
    let mut prog = session(80, 24, 8.0);
    press(&mut prog, "Escape", Modifiers::NONE);
    assert!(!prog.step().unwrap().running);
    assert_eq!(platform_name(), "Web with Rust/Wasm");
}
