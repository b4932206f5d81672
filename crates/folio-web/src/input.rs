#![forbid(unsafe_code)]

//! DOM input normalization.
//!
//! The page converts pointer positions to cell coordinates before calling in;
//! this module only maps DOM names and flags onto canonical events.

use folio_core::event::{KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};

/// Modifier set from the DOM `shiftKey`/`ctrlKey`/`altKey`/`metaKey` flags.
#[must_use]
pub fn dom_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    let mut mods = Modifiers::NONE;
    mods.set(Modifiers::SHIFT, shift);
    mods.set(Modifiers::CTRL, ctrl);
    mods.set(Modifiers::ALT, alt);
    mods.set(Modifiers::SUPER, meta);
    mods
}

/// Map a DOM `KeyboardEvent.key` value to a key code.
///
/// Returns `None` for keys the portfolio has no use for (bare modifiers,
/// media keys, IME placeholders).
#[must_use]
pub fn normalize_dom_key(dom_key: &str, mods: Modifiers) -> Option<KeyCode> {
    if dom_key == "Tab" && mods.contains(Modifiers::SHIFT) {
        return Some(KeyCode::BackTab);
    }

    // `key` already carries shift for printable characters.
    let mut chars = dom_key.chars();
    if let Some(first) = chars.next()
        && chars.next().is_none()
    {
        return Some(KeyCode::Char(first));
    }

    let code = match dom_key {
        "Enter" => KeyCode::Enter,
        "Escape" | "Esc" => KeyCode::Escape,
        "Backspace" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "Delete" => KeyCode::Delete,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "ArrowUp" => KeyCode::Up,
        "ArrowDown" => KeyCode::Down,
        "ArrowLeft" => KeyCode::Left,
        "ArrowRight" => KeyCode::Right,
        "Spacebar" => KeyCode::Char(' '),
        other => KeyCode::F(parse_function_key(other)?),
    };
    Some(code)
}

fn parse_function_key(s: &str) -> Option<u8> {
    let rest = s.strip_prefix('F')?;
    rest.parse::<u8>().ok().filter(|n| (1..=24).contains(n))
}

/// Key press from a DOM `keydown`.
#[must_use]
pub fn dom_key_event(dom_key: &str, mods: Modifiers) -> Option<KeyEvent> {
    normalize_dom_key(dom_key, mods).map(|code| KeyEvent::new(code).with_modifiers(mods))
}

/// DOM `MouseEvent.button` numbering: 0 primary, 1 auxiliary, 2 secondary.
#[must_use]
pub fn dom_mouse_button(button: i16) -> Option<MouseButton> {
    match button {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}

/// Button press at cell `(x, y)`.
#[must_use]
pub fn dom_mouse_down(x: u16, y: u16, button: i16, mods: Modifiers) -> Option<MouseEvent> {
    let button = dom_mouse_button(button)?;
    Some(MouseEvent::new(MouseEventKind::Down(button), x, y).with_modifiers(mods))
}

/// One wheel notch at cell `(x, y)` along the dominant axis.
///
/// Zero deltas and non-finite values produce no event.
#[must_use]
pub fn dom_wheel(x: u16, y: u16, delta_x: f64, delta_y: f64, mods: Modifiers) -> Option<MouseEvent> {
    let dx = if delta_x.is_finite() { delta_x } else { 0.0 };
    let dy = if delta_y.is_finite() { delta_y } else { 0.0 };
    let kind = if dx.abs() > dy.abs() {
        if dx > 0.0 {
            MouseEventKind::ScrollRight
        } else {
            MouseEventKind::ScrollLeft
        }
    } else if dy > 0.0 {
        MouseEventKind::ScrollDown
    } else if dy < 0.0 {
        MouseEventKind::ScrollUp
    } else {
        return None;
    };
    Some(MouseEvent::new(kind, x, y).with_modifiers(mods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn printable_keys_map_to_chars() {
        assert_eq!(normalize_dom_key("q", Modifiers::NONE), Some(KeyCode::Char('q')));
        assert_eq!(normalize_dom_key(" ", Modifiers::NONE), Some(KeyCode::Char(' ')));
        assert_eq!(normalize_dom_key("]", Modifiers::NONE), Some(KeyCode::Char(']')));
    }

    #[test]
    fn named_keys() {
        assert_eq!(normalize_dom_key("ArrowDown", Modifiers::NONE), Some(KeyCode::Down));
        assert_eq!(normalize_dom_key("Esc", Modifiers::NONE), Some(KeyCode::Escape));
        assert_eq!(normalize_dom_key("F5", Modifiers::NONE), Some(KeyCode::F(5)));
        assert_eq!(normalize_dom_key("F25", Modifiers::NONE), None);
        assert_eq!(normalize_dom_key("Shift", Modifiers::SHIFT), None);
    }

    #[test]
    fn shift_tab_is_backtab() {
        let mods = dom_modifiers(true, false, false, false);
        assert_eq!(normalize_dom_key("Tab", mods), Some(KeyCode::BackTab));
        let event = dom_key_event("Tab", mods).unwrap();
        assert_eq!(event.code, KeyCode::BackTab);
        assert!(event.shift());
    }

    #[test]
    fn modifier_flags() {
        let mods = dom_modifiers(false, true, true, true);
        assert_eq!(mods, Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER);
        assert!(dom_key_event("c", mods).unwrap().ctrl());
    }

    #[test]
    fn mouse_buttons() {
        assert_eq!(
            dom_mouse_down(3, 4, 0, Modifiers::NONE),
            Some(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 3, 4))
        );
        assert_eq!(dom_mouse_button(2), Some(MouseButton::Right));
        assert_eq!(dom_mouse_down(0, 0, 4, Modifiers::NONE), None);
    }

    #[test]
    fn wheel_picks_dominant_axis() {
        let none = Modifiers::NONE;
        assert_eq!(dom_wheel(1, 1, 0.0, 120.0, none).unwrap().kind, MouseEventKind::ScrollDown);
        assert_eq!(dom_wheel(1, 1, 0.0, -3.0, none).unwrap().kind, MouseEventKind::ScrollUp);
        assert_eq!(dom_wheel(1, 1, -40.0, 2.0, none).unwrap().kind, MouseEventKind::ScrollLeft);
        assert_eq!(dom_wheel(1, 1, 40.0, 2.0, none).unwrap().kind, MouseEventKind::ScrollRight);
        assert_eq!(dom_wheel(1, 1, 0.0, 0.0, none), None);
        assert_eq!(dom_wheel(1, 1, f64::NAN, f64::NAN, none), None);
    }
}
