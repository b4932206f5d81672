#![forbid(unsafe_code)]

//! The portfolio model.
//!
//! [`PortfolioApp`] keeps the shared content, the current layout variant and
//! its view tree, and the interaction state (scroll, focus, tag offsets).
//! The tree is rebuilt only when a resize changes the variant.

use crate::catalog::PortfolioContent;
use crate::paint::{self, LayoutMetrics, PaintState, TAG_ROW_DATA};
use crate::view::{ViewTree, render_view};
use folio_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use folio_core::geometry::Rect;
use folio_layout::{DisplayMetrics, LayoutVariant};
use folio_render::frame::{Frame, HitId, HitRegion};
use folio_runtime::{Cmd, Model};
use folio_style::Theme;
use std::sync::Arc;
use tracing::{debug, info};

/// Rows moved per wheel notch.
const WHEEL_STEP: u16 = 3;
/// Columns moved per horizontal tag scroll.
const TAG_STEP: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Resize { width: u16, height: u16 },
    Key(KeyEvent),
    Mouse(MouseEvent),
    Quit,
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Resize { width, height } => Msg::Resize { width, height },
            Event::Key(key) if key.kind == KeyEventKind::Release => Msg::Noop,
            Event::Key(key) if key.ctrl() && key.is_char('c') => Msg::Quit,
            Event::Key(key) => Msg::Key(key),
            Event::Mouse(mouse) => Msg::Mouse(mouse),
            Event::Focus(_) => Msg::Noop,
        }
    }
}

/// Interactive portfolio page.
#[derive(Debug, Clone)]
pub struct PortfolioApp {
    content: Arc<PortfolioContent>,
    metrics: DisplayMetrics,
    theme: Theme,
    width: u16,
    height: u16,
    layout: LayoutVariant,
    tree: ViewTree,
    scroll: u32,
    focused: Option<usize>,
    tag_scroll: Vec<u16>,
}

impl PortfolioApp {
    /// A model with no known size yet; it lays out as mobile until the
    /// first resize.
    pub fn new(content: Arc<PortfolioContent>, metrics: DisplayMetrics) -> Self {
        let layout = LayoutVariant::Mobile;
        let tree = render_view(&content.profile, &content.catalog, layout);
        let tag_scroll = vec![0; content.catalog.len()];
        Self {
            content,
            metrics,
            theme: Theme::dark(),
            width: 0,
            height: 0,
            layout,
            tree,
            scroll: 0,
            focused: None,
            tag_scroll,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn content(&self) -> &PortfolioContent {
        &self.content
    }

    pub fn layout(&self) -> LayoutVariant {
        self.layout
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn scroll(&self) -> u32 {
        self.scroll
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn tag_scroll(&self, card: usize) -> u16 {
        self.tag_scroll.get(card).copied().unwrap_or(0)
    }

    /// Geometry of the scrollable region at the current size.
    pub fn layout_metrics(&self) -> LayoutMetrics {
        paint::measure(&self.tree, Rect::from_size(self.width, self.height))
    }

    /// What a click at (x, y) would land on in the current frame.
    pub fn hit_at(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, u64)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let mut frame = Frame::with_hit_grid(self.width, self.height);
        self.view(&mut frame);
        frame.hit_test(x, y)
    }

    fn paint_state(&self) -> PaintState<'_> {
        PaintState {
            scroll: self.scroll,
            focused: self.focused,
            tag_scroll: &self.tag_scroll,
        }
    }

    fn card_count(&self) -> usize {
        self.content.catalog.len()
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;

        let layout = self.metrics.select(width);
        if layout != self.layout {
            info!(
                from = %self.layout,
                to = %layout,
                width_dp = self.metrics.width_dp(width),
                "layout variant changed"
            );
            self.layout = layout;
            self.tree = render_view(&self.content.profile, &self.content.catalog, layout);
            self.scroll = 0;
            self.tag_scroll.iter_mut().for_each(|offset| *offset = 0);
        }
        self.clamp_offsets();
    }

    fn clamp_offsets(&mut self) {
        let metrics = self.layout_metrics();
        self.scroll = self.scroll.min(metrics.max_scroll());
        for card in &metrics.cards {
            if let Some(offset) = self.tag_scroll.get_mut(card.index) {
                *offset = (*offset).min(card.max_tag_scroll());
            }
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = i64::from(self.layout_metrics().max_scroll());
        let next = (i64::from(self.scroll) + i64::from(delta)).clamp(0, max);
        self.scroll = u32::try_from(next).unwrap_or(0);
    }

    fn scroll_tags(&mut self, card: usize, delta: i32) {
        let metrics = self.layout_metrics();
        let Some(max) = metrics.card(card).map(|c| i32::from(c.max_tag_scroll())) else {
            return;
        };
        if let Some(offset) = self.tag_scroll.get_mut(card) {
            let next = (i32::from(*offset) + delta).clamp(0, max);
            *offset = u16::try_from(next).unwrap_or(0);
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.card_count();
        if count == 0 {
            return;
        }
        let next = match (self.focused, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.focused = Some(next);
        self.reveal_card(next);
        debug!(card = next, "focus moved");
    }

    /// Scroll so the card is visible, or at least its button.
    fn reveal_card(&mut self, index: usize) {
        let metrics = self.layout_metrics();
        let Some(card) = metrics.card(index) else {
            return;
        };
        let viewport = u32::from(metrics.viewport.height);
        let bottom = card.bottom();
        if u32::from(card.height) <= viewport {
            if card.top < self.scroll {
                self.scroll = card.top;
            } else if bottom > self.scroll.saturating_add(viewport) {
                self.scroll = bottom - viewport;
            }
        } else {
            let row = card.button_row();
            if row < self.scroll || row >= self.scroll.saturating_add(viewport) {
                self.scroll = row.saturating_sub(viewport.saturating_sub(1));
            }
        }
        self.scroll = self.scroll.min(metrics.max_scroll());
    }

    fn activate(&self, card: usize) -> Cmd<Msg> {
        match self.tree.card(card) {
            Some(view) => {
                info!(card, uri = view.action.uri(), "card activated");
                view.action.to_cmd()
            }
            None => Cmd::none(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        let page = i32::from(self.layout_metrics().viewport.height.saturating_sub(1).max(1));
        match key.code {
            KeyCode::Char('q') | KeyCode::Escape => return Cmd::quit(),
            KeyCode::Tab if key.modifiers.contains(Modifiers::SHIFT) => self.move_focus(false),
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(card) = self.focused {
                    return self.activate(card);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.layout_metrics().max_scroll(),
            KeyCode::Char('[') => {
                if let Some(card) = self.focused {
                    self.scroll_tags(card, -i32::from(TAG_STEP));
                }
            }
            KeyCode::Char(']') => {
                if let Some(card) = self.focused {
                    self.scroll_tags(card, i32::from(TAG_STEP));
                }
            }
            _ => {}
        }
        Cmd::none()
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Cmd<Msg> {
        let hit = self.hit_at(mouse.x, mouse.y);
        let tag_row = match hit {
            Some((id, HitRegion::Content, TAG_ROW_DATA)) => Some(id.id() as usize),
            _ => None,
        };
        let shift = mouse.modifiers.contains(Modifiers::SHIFT);
        let wheel = i32::from(WHEEL_STEP);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((id, HitRegion::Button, _)) = hit {
                    return self.activate(id.id() as usize);
                }
            }
            MouseEventKind::ScrollLeft => {
                if let Some(card) = tag_row {
                    self.scroll_tags(card, -i32::from(TAG_STEP));
                }
            }
            MouseEventKind::ScrollRight => {
                if let Some(card) = tag_row {
                    self.scroll_tags(card, i32::from(TAG_STEP));
                }
            }
            MouseEventKind::ScrollUp => match tag_row {
                Some(card) if shift => self.scroll_tags(card, -i32::from(TAG_STEP)),
                _ => self.scroll_by(-wheel),
            },
            MouseEventKind::ScrollDown => match tag_row {
                Some(card) if shift => self.scroll_tags(card, i32::from(TAG_STEP)),
                _ => self.scroll_by(wheel),
            },
            _ => {}
        }
        Cmd::none()
    }
}

impl Model for PortfolioApp {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        info!(
            projects = self.card_count(),
            cell_width_dp = self.metrics.cell_width_dp,
            "portfolio ready"
        );
        Cmd::none()
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Resize { width, height } => {
                self.resize(width, height);
                Cmd::none()
            }
            Msg::Key(key) => self.handle_key(key),
            Msg::Mouse(mouse) => self.handle_mouse(mouse),
            Msg::Quit => Cmd::quit(),
            Msg::Noop => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        paint::paint(&self.tree, frame, &self.paint_state(), &self.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> PortfolioApp {
        PortfolioApp::new(Arc::new(PortfolioContent::builtin()), DisplayMetrics::terminal())
    }

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code))
    }

    #[test]
    fn starts_mobile_until_sized() {
        let app = app();
        assert_eq!(app.layout(), LayoutVariant::Mobile);
        assert_eq!(app.size(), (0, 0));
        assert_eq!(app.hit_at(0, 0), None);
    }

    #[test]
    fn resize_selects_layout_from_columns() {
        let mut app = app();
        app.update(Msg::Resize { width: 101, height: 40 });
        assert_eq!(app.layout(), LayoutVariant::Desktop);
        app.update(Msg::Resize { width: 100, height: 40 });
        assert_eq!(app.layout(), LayoutVariant::Mobile);
    }

    #[test]
    fn ctrl_c_and_release_mapping() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert_eq!(Msg::from(Event::Key(ctrl_c)), Msg::Quit);
        let released = KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release);
        assert_eq!(Msg::from(Event::Key(released)), Msg::Noop);
        assert_eq!(Msg::from(Event::Focus(true)), Msg::Noop);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert_eq!(app.update(key(KeyCode::Char('q'))), Cmd::Quit);
        assert_eq!(app.update(key(KeyCode::Escape)), Cmd::Quit);
        assert_eq!(app.update(Msg::Quit), Cmd::Quit);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut app = app();
        app.update(Msg::Resize { width: 80, height: 24 });
        app.update(key(KeyCode::BackTab));
        assert_eq!(app.focused(), Some(2));
        app.update(key(KeyCode::Tab));
        assert_eq!(app.focused(), Some(0));
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Tab));
        assert_eq!(app.focused(), Some(0));
    }

    #[test]
    fn enter_without_focus_does_nothing() {
        let mut app = app();
        app.update(Msg::Resize { width: 80, height: 24 });
        assert!(app.update(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn focus_scrolls_button_into_view() {
        let mut app = app();
        app.update(Msg::Resize { width: 80, height: 24 });
        app.update(key(KeyCode::BackTab));

        let metrics = app.layout_metrics();
        let row = metrics.card(2).map(|c| c.button_row()).unwrap_or(0);
        assert!(row >= app.scroll());
        assert!(row < app.scroll() + u32::from(metrics.viewport.height));
    }

    #[test]
    fn scroll_keys_clamp() {
        let mut app = app();
        app.update(Msg::Resize { width: 80, height: 24 });
        let max = app.layout_metrics().max_scroll();
        assert!(max > 0);

        app.update(key(KeyCode::Up));
        assert_eq!(app.scroll(), 0);
        app.update(key(KeyCode::Char('j')));
        assert_eq!(app.scroll(), 1);
        app.update(key(KeyCode::End));
        assert_eq!(app.scroll(), max);
        app.update(key(KeyCode::PageDown));
        assert_eq!(app.scroll(), max);
        app.update(key(KeyCode::Home));
        assert_eq!(app.scroll(), 0);
    }

    #[test]
    fn layout_change_resets_offsets() {
        let mut app = app();
        app.update(Msg::Resize { width: 80, height: 24 });
        app.update(key(KeyCode::End));
        assert!(app.scroll() > 0);

        app.update(Msg::Resize { width: 140, height: 24 });
        assert_eq!(app.layout(), LayoutVariant::Desktop);
        assert_eq!(app.scroll(), 0);
    }

    #[test]
    fn shrinking_viewport_keeps_scroll_in_range() {
        let mut app = app();
        app.update(Msg::Resize { width: 80, height: 20 });
        app.update(key(KeyCode::End));
        app.update(Msg::Resize { width: 80, height: 200 });
        assert_eq!(app.scroll(), app.layout_metrics().max_scroll());
    }
}
