#![forbid(unsafe_code)]

//! Terminal painting of a [`ViewTree`].
//!
//! Regions come from a [`Flex`] split (desktop) or the full area (mobile),
//! each inset by one cell. Columns are laid out in `u32` content rows, so a
//! catalog taller than a `u16` screen coordinate still scrolls. Only the
//! children that overlap the visible window are drawn: each one is painted
//! into a scratch frame of its own height and the visible slice is blitted,
//! hit cells included, into the screen frame. Tag rows scroll horizontally
//! the same way.
//!
//! Heights given in dp are converted at [`ROW_HEIGHT_DP`] per row.
//! [`measure`] runs the same layout without drawing so the model can clamp
//! scroll offsets and keep the focused card in view.

use crate::view::{CardView, ColumnView, ProfileView, ViewNode, ViewTree};
use folio_core::geometry::{Rect, Sides};
use folio_layout::Flex;
use folio_render::frame::{Frame, HitData, HitId, HitRegion};
use folio_style::{Style, Theme};
use folio_widgets::{
    Alignment, Avatar, Block, BorderType, Button, Chip, ImagePlaceholder, Paragraph, Rule,
    Widget, chips_width,
};

/// Height of one terminal row in dp.
pub const ROW_HEIGHT_DP: u16 = 16;

/// Hit data stored on a card's tag row.
pub const TAG_ROW_DATA: HitData = 1;

const REGION_MARGIN: u16 = 1;
const CARD_PADDING: Sides = Sides::horizontal(2);
const PLACEHOLDER_ROWS: u16 = 5;
const CHIP_GAP: u16 = 1;

/// Rows for a dp height; any non-zero height takes at least one row.
pub fn rows_for_dp(dp: u16) -> u16 {
    if dp == 0 { 0 } else { (dp / ROW_HEIGHT_DP).max(1) }
}

/// Interaction state the painter needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaintState<'a> {
    /// Vertical offset of the scrollable column, in content rows.
    pub scroll: u32,
    /// Card whose button has keyboard focus.
    pub focused: Option<usize>,
    /// Horizontal tag offset per card index.
    pub tag_scroll: &'a [u16],
}

impl PaintState<'_> {
    fn tag_offset(&self, index: usize) -> u16 {
        self.tag_scroll.get(index).copied().unwrap_or(0)
    }
}

/// Placement of one card inside the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMetrics {
    pub index: usize,
    /// First row, in content coordinates.
    pub top: u32,
    pub height: u16,
    /// Visible width of the tag row.
    pub tag_viewport: u16,
    /// Full width of the chips.
    pub tag_content: u16,
}

impl CardMetrics {
    pub fn max_tag_scroll(&self) -> u16 {
        self.tag_content.saturating_sub(self.tag_viewport)
    }

    /// Row of the action button, in content coordinates.
    pub fn button_row(&self) -> u32 {
        self.bottom().saturating_sub(2)
    }

    /// One past the last row, in content coordinates.
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(u32::from(self.height))
    }
}

/// Geometry of the scrollable region for a given screen area.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutMetrics {
    /// Screen rectangle the scrollable content is shown through.
    pub viewport: Rect,
    pub content_height: u32,
    pub cards: Vec<CardMetrics>,
}

impl LayoutMetrics {
    pub fn max_scroll(&self) -> u32 {
        self.content_height.saturating_sub(u32::from(self.viewport.height))
    }

    /// Screen row showing `content_row` at `scroll`, if it is in view.
    pub fn screen_row(&self, content_row: u32, scroll: u32) -> Option<u16> {
        let offset = content_row.checked_sub(scroll.min(self.max_scroll()))?;
        let offset = u16::try_from(offset).ok()?;
        (offset < self.viewport.height).then(|| self.viewport.y + offset)
    }

    pub fn card(&self, index: usize) -> Option<&CardMetrics> {
        self.cards.iter().find(|card| card.index == index)
    }
}

/// Compute the scrollable region's geometry without drawing.
pub fn measure(tree: &ViewTree, area: Rect) -> LayoutMetrics {
    regions(&tree.root, area)
        .into_iter()
        .find(|(_, column)| column.scrollable)
        .map(|(rect, column)| {
            let slots = layout_column(column, rect.width);
            LayoutMetrics {
                viewport: rect,
                content_height: content_height(column, rect.width),
                cards: card_metrics(column, &slots, rect.width),
            }
        })
        .unwrap_or_default()
}

/// Paint the whole tree into `frame`.
pub fn paint(tree: &ViewTree, frame: &mut Frame, state: &PaintState<'_>, theme: &Theme) {
    let _span = tracing::debug_span!(
        "folio.paint",
        layout = %tree.layout,
        width = frame.width(),
        height = frame.height()
    )
    .entered();

    let area = frame.bounds();
    frame.buffer.fill(area, theme.base_style().cell());
    for (rect, column) in regions(&tree.root, area) {
        if rect.is_empty() {
            continue;
        }
        if column.scrollable {
            paint_scrolling_column(frame, rect, column, state, theme);
        } else {
            paint_fixed_column(frame, rect, column, state, theme);
        }
    }
}

fn regions(root: &ViewNode, area: Rect) -> Vec<(Rect, &ColumnView)> {
    match root {
        ViewNode::Split { left, right } => {
            let rects = Flex::horizontal()
                .percentages([
                    f32::from(left.width_percent),
                    f32::from(right.width_percent),
                ])
                .split(area);
            rects
                .into_iter()
                .zip([&left.column, &right.column])
                .map(|(rect, column)| (rect.inner(Sides::all(REGION_MARGIN)), column))
                .collect()
        }
        ViewNode::Column(column) => vec![(area.inner(Sides::all(REGION_MARGIN)), column)],
        _ => Vec::new(),
    }
}

/// `(top, height)` of each child, relative to the column's first row.
fn layout_column(column: &ColumnView, width: u16) -> Vec<(u32, u16)> {
    let spacing = u32::from(rows_for_dp(column.spacing_dp));
    let mut y = 0u32;
    let mut slots = Vec::with_capacity(column.children.len());
    for (i, child) in column.children.iter().enumerate() {
        if i > 0 {
            y = y.saturating_add(spacing);
        }
        let height = node_height(child, width);
        slots.push((y, height));
        y = y.saturating_add(u32::from(height));
    }
    slots
}

fn content_height(column: &ColumnView, width: u16) -> u32 {
    layout_column(column, width)
        .last()
        .map_or(0, |&(top, height)| top.saturating_add(u32::from(height)))
}

fn card_metrics(column: &ColumnView, slots: &[(u32, u16)], width: u16) -> Vec<CardMetrics> {
    column
        .children
        .iter()
        .zip(slots)
        .filter_map(|(child, &(top, height))| match child {
            ViewNode::Card(card) => Some(CardMetrics {
                index: card.index,
                top,
                height,
                tag_viewport: card_inner_width(width),
                tag_content: tags_width(card),
            }),
            _ => None,
        })
        .collect()
}

fn node_height(node: &ViewNode, width: u16) -> u16 {
    match node {
        ViewNode::Spacer { height_dp } => rows_for_dp(*height_dp),
        ViewNode::Divider | ViewNode::SectionHeader { .. } => 1,
        ViewNode::Profile(profile) => profile_height(profile, width),
        ViewNode::Card(card) => card_height(card, width),
        ViewNode::Column(column) => {
            u16::try_from(content_height(column, width)).unwrap_or(u16::MAX)
        }
        ViewNode::Split { .. } => 0,
    }
}

fn wrapped_rows(text: &str, width: u16) -> u16 {
    Paragraph::new(text).wrap(true).line_count(width)
}

fn stack(rows: &[u16]) -> u16 {
    rows.iter().fold(0u16, |acc, &r| acc.saturating_add(r))
}

fn profile_height(profile: &ProfileView, width: u16) -> u16 {
    stack(&[
        Avatar::HEIGHT,
        1,
        wrapped_rows(&profile.greeting, width),
        wrapped_rows(&profile.role, width),
        1,
        wrapped_rows(&profile.bio, width),
        1,
        1,
    ])
}

fn card_inner_width(width: u16) -> u16 {
    width.saturating_sub(2 + CARD_PADDING.horizontal_sum())
}

fn tags_width(card: &CardView) -> u16 {
    chips_width(card.tags.iter().map(String::as_str), CHIP_GAP)
}

fn card_height(card: &CardView, width: u16) -> u16 {
    let inner = card_inner_width(width);
    // border, placeholder, gap, title, description, gap, tags, gap, button, border
    stack(&[
        2,
        PLACEHOLDER_ROWS,
        1,
        wrapped_rows(&card.title, inner),
        wrapped_rows(&card.description, inner),
        1,
        1,
        1,
        1,
    ])
}

fn paint_fixed_column(
    frame: &mut Frame,
    rect: Rect,
    column: &ColumnView,
    state: &PaintState<'_>,
    theme: &Theme,
) {
    let offset = if column.center_vertically {
        let slack = u32::from(rect.height).saturating_sub(content_height(column, rect.width));
        u16::try_from(slack / 2).unwrap_or(0)
    } else {
        0
    };
    let window = Rect::new(
        rect.x,
        rect.y.saturating_add(offset),
        rect.width,
        rect.height - offset,
    );
    paint_column_window(frame, window, column, 0, state, theme);
}

fn paint_scrolling_column(
    frame: &mut Frame,
    rect: Rect,
    column: &ColumnView,
    state: &PaintState<'_>,
    theme: &Theme,
) {
    let max_scroll = content_height(column, rect.width).saturating_sub(u32::from(rect.height));
    paint_column_window(frame, rect, column, state.scroll.min(max_scroll), state, theme);
}

/// Paint the content rows `scroll..scroll + window.height` of `column`
/// into `window`.
fn paint_column_window(
    frame: &mut Frame,
    window: Rect,
    column: &ColumnView,
    scroll: u32,
    state: &PaintState<'_>,
    theme: &Theme,
) {
    if window.is_empty() {
        return;
    }
    let end = scroll.saturating_add(u32::from(window.height));
    frame.buffer.push_scissor(window);
    for (child, (top, height)) in column.children.iter().zip(layout_column(column, window.width)) {
        let bottom = top.saturating_add(u32::from(height));
        if height == 0 || bottom <= scroll || top >= end {
            continue;
        }
        // Both offsets are below `height` and `window.height` respectively.
        let skip = u16::try_from(scroll.saturating_sub(top)).unwrap_or(height);
        let row = u16::try_from(top.saturating_sub(scroll)).unwrap_or(window.height);

        let mut scratch = Frame::with_hit_grid(window.width, height);
        let bounds = scratch.bounds();
        scratch.buffer.fill(bounds, theme.base_style().cell());
        paint_node(&mut scratch, bounds, child, state, theme);
        frame.blit(
            &scratch,
            Rect::new(0, skip, window.width, height - skip),
            window.x,
            window.y.saturating_add(row),
        );
    }
    frame.buffer.pop_scissor();
}

fn paint_node(
    frame: &mut Frame,
    rect: Rect,
    node: &ViewNode,
    state: &PaintState<'_>,
    theme: &Theme,
) {
    match node {
        ViewNode::Spacer { .. } | ViewNode::Split { .. } => {}
        ViewNode::Divider => Rule::new()
            .style(Style::new().fg(theme.divider))
            .render(rect, frame),
        ViewNode::SectionHeader { text } => Paragraph::new(text)
            .style(theme.accent_style().bold())
            .render(rect, frame),
        ViewNode::Profile(profile) => paint_profile(frame, rect, profile, theme),
        ViewNode::Card(card) => paint_card(frame, rect, card, state, theme),
        ViewNode::Column(column) => paint_column_window(frame, rect, column, 0, state, theme),
    }
}

fn paint_profile(frame: &mut Frame, area: Rect, profile: &ProfileView, theme: &Theme) {
    let width = area.width;
    let mut y = area.y;

    Avatar::new(profile.avatar.glyph(), theme.avatar_bg)
        .icon_style(Style::new().fg(theme.primary))
        .render(Rect::new(area.x, y, width, Avatar::HEIGHT), frame);
    y = y.saturating_add(Avatar::HEIGHT + 1);

    let texts = [
        (&profile.greeting, Style::new().fg(theme.on_background).bold()),
        (&profile.role, theme.accent_style()),
    ];
    for (text, style) in texts {
        let rows = wrapped_rows(text, width);
        Paragraph::new(text)
            .wrap(true)
            .alignment(Alignment::Center)
            .style(style)
            .render(Rect::new(area.x, y, width, rows), frame);
        y = y.saturating_add(rows);
    }
    y = y.saturating_add(1);

    let bio_rows = wrapped_rows(&profile.bio, width);
    Paragraph::new(&profile.bio)
        .wrap(true)
        .alignment(Alignment::Center)
        .style(Style::new().fg(theme.text_soft))
        .render(Rect::new(area.x, y, width, bio_rows), frame);
    y = y.saturating_add(bio_rows).saturating_add(1);

    let row = Rect::new(area.x, y, width, 1);
    let total = chips_width(profile.skills.iter().map(String::as_str), CHIP_GAP);
    let start = row.x + row.width.saturating_sub(total) / 2;
    paint_chips(frame, row, start, &profile.skills, theme);
}

fn paint_chips(frame: &mut Frame, row: Rect, start_x: u16, labels: &[String], theme: &Theme) {
    let mut x = start_x;
    for label in labels {
        if x >= row.right() {
            break;
        }
        let chip = Chip::new(label)
            .style(Style::new().fg(theme.on_surface))
            .outline_style(Style::new().fg(theme.outline));
        chip.render(Rect::new(x, row.y, row.right() - x, 1), frame);
        x = x.saturating_add(chip.width()).saturating_add(CHIP_GAP);
    }
}

fn paint_card(
    frame: &mut Frame,
    area: Rect,
    card: &CardView,
    state: &PaintState<'_>,
    theme: &Theme,
) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(theme.outline))
        .style(theme.surface_style());
    block.render(area, frame);
    let inner = block.inner(area).inner(CARD_PADDING);
    if inner.is_empty() {
        return;
    }
    let id = HitId::new(u32::try_from(card.index).unwrap_or(u32::MAX));
    let mut y = inner.y;

    ImagePlaceholder::new(card.icon.glyph(), &card.image_caption)
        .style(Style::new().fg(theme.placeholder_fg).bg(theme.placeholder_bg))
        .render(Rect::new(inner.x, y, inner.width, PLACEHOLDER_ROWS), frame);
    y = y.saturating_add(PLACEHOLDER_ROWS + 1);

    let title_rows = wrapped_rows(&card.title, inner.width);
    Paragraph::new(&card.title)
        .wrap(true)
        .style(Style::new().fg(theme.on_surface).bold())
        .render(Rect::new(inner.x, y, inner.width, title_rows), frame);
    y = y.saturating_add(title_rows);

    let description_rows = wrapped_rows(&card.description, inner.width);
    Paragraph::new(&card.description)
        .wrap(true)
        .style(Style::new().fg(theme.text_muted))
        .render(Rect::new(inner.x, y, inner.width, description_rows), frame);
    y = y.saturating_add(description_rows).saturating_add(1);

    let tag_row = Rect::new(inner.x, y, inner.width, 1);
    paint_tag_row(frame, tag_row, card, state.tag_offset(card.index), theme);
    frame.register_hit(tag_row, id, HitRegion::Content, TAG_ROW_DATA);
    y = y.saturating_add(2);

    let button = Button::new(&card.action_label, id)
        .data(card.index as HitData)
        .style(theme.button_style())
        .focused_style(theme.button_focused_style())
        .focused(state.focused == Some(card.index));
    let button_width = button.width().min(inner.width);
    button.render(
        Rect::new(inner.right() - button_width, y, button_width, 1),
        frame,
    );
}

/// Chips laid out off-screen at full width, then a window blitted in.
fn paint_tag_row(frame: &mut Frame, row: Rect, card: &CardView, offset: u16, theme: &Theme) {
    let total = tags_width(card);
    if total == 0 || row.is_empty() {
        return;
    }
    let mut strip = Frame::new(total, 1);
    let strip_row = strip.bounds();
    strip.buffer.fill(strip_row, theme.surface_style().cell());
    paint_chips(&mut strip, strip_row, 0, &card.tags, theme);

    let offset = offset.min(total.saturating_sub(row.width));
    let visible = row.width.min(total - offset);
    frame.buffer.push_scissor(row);
    frame.blit(&strip, Rect::new(offset, 0, visible, 1), row.x, row.y);
    frame.buffer.pop_scissor();
}
