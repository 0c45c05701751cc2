use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::COLUMNS_PER_HITBOX;
use crate::game::Snapshot;
use crate::geometry::{Bounds, Position};
use crate::ui::hud::{HudInfo, play_area, render_hud};
use crate::ui::menu::render_game_over_menu;
use crate::ui::theme::{THEME, Theme};

const GLYPH_SEGMENT: &str = "█";
const GLYPH_FOOD: &str = "●";

/// Static facts about the field needed to map units onto cells.
#[derive(Debug, Clone, Copy)]
pub struct FieldView {
    pub bounds: Bounds,
    pub hitbox_size: f64,
}

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, field: FieldView, hud_info: &HudInfo) {
    let area = frame.area();
    let field_area = render_hud(frame, area, snapshot, hud_info, &THEME);

    let block = Block::bordered()
        .border_style(Style::new().fg(THEME.border_fg))
        .style(Style::new().bg(THEME.field_bg));
    let inner = block.inner(field_area);
    frame.render_widget(block, field_area);

    render_food(frame, inner, snapshot, field, &THEME);
    render_snake(frame, inner, snapshot, field, &THEME);

    if snapshot.over {
        render_game_over_menu(
            frame,
            field_area,
            snapshot.score,
            hud_info.death_reason,
            &THEME,
        );
    }
}

/// Play-field size that exactly fills the bordered field of a terminal of
/// `area` cells.
#[must_use]
pub fn fitted_bounds(area: Rect, hitbox_size: f64) -> Bounds {
    let inner = Block::bordered().inner(play_area(area));
    Bounds {
        width: f64::from(inner.width / COLUMNS_PER_HITBOX) * hitbox_size,
        height: f64::from(inner.height) * hitbox_size,
    }
}

fn render_food(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &Snapshot,
    field: FieldView,
    theme: &Theme,
) {
    let Some((x, y)) = field_to_terminal(inner, field, snapshot.food.position) else {
        return;
    };

    let style = Style::new().fg(theme.food).bg(theme.field_bg);
    frame.buffer_mut().set_string(x, y, GLYPH_FOOD, style);
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &Snapshot,
    field: FieldView,
    theme: &Theme,
) {
    let buffer = frame.buffer_mut();

    // Tail first so the head is painted last and stays visible.
    for segment in snapshot.segments.iter().rev() {
        let Some((x, y)) = field_to_terminal(inner, field, segment.position) else {
            continue;
        };

        let style = if segment.pos == 0 {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body)
        };

        for column in 0..COLUMNS_PER_HITBOX {
            let cell_x = x.saturating_add(column);
            if cell_x < inner.right() {
                buffer.set_string(cell_x, y, GLYPH_SEGMENT, style);
            }
        }
    }
}

fn field_to_terminal(inner: Rect, field: FieldView, position: Position) -> Option<(u16, u16)> {
    if !field.bounds.contains(position) {
        return None;
    }

    let column = position.x / field.hitbox_size * f64::from(COLUMNS_PER_HITBOX);
    let row = position.y / field.hitbox_size;
    let x_offset = u16::try_from(column.round() as i64).ok()?;
    let y_offset = u16::try_from(row.round() as i64).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
