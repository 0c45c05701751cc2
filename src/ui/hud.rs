use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::collision::CollisionKind;
use crate::game::Snapshot;
use crate::ui::theme::Theme;

const HUD_HEIGHT: u16 = 1;

/// Values shown by the HUD that are not part of the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    pub death_reason: Option<CollisionKind>,
    pub tick_count: u64,
}

/// Returns the area left for the play field once the HUD row is taken.
#[must_use]
pub fn play_area(area: Rect) -> Rect {
    let [play, _] = split(area);
    play
}

/// Renders the status row under the field and returns the field area.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    info: &HudInfo,
    theme: &Theme,
) -> Rect {
    let [play, status] = split(area);

    frame.render_widget(
        Paragraph::new(status_line(snapshot, info, usize::from(status.width), theme)),
        status,
    );

    play
}

fn split(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(area)
}

fn status_line<'a>(
    snapshot: &Snapshot,
    info: &HudInfo,
    width: usize,
    theme: &Theme,
) -> Line<'a> {
    let left = if snapshot.over {
        "GAME OVER".to_owned()
    } else {
        format!("SCORE {}", snapshot.score)
    };
    let right = format!(
        "len {}  {:?}  t {}",
        snapshot.segments.len(),
        snapshot.direction,
        info.tick_count
    );

    let used = left.width() + right.width();
    let padding = " ".repeat(width.saturating_sub(used).max(1));

    Line::from(vec![
        Span::styled(
            left,
            Style::new()
                .fg(theme.hud_text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(padding),
        Span::styled(right, Style::new().fg(theme.hud_muted)),
    ])
}
