use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::collision::CollisionKind;
use crate::ui::theme::Theme;

/// Draws the game-over prompt as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<CollisionKind>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 60, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::new()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(death_reason_text(death_reason)),
        Line::from(""),
        Line::from(format!("Your score is {score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Play again"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn death_reason_text(reason: Option<CollisionKind>) -> &'static str {
    match reason {
        Some(CollisionKind::Boundary) => "You hit the wall",
        Some(CollisionKind::SelfBody) => "You ran into yourself",
        None => "",
    }
}

fn centered_popup(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::collision::CollisionKind;

    use super::{centered_popup, death_reason_text};

    #[test]
    fn popup_is_centered_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 60, 50);

        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn death_reason_names_the_collision() {
        assert_eq!(
            death_reason_text(Some(CollisionKind::Boundary)),
            "You hit the wall"
        );
        assert_eq!(death_reason_text(None), "");
    }
}
