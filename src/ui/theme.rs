use ratatui::style::Color;

/// Colors used by the terminal front-end.
#[derive(Debug)]
pub struct Theme {
    pub field_bg: Color,
    pub border_fg: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub hud_text: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
}

pub const THEME: Theme = Theme {
    field_bg: Color::Rgb(0x2B, 0x2B, 0x2B),
    border_fg: Color::Gray,
    snake_head: Color::Rgb(0xA9, 0xC4, 0x8F),
    snake_body: Color::Rgb(0x78, 0x94, 0x61),
    food: Color::Rgb(0xE0, 0x4F, 0x3F),
    hud_text: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Red,
};
