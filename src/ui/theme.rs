use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub error: Color,     // Red
    pub keyword: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub label: Color,     // Yellow for label definitions and jumps
    pub temp: Color,      // Cyan for temporaries
    pub structure: Color, // Pink for sequence/block markers
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),
    number: Color::Rgb(250, 179, 135),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),
    label: Color::Rgb(249, 226, 175),
    temp: Color::Rgb(148, 226, 213),
    structure: Color::Rgb(245, 194, 231),
};
