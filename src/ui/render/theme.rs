use ratatui::style::{Color, Modifier, Style};

pub(super) const OK_RGB: (u8, u8, u8) = (0x04, 0xb5, 0x75);
pub(super) const ERR_RGB: (u8, u8, u8) = (0xff, 0x5f, 0x5f);
pub(super) const TITLE_RGB: (u8, u8, u8) = (0x7d, 0x56, 0xf4);

pub(super) const LABEL_COLUMN_WIDTH: usize = 15;

pub(super) const fn rgb(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub(super) fn ok_style() -> Style {
    Style::default().fg(rgb(OK_RGB))
}

pub(super) fn err_style() -> Style {
    Style::default().fg(rgb(ERR_RGB))
}

pub(super) fn title_style() -> Style {
    Style::default()
        .fg(rgb(TITLE_RGB))
        .add_modifier(Modifier::BOLD)
}
