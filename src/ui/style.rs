use iced::widget::{button, container, pick_list, text_input};
use iced::{Background, Border, Color, Theme};

// `Color::from_rgb8` is not `const` in iced 0.13; same conversion as a const fn.
const fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

pub const BG: Color = rgb8(17, 19, 22);
pub const SURFACE_0: Color = rgb8(22, 25, 29);
pub const SURFACE_1: Color = rgb8(28, 32, 37);
pub const SURFACE_2: Color = rgb8(36, 41, 47);
pub const SURFACE_3: Color = rgb8(46, 52, 60);
pub const BORDER: Color = rgb8(58, 64, 72);
pub const TEXT: Color = rgb8(236, 234, 228);
pub const TEXT_MUTED: Color = rgb8(148, 146, 138);
// trail orange
pub const PRIMARY: Color = rgb8(232, 128, 38);
pub const PRIMARY_HOVER: Color = rgb8(245, 148, 66);
pub const SUCCESS: Color = rgb8(86, 186, 112);
pub const DANGER: Color = rgb8(221, 84, 80);
pub const DANGER_HOVER: Color = rgb8(236, 106, 102);

const RADIUS: f32 = 8.0;

pub fn app_theme() -> Theme {
    Theme::custom(
        "ATV Admin".to_string(),
        iced::theme::Palette {
            background: BG,
            text: TEXT,
            primary: PRIMARY,
            success: SUCCESS,
            danger: DANGER,
        },
    )
}

fn rounded(radius: f32, color: Color) -> Border {
    Border {
        radius: radius.into(),
        width: 1.0,
        color,
    }
}

pub fn surface_style(color: Color, border_radius: f32) -> container::Style {
    flat_surface_style(color).border(rounded(border_radius, BORDER))
}

pub fn flat_surface_style(color: Color) -> container::Style {
    container::Style::default()
        .background(Background::Color(color))
        .color(TEXT)
}

pub fn section_tab_button(active: bool, _theme: &Theme, status: button::Status) -> button::Style {
    let bg = match (status, active) {
        (button::Status::Active, true) | (button::Status::Hovered, _) => SURFACE_1,
        (button::Status::Pressed, _) => SURFACE_2,
        _ => SURFACE_0,
    };

    button::Style {
        background: Some(Background::Color(bg)),
        text_color: if active { TEXT } else { TEXT_MUTED },
        border: Border::default(),
        shadow: Default::default(),
    }
}

/// Background per button state plus the label colour while enabled.
struct Fill {
    idle: Color,
    hover: Color,
    pressed: Color,
    disabled: Color,
    label: Color,
    edge: Option<Color>,
    radius: f32,
}

impl Fill {
    fn style(&self, status: button::Status) -> button::Style {
        let (bg, label) = match status {
            button::Status::Active => (self.idle, self.label),
            button::Status::Hovered => (self.hover, self.label),
            button::Status::Pressed => (self.pressed, self.label),
            button::Status::Disabled => (self.disabled, TEXT_MUTED),
        };

        button::Style {
            background: Some(Background::Color(bg)),
            text_color: label,
            border: rounded(self.radius, self.edge.unwrap_or(bg)),
            shadow: Default::default(),
        }
    }
}

pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    Fill {
        idle: PRIMARY,
        hover: PRIMARY_HOVER,
        pressed: PRIMARY,
        disabled: SURFACE_3,
        label: BG,
        edge: None,
        radius: RADIUS,
    }
    .style(status)
}

pub fn danger_button(_theme: &Theme, status: button::Status) -> button::Style {
    Fill {
        idle: DANGER,
        hover: DANGER_HOVER,
        pressed: DANGER,
        disabled: SURFACE_3,
        label: TEXT,
        edge: None,
        radius: RADIUS,
    }
    .style(status)
}

pub fn subtle_button(_theme: &Theme, status: button::Status) -> button::Style {
    Fill {
        idle: SURFACE_2,
        hover: SURFACE_3,
        pressed: SURFACE_3,
        disabled: SURFACE_1,
        label: TEXT,
        edge: Some(BORDER),
        radius: RADIUS,
    }
    .style(status)
}

pub fn ghost_button(_theme: &Theme, status: button::Status) -> button::Style {
    Fill {
        idle: SURFACE_1,
        hover: SURFACE_2,
        pressed: SURFACE_2,
        disabled: SURFACE_1,
        label: TEXT_MUTED,
        edge: Some(BORDER),
        radius: 6.0,
    }
    .style(status)
}

pub fn input_style(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    let edge = match status {
        text_input::Status::Focused => PRIMARY,
        text_input::Status::Hovered => SURFACE_3,
        text_input::Status::Active | text_input::Status::Disabled => BORDER,
    };

    text_input::Style {
        background: Background::Color(SURFACE_1),
        border: rounded(RADIUS, edge),
        icon: TEXT_MUTED,
        placeholder: TEXT_MUTED,
        value: if matches!(status, text_input::Status::Disabled) {
            TEXT_MUTED
        } else {
            TEXT
        },
        selection: Color { a: 0.35, ..PRIMARY },
    }
}

pub fn pick_list_style(_theme: &Theme, status: pick_list::Status) -> pick_list::Style {
    let edge = match status {
        pick_list::Status::Active => BORDER,
        pick_list::Status::Hovered | pick_list::Status::Opened => PRIMARY,
    };

    pick_list::Style {
        text_color: TEXT,
        background: Background::Color(SURFACE_1),
        placeholder_color: TEXT_MUTED,
        handle_color: TEXT_MUTED,
        border: rounded(RADIUS, edge),
    }
}

/// Availability badge on a fleet card.
pub fn badge_style(available: bool) -> container::Style {
    let color = if available { SUCCESS } else { DANGER };
    container::Style::default()
        .background(Background::Color(Color { a: 0.15, ..color }))
        .color(color)
        .border(rounded(10.0, color))
}

pub fn toast_style(success: bool) -> container::Style {
    surface_style(SURFACE_2, RADIUS).border(rounded(RADIUS, if success { SUCCESS } else { DANGER }))
}

pub fn backdrop_style() -> container::Style {
    container::Style::default().background(Background::Color(Color { a: 0.6, ..Color::BLACK }))
}
