use iced::widget::{button, center, column, container, horizontal_space, mouse_area, opaque, row, stack, text};
use iced::Element;

use crate::Message;

use super::style;

/// Lay `content` over `base` behind a dimmed backdrop. Clicking the backdrop
/// sends `on_blur`, if any.
pub fn view<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Option<Message>,
) -> Element<'a, Message> {
    let backdrop = mouse_area(center(opaque(content)).style(|_| style::backdrop_style()));
    let backdrop = match on_blur {
        Some(message) => backdrop.on_press(message),
        None => backdrop,
    };

    stack![base.into(), opaque(backdrop)].into()
}

pub fn confirm<'a>(
    title: &'a str,
    body: String,
    action: &'a str,
    on_confirm: Message,
    on_cancel: Message,
) -> Element<'a, Message> {
    container(
        column![
            text(title).size(18),
            text(body).size(13).color(style::TEXT_MUTED),
            row![
                horizontal_space(),
                button(text("Cancel").size(13))
                    .on_press(on_cancel)
                    .padding([8, 14])
                    .style(style::subtle_button),
                button(text(action).size(13))
                    .on_press(on_confirm)
                    .padding([8, 14])
                    .style(style::danger_button),
            ]
            .spacing(8),
        ]
        .spacing(14),
    )
    .padding(20)
    .width(420)
    .style(|_| style::surface_style(style::SURFACE_1, 10.0))
    .into()
}
