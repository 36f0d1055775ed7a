use iced::alignment::Alignment;
use iced::widget::{button, container, horizontal_space, row, text};
use iced::{Element, Length};

use crate::Message;

use super::style;

pub fn view<'a>(user: Option<String>, logout_pending: bool) -> Element<'a, Message> {
    let logout = button(text("Log out").size(12))
        .on_press_maybe((!logout_pending).then_some(Message::LogoutPressed))
        .padding([6, 12])
        .style(style::ghost_button);

    let signed_in_as = user.map(|name| text(name).size(12).color(style::TEXT_MUTED));

    container(
        row![
            text("ATV Admin").size(16),
            text(format!("v{}", env!("CARGO_PKG_VERSION"))).size(10).color(style::TEXT_MUTED),
            horizontal_space(),
        ]
        .push_maybe(signed_in_as)
        .push(logout)
        .spacing(8)
        .padding([5, 12])
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .style(|_| style::surface_style(style::SURFACE_1, 0.0))
    .into()
}
