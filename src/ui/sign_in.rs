use iced::widget::{button, center, column, container, text, text_input};
use iced::{Element, Length};

use crate::{Message, SignInForm};

use super::style;

pub fn view(form: &SignInForm) -> Element<'_, Message> {
    let token = text_input("Access token", &form.token)
        .on_input(Message::TokenChanged)
        .on_submit(Message::SignInPressed)
        .secure(true)
        .padding(10)
        .style(style::input_style);

    let name = text_input("Display name (optional)", &form.name)
        .on_input(Message::UserNameChanged)
        .on_submit(Message::SignInPressed)
        .padding(10)
        .style(style::input_style);

    let submit = button(text("Sign in").size(14))
        .on_press_maybe((!form.token.trim().is_empty()).then_some(Message::SignInPressed))
        .width(Length::Fill)
        .padding(10)
        .style(style::primary_button);

    let error = form
        .error
        .as_deref()
        .map(|error| text(error).size(12).color(style::DANGER));

    let card = container(
        column![
            text("ATV Admin").size(22),
            text("Sign in with the token issued by the rental backend.")
                .size(12)
                .color(style::TEXT_MUTED),
            token,
            name,
        ]
        .push_maybe(error)
        .push(submit)
        .spacing(12),
    )
    .padding(24)
    .width(380)
    .style(|_| style::surface_style(style::SURFACE_1, 10.0));

    center(card)
        .style(|_| style::flat_surface_style(style::BG))
        .into()
}
