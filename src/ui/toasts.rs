use iced::alignment::Horizontal;
use iced::widget::{button, column, container, row, stack, text};
use iced::{Element, Length};

use atv_admin::notify::{Toast, ToastKind, Toasts};

use crate::Message;

use super::style;

/// Stack the visible toasts in the top-right corner of `base`.
pub fn overlay<'a>(base: impl Into<Element<'a, Message>>, toasts: &'a Toasts) -> Element<'a, Message> {
    if toasts.is_empty() {
        return base.into();
    }

    let list = toasts
        .visible()
        .fold(column![].spacing(8).width(340), |list, toast| list.push(card(toast)));

    let layer = container(list)
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .padding(16);

    stack![base.into(), layer].into()
}

fn card(toast: &Toast) -> Element<'_, Message> {
    let success = toast.kind == ToastKind::Success;
    let title_color = if success { style::SUCCESS } else { style::DANGER };

    container(
        row![
            column![
                text(&toast.title).size(13).color(title_color),
                text(&toast.message).size(12),
            ]
            .spacing(4)
            .width(Length::Fill),
            button(text("✕").size(11))
                .on_press(Message::ToastDismissed(toast.id))
                .padding([2, 6])
                .style(style::ghost_button),
        ]
        .spacing(8),
    )
    .padding(12)
    .width(Length::Fill)
    .style(move |_| style::toast_style(success))
    .into()
}
