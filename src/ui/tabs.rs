use iced::widget::{button, column, container, row, text};
use iced::{Element, Length};

use crate::{Message, Tab};

use super::style;

pub fn view<'a>(active: Tab) -> Element<'a, Message> {
    let nav = Tab::ALL
        .into_iter()
        .fold(row![].spacing(0).height(38), |nav, tab| {
            nav.push(tab_button(tab, active))
        });

    container(nav)
        .width(Length::Fill)
        .style(|_| style::flat_surface_style(style::SURFACE_0))
        .into()
}

fn tab_button<'a>(tab: Tab, active: Tab) -> iced::widget::Button<'a, Message> {
    let is_active = tab == active;
    button(
        column![
            container(text(tab.to_string()).size(13).color(if is_active { style::TEXT } else { style::TEXT_MUTED }))
                .padding([8, 18])
                .center_y(Length::Fill),
            container(text("").size(2))
                .height(2)
                .width(Length::Fill)
                .style(move |_| style::flat_surface_style(if is_active { style::PRIMARY } else { style::SURFACE_0 })),
        ]
        .height(Length::Fill),
    )
    .on_press(Message::TabSelected(tab))
    .width(160)
    .padding(0)
    .style(move |theme, status| style::section_tab_button(is_active, theme, status))
}
