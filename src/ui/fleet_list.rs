use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::{Element, Length};

use atv_admin::config::ApiConfig;
use atv_admin::domain::Atv;
use atv_admin::store::FleetStore;

use crate::Message;

use super::style;

/// The fleet page. `busy` is set while a write is in flight or the list is
/// not loaded, and disables every action that would write the fleet.
pub fn view<'a>(fleet: &'a FleetStore, config: &'a ApiConfig, busy: bool) -> Element<'a, Message> {
    let toolbar = row![
        column![
            text("ATV Fleet").size(20),
            text(format!("{} vehicles", fleet.atvs().len())).size(12).color(style::TEXT_MUTED),
        ]
        .spacing(2),
        horizontal_space(),
        button(text("+ Add ATV").size(13))
            .on_press_maybe((!busy).then_some(Message::AddPressed))
            .padding([8, 14])
            .style(style::primary_button),
    ]
    .align_y(Alignment::Center);

    let mut page = column![toolbar].spacing(14);

    if let Some(error) = fleet.error() {
        page = page.push(
            container(
                row![
                    text(error).size(13).color(style::DANGER).width(Length::Fill),
                    button(text("Retry").size(12))
                        .on_press_maybe((!fleet.is_loading()).then_some(Message::RetryFleet))
                        .padding([6, 12])
                        .style(style::subtle_button),
                ]
                .spacing(10)
                .align_y(Alignment::Center),
            )
            .padding(12)
            .style(|_| style::surface_style(style::SURFACE_1, 8.0)),
        );
    }

    if fleet.is_loading() && fleet.atvs().is_empty() {
        return page
            .push(text("Loading ATVs...").size(13).color(style::TEXT_MUTED))
            .into();
    }
    if fleet.atvs().is_empty() && fleet.error().is_none() {
        return page
            .push(text("No ATVs yet. Add the first one.").size(13).color(style::TEXT_MUTED))
            .into();
    }

    let cards = fleet
        .atvs()
        .iter()
        .fold(column![].spacing(8), |cards, atv| cards.push(card(atv, config, busy)));

    page.push(scrollable(cards).height(Length::Fill)).into()
}

fn card<'a>(atv: &'a Atv, config: &ApiConfig, busy: bool) -> Element<'a, Message> {
    let image = match config.image_url(&atv.image) {
        Some(url) => text(url).size(11).color(style::TEXT_MUTED),
        None => text("No image").size(11).color(style::TEXT_MUTED),
    };

    let badge = container(text(if atv.available { "Available" } else { "Unavailable" }).size(11))
        .padding([2, 8])
        .style(move |_| style::badge_style(atv.available));

    let specs = text(format!(
        "{} · {} seats · {} · {}",
        atv.engine, atv.seats, atv.transmission, atv.drive_type
    ))
    .size(12)
    .color(style::TEXT_MUTED);

    let features = (!atv.features.is_empty())
        .then(|| text(atv.features.join(", ")).size(11).color(style::TEXT_MUTED));

    // listings without a server id cannot be addressed for edit or delete
    let edit = atv.id.clone().filter(|_| !busy).map(Message::EditPressed);
    let delete = atv.id.clone().filter(|_| !busy).map(Message::DeletePressed);

    container(
        row![
            column![row![text(&atv.name).size(15), badge].spacing(8).align_y(Alignment::Center), specs]
                .push_maybe(features)
                .push(image)
                .spacing(4)
                .width(Length::Fill),
            text(format!("€{:.2}", atv.price)).size(15),
            button(text("Edit").size(12))
                .on_press_maybe(edit)
                .padding([6, 12])
                .style(style::subtle_button),
            button(text("Delete").size(12))
                .on_press_maybe(delete)
                .padding([6, 12])
                .style(style::danger_button),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(12)
    .style(|_| style::surface_style(style::SURFACE_1, 8.0))
    .into()
}
