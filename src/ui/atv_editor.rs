use iced::alignment::Alignment;
use iced::widget::{button, checkbox, column, container, horizontal_space, pick_list, row, scrollable, text, text_input};
use iced::{Element, Length};

use atv_admin::config::ApiConfig;
use atv_admin::domain::{DriveType, Transmission};
use atv_admin::editor::Draft;

use crate::{DraftForm, Message};

use super::style;

pub fn view<'a>(draft: &'a Draft, form: &'a DraftForm, config: &'a ApiConfig, saving: bool) -> Element<'a, Message> {
    let atv = &draft.atv;
    let title = if draft.is_new() { "Add ATV" } else { "Edit ATV" };

    let specs = row![
        labeled(
            "Seats",
            number_input("2", &form.seats, form.seats.trim().parse::<u32>().is_ok(), Message::SeatsChanged),
        ),
        labeled(
            "Price (€)",
            number_input(
                "0.00",
                &form.price,
                form.price.trim().parse::<f64>().is_ok_and(f64::is_finite),
                Message::PriceChanged,
            ),
        ),
    ]
    .spacing(12);

    let drivetrain = row![
        labeled(
            "Transmission",
            pick_list(&Transmission::ALL[..], Some(atv.transmission), Message::TransmissionSelected)
                .width(Length::Fill)
                .padding([8, 10])
                .style(style::pick_list_style)
                .into(),
        ),
        labeled(
            "Drive",
            pick_list(&DriveType::ALL[..], Some(atv.drive_type), Message::DriveTypeSelected)
                .width(Length::Fill)
                .padding([8, 10])
                .style(style::pick_list_style)
                .into(),
        ),
    ]
    .spacing(12);

    let available = checkbox("Available for rent", atv.available).on_toggle(Message::AvailableToggled);

    let form_body = column![
        labeled("Name", input("Model name", &atv.name, Message::NameChanged)),
        labeled("Engine", input("e.g. 570cc", &atv.engine, Message::EngineChanged)),
        specs,
        drivetrain,
        available,
        features(&atv.features, &form.feature),
        image(draft, form, config),
    ]
    .spacing(14);

    let save = button(text(if saving { "Saving..." } else { "Save" }).size(13))
        .on_press_maybe((!saving).then_some(Message::SavePressed))
        .padding([8, 16])
        .style(style::primary_button);
    let cancel = button(text("Cancel").size(13))
        .on_press_maybe((!saving).then_some(Message::CancelPressed))
        .padding([8, 16])
        .style(style::subtle_button);

    container(
        column![
            text(title).size(18),
            scrollable(form_body).height(Length::Fill),
            row![horizontal_space(), cancel, save].spacing(8),
        ]
        .spacing(14),
    )
    .padding(20)
    .width(560)
    .height(680)
    .style(|_| style::surface_style(style::SURFACE_1, 10.0))
    .into()
}

fn features<'a>(features: &'a [String], pending: &'a str) -> Element<'a, Message> {
    let list = features.iter().enumerate().fold(column![].spacing(4), |list, (index, feature)| {
        list.push(
            row![
                text(feature).size(12).width(Length::Fill),
                button(text("✕").size(11))
                    .on_press(Message::RemoveFeature(index))
                    .padding([2, 6])
                    .style(style::ghost_button),
            ]
            .align_y(Alignment::Center),
        )
    });

    let add = row![
        text_input("Add a feature", pending)
            .on_input(Message::FeatureInputChanged)
            .on_submit(Message::AddFeaturePressed)
            .padding(8)
            .style(style::input_style),
        button(text("Add").size(12))
            .on_press(Message::AddFeaturePressed)
            .padding([8, 12])
            .style(style::subtle_button),
    ]
    .spacing(8);

    labeled("Features", column![list, add].spacing(8).into())
}

fn image<'a>(draft: &'a Draft, form: &'a DraftForm, config: &'a ApiConfig) -> Element<'a, Message> {
    let current = match config.image_url(&draft.atv.image) {
        Some(url) => text(url).size(11).color(style::TEXT_MUTED),
        None => text("No image uploaded").size(11).color(style::TEXT_MUTED),
    };

    let pending = draft.asset.as_ref().map(|asset| {
        row![
            text(format!("Will upload {} ({} bytes)", asset.file_name, asset.size_bytes()))
                .size(12)
                .width(Length::Fill),
            button(text("Remove").size(11))
                .on_press(Message::DetachImagePressed)
                .padding([4, 8])
                .style(style::ghost_button),
        ]
        .align_y(Alignment::Center)
    });

    let picker = row![
        text_input("Path to an image file", &form.image_path)
            .on_input(Message::ImagePathChanged)
            .on_submit(Message::AttachImagePressed)
            .padding(8)
            .style(style::input_style),
        button(text("Attach").size(12))
            .on_press_maybe((!form.image_path.trim().is_empty()).then_some(Message::AttachImagePressed))
            .padding([8, 12])
            .style(style::subtle_button),
    ]
    .spacing(8);

    labeled(
        "Image",
        column![current].push_maybe(pending).push(picker).spacing(6).into(),
    )
}

fn labeled<'a>(label: &'a str, field: Element<'a, Message>) -> Element<'a, Message> {
    column![text(label).size(11).color(style::TEXT_MUTED), field]
        .spacing(4)
        .width(Length::Fill)
        .into()
}

fn input<'a>(placeholder: &'a str, value: &'a str, on_input: fn(String) -> Message) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(on_input)
        .padding(8)
        .style(style::input_style)
        .into()
}

/// Numeric text field; the border turns red while `valid` is false.
fn number_input<'a>(
    placeholder: &'a str,
    value: &'a str,
    valid: bool,
    on_input: fn(String) -> Message,
) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(on_input)
        .padding(8)
        .style(move |theme, status| {
            let base = style::input_style(theme, status);
            if valid {
                base
            } else {
                iced::widget::text_input::Style {
                    border: iced::Border {
                        color: style::DANGER,
                        ..base.border
                    },
                    ..base
                }
            }
        })
        .into()
}
