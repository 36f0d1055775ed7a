use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, text_input};
use iced::{Element, Length};

use atv_admin::domain::{ContentField, STAT_COUNT};
use atv_admin::store::ContentStore;

use crate::Message;

use super::style;

pub fn view(content: &ContentStore) -> Element<'_, Message> {
    let saving = content.is_saving();
    let dirty = content.is_dirty();

    let toolbar = row![
        text("About Page").size(20),
        horizontal_space(),
        button(text("Reset").size(13))
            .on_press_maybe((dirty && !saving).then_some(Message::ContentResetPressed))
            .padding([8, 14])
            .style(style::subtle_button),
        button(text(if saving { "Saving..." } else { "Save changes" }).size(13))
            .on_press_maybe(
                (content.record().is_some() && !content.is_loading() && !saving)
                    .then_some(Message::ContentSavePressed),
            )
            .padding([8, 14])
            .style(style::primary_button),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut page = column![toolbar].spacing(14);

    if let Some(error) = content.error() {
        page = page.push(
            container(
                row![
                    text(error).size(13).color(style::DANGER).width(Length::Fill),
                    button(text("Retry").size(12))
                        .on_press_maybe((!content.is_loading()).then_some(Message::RetryContent))
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

    if content.record().is_none() {
        if content.is_loading() {
            page = page.push(text("Loading page content...").size(13).color(style::TEXT_MUTED));
        }
        return page.into();
    }

    let record = content.working();

    let stats = (0..STAT_COUNT).fold(row![].spacing(12), |stats, index| {
        let stat = &record.stats[index];
        stats.push(
            column![
                field("Value", &stat.value, ContentField::StatValue(index)),
                field("Label", &stat.label, ContentField::StatLabel(index)),
            ]
            .spacing(8)
            .width(Length::Fill),
        )
    });

    let form = column![
        section(
            "Intro",
            column![
                field("Title", &record.title, ContentField::Title),
                field("Subtitle", &record.subtitle, ContentField::Subtitle),
                field("Description", &record.description, ContentField::Description),
            ]
        ),
        section("Stats", column![stats]),
        section(
            "Contact",
            column![
                field("Address", &record.contact_info.address, ContentField::Address),
                field("Phone", &record.contact_info.phone, ContentField::Phone),
                field("Email", &record.contact_info.email, ContentField::Email),
                field("Social", &record.contact_info.social, ContentField::Social),
            ]
        ),
        section(
            "Working hours",
            column![
                field("Monday - Saturday", &record.working_hours.weekdays, ContentField::Weekdays),
                field("Sunday", &record.working_hours.sunday, ContentField::Sunday),
            ]
        ),
    ]
    .spacing(12);

    page.push(scrollable(form).height(Length::Fill)).into()
}

fn section<'a>(title: &'a str, body: iced::widget::Column<'a, Message>) -> Element<'a, Message> {
    container(column![text(title).size(14), body.spacing(8)].spacing(10))
        .padding(14)
        .width(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_1, 8.0))
        .into()
}

fn field<'a>(label: &'a str, value: &'a str, target: ContentField) -> Element<'a, Message> {
    column![
        text(label).size(11).color(style::TEXT_MUTED),
        text_input(label, value)
            .on_input(move |value| Message::ContentEdited(target, value))
            .padding(8)
            .style(style::input_style),
    ]
    .spacing(4)
    .width(Length::Fill)
    .into()
}
