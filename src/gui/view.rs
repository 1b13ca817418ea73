use iced::widget::{button, column, container, row, scrollable, text, text_editor, text_input, Column};
use iced::{Element, Length};

use super::{Message, StudyBuddyApp};

const PLACEHOLDER: &str = "Ask a question or paste your notes...";

impl StudyBuddyApp {
    pub fn view(&self) -> Element<'_, Message> {
        let editor = text_editor(&self.editor)
            .placeholder(PLACEHOLDER)
            .on_action(Message::PromptEdited)
            .height(Length::Fixed(200.0));

        let submit = button(text(self.submit_label()))
            .padding(10)
            .style(button::primary)
            .on_press_maybe(self.can_submit().then_some(Message::SubmitPressed));

        let speak = button(text(if self.listening {
            "🎙️ Listening..."
        } else {
            "🎙️ Speak"
        }))
        .padding(10)
        .style(button::secondary)
        .on_press_maybe((self.session.is_some() && !self.listening).then_some(Message::SpeakPressed));

        let open_pdf = button(text("📄 Open PDF"))
            .padding(10)
            .style(button::secondary)
            .on_press_maybe(self.session.is_some().then_some(Message::OpenPdfPressed));

        let response_panel = container(
            column![
                text("Response:").size(18),
                scrollable(text(self.snapshot.response())).height(Length::Fill),
                button(text("🔊 Read Response"))
                    .style(button::secondary)
                    .on_press_maybe(
                        self.snapshot
                            .has_response()
                            .then_some(Message::ReadResponsePressed)
                    ),
            ]
            .spacing(10),
        )
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(container::rounded_box);

        let email_form = row![
            text_input("Your email", &self.email_input)
                .on_input(Message::EmailChanged)
                .padding(8)
                .width(Length::FillPortion(3)),
            button(text("📧 Send to Email"))
                .padding(8)
                .on_press_maybe(
                    self.snapshot
                        .can_send_email()
                        .then_some(Message::SendEmailPressed)
                ),
        ]
        .spacing(10);

        let notice = self.notice.as_ref().map(|msg| {
            row![
                text(msg).style(text::danger),
                button(text("OK"))
                    .style(button::text)
                    .on_press(Message::DismissNotice),
            ]
            .spacing(10)
        });

        let status = self
            .snapshot
            .request()
            .error_message()
            .map(|msg| text(msg).style(text::danger));

        Column::new()
            .push(text("Study Buddy").size(32))
            .push(editor)
            .push(row![submit, speak, open_pdf].spacing(10))
            .push_maybe(notice)
            .push_maybe(status)
            .push(response_panel)
            .push(email_form)
            .push(text(&self.email_status))
            .spacing(15)
            .padding(20)
            .into()
    }
}
