use log::{error, info};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::TelegramConfig;
use crate::telegram::{MessageSender, SubmitError, TelegramClient};

pub const BUTTON_IDLE: &str = "Отправить заявку";
pub const BUTTON_SENDING: &str = "Отправка...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Phone,
    Debt,
    City,
}

impl LeadField {
    pub const ALL: [LeadField; 4] = [LeadField::Name, LeadField::Phone, LeadField::Debt, LeadField::City];

    /// Placeholder text the page stylesheet and copy are written against.
    pub fn placeholder(self) -> &'static str {
        match self {
            LeadField::Name => "Ваше имя",
            LeadField::Phone => "Ваш телефон",
            LeadField::Debt => "Сумма долга (тг)",
            LeadField::City => "Ваш город",
        }
    }

    fn input_type(self) -> &'static str {
        match self {
            LeadField::Phone => "tel",
            _ => "text",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadSubmission {
    pub name: String,
    pub phone: String,
    pub debt: String,
    pub city: String,
}

impl LeadSubmission {
    pub fn to_message(&self) -> String {
        format!(
            "🚀 *Новая заявка с сайта!*\n\n\
             👤 Имя: {}\n\
             📞 Телефон: {}\n\
             💰 Долг: {} тг\n\
             📍 Город: {}",
            self.name, self.phone, self.debt, self.city
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acknowledgement {
    Sent,
    Failed,
}

impl Acknowledgement {
    pub fn message(self) -> &'static str {
        match self {
            Acknowledgement::Sent => "✅ Спасибо! Ваша заявка принята. Мы свяжемся с вами в ближайшее время.",
            Acknowledgement::Failed => "❌ Ошибка отправки. Пожалуйста, позвоните нам напрямую.",
        }
    }

    fn show(self) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(self.message());
        }
    }
}

/// View state of the contact form: field values plus the in-flight flag
/// that drives the submit button.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadForm {
    values: LeadSubmission,
    sending: bool,
}

impl LeadForm {
    pub fn value(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.values.name,
            LeadField::Phone => &self.values.phone,
            LeadField::Debt => &self.values.debt,
            LeadField::City => &self.values.city,
        }
    }

    pub fn set(&mut self, field: LeadField, value: String) {
        let slot = match field {
            LeadField::Name => &mut self.values.name,
            LeadField::Phone => &mut self.values.phone,
            LeadField::Debt => &mut self.values.debt,
            LeadField::City => &mut self.values.city,
        };
        *slot = value;
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn button_label(&self) -> &'static str {
        if self.sending { BUTTON_SENDING } else { BUTTON_IDLE }
    }

    /// Snapshots the fields and marks the form in flight. Returns `None` while
    /// a previous submission has not finished.
    pub fn begin(&mut self) -> Option<LeadSubmission> {
        if self.sending {
            return None;
        }
        self.sending = true;
        Some(self.values.clone())
    }

    pub fn finish(&mut self, outcome: &Result<(), SubmitError>) -> Acknowledgement {
        self.sending = false;
        match outcome {
            Ok(()) => {
                self.values = LeadSubmission::default();
                Acknowledgement::Sent
            }
            Err(_) => Acknowledgement::Failed,
        }
    }
}

/// Sends one lead and logs the cause when it does not go through.
pub async fn deliver<S: MessageSender>(sender: &S, lead: &LeadSubmission) -> Result<(), SubmitError> {
    let result = sender.send_message(&lead.to_message()).await;
    match &result {
        Ok(()) => info!("Lead delivered"),
        Err(e) => error!("Lead submission failed: {}", e),
    }
    result
}

pub enum ContactFormMsg {
    Input(LeadField, String),
    Submit,
    Finished(Result<(), SubmitError>),
}

pub struct ContactForm {
    form: LeadForm,
    client: TelegramClient,
}

impl Component for ContactForm {
    type Message = ContactFormMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: LeadForm::default(),
            client: TelegramClient::new(TelegramConfig::from_build_env()),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactFormMsg::Input(field, value) => {
                self.form.set(field, value);
                true
            }
            ContactFormMsg::Submit => {
                let Some(lead) = self.form.begin() else {
                    info!("Submission already in flight, ignoring");
                    return false;
                };
                let client = self.client.clone();
                ctx.link().send_future(async move {
                    ContactFormMsg::Finished(deliver(&client, &lead).await)
                });
                true
            }
            ContactFormMsg::Finished(outcome) => {
                self.form.finish(&outcome).show();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });

        html! {
            <form id="contactForm" class="contact-form" {onsubmit}>
                { for LeadField::ALL.iter().map(|&field| {
                    let oninput = ctx.link().callback(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        ContactFormMsg::Input(field, input.value())
                    });
                    html! {
                        <input
                            type={field.input_type()}
                            placeholder={field.placeholder()}
                            value={self.form.value(field).to_string()}
                            {oninput}
                        />
                    }
                }) }
                <button type="submit" class="btn-primary" disabled={self.form.is_sending()}>
                    {self.form.button_label()}
                </button>
            </form>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeSender {
        outcome: Result<(), SubmitError>,
        sent: RefCell<Vec<String>>,
    }

    impl FakeSender {
        fn new(outcome: Result<(), SubmitError>) -> Self {
            Self { outcome, sent: RefCell::new(Vec::new()) }
        }
    }

    impl MessageSender for FakeSender {
        async fn send_message(&self, text: &str) -> Result<(), SubmitError> {
            self.sent.borrow_mut().push(text.to_string());
            self.outcome.clone()
        }
    }

    fn filled_form() -> LeadForm {
        let mut form = LeadForm::default();
        form.set(LeadField::Name, "Айгерим".to_string());
        form.set(LeadField::Phone, "+7 701 000 00 00".to_string());
        form.set(LeadField::Debt, "2 500 000".to_string());
        form.set(LeadField::City, "Алматы".to_string());
        form
    }

    #[test]
    fn message_carries_every_field_and_label() {
        let lead = filled_form().begin().unwrap();
        let message = lead.to_message();
        for needle in ["Айгерим", "+7 701 000 00 00", "2 500 000", "Алматы", "Имя:", "Телефон:", "Долг:", "Город:"] {
            assert!(message.contains(needle), "missing {needle:?} in {message}");
        }
        assert!(message.starts_with("🚀 *Новая заявка с сайта!*\n\n"));
        assert!(message.contains("💰 Долг: 2 500 000 тг\n"));
    }

    #[test]
    fn empty_fields_are_sent_as_empty_strings() {
        let lead = LeadForm::default().begin().unwrap();
        assert!(lead.to_message().ends_with("📍 Город: "));
    }

    #[test]
    fn begin_disables_button_and_blocks_duplicates() {
        let mut form = filled_form();
        assert!(form.begin().is_some());
        assert!(form.is_sending());
        assert_eq!(form.button_label(), BUTTON_SENDING);
        assert!(form.begin().is_none());
    }

    #[tokio::test]
    async fn successful_submit_clears_fields() {
        let sender = FakeSender::new(Ok(()));
        let mut form = filled_form();

        let lead = form.begin().unwrap();
        let outcome = deliver(&sender, &lead).await;
        let ack = form.finish(&outcome);

        assert_eq!(ack, Acknowledgement::Sent);
        assert!(LeadField::ALL.iter().all(|&f| form.value(f).is_empty()));
        assert!(!form.is_sending());
        assert_eq!(form.button_label(), BUTTON_IDLE);

        let sent = sender.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Айгерим") && sent[0].contains("Алматы"));
    }

    #[test]
    fn request_body_text_holds_the_lead() {
        let client = TelegramClient::new(TelegramConfig {
            api_base: "https://api.telegram.org".to_string(),
            bot_token: Some("123:abc".to_string()),
            chat_id: Some("-100".to_string()),
        });
        let message = filled_form().begin().unwrap().to_message();
        let body = serde_json::to_value(client.request_body(&message).unwrap()).unwrap();
        let text = body["text"].as_str().unwrap();
        for needle in ["Айгерим", "+7 701 000 00 00", "2 500 000", "Алматы", "Имя", "Телефон", "Долг", "Город"] {
            assert!(text.contains(needle));
        }
        assert_eq!(body["parse_mode"], "Markdown");
    }

    #[tokio::test]
    async fn failures_keep_fields_and_reenable_button() {
        for outcome in [
            Err(SubmitError::Rejected(400)),
            Err(SubmitError::Network("connection reset".to_string())),
            Err(SubmitError::MissingCredentials),
        ] {
            let sender = FakeSender::new(outcome);
            let mut form = filled_form();

            let lead = form.begin().unwrap();
            let outcome = deliver(&sender, &lead).await;
            let ack = form.finish(&outcome);

            assert_eq!(ack, Acknowledgement::Failed);
            assert_eq!(sender.sent.borrow().len(), 1);
            assert!(!form.is_sending());
            assert_eq!(form.button_label(), BUTTON_IDLE);
            assert_eq!(form.value(LeadField::Name), "Айгерим");
        }
    }
}
