use chrono::Datelike;
use yew::prelude::*;

use crate::components::accordion::{Accordion, FaqEntry};
use crate::components::contact_form::ContactForm;
use crate::components::counter::Counter;

pub const PHONE: &str = "+7 (700) 000-00-00";

pub fn tel_href() -> String {
    let digits: String = PHONE.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
    format!("tel:{}", digits)
}

fn faq_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "Кто может пройти процедуру банкротства?",
            "Граждане Казахстана, у которых просрочка по кредитам больше года и нет имущества, достаточного для погашения долга.",
        ),
        FaqEntry::new(
            "Сколько длится процедура?",
            "Внесудебное банкротство занимает около трёх месяцев, судебное от шести до двенадцати месяцев в зависимости от числа кредиторов.",
        ),
        FaqEntry::new(
            "Что будет с моим жильём?",
            "Единственное жильё должника не изымается. Мы заранее проверяем имущество и объясняем все риски на первой консультации.",
        ),
        FaqEntry::new(
            "Сколько стоят ваши услуги?",
            "Стоимость фиксируется в договоре после бесплатной консультации. Оплату можно разбить на несколько месяцев.",
        ),
        FaqEntry::new(
            "Будут ли звонить коллекторы?",
            "С момента подачи заявления мы берём общение с банками и коллекторами на себя.",
        ),
    ]
}

#[function_component(Home)]
pub fn home() -> Html {
    let year = chrono::Local::now().year();

    html! {
        <div class="landing">
            <section class="hero">
                <h1>{"Законное списание долгов"}</h1>
                <p>{"Поможем пройти процедуру банкротства физических лиц под ключ и остановить звонки коллекторов."}</p>
                <a href="#contact" class="btn-primary">{"Бесплатная консультация"}</a>
            </section>

            <section class="stats">
                <div class="stat-block">
                    <Counter target="1200" suffix="+" />
                    <p class="stat-label">{"клиентов освобождены от долгов"}</p>
                </div>
                <div class="stat-block">
                    <Counter target="98" suffix="%" />
                    <p class="stat-label">{"успешно завершённых дел"}</p>
                </div>
                <div class="stat-block">
                    <Counter target="7" />
                    <p class="stat-label">{"лет практики"}</p>
                </div>
            </section>

            <section class="faq" id="faq">
                <h2>{"Частые вопросы"}</h2>
                <Accordion entries={faq_entries()} />
            </section>

            <section class="contact" id="contact">
                <h2>{"Оставьте заявку"}</h2>
                <p>{"Юрист перезвонит в течение 15 минут в рабочее время."}</p>
                <ContactForm />
                <p class="contact-phone">{"Или позвоните: "}<a href={tel_href()}>{PHONE}</a></p>
            </section>

            <footer class="footer">
                <p>{format!("© {} Koktem Law. Все права защищены.", year)}</p>
            </footer>

            <style>
                {r#"
                .landing {
                    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                    color: #1c2a39;
                }
                .hero {
                    padding: 120px 20px 80px;
                    text-align: center;
                    background: linear-gradient(135deg, #0f3b5f, #1e6fa8);
                    color: #ffffff;
                }
                .hero h1 {
                    font-size: 2.6rem;
                    margin-bottom: 1rem;
                }
                .btn-primary {
                    display: inline-block;
                    padding: 14px 28px;
                    border: none;
                    border-radius: 8px;
                    background: #f2a900;
                    color: #1c2a39;
                    font-weight: 600;
                    cursor: pointer;
                    text-decoration: none;
                }
                .btn-primary:disabled {
                    opacity: 0.6;
                    cursor: wait;
                }
                .stats {
                    display: flex;
                    justify-content: center;
                    gap: 2rem;
                    padding: 60px 20px;
                    flex-wrap: wrap;
                }
                .stat-block {
                    text-align: center;
                    min-width: 200px;
                }
                .counter {
                    font-size: 3rem;
                    font-weight: 700;
                    color: #1e6fa8;
                }
                .faq, .contact {
                    max-width: 760px;
                    margin: 0 auto;
                    padding: 40px 20px;
                }
                .accordion-item {
                    border-bottom: 1px solid #d9e2ec;
                }
                .accordion-header {
                    width: 100%;
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    padding: 18px 0;
                    background: none;
                    border: none;
                    font-size: 1.1rem;
                    text-align: left;
                    cursor: pointer;
                }
                .accordion-header span {
                    font-size: 1.5rem;
                    color: #1e6fa8;
                }
                .accordion-body {
                    max-height: 0;
                    overflow: hidden;
                    transition: max-height 0.3s ease;
                }
                .accordion-item.active .accordion-body {
                    max-height: 400px;
                }
                .contact-form {
                    display: flex;
                    flex-direction: column;
                    gap: 12px;
                }
                .contact-form input {
                    padding: 14px;
                    border: 1px solid #d9e2ec;
                    border-radius: 8px;
                    font-size: 1rem;
                }
                .footer {
                    text-align: center;
                    padding: 30px 20px;
                    color: #6b7c93;
                }
                @media (max-width: 768px) {
                    .hero h1 {
                        font-size: 1.8rem;
                    }
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_link_is_dialable() {
        assert_eq!(tel_href(), "tel:+77000000000");
    }

    #[test]
    fn faq_entries_have_text() {
        let entries = faq_entries();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| !e.question.is_empty() && !e.answer.is_empty()));
    }
}
