use log::info;
use yew::prelude::*;
use web_sys::MouseEvent;

pub const GLYPH_CLOSED: &str = "+";
pub const GLYPH_OPEN: &str = "−";

/// Single-selection toggle group: at most one entry is open at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccordionState {
    len: usize,
    open: Option<usize>,
}

impl AccordionState {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Follows the entry list when it grows or shrinks. An open entry that
    /// no longer exists is closed.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.open.map_or(false, |open| open >= len) {
            self.open = None;
        }
    }

    /// Closes everything, then reopens `index` unless it was the open one.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        let was_open = self.open == Some(index);
        self.open = None;
        if !was_open {
            self.open = Some(index);
        }
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn glyph(&self, index: usize) -> &'static str {
        if self.is_open(index) { GLYPH_OPEN } else { GLYPH_CLOSED }
    }

    pub fn item_class(&self, index: usize) -> Classes {
        classes!("accordion-item", self.is_open(index).then(|| "active"))
    }
}

#[derive(Clone, PartialEq)]
pub struct FaqEntry {
    pub question: AttrValue,
    pub answer: AttrValue,
}

impl FaqEntry {
    pub fn new(question: &'static str, answer: &'static str) -> Self {
        Self {
            question: AttrValue::Static(question),
            answer: AttrValue::Static(answer),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AccordionProps {
    pub entries: Vec<FaqEntry>,
}

#[function_component(Accordion)]
pub fn accordion(props: &AccordionProps) -> Html {
    let state = use_state(|| AccordionState::new(props.entries.len()));

    html! {
        <div class="accordion">
            { for props.entries.iter().enumerate().map(|(index, entry)| {
                let onclick = {
                    let state = state.clone();
                    let len = props.entries.len();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        let mut next = (*state).clone();
                        next.resize(len);
                        next.toggle(index);
                        if let Some(open) = next.open_index() {
                            info!("FAQ item {} opened", open);
                        }
                        state.set(next);
                    })
                };
                html! {
                    <div class={state.item_class(index)} key={index}>
                        <button class="accordion-header" type="button" {onclick}>
                            {entry.question.clone()}
                            <span>{state.glyph(index)}</span>
                        </button>
                        <div class="accordion-body">
                            <p>{entry.answer.clone()}</p>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
