use std::iter::FusedIterator;

use gloo_timers::future::TimeoutFuture;
use log::{info, warn};
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

pub const STEPS: f64 = 50.0;
pub const TICK_MS: u32 = 20;
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum TargetParseError {
    #[error("counter target {0:?} has no leading digits")]
    NoDigits(String),
    #[error("counter target {0:?} does not fit in 64 bits")]
    OutOfRange(String),
}

/// Reads an integer the way `data-*` attributes are conventionally read:
/// leading whitespace and an optional sign, then digits up to the first
/// non-digit ("1500+" is 1500).
pub fn parse_target(raw: &str) -> Result<i64, TargetParseError> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return Err(TargetParseError::NoDigits(raw.to_string()));
    }
    let value: i64 = rest[..end]
        .parse()
        .map_err(|_| TargetParseError::OutOfRange(raw.to_string()))?;
    Ok(if negative { -value } else { value })
}

/// Values shown while counting up from zero to `target` in a fixed number
/// of steps. Intermediate frames are rounded up; the last frame is the exact
/// target, after which the sequence is exhausted.
#[derive(Clone, Debug)]
pub struct CounterSequence {
    target: i64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterSequence {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            increment: target as f64 / STEPS,
            current: 0.0,
            finished: false,
        }
    }
}

impl Iterator for CounterSequence {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.finished {
            return None;
        }
        self.current += self.increment;
        if self.current < self.target as f64 {
            Some(self.current.ceil() as i64)
        } else {
            self.finished = true;
            Some(self.target)
        }
    }
}

impl FusedIterator for CounterSequence {}

/// Fires once, the first time the element is at least half visible.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CounterTrigger {
    fired: bool,
}

impl CounterTrigger {
    pub fn on_visibility(&mut self, ratio: f64) -> bool {
        if self.fired || ratio < VISIBILITY_THRESHOLD {
            return false;
        }
        self.fired = true;
        true
    }
}

async fn animate(sequence: CounterSequence, display: UseStateSetter<i64>) {
    for (tick, value) in sequence.enumerate() {
        if tick > 0 {
            TimeoutFuture::new(TICK_MS).await;
        }
        display.set(value);
    }
}

/// Keeps the observer and its callback alive for as long as the component
/// is mounted.
struct VisibilityWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for VisibilityWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe_once(element: &Element, display: UseStateSetter<i64>) -> Option<VisibilityWatch> {
    let mut trigger = CounterTrigger::default();
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let ratio = if entry.is_intersecting() { entry.intersection_ratio() } else { 0.0 };
            if !trigger.on_visibility(ratio) {
                continue;
            }
            let counter = entry.target();
            observer.unobserve(&counter);

            let raw = counter.get_attribute("data-target").unwrap_or_default();
            match parse_target(&raw) {
                Ok(target) => {
                    info!("Counter visible, animating to {}", target);
                    spawn_local(animate(CounterSequence::new(target), display.clone()));
                }
                Err(e) => warn!("Skipping counter animation: {}", e),
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let mut options = IntersectionObserverInit::new();
    options.threshold(&VISIBILITY_THRESHOLD.into());

    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => observer,
        Err(e) => {
            warn!("IntersectionObserver unavailable: {:?}", e);
            return None;
        }
    };
    observer.observe(element);

    Some(VisibilityWatch { observer, _callback: callback })
}

#[derive(Properties, PartialEq)]
pub struct CounterProps {
    /// Raw `data-target` text, read back from the element when it scrolls into view.
    pub target: AttrValue,
    #[prop_or_default]
    pub suffix: AttrValue,
}

#[function_component(Counter)]
pub fn counter(props: &CounterProps) -> Html {
    let node = use_node_ref();
    let display = use_state(|| 0i64);

    {
        let node = node.clone();
        let setter = display.setter();
        use_effect_with_deps(
            move |_| {
                let watch = node.cast::<Element>().and_then(|element| observe_once(&element, setter));
                move || drop(watch)
            },
            (),
        );
    }

    html! {
        <span class="counter">
            <span class="counter-num" ref={node} data-target={props.target.clone()}>{*display}</span>
            {props.suffix.clone()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_to_two_hundred_in_fifty_frames() {
        let frames: Vec<i64> = CounterSequence::new(200).collect();
        assert_eq!(frames.len(), 50);
        assert_eq!(frames.first(), Some(&4));
        assert_eq!(frames.last(), Some(&200));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn stays_at_target_once_reached() {
        let mut sequence = CounterSequence::new(200);
        assert_eq!(sequence.by_ref().last(), Some(200));
        assert_eq!(sequence.next(), None);
        assert_eq!(sequence.next(), None);
    }

    #[test]
    fn zero_target_finishes_on_first_tick() {
        let mut sequence = CounterSequence::new(0);
        assert_eq!(sequence.next(), Some(0));
        assert_eq!(sequence.next(), None);
    }

    #[test]
    fn fractional_steps_round_up_until_exact_target() {
        let frames: Vec<i64> = CounterSequence::new(7).collect();
        assert_eq!(frames.first(), Some(&1));
        assert_eq!(frames.last(), Some(&7));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert!(frames.iter().all(|&v| v <= 7));
    }

    #[test]
    fn negative_target_ends_immediately() {
        let frames: Vec<i64> = CounterSequence::new(-30).collect();
        assert_eq!(frames, vec![-30]);
    }

    #[test]
    fn trigger_fires_only_once() {
        let mut trigger = CounterTrigger::default();
        assert!(!trigger.on_visibility(0.2));
        assert!(trigger.on_visibility(0.5));
        assert!(!trigger.on_visibility(0.0));
        assert!(!trigger.on_visibility(1.0));
        assert_eq!(trigger, CounterTrigger { fired: true });
    }

    #[test]
    fn parses_attribute_like_integers() {
        assert_eq!(parse_target("200"), Ok(200));
        assert_eq!(parse_target("  1500+"), Ok(1500));
        assert_eq!(parse_target("-12"), Ok(-12));
        assert_eq!(parse_target("98%"), Ok(98));
        assert!(matches!(parse_target("lots"), Err(TargetParseError::NoDigits(_))));
        assert!(matches!(parse_target(""), Err(TargetParseError::NoDigits(_))));
        assert!(matches!(
            parse_target("99999999999999999999"),
            Err(TargetParseError::OutOfRange(_))
        ));
    }
}
