//! The hello/buy/echo walkthrough.
//!
//! Registers one listener per event ("hello" and "echo" persistent, "buy"
//! fire-once), emits them, then tears everything down by identity and by key,
//! checking the emitter's listener count after every step.

use crate::config::ScenarioSettings;
use crate::error::{DemoError, Result};
use compact_str::CompactString;
use event_emitter::{EmitterStats, EventEmitter};
use std::cell::Cell;
use std::rc::Rc;
use tracing::info;

/// Emitter keyed by event name, passing a string argument to every listener.
pub type DemoEmitter = EventEmitter<CompactString, str>;

/// What happened during one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub hello_calls: usize,
    pub echo_calls: usize,
    pub buy_calls: usize,
    /// Listener count once the scenario has torn everything down
    pub remaining_listeners: usize,
    pub stats: EmitterStats,
}

fn counting(counter: &Rc<Cell<usize>>, label: &'static str) -> impl Fn(&str) + 'static {
    let counter = Rc::clone(counter);
    move |arg: &str| {
        counter.set(counter.get() + 1);
        info!("{label} {arg}");
    }
}

fn expect_count(emitter: &DemoEmitter, expected: usize, step: &str) -> Result<()> {
    let actual = emitter.count_listeners();
    if actual != expected {
        return Err(DemoError::ScenarioFailed(format!(
            "after {step}: expected {expected} listeners, found {actual}"
        )));
    }
    Ok(())
}

/// Runs the scenario against a fresh emitter.
pub fn run_scenario(settings: &ScenarioSettings) -> Result<ScenarioReport> {
    let emitter = DemoEmitter::new();
    let hello_calls = Rc::new(Cell::new(0));
    let echo_calls = Rc::new(Cell::new(0));
    let buy_calls = Rc::new(Cell::new(0));

    emitter
        .on("hello", counting(&hello_calls, "Hello"))
        .once("buy", counting(&buy_calls, "Buy"))
        .on("echo", counting(&echo_calls, "Echo"));
    expect_count(&emitter, 3, "registration")?;

    for round in 1..=settings.rounds {
        emitter.emit("hello", &settings.greeting_target);
        emitter.emit("echo", &settings.echo_message);
        expect_count(&emitter, 3, &format!("round {round}"))?;
    }

    emitter.emit("buy", &settings.greeting_target);
    expect_count(&emitter, 2, "first buy")?;

    // The once-listener is gone; a second purchase reaches nobody.
    if emitter.emit("buy", &settings.greeting_target) != 0 {
        return Err(DemoError::ScenarioFailed("buy listener fired twice".to_string()));
    }

    let hello = emitter
        .listener("hello")
        .ok_or_else(|| DemoError::ScenarioFailed("no listener registered for hello".to_string()))?;
    if !emitter.remove(hello) {
        return Err(DemoError::ScenarioFailed(format!("could not remove {hello}")));
    }
    expect_count(&emitter, 1, "removing hello")?;

    emitter.off("echo");
    expect_count(&emitter, 0, "clearing echo")?;

    Ok(ScenarioReport {
        hello_calls: hello_calls.get(),
        echo_calls: echo_calls.get(),
        buy_calls: buy_calls.get(),
        remaining_listeners: emitter.count_listeners(),
        stats: emitter.stats(),
    })
}
