// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Walkthrough of an injector over a small contact list.
//!
//! Logging is controlled by `INJECTOR_LOG` (an `EnvFilter` directive) and
//! `INJECTOR_LOG_FORMAT` (`compact` or `json`).

use std::env;

use injector::ChildEvent;
use injector::ChildSequence;
use injector::Identity;
use injector::Injector;
use injector::Kind;
use injector::Notification;
use injector::Slot;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Builds the label of an injected row for the list it is shown in.
type Label = fn(&str) -> String;

/// Contacts with durable identities.
struct Contacts {
    rows: Vec<(Identity, &'static str)>,
}

impl ChildSequence for Contacts {
    type Payload = &'static str;

    fn len(&self) -> usize {
        return self.rows.len();
    }

    fn kind_at(&self, _index: usize) -> Kind {
        return 0;
    }

    fn identity_at(&self, index: usize) -> Identity {
        return self.rows[index].0;
    }

    fn has_durable_identities(&self) -> bool {
        return true;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("INJECTOR_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "injector=debug,info"
        } else {
            "injector=info,warn"
        })
    });

    let format = env::var("INJECTOR_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn show(step: &str, notifications: &[Notification<&'static str>]) {
    println!("{step}:");
    for notification in notifications {
        println!("    {notification:?}");
    }
}

fn render(injector: &Injector<Contacts, Label>) {
    let mut line = Vec::with_capacity(injector.len());
    for position in 0..injector.len() {
        match injector.slot(position) {
            Some(Slot::Injected { kind, .. }) => {
                let label = injector.create_view(kind, "contacts").unwrap_or_default();
                line.push(format!("[{label}]"));
            }
            Some(Slot::Child(index)) => line.push(injector.child().rows[index].1.to_string()),
            None => {}
        }
    }
    println!("    => {}", line.join(" "));
}

fn main() -> injector::Result<()> {
    init_tracing();

    let contacts = Contacts {
        rows: vec![(1, "ada"), (2, "bob"), (3, "cy"), (4, "dee")],
    };
    let mut injector: Injector<Contacts, Label> = Injector::new(contacts);
    injector.activate();
    render(&injector);

    show("inject header at 0", &injector.inject(|list| format!("{list} header"), 0));
    show("inject ad at 3", &injector.inject(|_| "ad".to_string(), 3));
    render(&injector);

    injector.child_mut().rows.insert(1, (5, "eve"));
    show("child inserted eve at 1", &injector.handle(ChildEvent::Inserted { start: 1, count: 1 })?);
    render(&injector);

    let moved = injector.child_mut().rows.remove(0);
    injector.child_mut().rows.push(moved);
    show("child moved ada to the end", &injector.handle(ChildEvent::Moved { from: 0, to: 4, count: 1 })?);
    render(&injector);

    show(
        "child changed bob",
        &injector.handle(ChildEvent::Changed { start: 1, count: 1, payload: Some("bold") })?,
    );

    show("hide overlay", &injector.set_show_overlay(false));
    render(&injector);
    show("show overlay", &injector.set_show_overlay(true));
    render(&injector);

    show("remove ad", &injector.remove_injected(3));
    render(&injector);

    return Ok(());
}
