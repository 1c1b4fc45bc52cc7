// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Injector - overlay extra entries onto a mutable child sequence.
//!
//! Entries are injected at fixed positions of a merged sequence that also
//! contains every item of a host-owned child sequence. The injector keeps
//! merged and child positions translatable in both directions, gives every
//! merged entry a stable identity, and turns each child mutation into the
//! merged-space notifications a rendering surface needs.
//!
//! # Quick Start
//!
//! ```
//! use injector::ChildEvent;
//! use injector::ChildSequence;
//! use injector::Injector;
//! use injector::Kind;
//! use injector::Notification;
//!
//! struct Rows(Vec<&'static str>);
//!
//! impl ChildSequence for Rows {
//!     type Payload = ();
//!
//!     fn len(&self) -> usize {
//!         return self.0.len();
//!     }
//!
//!     fn kind_at(&self, _index: usize) -> Kind {
//!         return 0;
//!     }
//! }
//!
//! let mut injector = Injector::new(Rows(vec!["a", "b", "c"]));
//! injector.activate();
//!
//! // Put a header above the second row.
//! let notifications = injector.inject("header", 1);
//! assert_eq!(notifications.as_slice(), &[Notification::Inserted { position: 1, count: 1 }]);
//! assert_eq!(injector.from_child_position(1), 2);
//!
//! // The host appends a row, then reports it.
//! injector.child_mut().0.push("d");
//! let notifications = injector.handle(ChildEvent::Inserted { start: 3, count: 1 }).unwrap();
//! assert_eq!(notifications.as_slice(), &[Notification::Inserted { position: 4, count: 1 }]);
//! ```

pub mod child;
pub mod diff;
pub mod entry;
pub mod error;
pub mod event;
pub mod identity;
pub mod injector;
pub mod merge;
pub mod options;
pub mod overlay;
pub mod vector;

pub use child::ChildSequence;
pub use diff::Differ;
pub use diff::EditOp;
pub use diff::MyersDiffer;
pub use entry::Identity;
pub use entry::Kind;
pub use entry::MergedEntry;
pub use entry::NO_IDENTITY;
pub use error::InjectorError;
pub use error::Result;
pub use event::ChildEvent;
pub use event::Notification;
pub use event::Notifications;
pub use injector::Injector;
pub use injector::Slot;
pub use merge::MergePolicy;
pub use options::MergeOptions;
pub use overlay::OverlaySet;
pub use overlay::ViewCreator;
pub use vector::TranslationVectors;
