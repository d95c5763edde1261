//! # Events Module
//!
//! Event-driven progress reporting for whatever UI drives a comparison.
//!
//! ## Design
//! The core emits events through channels, so a CLI, desktop dialog or
//! web front end can show progress without the core knowing about it.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Pipeline(PipelineEvent::PhaseChanged { phase, .. }) = event {
//!             println!("{}", phase);
//!         }
//!     }
//! });
//!
//! matcher.compare_with_events(&a, &b, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
