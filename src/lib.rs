//! # Phantom Keys
//!
//! Human-like keystroke simulation.
//!
//! Phantom Keys takes a block of text and types it the way a person would:
//! at a target speed with natural jitter, with the occasional neighboring key
//! hit by mistake and then corrected, slowing down as the run wears on,
//! speeding up in confident bursts, and pausing between words and paragraphs.
//! The keystrokes go to a [`KeySink`]: the OS keyboard, a terminal, or
//! anything else you implement.
//!
//! ## Quick start
//!
//! ```no_run
//! use phantom_keys::{RunConfig, TerminalSink, TypingEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RunConfig::new("Hello there.\nThis is typed, not pasted.")
//!         .with_wpm(70.0)
//!         .with_typo_probability(0.04);
//!
//!     let mut engine = TypingEngine::new(TerminalSink::stdout());
//!     let stats = engine.type_text(&config).await?;
//!     eprintln!("{stats}");
//!     Ok(())
//! }
//! ```
//!
//! ## Controlling a run
//!
//! [`TypingEngine::type_text`] runs until the text is typed or the run is
//! stopped. Pause, resume, and stop go through an [`EngineHandle`], which can
//! be cloned and used from any task or thread:
//!
//! ```no_run
//! use phantom_keys::{RecordingSink, RunConfig, Status, TypingEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (mut engine, mut events) = TypingEngine::with_channel(RecordingSink::new());
//!     let handle = engine.handle();
//!
//!     let run = tokio::spawn(async move {
//!         let config = RunConfig::new("a long document ...");
//!         engine.type_text(&config).await
//!     });
//!
//!     while let Some(event) = events.recv().await {
//!         if event.as_status() == Some(Status::Started) {
//!             handle.pause();
//!             handle.resume();
//!             handle.stop();
//!         }
//!     }
//!
//!     let stats = run.await??;
//!     println!("{stats}");
//!     Ok(())
//! }
//! ```
//!
//! ## Pacing
//!
//! | Factor | Effect |
//! |--------|--------|
//! | Base delay | `60 / (wpm * 5)` seconds per character |
//! | Uppercase | ×1.1 |
//! | Punctuation and symbols ([`timing::SLOW_SYMBOLS`]) | ×1.3 |
//! | Variability | ×(1 ± variability), uniform |
//! | Hesitation | +0.1–0.3 s with 2% chance |
//! | Fatigue | up to ×1.15 toward the end of the text |
//! | Burst mode | ×0.6 for 15% of words |
//!
//! ## Implementing a custom sink
//!
//! ```no_run
//! use async_trait::async_trait;
//! use phantom_keys::{KeySink, NamedKey, Result};
//!
//! pub struct Morse;
//!
//! #[async_trait]
//! impl KeySink for Morse {
//!     async fn emit(&mut self, ch: char) -> Result<()> {
//!         println!("char {ch}");
//!         Ok(())
//!     }
//!
//!     async fn emit_key(&mut self, key: NamedKey) -> Result<()> {
//!         println!("key {key}");
//!         Ok(())
//!     }
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod sink;
pub mod sinks;
pub mod timing;
pub mod typo;

pub use config::{RunConfig, parse_duration};
pub use engine::{EngineHandle, Stats, TypingEngine};
pub use error::{EngineError, Result};
pub use event::{EngineEvent, EventHandler, Status};
pub use sink::{KeySink, Keystroke, NamedKey};
#[cfg(feature = "keyboard")]
pub use sinks::KeyboardSink;
pub use sinks::{RecordingSink, TerminalSink};
