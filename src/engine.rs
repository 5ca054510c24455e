//! The typing engine: turns a [`RunConfig`] into paced keystrokes.

use crate::config::RunConfig;
use crate::error::Result;
use crate::event::{self, EngineEvent, EventHandler, Status};
use crate::sink::{KeySink, NamedKey};
use crate::timing::{self, TimingModel};
use crate::typo;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub chars_typed: u64,
    pub typos_made: u64,
    pub words_completed: u64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Typed {} chars, {} words, {} typos made",
            self.chars_typed, self.words_completed, self.typos_made
        )
    }
}

/// State shared between the run loop and [`EngineHandle`]s.
struct Shared {
    running: AtomicBool,
    cancel_requested: AtomicBool,
    /// Pause gate; the value is the paused flag.
    paused: watch::Sender<bool>,
    chars_typed: AtomicU64,
    typos_made: AtomicU64,
    words_completed: AtomicU64,
}

impl Shared {
    fn new() -> Self {
        let (paused, _) = watch::channel(false);
        Self {
            running: AtomicBool::new(false),
            cancel_requested: AtomicBool::new(false),
            paused,
            chars_typed: AtomicU64::new(0),
            typos_made: AtomicU64::new(0),
            words_completed: AtomicU64::new(0),
        }
    }

    fn begin_run(&self) {
        self.cancel_requested.store(false, Ordering::SeqCst);
        self.chars_typed.store(0, Ordering::SeqCst);
        self.typos_made.store(0, Ordering::SeqCst);
        self.words_completed.store(0, Ordering::SeqCst);
        self.paused.send_replace(false);
        self.running.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_requested.load(Ordering::SeqCst)
    }

    fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    /// Block while the pause gate is closed and the run is not cancelled.
    async fn wait_while_paused(&self) {
        let mut gate = self.paused.subscribe();
        // The sender lives in `self`, so the gate cannot close under us.
        let _ = gate
            .wait_for(|paused| !*paused || self.is_cancelled())
            .await;
    }

    fn stats(&self) -> Stats {
        Stats {
            chars_typed: self.chars_typed.load(Ordering::SeqCst),
            typos_made: self.typos_made.load(Ordering::SeqCst),
            words_completed: self.words_completed.load(Ordering::SeqCst),
        }
    }
}

/// Leaves the engine idle however the run loop exits, including on error.
struct RunGuard(Arc<Shared>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.running.store(false, Ordering::SeqCst);
        self.0.paused.send_replace(false);
    }
}

/// Control surface for a [`TypingEngine`], usable from any thread.
///
/// All methods are non-blocking and safe to call at any time, including
/// before a run starts and after it has ended.
#[derive(Clone)]
pub struct EngineHandle {
    shared: Arc<Shared>,
}

impl EngineHandle {
    /// Request cancellation of the current run.
    ///
    /// Releases an active pause so the run loop notices promptly, and reports
    /// the engine as not running right away. The loop itself may still be
    /// finishing the keystroke delay it is in.
    pub fn stop(&self) {
        debug!("stop requested");
        self.shared.cancel_requested.store(true, Ordering::SeqCst);
        self.shared.paused.send_replace(false);
        self.shared.running.store(false, Ordering::SeqCst);
    }

    /// Suspend the run at its next character or word. No-op when idle or
    /// once a stop has been requested.
    pub fn pause(&self) {
        let shared = &self.shared;
        // `stop` and `RunGuard` clear the gate after their flags are written,
        // so checking the flags under the gate's lock cannot strand a pause.
        let paused = shared.paused.send_if_modified(|paused| {
            if *paused || !shared.running.load(Ordering::SeqCst) || shared.is_cancelled() {
                return false;
            }
            *paused = true;
            true
        });
        if paused {
            debug!("pause requested");
        }
    }

    /// Release a pause. No-op when not paused.
    pub fn resume(&self) {
        if !self.is_paused() {
            return;
        }
        debug!("resume requested");
        self.shared.paused.send_replace(false);
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.shared.is_paused()
    }

    /// Counters of the current or most recent run.
    pub fn stats(&self) -> Stats {
        self.shared.stats()
    }
}

/// Types text into a [`KeySink`] the way a person would.
///
/// One engine performs one run at a time: [`type_text`](Self::type_text)
/// borrows it mutably for the whole run. Use [`handle`](Self::handle) to
/// pause, resume, or stop the run from elsewhere.
pub struct TypingEngine<S> {
    sink: S,
    shared: Arc<Shared>,
    handler: EventHandler,
}

impl<S: KeySink> TypingEngine<S> {
    /// Create an engine whose notifications go to the `tracing` log.
    pub fn new(sink: S) -> Self {
        Self::with_event_handler(sink, event::log_handler())
    }

    /// Create an engine that calls `handler` for every notification.
    pub fn with_handler<F>(sink: S, handler: F) -> Self
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
    {
        Self::with_event_handler(sink, Arc::new(handler))
    }

    /// Create an engine whose notifications arrive on a channel.
    pub fn with_channel(sink: S) -> (Self, UnboundedReceiver<EngineEvent>) {
        let (handler, rx) = event::channel();
        (Self::with_event_handler(sink, handler), rx)
    }

    pub fn with_event_handler(sink: S, handler: EventHandler) -> Self {
        Self {
            sink,
            shared: Arc::new(Shared::new()),
            handler,
        }
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn stats(&self) -> Stats {
        self.shared.stats()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Type `config.text` to completion or until stopped.
    ///
    /// Emits [`Status::Started`] first and exactly one of
    /// [`Status::Complete`] or [`Status::Stopped`] last. Cancellation is not
    /// an error: a stopped run returns `Ok` with the partial stats.
    ///
    /// # Errors
    ///
    /// Returns the validation error for an unusable config before touching
    /// any state. Returns the sink's error if a keystroke cannot be
    /// delivered; such a run ends without a terminal status, and the engine
    /// is left idle.
    pub async fn type_text(&mut self, config: &RunConfig) -> Result<Stats> {
        config.validate()?;

        let paragraphs = split_paragraphs(&config.text);
        let total = planned_keystrokes(&paragraphs);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        self.shared.begin_run();
        let _guard = RunGuard(Arc::clone(&self.shared));
        debug!(
            wpm = config.wpm,
            keystrokes = total,
            paragraphs = paragraphs.len(),
            "typing run started"
        );
        self.notify(EngineEvent::Status(Status::Started));

        if let Err(e) = self.run(&paragraphs, total, config, &mut rng).await {
            warn!("typing run aborted: {}", e);
            return Err(e);
        }

        self.shared.words_completed.fetch_add(1, Ordering::SeqCst);
        self.shared.running.store(false, Ordering::SeqCst);
        let stats = self.shared.stats();

        if self.shared.is_cancelled() {
            info!(%stats, "typing stopped");
            self.notify(EngineEvent::Status(Status::Stopped));
        } else {
            info!(%stats, "typing complete");
            self.notify(EngineEvent::Status(Status::Complete));
        }

        Ok(stats)
    }

    async fn run(
        &mut self,
        paragraphs: &[Vec<&str>],
        total: usize,
        config: &RunConfig,
        rng: &mut StdRng,
    ) -> Result<()> {
        let timing = TimingModel::new(config.wpm, config.variability);
        let mut processed = 0usize;

        'run: for (para_idx, words) in paragraphs.iter().enumerate() {
            if self.shared.is_cancelled() {
                break;
            }

            for (word_idx, word) in words.iter().enumerate() {
                self.shared.wait_while_paused().await;
                if self.shared.is_cancelled() {
                    break 'run;
                }

                let fatigue = timing::fatigue_factor(processed, total);
                let burst = timing::burst_multiplier(config.burst_mode, rng);

                for ch in word.chars() {
                    self.shared.wait_while_paused().await;
                    if self.shared.is_cancelled() {
                        break 'run;
                    }

                    if rng.gen_bool(config.typo_probability) {
                        self.mistype(ch, rng).await?;
                    }

                    self.sink.emit(ch).await?;
                    self.shared.chars_typed.fetch_add(1, Ordering::SeqCst);
                    processed += 1;

                    let delay = timing.char_delay(ch, rng) * burst * fatigue;
                    sleep(timing::seconds(delay)).await;
                    self.report_progress(processed, total);
                }

                if word_idx + 1 < words.len() && !self.shared.is_cancelled() {
                    self.sink.emit_key(NamedKey::Space).await?;
                    self.shared.chars_typed.fetch_add(1, Ordering::SeqCst);
                    self.shared.words_completed.fetch_add(1, Ordering::SeqCst);
                    processed += 1;
                    self.report_progress(processed, total);
                    sleep(timing.word_pause(fatigue, rng)).await;
                }
            }

            if para_idx + 1 < paragraphs.len() && !self.shared.is_cancelled() {
                self.sink.emit_key(NamedKey::Enter).await?;
                self.shared.chars_typed.fetch_add(1, Ordering::SeqCst);
                processed += 1;
                self.report_progress(processed, total);
                sleep(timing::paragraph_pause(rng)).await;
                self.notify(EngineEvent::Status(Status::NewParagraph));
            }
        }

        Ok(())
    }

    /// Type a wrong neighbor of `ch`, notice it, and erase it.
    async fn mistype(&mut self, ch: char, rng: &mut StdRng) -> Result<()> {
        let wrong = typo::typo_char(ch, rng);
        trace!(intended = %ch, typed = %wrong, "typo");
        self.sink.emit(wrong).await?;
        self.shared.typos_made.fetch_add(1, Ordering::SeqCst);
        sleep(timing::recognition_delay(rng)).await;
        self.sink.emit_key(NamedKey::Backspace).await?;
        sleep(timing::correction_delay(rng)).await;
        Ok(())
    }

    fn report_progress(&self, processed: usize, total: usize) {
        let progress = (processed as f64 / total as f64 * 100.0).min(100.0);
        self.notify(EngineEvent::Progress(progress));
    }

    fn notify(&self, event: EngineEvent) {
        (self.handler)(&event);
    }
}

/// Split text into paragraphs of words. Runs of whitespace collapse.
fn split_paragraphs(text: &str) -> Vec<Vec<&str>> {
    text.split('\n')
        .map(|paragraph| paragraph.split_whitespace().collect())
        .collect()
}

/// Keystrokes a clean run injects: word characters, the spaces between
/// words, and the enters between paragraphs.
fn planned_keystrokes(paragraphs: &[Vec<&str>]) -> usize {
    let words: usize = paragraphs
        .iter()
        .map(|words| {
            let chars: usize = words.iter().map(|w| w.chars().count()).sum();
            chars + words.len().saturating_sub(1)
        })
        .sum();
    words + paragraphs.len().saturating_sub(1)
}
