//! [`KeyboardSink`] — injects keystrokes into the OS active input target.

use crate::error::{EngineError, Result};
use crate::sink::{KeySink, Keystroke, NamedKey};
use async_trait::async_trait;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use tokio::sync::oneshot;

type Request = (Keystroke, oneshot::Sender<std::result::Result<(), String>>);

/// Delivers keystrokes through enigo on a dedicated injector thread.
///
/// The enigo connection stays on the thread that created it; the sink only
/// passes requests over a channel and waits for each acknowledgement, which
/// keeps injections strictly ordered.
pub struct KeyboardSink {
    tx: Sender<Request>,
}

impl KeyboardSink {
    pub fn new() -> Result<Self> {
        let (tx, rx) = channel();
        let (ready_tx, ready_rx) = channel();

        thread::Builder::new()
            .name("phantom-keys-injector".into())
            .spawn(move || match Enigo::new(&Settings::default()) {
                Ok(enigo) => {
                    let _ = ready_tx.send(Ok(()));
                    run_injector(enigo, rx);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e.to_string()));
                }
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self { tx }),
            Ok(Err(reason)) => Err(EngineError::unsupported_output(format!(
                "failed to initialize keyboard: {reason}"
            ))),
            Err(_) => Err(EngineError::unsupported_output(
                "keyboard injector thread exited during startup",
            )),
        }
    }

    async fn deliver(&self, keystroke: Keystroke) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send((keystroke, ack_tx))
            .map_err(|_| EngineError::injection(keystroke.to_string(), "injector thread is gone"))?;
        match ack_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(reason)) => Err(EngineError::injection(keystroke.to_string(), reason)),
            Err(_) => Err(EngineError::injection(
                keystroke.to_string(),
                "injector thread dropped the request",
            )),
        }
    }
}

fn run_injector(mut enigo: Enigo, rx: Receiver<Request>) {
    for (keystroke, ack) in rx {
        let result = match keystroke {
            Keystroke::Char(ch) => {
                let mut buf = [0u8; 4];
                enigo.text(ch.encode_utf8(&mut buf))
            }
            Keystroke::Key(key) => enigo.key(to_enigo_key(key), Direction::Click),
        };
        let _ = ack.send(result.map_err(|e| e.to_string()));
    }
}

fn to_enigo_key(key: NamedKey) -> Key {
    match key {
        NamedKey::Space => Key::Space,
        NamedKey::Enter => Key::Return,
        NamedKey::Backspace => Key::Backspace,
    }
}

#[async_trait]
impl KeySink for KeyboardSink {
    async fn emit(&mut self, ch: char) -> Result<()> {
        self.deliver(Keystroke::Char(ch)).await
    }

    async fn emit_key(&mut self, key: NamedKey) -> Result<()> {
        self.deliver(Keystroke::Key(key)).await
    }
}
