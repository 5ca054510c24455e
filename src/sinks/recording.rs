//! [`RecordingSink`] — keeps every keystroke in memory.

use crate::error::Result;
use crate::sink::{KeySink, Keystroke, NamedKey};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

/// Records keystrokes instead of delivering them anywhere.
///
/// Clones share the same log, so a clone kept by the caller can inspect what
/// the engine typed while the engine owns the original.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<Keystroke>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn keystrokes(&self) -> Vec<Keystroke> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Replay the log into the text an editor would end up holding.
    pub fn rendered_text(&self) -> String {
        let mut text = String::new();
        for keystroke in self.lock().iter() {
            match keystroke {
                Keystroke::Char(ch) => text.push(*ch),
                Keystroke::Key(NamedKey::Space) => text.push(' '),
                Keystroke::Key(NamedKey::Enter) => text.push('\n'),
                Keystroke::Key(NamedKey::Backspace) => {
                    text.pop();
                }
            }
        }
        text
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Keystroke>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl KeySink for RecordingSink {
    async fn emit(&mut self, ch: char) -> Result<()> {
        self.lock().push(Keystroke::Char(ch));
        Ok(())
    }

    async fn emit_key(&mut self, key: NamedKey) -> Result<()> {
        self.lock().push(Keystroke::Key(key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_log() {
        let observer = RecordingSink::new();
        let mut sink = observer.clone();
        sink.emit('a').await.unwrap();
        sink.emit_key(NamedKey::Space).await.unwrap();

        assert_eq!(
            observer.keystrokes(),
            vec![Keystroke::Char('a'), Keystroke::Key(NamedKey::Space)]
        );
        assert_eq!(observer.len(), 2);
    }

    #[tokio::test]
    async fn test_rendered_text_applies_backspace() {
        let mut sink = RecordingSink::new();
        for ch in "hw".chars() {
            sink.emit(ch).await.unwrap();
        }
        sink.emit_key(NamedKey::Backspace).await.unwrap();
        sink.emit('i').await.unwrap();
        sink.emit_key(NamedKey::Enter).await.unwrap();
        sink.emit('x').await.unwrap();

        assert_eq!(sink.rendered_text(), "hi\nx");
    }
}
