//! [`TerminalSink`] — renders keystrokes into a writer, usually stdout.

use crate::error::Result;
use crate::sink::{KeySink, NamedKey};
use async_trait::async_trait;
use std::io::{self, Write};

/// Writes each keystroke to `W` and flushes immediately, so the typing can be
/// watched live. Backspace is rendered as "back, blank, back".
pub struct TerminalSink<W> {
    writer: W,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl<W: Write + Send> KeySink for TerminalSink<W> {
    async fn emit(&mut self, ch: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.write(ch.encode_utf8(&mut buf).as_bytes())
    }

    async fn emit_key(&mut self, key: NamedKey) -> Result<()> {
        match key {
            NamedKey::Space => self.write(b" "),
            NamedKey::Enter => self.write(b"\n"),
            NamedKey::Backspace => self.write(b"\x08 \x08"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_renders_keys() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.emit('h').await.unwrap();
        sink.emit_key(NamedKey::Space).await.unwrap();
        sink.emit('é').await.unwrap();
        sink.emit_key(NamedKey::Backspace).await.unwrap();
        sink.emit_key(NamedKey::Enter).await.unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "h é\x08 \x08\n");
    }
}
