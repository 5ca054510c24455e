//! The [`KeySink`] trait: where keystrokes produced by a run are delivered.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Control keys the engine may press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Space,
    Enter,
    Backspace,
}

impl NamedKey {
    pub fn name(&self) -> &'static str {
        match self {
            NamedKey::Space => "space",
            NamedKey::Enter => "enter",
            NamedKey::Backspace => "backspace",
        }
    }
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One delivered keystroke, as seen by the input target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Key(NamedKey),
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keystroke::Char(ch) => write!(f, "{ch:?}"),
            Keystroke::Key(key) => write!(f, "<{key}>"),
        }
    }
}

/// Delivers keystrokes to an input target.
///
/// The engine calls a sink strictly sequentially from its run loop. Sinks
/// must not add pacing of their own; timing belongs to the engine. A
/// returned error ends the run.
#[async_trait]
pub trait KeySink: Send {
    /// Deliver one printable character.
    async fn emit(&mut self, ch: char) -> Result<()>;

    /// Deliver one control keystroke.
    async fn emit_key(&mut self, key: NamedKey) -> Result<()>;
}

#[async_trait]
impl KeySink for Box<dyn KeySink> {
    async fn emit(&mut self, ch: char) -> Result<()> {
        (**self).emit(ch).await
    }

    async fn emit_key(&mut self, key: NamedKey) -> Result<()> {
        (**self).emit_key(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(NamedKey::Space.to_string(), "space");
        assert_eq!(NamedKey::Enter.to_string(), "enter");
        assert_eq!(NamedKey::Backspace.to_string(), "backspace");
    }

    #[test]
    fn test_keystroke_display() {
        assert_eq!(Keystroke::Char('a').to_string(), "'a'");
        assert_eq!(Keystroke::Key(NamedKey::Enter).to_string(), "<enter>");
    }
}
