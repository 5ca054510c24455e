#[cfg(feature = "keyboard")]
mod keyboard;
mod recording;
mod terminal;

#[cfg(feature = "keyboard")]
pub use keyboard::KeyboardSink;
pub use recording::RecordingSink;
pub use terminal::TerminalSink;
