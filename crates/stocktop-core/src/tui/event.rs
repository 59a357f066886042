//! Terminal input thread.
//!
//! Blocks on crossterm events, translates them, and feeds the pipeline so
//! the foreground loop sees key presses and snapshot arrivals as one
//! ordered stream.

use std::thread;

use crossterm::event::{self, Event as CrosstermEvent};

use crate::pipeline::{Message, PipelineTx};

use super::input::{KeyAction, translate_key};

/// Reads terminal events until quit is forwarded or the consumer goes away.
pub fn spawn_input_thread(tx: PipelineTx) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        loop {
            let message = match event::read() {
                Ok(CrosstermEvent::Key(key)) => match translate_key(key) {
                    KeyAction::Quit => Some(Message::Quit),
                    KeyAction::SelectColumn(column) => Some(Message::SelectColumn(column)),
                    KeyAction::None => None,
                },
                Ok(CrosstermEvent::Resize(..)) => Some(Message::Redraw),
                Ok(_) => None,
                // Terminal gone; treat as quit.
                Err(_) => Some(Message::Quit),
            };
            if let Some(message) = message {
                let quitting = matches!(message, Message::Quit);
                if !tx.send(message) || quitting {
                    break;
                }
            }
        }
    })
}
