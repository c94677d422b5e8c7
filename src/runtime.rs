use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the dial loop reacts to
#[derive(Clone, Debug)]
pub enum DialEvent {
    Key(KeyEvent),
    /// The terminal changed size or regained focus; redraw
    Resize,
    /// No input arrived within the wake interval
    Wake,
}

/// Anything that can hand the loop its next input.
///
/// `wait` returns `None` when nothing arrived within `timeout`. A source whose
/// producer has gone away must still block for `timeout`, so the loop keeps
/// its pace instead of spinning.
pub trait InputSource {
    fn wait(&self, timeout: Duration) -> Option<DialEvent>;
}

impl InputSource for Receiver<DialEvent> {
    fn wait(&self, timeout: Duration) -> Option<DialEvent> {
        match self.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(timeout);
                None
            }
        }
    }
}

/// Keyboard and resize events read from the real terminal on a helper thread
pub struct TerminalInput {
    events: Receiver<DialEvent>,
}

impl TerminalInput {
    pub fn spawn() -> Self {
        let (tx, events) = mpsc::channel();

        std::thread::spawn(move || loop {
            let event = match event::read() {
                // Some platforms report key releases too
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => DialEvent::Key(key),
                Ok(CtEvent::Resize(..) | CtEvent::FocusGained) => DialEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    log::error!("terminal input failed: {err}");
                    return;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        });

        Self { events }
    }
}

impl InputSource for TerminalInput {
    fn wait(&self, timeout: Duration) -> Option<DialEvent> {
        self.events.wait(timeout)
    }
}

/// Pulls one event at a time, waking the loop at least every `wake_every`
/// so the controller gets polled even when nobody is typing.
pub struct EventPump<I: InputSource> {
    input: I,
    wake_every: Duration,
}

impl<I: InputSource> EventPump<I> {
    pub fn new(input: I, wake_every: Duration) -> Self {
        Self { input, wake_every }
    }

    pub fn wake_every(&self) -> Duration {
        self.wake_every
    }

    pub fn next(&self) -> DialEvent {
        self.input.wait(self.wake_every).unwrap_or(DialEvent::Wake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::time::Instant;

    #[test]
    fn wakes_when_input_is_quiet() {
        let (_tx, rx) = mpsc::channel();
        let pump = EventPump::new(rx, Duration::from_millis(1));
        assert!(matches!(pump.next(), DialEvent::Wake));
    }

    #[test]
    fn queued_keys_come_first() {
        let (tx, rx) = mpsc::channel();
        tx.send(DialEvent::Key(KeyEvent::new(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
        )))
        .unwrap();
        tx.send(DialEvent::Resize).unwrap();
        let pump = EventPump::new(rx, Duration::from_millis(10));

        match pump.next() {
            DialEvent::Key(key) => assert_eq!(key.code, KeyCode::Char(' ')),
            other => panic!("expected key event, got {other:?}"),
        }
        assert!(matches!(pump.next(), DialEvent::Resize));
        assert!(matches!(pump.next(), DialEvent::Wake));
    }

    #[test]
    fn closed_input_still_paces_the_loop() {
        let (tx, rx) = mpsc::channel::<DialEvent>();
        drop(tx);
        let pump = EventPump::new(rx, Duration::from_millis(5));

        let started = Instant::now();
        assert!(matches!(pump.next(), DialEvent::Wake));
        assert!(started.elapsed() >= pump.wake_every());
    }
}
