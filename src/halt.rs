use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{bounded, Receiver, Sender};

/// # Halt
/// A one-shot broadcast that stops the whole machine.
///
/// Every clone observes the same signal. Nothing is ever sent on the channel: halting drops
/// the only sender, which disconnects every receiver at once, so any thread parked in a
/// `select!` on `receiver()` wakes immediately. Halting more than once is a no-op.
#[derive(Clone, Debug)]
pub struct Halt {
    halted: Arc<AtomicBool>,
    sender: Arc<Mutex<Option<Sender<()>>>>,
    receiver: Receiver<()>,
}

impl Halt {
    pub fn new() -> Self {
        let (sender, receiver) = bounded(0);
        Halt {
            halted: Arc::new(AtomicBool::new(false)),
            sender: Arc::new(Mutex::new(Some(sender))),
            receiver,
        }
    }

    pub fn halt(&self) {
        if !self.halted.swap(true, Ordering::SeqCst) {
            tracing::debug!("halt signalled");
        }
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    /// Becomes ready (disconnected) once the machine halts
    pub fn receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}

impl Default for Halt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_starts_running() {
        let halt = Halt::new();
        assert!(!halt.is_halted());
        assert!(matches!(
            halt.receiver().try_recv(),
            Err(crossbeam_channel::TryRecvError::Empty)
        ));
    }

    #[test]
    fn test_halt_is_seen_by_clones() {
        let halt = Halt::new();
        let other = halt.clone();
        halt.halt();
        assert!(other.is_halted());
        assert!(other.receiver().recv().is_err());
    }

    #[test]
    fn test_halt_is_idempotent() {
        let halt = Halt::new();
        halt.halt();
        halt.halt();
        assert!(halt.is_halted());
    }

    #[test]
    fn test_halt_wakes_blocked_receiver() {
        let halt = Halt::new();
        let waiter = {
            let halt = halt.clone();
            thread::spawn(move || halt.receiver().recv_timeout(Duration::from_secs(5)))
        };
        thread::sleep(Duration::from_millis(20));
        halt.halt();
        let woke = waiter.join().unwrap();
        assert!(matches!(
            woke,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected)
        ));
    }
}
