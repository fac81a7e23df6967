use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::{bounded, select, Receiver, Sender};

use crate::constants::KEY_COUNT;
use crate::error::{Error, Result};
use crate::halt::Halt;

/// Everything the CPU shares with the timer and input timelines
#[derive(Debug)]
struct Shared {
    delay_timer: u8,
    sound_timer: u8,
    /// Timer ticks left before each key is released; a key is pressed while its entry is > 0
    key_expiry: [u32; KEY_COUNT],
    awaiting_key: bool,
}

/// # Peripherals
/// The delay and sound timers plus the hex keypad.
///
/// Three timelines touch this state: the CPU (through opcodes), the 60Hz timer driver (via
/// `tick`) and the input source (via `on_key_down`). All of it sits behind one mutex, and
/// cloning a `Peripherals` hands out another handle to the same state.
///
/// ## Timers
/// - both are 8 bits and count down by one per `tick`, stopping at zero
/// - the sound timer is audible while non-zero
///
/// ## Keys
/// - a key-down marks the key pressed for `expiry_ticks` ticks
/// - opcodes that test a pressed key consume it, releasing it early
/// - `wait_for_key` parks the caller until the next key-down or a halt
#[derive(Clone, Debug)]
pub struct Peripherals {
    shared: Arc<Mutex<Shared>>,
    key_sender: Sender<u8>,
    key_receiver: Receiver<u8>,
    expiry_ticks: u32,
}

impl Peripherals {
    /// # Arguments
    /// * `expiry_ticks` how many timer ticks an unconsumed key press lasts (at least 1)
    pub fn new(expiry_ticks: u32) -> Self {
        let (key_sender, key_receiver) = bounded(KEY_COUNT);
        Peripherals {
            shared: Arc::new(Mutex::new(Shared {
                delay_timer: 0,
                sound_timer: 0,
                key_expiry: [0; KEY_COUNT],
                awaiting_key: false,
            })),
            key_sender,
            key_receiver,
            expiry_ticks: expiry_ticks.max(1),
        }
    }

    /// Advances every countdown by one tick of the 60Hz clock
    pub fn tick(&self) {
        let mut shared = self.lock();
        shared.delay_timer = shared.delay_timer.saturating_sub(1);
        shared.sound_timer = shared.sound_timer.saturating_sub(1);
        for (key, remaining) in shared.key_expiry.iter_mut().enumerate() {
            if *remaining > 0 {
                *remaining -= 1;
                if *remaining == 0 {
                    tracing::debug!("key {:X} expired", key);
                }
            }
        }
    }

    pub fn delay_timer(&self) -> u8 {
        self.lock().delay_timer
    }

    pub fn set_delay_timer(&self, value: u8) {
        self.lock().delay_timer = value;
    }

    pub fn sound_timer(&self) -> u8 {
        self.lock().sound_timer
    }

    pub fn set_sound_timer(&self, value: u8) {
        self.lock().sound_timer = value;
    }

    /// Whether a tone should currently be playing
    pub fn sound_active(&self) -> bool {
        self.lock().sound_timer > 0
    }

    /// Presses `key` and (re)starts its expiry countdown
    pub fn on_key_down(&self, key: u8) -> Result<()> {
        let index = Self::key_index(key)?;
        let mut shared = self.lock();
        shared.key_expiry[index] = self.expiry_ticks;
        if shared.awaiting_key {
            // A full queue already holds a key that will satisfy the waiter
            let _ = self.key_sender.try_send(key);
        }
        tracing::debug!("key {:X} down", key);
        Ok(())
    }

    pub fn is_pressed(&self, key: u8) -> Result<bool> {
        let index = Self::key_index(key)?;
        Ok(self.lock().key_expiry[index] > 0)
    }

    /// Releases `key` if it is pressed, returning whether it was
    pub fn consume_if_pressed(&self, key: u8) -> Result<bool> {
        let index = Self::key_index(key)?;
        let mut shared = self.lock();
        let pressed = shared.key_expiry[index] > 0;
        shared.key_expiry[index] = 0;
        Ok(pressed)
    }

    pub fn pressed_keys(&self) -> [bool; KEY_COUNT] {
        let shared = self.lock();
        let mut pressed = [false; KEY_COUNT];
        for (slot, &remaining) in pressed.iter_mut().zip(shared.key_expiry.iter()) {
            *slot = remaining > 0;
        }
        pressed
    }

    /// Blocks until a key goes down, returning it, or until `halt` fires, returning `None`.
    ///
    /// Only key-down events that arrive after the wait starts count; a key already held does
    /// not.
    pub fn wait_for_key(&self, halt: &Halt) -> Option<u8> {
        {
            let mut shared = self.lock();
            shared.awaiting_key = true;
            while self.key_receiver.try_recv().is_ok() {}
        }
        tracing::debug!("waiting for key");

        let key = select! {
            recv(self.key_receiver) -> key => key.ok(),
            recv(halt.receiver()) -> _ => None,
        };

        self.lock().awaiting_key = false;
        tracing::debug!("finished waiting for key: {:?}", key);
        key
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.lock().awaiting_key
    }

    fn key_index(key: u8) -> Result<usize> {
        let index = usize::from(key);
        if index < KEY_COUNT {
            Ok(index)
        } else {
            Err(Error::InvalidKey { key })
        }
    }

    // The guarded data are plain counters, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
