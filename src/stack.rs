use crate::error::{Error, Result};

/// # Stack
/// Fixed-capacity store of return addresses used by `CALL` and `RET`.
///
/// The capacity is chosen at construction and never changes; pushing onto a
/// full stack and popping an empty one are distinct failures.
#[derive(Clone, Debug)]
pub struct Stack {
    slots: Vec<u16>,
    len: usize,
}

impl Stack {
    pub fn new(capacity: usize) -> Self {
        Stack {
            slots: vec![0; capacity],
            len: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<()> {
        if self.len == self.slots.len() {
            return Err(Error::StackOverflow {
                capacity: self.slots.len(),
            });
        }
        self.slots[self.len] = address;
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the top address, zeroing the slot it occupied.
    pub fn pop(&mut self) -> Result<u16> {
        if self.len == 0 {
            return Err(Error::StackUnderflow);
        }
        self.len -= 1;
        let address = self.slots[self.len];
        self.slots[self.len] = 0;
        Ok(address)
    }

    pub fn peek(&self) -> Result<u16> {
        match self.len {
            0 => Err(Error::StackUnderflow),
            len => Ok(self.slots[len - 1]),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
