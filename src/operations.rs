use ::rand::Rng;

use crate::config::ShiftQuirk;
use crate::constants::SPRITE_HEIGHT;
use crate::error::Result;
use crate::opcode::Opcode;
use crate::peripherals::Peripherals;
use crate::state::State;

/// What the program counter does once an operation has run.
///
/// Operations never touch `pc` themselves; the interpreter applies the `Flow` in one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = addr
    Jump(u16),
    /// pc = addr, then pc += 2 past the call site
    Return(u16),
    /// block until a key goes down, store it in Vx, then pc += 2
    AwaitKey(usize),
    /// stop the machine; pc stays put
    Halt,
}

impl Flow {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// Every operation shares this signature so `instruction::decode` can hand one back.
///
/// An operation either completes all of its writes or returns an error before making any.
pub type Operation = fn(op: u16, state: &mut State, io: &Peripherals) -> Result<Flow>;

/// exit
pub fn halt(_op: u16, _state: &mut State, _io: &Peripherals) -> Result<Flow> {
    Ok(Flow::Halt)
}

/// clear
pub fn cls(_op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.display.clear();
    Ok(Flow::Next)
}

/// PC = STACK.pop()
pub fn ret(_op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let addr = state.stack.pop()?;
    Ok(Flow::Return(addr))
}

/// PC = addr
pub fn jump(op: u16, _state: &mut State, _io: &Peripherals) -> Result<Flow> {
    Ok(Flow::Jump(op.nnn()))
}

/// STACK.push(PC); PC = addr
pub fn call(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.stack.push(state.pc)?;
    Ok(Flow::Jump(op.nnn()))
}

/// if Vx == kk then skip
pub fn ske(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    Ok(Flow::skip_if(state.v[op.x()] == op.kk()))
}

/// if Vx != kk then skip
pub fn skne(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    Ok(Flow::skip_if(state.v[op.x()] != op.kk()))
}

/// if Vx == Vy then skip
pub fn skre(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    Ok(Flow::skip_if(state.v[op.x()] == state.v[op.y()]))
}

/// Vx = kk
pub fn load(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.v[op.x()] = op.kk();
    Ok(Flow::Next)
}

/// Vx += kk
/// Wraps without touching VF
pub fn add(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    Ok(Flow::Next)
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.v[op.x()] = state.v[op.y()];
    Ok(Flow::Next)
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.v[op.x()] |= state.v[op.y()];
    Ok(Flow::Next)
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.v[op.x()] &= state.v[op.y()];
    Ok(Flow::Next)
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.v[op.x()] ^= state.v[op.y()];
    Ok(Flow::Next)
}

// The flag is written after the result so that VF ends up holding the flag when x == F.

/// Vx += Vy; VF = carry
pub fn addr(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    state.v[0xF] = carry as u8;
    Ok(Flow::Next)
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vx.wrapping_sub(vy);
    state.v[0xF] = (vx >= vy) as u8;
    Ok(Flow::Next)
}

/// Vx >>= 1; VF = bit shifted out
pub fn shr(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let src = shift_source(op, state);
    state.v[op.x()] = src >> 1;
    state.v[0xF] = src & 0x1;
    Ok(Flow::Next)
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.v[0xF] = (vy >= vx) as u8;
    Ok(Flow::Next)
}

/// Vx <<= 1; VF = bit shifted out
pub fn shl(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let src = shift_source(op, state);
    state.v[op.x()] = src << 1;
    state.v[0xF] = src >> 7;
    Ok(Flow::Next)
}

fn shift_source(op: u16, state: &State) -> u8 {
    match state.shift_quirk {
        ShiftQuirk::InPlace => state.v[op.x()],
        ShiftQuirk::FromVy => state.v[op.y()],
    }
}

/// if Vx != Vy then skip
pub fn skrne(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    Ok(Flow::skip_if(state.v[op.x()] != state.v[op.y()]))
}

/// I = addr
pub fn loadi(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.i = op.nnn();
    Ok(Flow::Next)
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    Ok(Flow::Jump(op.nnn() + u16::from(state.v[0x0])))
}

/// Vx = rand_byte & kk
pub fn rand(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let rand_byte: u8 = state.rng.gen();
    state.v[op.x()] = rand_byte & op.kk();
    Ok(Flow::Next)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position (Vx, Vy), wrapping at the screen edges.
/// VF is set if any lit pixel was erased.
pub fn draw(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let x = usize::from(state.v[op.x()]);
    let y = usize::from(state.v[op.y()]);
    let sprite = state.memory.read_range(state.i, usize::from(op.n()));
    let collision = state.display.draw_sprite(x, y, &sprite);
    state.v[0xF] = collision as u8;
    Ok(Flow::Next)
}

/// if Vx.pressed then skip
/// A pressed key is consumed
pub fn skpr(op: u16, state: &mut State, io: &Peripherals) -> Result<Flow> {
    let pressed = io.consume_if_pressed(state.v[op.x()])?;
    Ok(Flow::skip_if(pressed))
}

/// if !Vx.pressed then skip
/// A pressed key is consumed
pub fn skup(op: u16, state: &mut State, io: &Peripherals) -> Result<Flow> {
    let pressed = io.consume_if_pressed(state.v[op.x()])?;
    Ok(Flow::skip_if(!pressed))
}

/// Vx = DT
pub fn moved(op: u16, state: &mut State, io: &Peripherals) -> Result<Flow> {
    state.v[op.x()] = io.delay_timer();
    Ok(Flow::Next)
}

/// await keypress for Vx
pub fn keyd(op: u16, _state: &mut State, _io: &Peripherals) -> Result<Flow> {
    Ok(Flow::AwaitKey(op.x()))
}

/// DT = Vx
pub fn loads(op: u16, state: &mut State, io: &Peripherals) -> Result<Flow> {
    io.set_delay_timer(state.v[op.x()]);
    Ok(Flow::Next)
}

/// ST = Vx
pub fn ld(op: u16, state: &mut State, io: &Peripherals) -> Result<Flow> {
    io.set_sound_timer(state.v[op.x()]);
    Ok(Flow::Next)
}

/// I += Vx
/// I wraps at 16 bits; memory accesses through it wrap at 4096
pub fn addi(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    Ok(Flow::Next)
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for digit Vx
/// See constants::SPRITE_SHEET
pub fn ldspr(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.i = u16::from(state.v[op.x()]) * SPRITE_HEIGHT;
    Ok(Flow::Next)
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let vx = state.v[op.x()];
    state.memory.write_range(state.i, &[vx / 100, vx / 10 % 10, vx % 10]);
    Ok(Flow::Next)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    state.memory.write_range(state.i, &state.v[..=op.x()]);
    Ok(Flow::Next)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &mut State, _io: &Peripherals) -> Result<Flow> {
    let bytes = state.memory.read_range(state.i, op.x() + 1);
    state.v[..=op.x()].copy_from_slice(&bytes);
    Ok(Flow::Next)
}
