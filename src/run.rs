use std::thread;

use crossbeam_channel::{select, tick};

use crate::chip8::{Chip8, Status};
use crate::config::Config;
use crate::display::FrameBuffer;
use crate::error::Result;

/// Receives a frame whenever the display changed
pub trait Render {
    fn render(&mut self, frame: &FrameBuffer);
}

impl<F: FnMut(&FrameBuffer)> Render for F {
    fn render(&mut self, frame: &FrameBuffer) {
        self(frame)
    }
}

/// Runs `chip8` until it halts or an instruction fails.
///
/// Two clocks drive the machine:
/// - a timer thread ticks the delay/sound timers and key expiry at `config.timer_hz`
/// - this thread executes one instruction per `config.cycle_time()`, handing any changed
///   frame to `render` afterwards
///
/// Both stop as soon as the halt signal fires, whether from a halt instruction, from another
/// thread holding `chip8.halt_signal()`, or from an error here. Input is fed in from outside
/// through a clone of `chip8.peripherals()`.
pub fn run(chip8: &mut Chip8, render: &mut dyn Render, config: &Config) -> Result<()> {
    tracing::info!(
        clock_speed = config.clock_speed,
        timer_hz = config.timer_hz,
        "starting"
    );

    let halt = chip8.halt_signal().clone();

    let timers = {
        let peripherals = chip8.peripherals().clone();
        let halt = halt.clone();
        let ticker = tick(config.tick_time());
        thread::spawn(move || loop {
            select! {
                recv(halt.receiver()) -> _ => break,
                recv(ticker) -> _ => peripherals.tick(),
            }
        })
    };

    let clock = tick(config.cycle_time());
    let result = loop {
        select! {
            recv(halt.receiver()) -> _ => break Ok(()),
            recv(clock) -> _ => match chip8.execute_one() {
                Ok(Status::Running) => {
                    if let Some(frame) = chip8.get_frame() {
                        render.render(&frame);
                    }
                }
                Ok(Status::Halted) => break Ok(()),
                Err(e) => {
                    tracing::warn!(pc = chip8.state().pc, "stopping on error: {}", e);
                    break Err(e);
                }
            },
        }
    };

    halt.halt();
    if timers.join().is_err() {
        tracing::warn!("timer thread panicked");
    }
    tracing::info!("stopped");
    result
}
