use std::io::Read;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Fault};
use crate::frame::FrameBuffer;
use crate::instruction::Instruction;
use crate::operations::Flow;
use crate::state::{Mode, State};

/// Which diagnostics get written to the log while running
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Warn about unknown opcodes and stack faults
    pub report_faults: bool,
    /// Dump the opcode, registers and stack before every instruction
    pub trace_state: bool,
}

/// The outcome of a single CPU cycle
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Executed(Instruction),
    /// Blocked on `Fx0A` without a key press this cycle
    Waiting,
    /// Blocked on `Fx0A` and unblocked by this key
    KeyReceived(u8),
    /// The instruction was skipped
    Faulted(Fault),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the random number source used by `Cxkk`
///  - which `diagnostics` to report
///
/// Supplies interfaces for:
/// - loading roms
/// - holding and pressing keys
/// - advancing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    rng: StdRng,
    diagnostics: Diagnostics,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_diagnostics(Diagnostics::default())
    }

    pub fn with_diagnostics(diagnostics: Diagnostics) -> Self {
        Chip8 {
            state: State::new(),
            rng: StdRng::from_entropy(),
            diagnostics,
        }
    }

    /// A Chip-8 whose random numbers are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Chip8 {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM; anything past 3584 bytes is ignored
    ///
    /// Returns the number of bytes loaded
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Error> {
        Ok(self.state.memory.load_program(reader)?)
    }

    /// Advances the CPU by a single cycle
    /// - while awaiting a keypress, only checks whether one has arrived
    /// - otherwise gets and executes the next opcode
    pub fn step(&mut self) -> Step {
        if self.diagnostics.trace_state {
            debug!("{}", self.dump());
        }
        let step = match self.state.mode {
            Mode::AwaitingKey { register } => self.resume(register),
            Mode::Running => self.execute_next(),
        };
        // a key press only counts during the cycle it arrived in
        self.state.keypad.clear_pressed();
        step
    }

    fn resume(&mut self, register: u8) -> Step {
        match self.state.keypad.take_pressed() {
            Some(key) => {
                self.state.v[register as usize] = key;
                self.state.mode = Mode::Running;
                self.state.apply(Flow::Next);
                Step::KeyReceived(key)
            }
            None => Step::Waiting,
        }
    }

    fn execute_next(&mut self) -> Step {
        let instruction = Instruction::decode(self.state.fetch());

        match instruction.execute(&mut self.state, &mut self.rng) {
            Ok(flow) => {
                self.state.apply(flow);
                Step::Executed(instruction)
            }
            Err(fault) => {
                if self.diagnostics.report_faults {
                    warn!("{} at pc {:#05X}", fault, self.state.pc);
                }
                self.state.apply(Flow::Next);
                Step::Faulted(fault)
            }
        }
    }

    /// The opcode at the pc along with the registers and stack; while blocked on `Fx0A` that's
    /// the wait instruction itself
    fn dump(&self) -> String {
        let state = &self.state;
        let op = state.fetch();
        format!(
            "{:04X} {:<16} i{:04X} pc{:04X} v{:02X?} stack{:04X?}",
            op,
            Instruction::decode(op).to_string(),
            state.i,
            state.pc,
            state.v,
            state.call_stack()
        )
    }

    /// Decrements the delay and sound timers; meant to be called at 60Hz
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Set the held status of a key
    ///
    /// # Arguments
    /// * `key` the keypad value 0x0..=0xF
    /// * `held` whether it's currently down
    pub fn set_held(&mut self, key: u8, held: bool) {
        self.state.keypad.set_held(key, held);
    }

    /// Record a fresh key press for a CPU blocked on `Fx0A`
    ///
    /// # Arguments
    /// * `key` the keypad value 0x0..=0xF
    pub fn notify_pressed(&mut self, key: u8) {
        self.state.keypad.notify_pressed(key);
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    pub fn is_waiting(&self) -> bool {
        self.state.mode != Mode::Running
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
