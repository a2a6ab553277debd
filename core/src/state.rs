use crate::constants::{MEMORY_SIZE, PROGRAM_START, STACK_SIZE};
use crate::error::Fault;
use crate::frame::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::operations::Flow;
use crate::timers::Timers;

/// Whether the CPU is fetching instructions or blocked on `Fx0A`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// No instructions are fetched until a key is pressed; its value goes to `V[register]`
    AwaitingKey { register: u8 },
}

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, always kept inside the 4096-byte address space
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound) decremented at 60Hz
///
/// ## Memory
/// - a 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
/// - a 64x32 frame buffer
///
/// ## Input
/// - the held status of keys 0..F and the last fresh key press
/// - emulation halts in `Mode::AwaitingKey` until a key is pressed
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub timers: Timers,
    pub keypad: Keypad,
    pub mode: Mode,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            timers: Timers::new(),
            keypad: Keypad::new(),
            mode: Mode::Running,
        }
    }

    /// The opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        self.memory.read_word(self.pc as usize)
    }

    /// Points the pc at `addr`, reduced to the address space
    pub fn jump(&mut self, addr: u16) {
        self.pc = addr % MEMORY_SIZE as u16;
    }

    /// Moves the pc past `count` instructions
    pub fn advance(&mut self, count: u16) {
        self.jump(self.pc.wrapping_add(2 * count));
    }

    /// Moves the pc according to the outcome of an operation
    pub fn apply(&mut self, flow: Flow) {
        match flow {
            Flow::Next => self.advance(1),
            Flow::Skip => self.advance(2),
            Flow::Jump(addr) => self.jump(addr),
            Flow::Wait => {}
        }
    }

    /// Pushes a return address onto the stack
    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Fault::StackOverflow { addr })?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address off the stack
    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// The return addresses currently on the stack, oldest first
    pub fn call_stack(&self) -> &[u16] {
        &self.stack[..self.sp as usize]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_program_start() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.mode, Mode::Running);
        assert_eq!(state.memory.read(0), 0xF0);
    }

    #[test]
    fn test_fetch() {
        let mut state = State::new();
        state.memory.write_slice(0x200, &[0xAA, 0xBB]);
        assert_eq!(state.fetch(), 0xAABB);
    }

    #[test]
    fn test_pc_stays_in_address_space() {
        let mut state = State::new();
        state.pc = 0xFFE;
        state.advance(1);
        assert_eq!(state.pc, 0x000);
        state.jump(0x10FE);
        assert_eq!(state.pc, 0x0FE);
    }

    #[test]
    fn test_stack_holds_sixteen_addresses() {
        let mut state = State::new();
        for addr in 0..16 {
            state.push(addr).unwrap();
        }
        assert_eq!(state.push(0xABC), Err(Fault::StackOverflow { addr: 0xABC }));
        assert_eq!(state.sp, 16);
        assert_eq!(state.pop(), Ok(15));
        assert_eq!(state.call_stack().len(), 15);
    }

    #[test]
    fn test_pop_empty_stack() {
        let mut state = State::new();
        assert_eq!(state.pop(), Err(Fault::StackUnderflow));
        assert_eq!(state.sp, 0);
    }
}
