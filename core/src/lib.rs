pub use chip8::{Chip8, Diagnostics, Step};
pub use error::{Error, Fault};
pub use frame::FrameBuffer;
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use memory::Memory;
pub use opcode::Opcode;
pub use operations::Flow;
pub use timers::Timers;

mod chip8;
pub mod constants;
mod error;
mod frame;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
pub mod state;
mod timers;
