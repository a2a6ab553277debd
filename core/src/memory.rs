use std::io;
use std::io::Read;

use log::trace;

use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};

/// # Memory
/// 4096 bytes of byte-addressable memory.
///
/// ```text
/// 0x000-0x04F  sprite sheet for the digits 0..F
/// 0x050-0x1FF  unused (reserved for the interpreter on real hardware)
/// 0x200-0xFFF  program
/// ```
///
/// Addresses are 16-bit but memory is only 12-bit; anything past the end wraps back around to
/// the start rather than faulting.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet baked in at 0x000
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Reduces an address to the 4096-byte address space
    fn wrap(addr: usize) -> usize {
        if addr >= MEMORY_SIZE {
            trace!("address {:#06X} is out of range, wrapping", addr);
        }
        addr % MEMORY_SIZE
    }

    pub fn read(&self, addr: usize) -> u8 {
        self.bytes[Memory::wrap(addr)]
    }

    pub fn write(&mut self, addr: usize, value: u8) {
        self.bytes[Memory::wrap(addr)] = value;
    }

    /// Reads the big-endian word at `addr`; an opcode
    pub fn read_word(&self, addr: usize) -> u16 {
        u16::from(self.read(addr)) << 8 | u16::from(self.read(addr + 1))
    }

    /// Copies `data` into memory starting at `addr`, wrapping at the end of memory
    pub fn write_slice(&mut self, addr: usize, data: &[u8]) {
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr + offset, *byte);
        }
    }

    /// Reads `len` bytes starting at `addr`, wrapping at the end of memory
    pub fn read_slice(&self, addr: usize, len: usize) -> Vec<u8> {
        (0..len).map(|offset| self.read(addr + offset)).collect()
    }

    /// Loads a program at `PROGRAM_START`
    ///
    /// Anything that doesn't fit in the program area is dropped. Returns the number of bytes
    /// that were actually loaded.
    pub fn load_program(&mut self, reader: &mut dyn Read) -> Result<usize, io::Error> {
        let mut program = Vec::with_capacity(MAX_ROM_SIZE);
        reader.take(MAX_ROM_SIZE as u64).read_to_end(&mut program)?;
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(&program);
        Ok(program.len())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
