use rand::Rng;

use crate::constants::SPRITE_HEIGHT;
use crate::error::Fault;
use crate::state::{Mode, State};

/// What happens to the program counter once an operation has run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Move on to the following instruction
    Next,
    /// Skip the following instruction
    Skip,
    /// Continue from an absolute address
    Jump(u16),
    /// Stay put; the CPU is blocked waiting for a key
    Wait,
}

fn skip_if(condition: bool) -> Flow {
    if condition {
        Flow::Skip
    } else {
        Flow::Next
    }
}

/// clear
pub fn clr(state: &mut State) -> Flow {
    state.frame_buffer.clear();
    Flow::Next
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<Flow, Fault> {
    // the stack holds the address of the call itself
    let call_site = state.pop()?;
    Ok(Flow::Jump(call_site.wrapping_add(2)))
}

/// PC = addr
pub fn jump(addr: u16) -> Flow {
    Flow::Jump(addr)
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<Flow, Fault> {
    state.push(state.pc).map_err(|_| Fault::StackOverflow { addr })?;
    Ok(Flow::Jump(addr))
}

/// if Vx == kk then pc += 2
pub fn ske(state: &State, x: u8, kk: u8) -> Flow {
    skip_if(state.v[x as usize] == kk)
}

/// if Vx != kk then pc += 2
pub fn skne(state: &State, x: u8, kk: u8) -> Flow {
    skip_if(state.v[x as usize] != kk)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &State, x: u8, y: u8) -> Flow {
    skip_if(state.v[x as usize] == state.v[y as usize])
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) -> Flow {
    state.v[x as usize] = kk;
    Flow::Next
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: u8, kk: u8) -> Flow {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
    Flow::Next
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] = state.v[y as usize];
    Flow::Next
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] |= state.v[y as usize];
    Flow::Next
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] &= state.v[y as usize];
    Flow::Next
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] ^= state.v[y as usize];
    Flow::Next
}

// The arithmetic operations below write VF before the result. Source operands are read
// beforehand, but when VF is also the destination the result is computed from the new flag.

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) -> Flow {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[0xF] = u8::from(vx.checked_add(vy).is_none());
    state.v[x as usize] = state.v[x as usize].wrapping_add(vy);
    Flow::Next
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: u8, y: u8) -> Flow {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[0xF] = u8::from(vx > vy);
    state.v[x as usize] = state.v[x as usize].wrapping_sub(vy);
    Flow::Next
}

/// Vx >>= 1; VF = lsb
pub fn shr(state: &mut State, x: u8) -> Flow {
    state.v[0xF] = state.v[x as usize] & 0x1;
    state.v[x as usize] >>= 1;
    Flow::Next
}

/// Vy -= Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: u8, y: u8) -> Flow {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[0xF] = u8::from(vy > vx);
    state.v[y as usize] = state.v[y as usize].wrapping_sub(vx);
    Flow::Next
}

/// Vx <<= 1; VF = msb
pub fn shl(state: &mut State, x: u8) -> Flow {
    state.v[0xF] = state.v[x as usize] >> 7;
    state.v[x as usize] <<= 1;
    Flow::Next
}

/// if Vx != Vy then pc +=2
pub fn skrne(state: &State, x: u8, y: u8) -> Flow {
    skip_if(state.v[x as usize] != state.v[y as usize])
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) -> Flow {
    state.i = addr;
    Flow::Next
}

/// PC = V0 + addr
pub fn jumpi(state: &State, addr: u16) -> Flow {
    Flow::Jump(addr + u16::from(state.v[0x0]))
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: u8, kk: u8, rng: &mut impl Rng) -> Flow {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & kk;
    Flow::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels are erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Flow {
    let (px, py) = (state.v[x as usize], state.v[y as usize]);
    let sprite = state.memory.read_slice(state.i as usize, n as usize);

    // Reset the flag before drawing; collisions only ever set it
    state.v[0xF] = 0x0;
    if state
        .frame_buffer
        .draw_sprite(px as usize, py as usize, &sprite)
    {
        state.v[0xF] = 0x1;
    }
    Flow::Next
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &State, x: u8) -> Flow {
    skip_if(state.keypad.is_held(state.v[x as usize]))
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &State, x: u8) -> Flow {
    skip_if(!state.keypad.is_held(state.v[x as usize]))
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) -> Flow {
    state.v[x as usize] = state.timers.delay;
    Flow::Next
}

/// await keypress for Vx
/// Takes a key pressed since the last cycle if there is one, otherwise blocks the CPU
pub fn keyd(state: &mut State, x: u8) -> Flow {
    match state.keypad.take_pressed() {
        Some(key) => {
            state.v[x as usize] = key;
            Flow::Next
        }
        None => {
            state.mode = Mode::AwaitingKey { register: x };
            Flow::Wait
        }
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) -> Flow {
    state.timers.delay = state.v[x as usize];
    Flow::Next
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) -> Flow {
    state.timers.sound = state.v[x as usize];
    Flow::Next
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) -> Flow {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    Flow::Next
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) -> Flow {
    state.i = u16::from(state.v[x as usize]) * SPRITE_HEIGHT;
    Flow::Next
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> Flow {
    let vx = state.v[x as usize];
    let digits = [vx / 100, (vx / 10) % 10, (vx % 100) % 10];
    state.memory.write_slice(state.i as usize, &digits);
    Flow::Next
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) -> Flow {
    let registers = state.v;
    state
        .memory
        .write_slice(state.i as usize, &registers[..=x as usize]);
    Flow::Next
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) -> Flow {
    let bytes = state.memory.read_slice(state.i as usize, x as usize + 1);
    state.v[..=x as usize].copy_from_slice(&bytes);
    Flow::Next
}
