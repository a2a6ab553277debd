use std::path::PathBuf;

use clap::Parser;

use ch8_core::constants::DEFAULT_CLOCK_SPEED;
use ch8_core::Diagnostics;
use ch8_display::Rgb;

pub const DEFAULT_SCALE: u32 = 10;

/// 64x32 pixels at this scale is already larger than any monitor
pub const MAX_SCALE: u32 = 100;

/// CHIP-8 interpreter
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Path to the ROM to run
    pub rom: PathBuf,

    /// CPU speed in instructions per second
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_CLOCK_SPEED,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub frequency: u32,

    /// Size of each CHIP-8 pixel on screen
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SCALE,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64)
    )]
    pub scale: u32,

    /// Color of lit pixels; a name such as white, green or amber, or #RRGGBB
    #[arg(short, long, default_value = "white")]
    pub color: String,

    /// Report unknown opcodes and stack faults
    #[arg(long)]
    pub error: bool,

    /// Log the CPU state before every instruction
    #[arg(long)]
    pub log: bool,
}

impl Args {
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            report_faults: self.error,
            trace_state: self.log,
        }
    }

    pub fn foreground(&self) -> Rgb {
        Rgb::named_or_white(&self.color)
    }

    /// "CHIP-8 - <rom name>"
    pub fn title(&self) -> String {
        match self.rom.file_stem() {
            Some(stem) => format!("CHIP-8 - {}", stem.to_string_lossy()),
            None => "CHIP-8".to_string(),
        }
    }
}
