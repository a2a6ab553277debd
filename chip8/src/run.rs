use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{anyhow, Context};
use log::{info, warn};
use sdl2::event::Event;

use ch8_core::constants::TIMER_FREQUENCY;
use ch8_core::Chip8;
use ch8_display::Display;

use crate::audio::Beeper;
use crate::cadence::Cadence;
use crate::config::Args;
use crate::keymap::{held_keys, keymap};

/// Runs a ROM until the window is closed.
///
/// Instructions execute at the configured frequency while the timers, display and tone are
/// updated at 60Hz, all from this one loop.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut chip8 = Chip8::with_diagnostics(args.diagnostics());

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open ROM {}", args.rom.display()))?;
    let loaded = chip8.load_rom(&mut BufReader::new(file))?;
    info!("loaded {} bytes from {}", loaded, args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!("unable to initialise SDL: {}", e))?;
    let mut display = Display::new(&sdl, &args.title(), args.scale, args.foreground())?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;
    let mut beeper = match Beeper::new(&sdl) {
        Ok(beeper) => Some(beeper),
        Err(e) => {
            warn!("no audio device ({}), running silently", e);
            None
        }
    };

    let start = Instant::now();
    let mut cpu_clock = Cadence::from_hz(args.frequency, start);
    let mut timer_clock = Cadence::from_hz(TIMER_FREQUENCY, start);

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.notify_pressed(kc);
                    }
                }
                _ => continue,
            };
        }
        let held = held_keys(&events.keyboard_state());
        for (key, is_held) in held.iter().enumerate() {
            chip8.set_held(key as u8, *is_held);
        }

        // Update state
        let now = Instant::now();
        if cpu_clock.due(now) {
            chip8.step();
        }
        if timer_clock.due(now) {
            chip8.tick_timers();
            display.render(chip8.frame())?;
            if let Some(beeper) = beeper.as_mut() {
                beeper.set_playing(chip8.sound_active());
            }
        }

        // Handle timing
        std::thread::sleep(cpu_clock.remaining(now).min(timer_clock.remaining(now)));
    }

    info!("window closed, exiting");
    Ok(())
}
