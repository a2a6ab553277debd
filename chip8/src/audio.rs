use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.2;

/// A square wave generator fed to SDL's audio thread
pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl SquareWave {
    fn new(sample_rate: i32) -> Self {
        SquareWave {
            phase_inc: TONE_HZ / sample_rate as f32,
            phase: 0.0,
            volume: VOLUME,
        }
    }
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// Plays a constant tone for as long as the sound timer is running.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device =
            audio_subsystem.open_playback(None, &desired, |spec| SquareWave::new(spec.freq))?;
        Ok(Beeper {
            device,
            playing: false,
        })
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing == self.playing {
            return;
        }
        if playing {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave() {
        // 4 samples per period
        let mut wave = SquareWave::new(1760);
        let mut out = [0.0; 8];
        wave.callback(&mut out);
        assert_eq!(
            out,
            [VOLUME, VOLUME, -VOLUME, -VOLUME, VOLUME, VOLUME, -VOLUME, -VOLUME]
        );
    }
}
