use std::io::Write;

use crossterm::{execute, style::Print};
use log::warn;

/// Fire-and-forget effect played once per food eaten.
pub trait SoundEffect {
    fn play(&mut self);
}

pub struct Mute;

impl SoundEffect for Mute {
    fn play(&mut self) {}
}

/// Rings the terminal bell.
pub struct Bell<W: Write> {
    out: W,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Bell { out }
    }
}

impl<W: Write> SoundEffect for Bell<W> {
    fn play(&mut self) {
        if let Err(err) = execute!(self.out, Print('\u{7}')) {
            warn!("Failed to ring the bell: {}", err);
        }
    }
}

#[cfg(feature = "audio")]
pub use tone::Tone;

#[cfg(feature = "audio")]
mod tone {
    use std::time::Duration;

    use log::warn;
    use rodio::{source::SineWave, OutputStream, OutputStreamHandle, Sink, Source};

    use super::SoundEffect;

    const GULP_FREQUENCY: f32 = 330.0;
    const GULP_DURATION: Duration = Duration::from_millis(90);
    const GULP_VOLUME: f32 = 0.25;

    /// A short sine blip on the default output device.
    pub struct Tone {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl Tone {
        pub fn new() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Tone { _stream: stream, handle })
        }
    }

    impl SoundEffect for Tone {
        fn play(&mut self) {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    let source = SineWave::new(GULP_FREQUENCY)
                        .take_duration(GULP_DURATION)
                        .amplify(GULP_VOLUME);
                    sink.append(source);
                    sink.detach();
                }
                Err(err) => warn!("Failed to play tone: {}", err),
            }
        }
    }
}
