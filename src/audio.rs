use std::path::Path;

use stackfall_engine::{AudioSink, Silence};

/// Picks the background music for a game: a looping track if one is configured and supported.
pub fn soundtrack(music: Option<&Path>) -> Box<dyn AudioSink> {
    match music {
        None => Box::new(Silence),
        #[cfg(feature = "music")]
        Some(path) => Box::new(music_player::MusicPlayer::new(path.to_path_buf())),
        #[cfg(not(feature = "music"))]
        Some(path) => {
            log::warn!(
                "ignoring music file {}: built without the `music` feature",
                path.display()
            );
            Box::new(Silence)
        }
    }
}

#[cfg(feature = "music")]
mod music_player {
    use std::{fs::File, io::BufReader, path::PathBuf};

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
    use stackfall_engine::{AudioError, AudioSink};

    /// Loops an audio file through the default output device.
    pub struct MusicPlayer {
        path: PathBuf,
        // The stream must outlive every sink playing on it.
        output: Option<(OutputStream, OutputStreamHandle)>,
        sink: Option<Sink>,
    }

    impl MusicPlayer {
        pub fn new(path: PathBuf) -> Self {
            Self {
                path,
                output: None,
                sink: None,
            }
        }
    }

    impl AudioSink for MusicPlayer {
        fn play(&mut self) -> Result<(), AudioError> {
            self.stop();
            let (stream, handle) = match self.output.take() {
                Some(output) => output,
                None => {
                    OutputStream::try_default().map_err(|e| AudioError::NoDevice(e.to_string()))?
                }
            };
            let sink = Sink::try_new(&handle).map_err(|e| AudioError::Rejected(e.to_string()));
            self.output = Some((stream, handle));
            let sink = sink?;
            let file = File::open(&self.path).map_err(|e| AudioError::Track(e.to_string()))?;
            let source =
                Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Track(e.to_string()))?;
            sink.append(source.repeat_infinite());
            sink.play();
            log::debug!("playing {}", self.path.display());
            self.sink = Some(sink);
            Ok(())
        }

        fn stop(&mut self) {
            // A fresh sink is created on the next `play`, which starts the track from the top.
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_music_means_silence() {
        let mut audio = soundtrack(None);
        assert!(audio.play().is_ok());
        audio.stop();
    }

    #[cfg(not(feature = "music"))]
    #[test]
    fn configured_music_without_backend_is_silent() {
        let mut audio = soundtrack(Some(Path::new("theme.ogg")));
        assert!(audio.play().is_ok());
    }
}
