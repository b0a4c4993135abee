use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Laser,
    Explosion,
    ThrusterStart,
    ThrusterStop,
}

impl SoundCue {
    pub const ALL: [SoundCue; 4] = [
        SoundCue::Laser,
        SoundCue::Explosion,
        SoundCue::ThrusterStart,
        SoundCue::ThrusterStop,
    ];
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoundCue::Laser => "laser",
            SoundCue::Explosion => "explosion",
            SoundCue::ThrusterStart => "thruster-start",
            SoundCue::ThrusterStop => "thruster-stop",
        };
        f.write_str(name)
    }
}

/// Receives the fire-and-forget cues the simulation emits. A cue with no
/// registered sample is reported once and otherwise ignored.
#[derive(Debug, Default)]
pub struct SoundManager {
    samples: HashMap<SoundCue, PathBuf>,
    missing_reported: HashSet<SoundCue>,
    played: u64,
}

impl SoundManager {
    pub fn new() -> Self {
        SoundManager::default()
    }

    /// Every cue mapped to `<dir>/<cue>.wav`.
    pub fn with_sample_dir(dir: impl AsRef<Path>) -> Self {
        let mut manager = SoundManager::new();
        for cue in SoundCue::ALL {
            manager.register(cue, dir.as_ref().join(format!("{cue}.wav")));
        }
        manager
    }

    pub fn register(&mut self, cue: SoundCue, sample: impl Into<PathBuf>) {
        self.samples.insert(cue, sample.into());
    }

    pub fn play(&mut self, cue: SoundCue) {
        match self.samples.get(&cue) {
            Some(sample) => {
                self.played += 1;
                debug!("Playing {} ({})", cue, sample.display());
            }
            None => {
                if self.missing_reported.insert(cue) {
                    warn!("No sample registered for sound cue '{}', ignoring", cue);
                }
            }
        }
    }

    pub fn play_all(&mut self, cues: impl IntoIterator<Item = SoundCue>) {
        for cue in cues {
            self.play(cue);
        }
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}
