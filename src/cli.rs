use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "vibe-asteroids")]
#[command(about = "Asteroids in the terminal, with UFOs, power-ups and hit-stop", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Run headless against an in-memory screen with scripted input
    #[arg(long)]
    pub debug: bool,

    /// Screen columns in debug mode
    #[arg(long, default_value_t = 80)]
    pub width: u16,

    /// Screen rows in debug mode
    #[arg(long, default_value_t = 24)]
    pub height: u16,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Seed for the random number generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes
    #[arg(long, default_value = "vibe-asteroids.log")]
    pub log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_parser = parse_level_filter)]
    pub log_level: LevelFilter,

    /// Directory holding the sound samples
    #[arg(long, default_value = "sounds")]
    pub sound_dir: PathBuf,

    /// File holding the persisted high score
    #[arg(long, default_value = ".vibe-asteroids-highscore")]
    pub high_score_file: PathBuf,
}

fn parse_level_filter(s: &str) -> Result<LevelFilter, String> {
    s.parse::<LevelFilter>().map_err(|_| format!("invalid log level '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_is_parsed() {
        let cli = Cli::try_parse_from(["vibe-asteroids", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::Debug);

        let cli = Cli::try_parse_from(["vibe-asteroids", "--log-level", "TRACE"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::Trace);
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["vibe-asteroids"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::Info);
        assert!(!cli.debug);
        assert_eq!((cli.width, cli.height), (80, 24));
        assert_eq!(cli.sound_dir, PathBuf::from("sounds"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["vibe-asteroids", "--log-level", "loud"]).is_err());
    }
}
