use std::{path::PathBuf, time::Duration};

use engine::{
    AspectRatio, ThrottleBox,
    client::DEFAULT_ENDPOINT,
    throttle::{FixedDelay, NoDelay, TokenBucket},
};

use crate::presets::Preset;

/// Generates a fixed batch of photorealistic images and saves them to disk
#[derive(Debug, clap::Parser)]
pub struct Cli {
    pub preset: Preset,

    /// Base URL of the generation service
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Where the images are written, created if missing
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Overrides the preset's aspect ratio
    #[arg(short, long, value_enum)]
    pub aspect: Option<AspectRatio>,

    /// Pause between two requests, 0 disables it
    #[arg(long, default_value_t = 3)]
    pub delay_secs: u64,

    /// Allow this many requests back to back before pacing kicks in
    #[arg(long)]
    pub burst: Option<u32>,

    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(default_output_dir)
    }

    pub fn throttle(&self) -> ThrottleBox {
        let delay = Duration::from_secs(self.delay_secs);
        match (self.delay_secs, self.burst) {
            (0, _) => Box::new(NoDelay),
            (_, Some(burst)) => Box::new(TokenBucket::new(burst, delay)),
            (_, None) => Box::new(FixedDelay(delay)),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("generated")
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["photo_batch", "hero"]).unwrap();
        assert_eq!(cli.preset, Preset::Hero);
        assert_eq!(cli.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cli.aspect, None);
        assert_eq!(cli.timeout(), Duration::from_secs(60));
        assert_eq!(cli.output_dir(), default_output_dir());
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "photo_batch",
            "project-details",
            "--endpoint",
            "http://localhost:2023",
            "--output-dir",
            "/tmp/out",
            "--aspect",
            "square",
            "--delay-secs",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.preset, Preset::ProjectDetails);
        assert_eq!(cli.aspect, Some(AspectRatio::Square));
        assert_eq!(cli.output_dir(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["photo_batch", "hero", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(Cli::try_parse_from(["photo_batch", "landscapes"]).is_err());
    }
}
