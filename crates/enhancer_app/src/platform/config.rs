use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use enhancer_engine::EngineConfig;
use log::LevelFilter;

use super::logging::LogDestination;

pub const DEFAULT_BASE_URL: &str = "https://resume-enhancer-backend-1.onrender.com";

/// Tailor a .docx resume to a job description using the enhancement backend.
#[derive(Parser, Debug)]
#[command(name = "resume-enhancer", version)]
pub struct Args {
    /// Resume to enhance (.docx).
    #[arg(long, short = 'r')]
    pub resume: Option<PathBuf>,

    /// Job description text.
    #[arg(long, short = 'j', conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file, or `-` for stdin.
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    /// Backend root, without a trailing slash.
    #[arg(long, env = "ENHANCER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Download the enhanced document into this directory.
    #[arg(long)]
    pub save_to: Option<PathBuf>,

    /// Give up on the warm-up probe after this many seconds.
    #[arg(long, default_value_t = 30)]
    pub warmup_timeout_secs: u64,

    /// Skip the warm-up probe.
    #[arg(long)]
    pub no_warmup: bool,

    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
    Off,
}

impl Args {
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = EngineConfig::new(&self.base_url)
            .with_context(|| format!("--base-url {:?} is not usable", self.base_url))?;
        config.warmup_timeout = Duration::from_secs(self.warmup_timeout_secs);
        Ok(config)
    }

    pub fn log_destination(&self) -> Option<LogDestination> {
        match self.log {
            LogTarget::Terminal => Some(LogDestination::Terminal),
            LogTarget::File => Some(LogDestination::File),
            LogTarget::Both => Some(LogDestination::Both),
            LogTarget::Off => None,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use log::LevelFilter;

    use super::{Args, LogTarget, DEFAULT_BASE_URL};

    #[test]
    fn defaults_point_at_hosted_backend() {
        let args = Args::try_parse_from(["resume-enhancer"]).unwrap();
        // ENHANCER_BASE_URL may be set in the environment running the tests.
        if std::env::var_os("ENHANCER_BASE_URL").is_none() {
            assert_eq!(args.base_url, DEFAULT_BASE_URL);
        }
        assert_eq!(args.resume, None);
        assert_eq!(args.log, LogTarget::Terminal);
        assert_eq!(args.log_level(), LevelFilter::Warn);
        assert!(!args.no_warmup);
    }

    #[test]
    fn engine_config_carries_base_url_and_timeout() {
        let args = Args::try_parse_from([
            "resume-enhancer",
            "--base-url",
            "http://localhost:5000/",
            "--warmup-timeout-secs",
            "3",
            "-vv",
        ])
        .unwrap();

        let config = args.engine_config().unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.warmup_timeout.as_secs(), 3);
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let args =
            Args::try_parse_from(["resume-enhancer", "--base-url", "localhost:5000"]).unwrap();
        assert!(args.engine_config().is_err());
    }

    #[test]
    fn job_description_sources_conflict() {
        let result = Args::try_parse_from([
            "resume-enhancer",
            "--job-description",
            "text",
            "--job-description-file",
            "jd.txt",
        ]);
        assert!(result.is_err());
    }
}
