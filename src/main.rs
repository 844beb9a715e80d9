mod ass;
mod caption;
mod config;
mod error;
mod loader;
mod serialiser;
mod timeline;

use crate::config::{Config, Preset};
use crate::loader::Timing;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::info;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Render timed lyrics as a scrolling karaoke ASS subtitle track")]
struct Cli {
    #[arg(
        value_name = "INPUT",
        help = "Lyrics to read: one caption per line, or lines tagged with [mm:ss.xx]."
    )]
    input: PathBuf,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write the subtitles to.",
        default_value = "output.ass"
    )]
    output: PathBuf,
    #[arg(
        short,
        long,
        value_enum,
        help = "How caption start times are determined.",
        default_value = "auto"
    )]
    timing: Timing,
    #[arg(
        short,
        long,
        value_enum,
        help = "Visual style of the track.",
        default_value = "rich"
    )]
    preset: Preset,
    #[arg(
        long,
        help = "Do not write a copy next to the input file (<input>.ass)."
    )]
    no_sidecar: bool,
}

struct Job {
    input: PathBuf,
    outputs: Vec<PathBuf>,
    timing: Timing,
    config: Config,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut outputs = vec![cli.output];
    if !cli.no_sidecar {
        let sidecar = sidecar_path(&cli.input);
        if sidecar != cli.input && !outputs.contains(&sidecar) {
            outputs.push(sidecar);
        }
    }

    convert(&Job {
        input: cli.input,
        outputs,
        timing: cli.timing,
        config: Config::from_preset(cli.preset),
    })
}

fn sidecar_path(input: &Path) -> PathBuf {
    input.with_extension("ass")
}

fn convert(job: &Job) -> Result<()> {
    let lines = loader::load(&job.input, job.timing, &job.config)?;

    let events = timeline::render_events(&lines, &job.config);
    info!("Built {} events for {} lines", events.len(), lines.len());

    let document = serialiser::render_document(&events, &job.config)
        .context("Failed to render the subtitle document")?;
    serialiser::serialise(&document, &job.outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LyricrollError;

    fn job(input: PathBuf, outputs: Vec<PathBuf>) -> Job {
        Job {
            input,
            outputs,
            timing: Timing::Auto,
            config: Config::default(),
        }
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.ass");
        let err = convert(&job(dir.path().join("nope.txt"), vec![output.clone()])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LyricrollError>(),
            Some(LyricrollError::InputNotFound(_))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_untimed_lrc_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("song.lrc");
        std::fs::write(&input, "[ti:Song]\nno timing here\n").unwrap();
        let output = dir.path().join("out.ass");
        let err = convert(&job(input, vec![output.clone()])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LyricrollError>(),
            Some(LyricrollError::NoValidInput)
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_writes_identical_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lyrics.txt");
        std::fs::write(&input, "first | eerste\nsecond\nthird\nfourth\n").unwrap();
        let primary = dir.path().join("out.ass");
        let sidecar = sidecar_path(&input);
        convert(&job(input, vec![primary.clone(), sidecar.clone()])).unwrap();

        let primary = std::fs::read_to_string(primary).unwrap();
        let sidecar = std::fs::read_to_string(sidecar).unwrap();
        assert_eq!(primary, sidecar);
        assert!(primary.starts_with("\u{FEFF}[Script Info]"));
        // 3 + 4 + 4 + 3 windows
        assert_eq!(primary.matches("\nDialogue: ").count(), 14);
        assert!(primary.contains("}first\\Neerste\n"));
    }

    #[test]
    fn test_empty_cadence_input_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        std::fs::write(&input, "\n\n").unwrap();
        let output = dir.path().join("out.ass");
        convert(&job(input, vec![output.clone()])).unwrap();
        let written = std::fs::read_to_string(output).unwrap();
        assert!(written.contains("[Events]"));
        assert!(!written.contains("Dialogue:"));
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(sidecar_path(Path::new("dir/song.lrc")), PathBuf::from("dir/song.ass"));
        assert_eq!(sidecar_path(Path::new("song")), PathBuf::from("song.ass"));
    }
}
