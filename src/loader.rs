use crate::caption::CaptionLine;
use crate::config::Config;
use crate::error::LyricrollError;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{debug, info, warn};
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, one_of, space0};
use nom::combinator::{map_res, opt, recognize};
use nom::error::VerboseError;
use nom::multi::many1;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;
use regex::Regex;

/// Where the start time of every caption comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Timing {
    /// Timestamps for `.lrc` files or files that open with a timestamp tag.
    Auto,
    /// Every line lasts the configured line duration.
    Cadence,
    /// Every line starts with a `[mm:ss.xx]` tag.
    Timestamps,
}

pub fn load<P: AsRef<Path>>(path: P, timing: Timing, config: &Config) -> Result<Vec<CaptionLine>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LyricrollError::InputNotFound(path.to_path_buf()).into());
    }
    let data = std::fs::read_to_string(path)
        .context(format!("Failed to open input file: '{}'", path.display()))?;
    let data = data.strip_prefix('\u{FEFF}').unwrap_or(&data);

    let timing = match timing {
        Timing::Auto => detect_timing(path, data),
        other => other,
    };
    debug!("Reading '{}' with {:?} timing", path.display(), timing);

    let lines = match timing {
        Timing::Timestamps => from_timestamped(data, config)?,
        _ => from_plain(data, config),
    };
    info!("Loaded {} caption lines from '{}'", lines.len(), path.display());
    Ok(lines)
}

fn detect_timing(path: &Path, data: &str) -> Timing {
    let is_lrc = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("lrc"));
    if is_lrc {
        return Timing::Timestamps;
    }
    let probe = Regex::new(r"^\[\d+:\d+\.\d+\]").expect("timestamp probe is a valid regex");
    let first_line = data.lines().map(str::trim).find(|l| !l.is_empty());
    if first_line.map_or(false, |l| probe.is_match(l)) {
        Timing::Timestamps
    } else {
        Timing::Cadence
    }
}

pub fn from_plain(data: &str, config: &Config) -> Vec<CaptionLine> {
    let lines: Vec<CaptionLine> = data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
        .map(|(index, text)| {
            let start = config.line_duration * index as u32;
            CaptionLine {
                index,
                text: text.to_string(),
                start,
                end: start + config.line_duration,
            }
        })
        .collect();
    if lines.is_empty() {
        warn!("The input contains no caption lines.");
    }
    lines
}

/// Captions from `[mm:ss.xx]text` lines. A caption ends where the next timestamp starts.
pub fn from_timestamped(data: &str, config: &Config) -> Result<Vec<CaptionLine>> {
    let mut timed = Vec::new();
    let mut offset_ms = 0;
    for (line_num, line) in data.lines().enumerate() {
        let line = line.trim();
        if let Ok((_, offset)) = offset_tag(line) {
            debug!("Applying an offset of {}ms", offset);
            offset_ms = offset;
            continue;
        }
        match timestamped_line(line, line_num + 1) {
            Ok(entries) if entries.is_empty() => debug!("Skipping untagged line {}", line_num + 1),
            Ok(entries) => timed.extend(entries),
            Err(err) => warn!("{}, skipping it", err),
        }
    }
    if offset_ms != 0 {
        for (start, _) in timed.iter_mut() {
            *start = apply_offset(*start, offset_ms);
        }
    }
    timed.sort_by_key(|(start, _)| *start);

    // Lines sharing a timestamp form one caption, e.g. an original and its translation.
    let mut groups: Vec<(Duration, Vec<String>)> = Vec::new();
    for (start, text) in timed {
        if let Some((last, texts)) = groups.last_mut() {
            if *last == start {
                texts.push(text);
                continue;
            }
        }
        groups.push((start, vec![text]));
    }

    let mut lines = Vec::with_capacity(groups.len());
    for (i, (start, texts)) in groups.iter().enumerate() {
        let texts: Vec<&str> = texts
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() {
            // A bare timestamp only marks where the previous caption ends.
            continue;
        }
        let end = groups
            .get(i + 1)
            .map_or(*start + config.trailing_duration, |(next, _)| *next);
        lines.push(CaptionLine {
            index: lines.len(),
            text: texts.join(config.separator.as_str()),
            start: *start,
            end,
        });
    }
    if lines.is_empty() {
        return Err(LyricrollError::NoValidInput.into());
    }
    Ok(lines)
}

fn timestamped_line(
    line: &str,
    line_num: usize,
) -> Result<Vec<(Duration, String)>, LyricrollError> {
    let (text, tags) = match many1(timestamp_tag)(line) {
        Ok(parsed) => parsed,
        Err(_) => return Ok(Vec::new()),
    };
    let text = text.trim();
    tags.into_iter()
        .map(|parts| tag_time(parts, line_num).map(|start| (start, text.to_string())))
        .collect()
}

fn tag_time(
    (minutes, seconds, fraction): (&str, &str, &str),
    line_num: usize,
) -> Result<Duration, LyricrollError> {
    let malformed = |reason: String| LyricrollError::MalformedTimestamp {
        line: line_num,
        reason,
    };

    let minutes: u64 = minutes
        .parse()
        .map_err(|e| malformed(format!("invalid minutes '{}': {}", minutes, e)))?;
    let seconds: u64 = seconds
        .parse()
        .map_err(|e| malformed(format!("invalid seconds '{}': {}", seconds, e)))?;
    if seconds >= 60 {
        return Err(malformed(format!("seconds out of range: {}", seconds)));
    }
    // Right-pad the fraction to nanoseconds, so `.5` reads as `.500000000`.
    let fraction: String = fraction.chars().take(9).collect();
    let nanos: u32 = format!("{:0<9}", fraction)
        .parse()
        .map_err(|e| malformed(format!("invalid fraction '{}': {}", fraction, e)))?;
    let whole = minutes
        .checked_mul(60)
        .and_then(|s| s.checked_add(seconds))
        .ok_or_else(|| malformed(format!("minutes out of range: {}", minutes)))?;

    Ok(Duration::new(whole, nanos))
}

/// A positive LRC offset shows lyrics sooner. Times never go below zero.
fn apply_offset(start: Duration, offset_ms: i64) -> Duration {
    let shift = Duration::from_millis(offset_ms.unsigned_abs());
    if offset_ms >= 0 {
        start.saturating_sub(shift)
    } else {
        start + shift
    }
}

fn offset_tag(input: &str) -> IResult<&str, i64, VerboseError<&str>> {
    let (input, _) = tag("[offset:")(input)?;
    let (input, _) = space0(input)?;
    let (input, offset) = map_res(recognize(pair(opt(one_of("+-")), digit1)), |s: &str| {
        s.parse::<i64>()
    })(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = char(']')(input)?;
    Ok((input, offset))
}

fn timestamp_tag(input: &str) -> IResult<&str, (&str, &str, &str), VerboseError<&str>> {
    delimited(
        char('['),
        tuple((
            digit1,
            preceded(char(':'), digit1),
            preceded(char('.'), digit1),
        )),
        char(']'),
    )(input)
}
