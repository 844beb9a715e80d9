use crate::config::Config;
use crate::error::LyricrollError;
use crate::timeline::RenderEvent;

use std::fmt::Write as FmtWrite;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use log::info;

const BOM: &str = "\u{FEFF}";

/// Writes the same document to every path, stopping at the first failure.
pub fn serialise<P: AsRef<Path>>(document: &str, outputs: &[P]) -> Result<()> {
    for output in outputs {
        let output = output.as_ref();
        write_file(output, document).map_err(|source| LyricrollError::WriteFailure {
            path: output.to_path_buf(),
            source,
        })?;
        info!("Wrote '{}'", output.display());
    }
    Ok(())
}

fn write_file(output: &Path, document: &str) -> std::io::Result<()> {
    let file = std::fs::File::create(output)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(BOM.as_bytes())?;
    writer.write_all(document.as_bytes())?;
    writer.flush()
}

pub fn render_document(events: &[RenderEvent], config: &Config) -> Result<String> {
    let mut buf = String::with_capacity(events.len() * 200 + 600);
    write_header(&mut buf, config)?;
    for event in events {
        write_event(&mut buf, event, config)?;
    }
    Ok(buf)
}

fn write_header<W: FmtWrite>(buf: &mut W, config: &Config) -> Result<()> {
    let backdrop = config.backdrop_colour().style_field();
    writeln!(buf, "[Script Info]")?;
    writeln!(buf, "ScriptType: v4.00+")?;
    writeln!(buf, "PlayResX: {}", config.width)?;
    writeln!(buf, "PlayResY: {}", config.height)?;
    writeln!(buf)?;
    writeln!(buf, "[V4+ Styles]")?;
    writeln!(
        buf,
        "Format: Name, Fontname, Fontsize, PrimaryColour, OutlineColour, BackColour, \
         Bold, Alignment, MarginL, MarginR, MarginV, Encoding"
    )?;
    writeln!(
        buf,
        "Style: {},{},{},&H00FFFFFF,{},{},0,2,10,10,10,1",
        config.style_name, config.font_name, config.font_size_normal, backdrop, backdrop
    )?;
    writeln!(buf)?;
    writeln!(buf, "[Events]")?;
    writeln!(
        buf,
        "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"
    )?;
    Ok(())
}

fn write_event<W: FmtWrite>(buf: &mut W, event: &RenderEvent, config: &Config) -> Result<()> {
    write!(buf, "Dialogue: 0,")?;
    write_ts(buf, event.start)?;
    write!(buf, ",")?;
    write_ts(buf, event.end)?;
    write!(buf, ",{},,0,0,0,,{{", config.style_name)?;
    for tag in event.tags() {
        write!(buf, "{}", tag)?;
    }
    writeln!(buf, "}}{}", event.text)?;
    Ok(())
}

// H:MM:SS.cc, rounded to the nearest centisecond.
fn write_ts<W: FmtWrite>(buf: &mut W, timestamp: Duration) -> std::fmt::Result {
    let total_cs = (timestamp.as_nanos() + 5_000_000) / 10_000_000;
    let centis = total_cs % 100;
    let total_secs = total_cs / 100;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    write!(
        buf,
        "{}:{:02}:{:02}.{:02}",
        hours, minutes, seconds, centis
    )
}
