use crate::ass::Tag;
use crate::caption::CaptionLine;
use crate::config::Config;

use std::ops::RangeInclusive;
use std::time::Duration;

use log::trace;

/// Stages a line stays visible on either side of its own.
const REACH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Entering,
    Active,
    JustFinished,
    Exiting,
}

impl Role {
    pub fn for_stage(line: usize, stage: usize) -> Self {
        if stage == line {
            Role::Active
        } else if stage == line + 1 {
            Role::JustFinished
        } else if stage < line {
            Role::Entering
        } else {
            Role::Exiting
        }
    }

    pub fn animates(self) -> bool {
        matches!(self, Role::Active | Role::JustFinished)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityWindow {
    pub line_index: usize,
    pub stage_index: usize,
    pub start: Duration,
    pub end: Duration,
    pub y_start: i32,
    pub y_end: i32,
    pub role: Role,
    pub fade_in: bool,
    pub fade_out: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderEvent {
    pub start: Duration,
    pub end: Duration,
    pub fade: Option<Tag>,
    pub position: Tag,
    pub decoration: Vec<Tag>,
    pub look: Vec<Tag>,
    pub transition: Option<Tag>,
    pub text: String,
}

impl RenderEvent {
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.fade
            .iter()
            .chain(std::iter::once(&self.position))
            .chain(self.decoration.iter())
            .chain(self.look.iter())
            .chain(self.transition.iter())
    }
}

pub fn stage_range(line: usize, total: usize) -> RangeInclusive<usize> {
    debug_assert!(line < total, "line {} outside of {} lines", line, total);
    line.saturating_sub(REACH)..=(line + REACH).min(total.saturating_sub(1))
}

pub fn windows(lines: &[CaptionLine], config: &Config) -> Vec<VisibilityWindow> {
    let total = lines.len();
    let mut windows = Vec::with_capacity(total * (2 * REACH + 1));
    for (i, line) in lines.iter().enumerate() {
        debug_assert_eq!(line.index, i, "caption lines out of order");
        let stages = stage_range(i, total);
        let (first, last) = (*stages.start(), *stages.end());
        for stage in stages {
            let y_start = config.center_y + (i as i32 - stage as i32) * config.line_spacing;
            windows.push(VisibilityWindow {
                line_index: i,
                stage_index: stage,
                start: lines[stage].start,
                end: lines[stage].end,
                y_start,
                y_end: y_start - config.line_spacing,
                role: Role::for_stage(i, stage),
                fade_in: stage == first,
                fade_out: stage == last,
            });
        }
    }
    windows
}

pub fn render_events(lines: &[CaptionLine], config: &Config) -> Vec<RenderEvent> {
    let decoration = config.decoration();
    let (normal, active) = (config.normal_look(), config.active_look());

    windows(lines, config)
        .into_iter()
        .map(|window| {
            trace!(
                "Line {} at stage {} is {:?}",
                window.line_index,
                window.stage_index,
                window.role
            );
            let (from, to) = match window.role {
                Role::JustFinished => (active, normal),
                _ => (normal, active),
            };
            RenderEvent {
                start: window.start,
                end: window.end,
                fade: fade_tag(&window, config),
                position: Tag::Move {
                    x: config.center_x(),
                    y_from: window.y_start,
                    y_to: window.y_end,
                    duration_ms: config.transition_ms,
                },
                decoration: decoration.clone(),
                look: from.tags(),
                transition: window.role.animates().then(|| Tag::Transition {
                    duration_ms: config.transition_ms,
                    tags: to.tags(),
                }),
                text: display_text(&lines[window.line_index].text, config),
            }
        })
        .collect()
}

fn fade_tag(window: &VisibilityWindow, config: &Config) -> Option<Tag> {
    let fade_ms = config.fade_ms?;
    if !window.fade_in && !window.fade_out {
        return None;
    }
    Some(Tag::Fade {
        fade_in_ms: if window.fade_in { fade_ms } else { 0 },
        fade_out_ms: if window.fade_out { fade_ms } else { 0 },
    })
}

fn display_text(text: &str, config: &Config) -> String {
    if config.separator.is_empty() {
        return text.to_string();
    }
    text.replace(config.separator.as_str(), "\\N")
}
