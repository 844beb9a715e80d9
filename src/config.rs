use crate::ass::{Alpha, Colour, Tag};

use std::time::Duration;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Rich,
    Plain,
}

/// Outline glow and drop shadow drawn behind every line.
#[derive(Debug, Clone, PartialEq)]
pub struct Glow {
    pub width: u32,
    pub shadow_depth: u32,
    pub shadow_colour: Colour,
    pub shadow_alpha: Alpha,
    pub blur: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Look {
    pub colour: Colour,
    pub alpha: Alpha,
    pub outline_alpha: Alpha,
    pub font_size: u32,
}

impl Look {
    pub fn tags(&self) -> Vec<Tag> {
        vec![
            Tag::PrimaryColour(self.colour),
            Tag::PrimaryAlpha(self.alpha),
            Tag::OutlineAlpha(self.outline_alpha),
            Tag::ShadowAlpha(self.outline_alpha),
            Tag::FontSize(self.font_size),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub center_y: i32,
    pub line_spacing: i32,
    /// Time each line stays active in fixed-cadence mode.
    pub line_duration: Duration,
    /// End time of the last line in timestamp mode, counted from its start.
    pub trailing_duration: Duration,
    pub transition_ms: u32,
    pub font_name: String,
    pub style_name: String,
    pub font_size_active: u32,
    pub font_size_normal: u32,
    pub colour_active: Colour,
    pub colour_normal: Colour,
    pub alpha_active: Alpha,
    pub alpha_normal: Alpha,
    pub fade_ms: Option<u32>,
    pub glow: Option<Glow>,
    pub separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            center_y: 700,
            line_spacing: 180,
            line_duration: Duration::from_secs(1),
            trailing_duration: Duration::from_secs(5),
            transition_ms: 800,
            font_name: "Arial".to_string(),
            style_name: "Default".to_string(),
            font_size_active: 60,
            font_size_normal: 40,
            colour_active: Colour(0x00FFFF),
            colour_normal: Colour(0x666666),
            alpha_active: Alpha(0x00),
            alpha_normal: Alpha(0x60),
            fade_ms: Some(800),
            glow: Some(Glow {
                width: 2,
                shadow_depth: 3,
                shadow_colour: Colour(0x000000),
                shadow_alpha: Alpha(0x40),
                blur: 8.0,
            }),
            separator: " | ".to_string(),
        }
    }
}

impl Config {
    pub fn plain() -> Self {
        Self {
            fade_ms: None,
            glow: None,
            ..Self::default()
        }
    }

    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Rich => Self::default(),
            Preset::Plain => Self::plain(),
        }
    }

    pub fn normal_look(&self) -> Look {
        Look {
            colour: self.colour_normal,
            alpha: self.alpha_normal,
            outline_alpha: self.alpha_normal,
            font_size: self.font_size_normal,
        }
    }

    pub fn active_look(&self) -> Look {
        let outline_alpha = self
            .glow
            .as_ref()
            .map_or(self.alpha_active, |glow| glow.shadow_alpha);
        Look {
            colour: self.colour_active,
            alpha: self.alpha_active,
            outline_alpha,
            font_size: self.font_size_active,
        }
    }

    pub fn decoration(&self) -> Vec<Tag> {
        match &self.glow {
            Some(glow) => vec![
                Tag::Border(glow.width),
                Tag::Shadow(glow.shadow_depth),
                Tag::Blur(glow.blur),
                Tag::OutlineColour(glow.shadow_colour),
                Tag::ShadowColour(glow.shadow_colour),
            ],
            None => Vec::new(),
        }
    }

    pub fn backdrop_colour(&self) -> Colour {
        self.glow
            .as_ref()
            .map_or(Colour(0x000000), |glow| glow.shadow_colour)
    }

    pub fn center_x(&self) -> i32 {
        (self.width / 2) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_look_uses_shadow_alpha_for_outline() {
        let config = Config::default();
        let look = config.active_look();
        assert_eq!(look.alpha, Alpha(0x00));
        assert_eq!(look.outline_alpha, Alpha(0x40));
        assert_eq!(look.font_size, 60);
    }

    #[test]
    fn test_plain_preset_has_no_decoration() {
        let config = Config::from_preset(Preset::Plain);
        assert!(config.decoration().is_empty());
        assert_eq!(config.fade_ms, None);
        assert_eq!(config.active_look().outline_alpha, config.alpha_active);
    }

    #[test]
    fn test_rich_decoration_order() {
        let rendered: String = Config::default()
            .decoration()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(rendered, "\\bord2\\shad3\\blur8\\3c&H000000&\\4c&H000000&");
    }
}
