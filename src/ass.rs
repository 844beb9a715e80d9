use std::fmt;

/// A colour in the `BBGGRR` byte order ASS uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour(pub u32);

impl Colour {
    pub fn style_field(self) -> String {
        format!("&H00{:06X}", self.0 & 0x00FF_FFFF)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "&H{:06X}&", self.0 & 0x00FF_FFFF)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alpha(pub u8);

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "&H{:02X}&", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Fade { fade_in_ms: u32, fade_out_ms: u32 },
    Move { x: i32, y_from: i32, y_to: i32, duration_ms: u32 },
    Border(u32),
    Shadow(u32),
    Blur(f32),
    OutlineColour(Colour),
    ShadowColour(Colour),
    PrimaryColour(Colour),
    PrimaryAlpha(Alpha),
    OutlineAlpha(Alpha),
    ShadowAlpha(Alpha),
    FontSize(u32),
    Transition { duration_ms: u32, tags: Vec<Tag> },
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tag::Fade {
                fade_in_ms,
                fade_out_ms,
            } => write!(f, "\\fad({},{})", fade_in_ms, fade_out_ms),
            Tag::Move {
                x,
                y_from,
                y_to,
                duration_ms,
            } => write!(f, "\\move({},{},{},{},0,{})", x, y_from, x, y_to, duration_ms),
            Tag::Border(width) => write!(f, "\\bord{}", width),
            Tag::Shadow(depth) => write!(f, "\\shad{}", depth),
            Tag::Blur(radius) => write!(f, "\\blur{}", radius),
            Tag::OutlineColour(colour) => write!(f, "\\3c{}", colour),
            Tag::ShadowColour(colour) => write!(f, "\\4c{}", colour),
            Tag::PrimaryColour(colour) => write!(f, "\\c{}", colour),
            Tag::PrimaryAlpha(alpha) => write!(f, "\\1a{}", alpha),
            Tag::OutlineAlpha(alpha) => write!(f, "\\3a{}", alpha),
            Tag::ShadowAlpha(alpha) => write!(f, "\\4a{}", alpha),
            Tag::FontSize(size) => write!(f, "\\fs{}", size),
            Tag::Transition { duration_ms, tags } => {
                write!(f, "\\t(0,{},", duration_ms)?;
                for tag in tags {
                    write!(f, "{}", tag)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_tag {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (tag, expected): (Tag, &str) = $value;
                assert_eq!(tag.to_string(), expected);
            }
        )*
        }
    }

    test_tag! {
        test_tag_fade: (Tag::Fade { fade_in_ms: 800, fade_out_ms: 0 }, "\\fad(800,0)"),
        test_tag_move: (
            Tag::Move { x: 960, y_from: 880, y_to: 700, duration_ms: 800 },
            "\\move(960,880,960,700,0,800)"
        ),
        test_tag_blur_fraction: (Tag::Blur(1.5), "\\blur1.5"),
        test_tag_blur_whole: (Tag::Blur(8.0), "\\blur8"),
        test_tag_colour: (Tag::PrimaryColour(Colour(0x00FFFF)), "\\c&H00FFFF&"),
        test_tag_alpha: (Tag::PrimaryAlpha(Alpha(0x60)), "\\1a&H60&"),
        test_tag_outline_alpha: (Tag::OutlineAlpha(Alpha(0x40)), "\\3a&H40&"),
        test_tag_transition: (
            Tag::Transition {
                duration_ms: 800,
                tags: vec![Tag::PrimaryColour(Colour(0x666666)), Tag::FontSize(40)],
            },
            "\\t(0,800,\\c&H666666&\\fs40)"
        ),
    }

    #[test]
    fn test_style_field_has_alpha_byte() {
        assert_eq!(Colour(0xFFFFFF).style_field(), "&H00FFFFFF");
        assert_eq!(Colour(0).style_field(), "&H00000000");
    }
}
