use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLine {
    pub(crate) index: usize,
    pub(crate) text: String,
    pub(crate) start: Duration,
    pub(crate) end: Duration,
}
