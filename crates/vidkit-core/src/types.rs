//! Core domain types for vidkit.

use crate::error::{Error, Result};
use std::str::FromStr;

/// Environment variable overriding the ffmpeg binary.
pub const FFMPEG_ENV: &str = "VIDKIT_FFMPEG";

/// Environment variable overriding the ffprobe binary.
pub const FFPROBE_ENV: &str = "VIDKIT_FFPROBE";

/// A point in time within a clip, as given on the command line.
///
/// Numeric values are seconds; negative seconds count back from the end of
/// the clip. Anything that is not a number (for example `00:01:30.5`) is kept
/// verbatim and handed to FFmpeg, which understands its own duration syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    Seconds(f64),
    Passthrough(String),
}

impl TimeValue {
    /// Parse a time argument.
    ///
    /// A leading `-` always means a number, so `-abc` is an error rather than
    /// a pass-through string.
    pub fn parse(s: &str) -> Result<Self> {
        if s.starts_with('-') {
            return s
                .parse::<f64>()
                .map(TimeValue::Seconds)
                .map_err(|_| Error::InvalidTime(s.to_string()));
        }

        match s.parse::<f64>() {
            Ok(seconds) => Ok(TimeValue::Seconds(seconds)),
            Err(_) => Ok(TimeValue::Passthrough(s.to_string())),
        }
    }

    /// Parse an optional end time.
    ///
    /// Missing, empty and zero values all mean "until the end of the clip".
    pub fn parse_end(s: Option<&str>) -> Result<Option<Self>> {
        match s {
            None | Some("") => Ok(None),
            Some(s) => match Self::parse(s)? {
                TimeValue::Seconds(seconds) if seconds == 0.0 => Ok(None),
                value => Ok(Some(value)),
            },
        }
    }

    /// Seconds, if the value is numeric.
    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            TimeValue::Seconds(seconds) => Some(*seconds),
            TimeValue::Passthrough(_) => None,
        }
    }

    /// Whether the value counts back from the end of the clip.
    pub fn is_from_end(&self) -> bool {
        matches!(self, TimeValue::Seconds(seconds) if *seconds < 0.0)
    }
}

impl FromStr for TimeValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeValue::Seconds(seconds) => write!(f, "{}", seconds),
            TimeValue::Passthrough(raw) => write!(f, "{}", raw),
        }
    }
}

/// Where a text layer sits on the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPosition {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl TextPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextPosition::Center => "center",
            TextPosition::Top => "top",
            TextPosition::Bottom => "bottom",
            TextPosition::Left => "left",
            TextPosition::Right => "right",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "center" | "centre" => Some(TextPosition::Center),
            "top" => Some(TextPosition::Top),
            "bottom" => Some(TextPosition::Bottom),
            "left" => Some(TextPosition::Left),
            "right" => Some(TextPosition::Right),
            _ => None,
        }
    }
}

impl FromStr for TextPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TextPosition::from_name(s).ok_or_else(|| Error::InvalidPosition(s.to_string()))
    }
}

impl std::fmt::Display for TextPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_time() {
        assert_eq!(TimeValue::parse("5").unwrap(), TimeValue::Seconds(5.0));
        assert_eq!(TimeValue::parse("2.5").unwrap(), TimeValue::Seconds(2.5));
        assert_eq!(TimeValue::parse("-3").unwrap(), TimeValue::Seconds(-3.0));
        assert!(TimeValue::parse("-3").unwrap().is_from_end());
    }

    #[test]
    fn test_parse_passthrough_time() {
        assert_eq!(
            TimeValue::parse("00:01:30").unwrap(),
            TimeValue::Passthrough("00:01:30".to_string())
        );
        assert_eq!(TimeValue::parse("1:05.5").unwrap().as_seconds(), None);
    }

    #[test]
    fn test_leading_dash_must_be_numeric() {
        assert_eq!(
            TimeValue::parse("-00:10"),
            Err(Error::InvalidTime("-00:10".to_string()))
        );
    }

    #[test]
    fn test_parse_end_treats_zero_as_open() {
        assert_eq!(TimeValue::parse_end(None).unwrap(), None);
        assert_eq!(TimeValue::parse_end(Some("")).unwrap(), None);
        assert_eq!(TimeValue::parse_end(Some("0")).unwrap(), None);
        assert_eq!(
            TimeValue::parse_end(Some("15")).unwrap(),
            Some(TimeValue::Seconds(15.0))
        );
    }

    #[test]
    fn test_time_display() {
        assert_eq!(TimeValue::Seconds(5.0).to_string(), "5");
        assert_eq!(TimeValue::Seconds(1.25).to_string(), "1.25");
        assert_eq!(
            TimeValue::Passthrough("00:00:05".to_string()).to_string(),
            "00:00:05"
        );
    }

    #[test]
    fn test_text_position() {
        assert_eq!("top".parse::<TextPosition>().unwrap(), TextPosition::Top);
        assert_eq!("BOTTOM".parse::<TextPosition>().unwrap(), TextPosition::Bottom);
        assert!("middle".parse::<TextPosition>().is_err());
        assert_eq!(TextPosition::default(), TextPosition::Center);
        assert_eq!(TextPosition::Left.to_string(), "left");
    }
}
