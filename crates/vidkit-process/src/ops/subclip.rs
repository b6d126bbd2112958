//! Time ranges within a clip.

use crate::error::{ProcessError, ProcessResult};
use crate::filter::num;
use tracing::warn;
use vidkit_core::TimeValue;

/// A requested `[start, end)` range, as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Subclip {
    pub start: TimeValue,
    /// `None` runs to the end of the clip.
    pub end: Option<TimeValue>,
}

impl Subclip {
    /// Parse `--start` / `--end` arguments.
    pub fn parse(start: &str, end: Option<&str>) -> ProcessResult<Self> {
        Ok(Self {
            start: TimeValue::parse(start)?,
            end: TimeValue::parse_end(end)?,
        })
    }

    /// Resolve numeric bounds against the clip duration.
    ///
    /// Negative seconds count back from the end. Pass-through values are
    /// left for FFmpeg to interpret, so the output length is only known
    /// when both bounds are numeric.
    pub fn resolve(&self, duration: f64) -> ProcessResult<ResolvedRange> {
        let start = match absolute(&self.start, duration) {
            Some(s) => {
                if s < 0.0 {
                    return Err(ProcessError::InvalidRange(format!(
                        "start {} is before the beginning of a {}s clip",
                        self.start,
                        num(duration)
                    )));
                }
                if duration > 0.0 && s >= duration {
                    return Err(ProcessError::InvalidRange(format!(
                        "start {}s is past the end of a {}s clip",
                        num(s),
                        num(duration)
                    )));
                }
                Bound::Seconds(s)
            }
            None => Bound::Raw(self.start.to_string()),
        };

        let end = match &self.end {
            None => None,
            Some(value) => match absolute(value, duration) {
                Some(mut e) => {
                    if duration > 0.0 && e > duration {
                        warn!(
                            "End {}s is past the end of the clip, stopping at {}s",
                            num(e),
                            num(duration)
                        );
                        e = duration;
                    }
                    if let Bound::Seconds(s) = &start {
                        if e <= *s {
                            return Err(ProcessError::InvalidRange(format!(
                                "end {}s must come after start {}s",
                                num(e),
                                num(*s)
                            )));
                        }
                    }
                    Some(Bound::Seconds(e))
                }
                None => Some(Bound::Raw(value.to_string())),
            },
        };

        let expected_duration = match (&start, &end) {
            (Bound::Seconds(s), Some(Bound::Seconds(e))) => Some(e - s),
            (Bound::Seconds(s), None) => Some(duration - s),
            _ => None,
        };

        Ok(ResolvedRange {
            start,
            end,
            expected_duration,
        })
    }
}

/// Numeric values made absolute against `duration`; `None` for pass-through.
fn absolute(value: &TimeValue, duration: f64) -> Option<f64> {
    let seconds = value.as_seconds()?;
    Some(if value.is_from_end() {
        duration + seconds
    } else {
        seconds
    })
}

/// A bound ready to hand to FFmpeg.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Seconds(f64),
    Raw(String),
}

impl Bound {
    fn to_arg(&self) -> String {
        match self {
            Bound::Seconds(s) => num(*s),
            Bound::Raw(raw) => raw.clone(),
        }
    }
}

/// A range with relative bounds resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRange {
    pub start: Bound,
    pub end: Option<Bound>,
    /// Output length in seconds, when it can be known up front.
    pub expected_duration: Option<f64>,
}

impl ResolvedRange {
    /// Input-side seek options; they must precede `-i`.
    ///
    /// As input options both bounds are positions in the source, so `-to`
    /// stays absolute even with `-ss` in front of it.
    pub fn input_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.start != Bound::Seconds(0.0) {
            args.extend(["-ss".to_string(), self.start.to_arg()]);
        }
        if let Some(end) = &self.end {
            args.extend(["-to".to_string(), end.to_arg()]);
        }
        args
    }
}
