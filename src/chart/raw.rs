//! Decoder from chart text into raw events.
//!
//! The chart text is a JSON document of the shape below:
//!
//! ```json
//! {
//!     "info": { "bpm": 120.0, "dir": "assets", "delay": 0 },
//!     "notes": [[0, 2, 1, 0, 0, 10], [0, 2, 1, 1, 1, 2, 240.0]]
//! }
//! ```
//!
//! Each event is an array of `[beat, position_divisions, beat_divisions, position_index, beat_index, code, args...]`.
//! Decoding only checks the shape of the document. The events are neither sorted nor validated here,
//! that happens in [`super::timeline::TimelineBuilder`].

use std::{fmt, str::FromStr};

use serde::{
    Deserialize, Serialize,
    de::{self, SeqAccess, Visitor},
};
use serde_json::value::RawValue;

use super::{
    error::FormatError,
    span::{SourceSpan, offset_of_line_column},
};

/// Top-level metadata of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInfo {
    /// Initial tempo in beats per minute. Its validity is checked while building the timeline.
    #[serde(rename = "bpm")]
    pub tempo: f64,
    /// Directory where the assets (background music) of the chart are placed.
    #[serde(rename = "dir")]
    pub directory: String,
    /// Delay before the chart starts.
    pub delay: i64,
}

/// Extra kind-dependent argument of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawArg {
    /// Integer argument, such as a group id.
    Int(i64),
    /// Real argument, such as a tempo, scale or width.
    Float(f64),
    /// String argument, such as a file name.
    Str(String),
    /// Any other value. No note kind reads it, so it is only kept in place.
    Other(serde_json::Value),
}

impl RawArg {
    /// Gets the value as a real number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawArg::Int(int) => Some(*int as f64),
            RawArg::Float(float) => Some(*float),
            RawArg::Str(_) | RawArg::Other(_) => None,
        }
    }

    /// Gets the value as an integer. Reals are accepted only if they have no fractional part.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawArg::Int(int) => Some(*int),
            RawArg::Float(float) if float.is_finite() && float.fract() == 0.0 => {
                Some(*float as i64)
            }
            RawArg::Float(_) | RawArg::Str(_) | RawArg::Other(_) => None,
        }
    }

    /// Gets the value as a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawArg::Str(string) => Some(string),
            RawArg::Int(_) | RawArg::Float(_) | RawArg::Other(_) => None,
        }
    }
}

/// An event as written in the chart, before resolving its time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawEvent {
    /// Whole-beat offset.
    pub beat: u32,
    /// Number of lane positions. The lane coordinate is `position_index / (position_divisions - 1)`.
    pub position_divisions: u32,
    /// Denominator of the fractional beat offset.
    pub beat_divisions: u32,
    /// Lane position index.
    pub position_index: u32,
    /// Numerator of the fractional beat offset.
    pub beat_index: u32,
    /// Note type code, see [`super::kind::NoteCode`].
    pub code: u32,
    /// Kind-dependent arguments.
    pub args: Vec<RawArg>,
    /// Index of the event in the `notes` array of the document.
    pub index: usize,
    /// Where the event is written in the source.
    pub span: SourceSpan,
}

impl RawEvent {
    /// Musical time of the event: `beat_index / beat_divisions + beat`.
    #[must_use]
    pub fn musical_time(&self) -> f64 {
        self.beat_index as f64 / self.beat_divisions as f64 + self.beat as f64
    }
}

/// The tuple form of [`RawEvent`] as it appears in the document.
struct EventTuple {
    beat: u32,
    position_divisions: u32,
    beat_divisions: u32,
    position_index: u32,
    beat_index: u32,
    code: u32,
    args: Vec<RawArg>,
}

impl<'de> Deserialize<'de> for EventTuple {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_seq(EventTupleVisitor)
    }
}

struct EventTupleVisitor;

impl<'de> Visitor<'de> for EventTupleVisitor {
    type Value = EventTuple;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an event array of at least 6 non-negative integers")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut fields = [0u32; 6];
        for (i, field) in fields.iter_mut().enumerate() {
            *field = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        let mut args = Vec::new();
        while let Some(arg) = seq.next_element::<RawArg>()? {
            args.push(arg);
        }
        let [
            beat,
            position_divisions,
            beat_divisions,
            position_index,
            beat_index,
            code,
        ] = fields;
        Ok(EventTuple {
            beat,
            position_divisions,
            beat_divisions,
            position_index,
            beat_index,
            code,
            args,
        })
    }
}

#[derive(Deserialize)]
struct ChartDocument<'a> {
    #[serde(borrow)]
    info: &'a RawValue,
    #[serde(borrow)]
    notes: Vec<&'a RawValue>,
}

/// Decoded chart, with events in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawChart {
    /// Top-level metadata.
    pub info: ChartInfo,
    /// Events in the order of the document.
    pub events: Vec<RawEvent>,
}

impl RawChart {
    /// Decodes the chart text.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the text is not JSON, lacks `info` or `notes`, or contains a malformed field or event.
    pub fn from_json(source: &str) -> Result<Self, FormatError> {
        let document: ChartDocument = serde_json::from_str(source).map_err(|err| {
            let offset = offset_of_line_column(source, err.line(), err.column());
            FormatError::Document {
                message: json_message(&err),
                span: SourceSpan::new(offset, (offset + 1).min(source.len())),
            }
        })?;

        let info_span = SourceSpan::of_slice(source, document.info.get());
        let info: ChartInfo = deserialize_part(document.info.get()).map_err(|(path, message)| {
            FormatError::Info {
                path: prefixed_path("info", &path),
                message,
                span: info_span,
            }
        })?;

        let events = document
            .notes
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let span = SourceSpan::of_slice(source, raw.get());
                let tuple: EventTuple =
                    deserialize_part(raw.get()).map_err(|(path, message)| FormatError::Event {
                        index,
                        path: prefixed_path(&format!("notes[{index}]"), &path),
                        message,
                        span,
                    })?;
                Ok(RawEvent {
                    beat: tuple.beat,
                    position_divisions: tuple.position_divisions,
                    beat_divisions: tuple.beat_divisions,
                    position_index: tuple.position_index,
                    beat_index: tuple.beat_index,
                    code: tuple.code,
                    args: tuple.args,
                    index,
                    span,
                })
            })
            .collect::<Result<Vec<_>, FormatError>>()?;

        log::debug!(
            "decoded chart: {} events, base tempo {}, directory {:?}, delay {}",
            events.len(),
            info.tempo,
            info.directory,
            info.delay
        );
        Ok(Self { info, events })
    }
}

impl FromStr for RawChart {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

/// Deserializes a part of the document, reporting the path inside the part on failure.
fn deserialize_part<'a, T: Deserialize<'a>>(text: &'a str) -> Result<T, (String, String)> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| (err.path().to_string(), json_message(err.inner())))
}

fn prefixed_path(prefix: &str, path: &str) -> String {
    match path {
        "." | "" => prefix.to_string(),
        path if path.starts_with('[') => format!("{prefix}{path}"),
        path => format!("{prefix}.{path}"),
    }
}

/// The message of a `serde_json` error without the position suffix.
fn json_message(err: &serde_json::Error) -> String {
    let text = err.to_string();
    match text.rsplit_once(" at line ") {
        Some((message, _)) => message.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decodes_info_and_events() {
        let source = r#"{"info": {"bpm": 120, "dir": "x", "delay": 3},
            "notes": [[0, 2, 1, 0, 0, 10], [1, 5, 4, 2, 3, 50, 7, 0.25], [0, 2, 1, 1, 0, 1, "bgm.ogg"]]}"#;
        let chart = RawChart::from_json(source).unwrap();
        assert_eq!(
            chart.info,
            ChartInfo {
                tempo: 120.0,
                directory: "x".into(),
                delay: 3,
            }
        );
        assert_eq!(chart.events.len(), 3);
        let wide = &chart.events[1];
        assert_eq!(wide.code, 50);
        assert_eq!(wide.args, vec![RawArg::Int(7), RawArg::Float(0.25)]);
        assert_eq!(wide.musical_time(), 1.75);
        assert_eq!(&source[wide.span.as_range()], "[1, 5, 4, 2, 3, 50, 7, 0.25]");
        assert_eq!(chart.events[2].args[0].as_str(), Some("bgm.ogg"));
    }

    #[test]
    fn missing_info_field() {
        let source = r#"{"info": {"bpm": 120, "dir": "x"}, "notes": []}"#;
        let err = RawChart::from_json(source).unwrap_err();
        let FormatError::Info { path, message, .. } = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(path, "info");
        assert!(message.contains("delay"), "{message}");
    }

    #[test]
    fn non_numeric_tempo() {
        let source = r#"{"info": {"bpm": "fast", "dir": "x", "delay": 0}, "notes": []}"#;
        let err = RawChart::from_json(source).unwrap_err();
        assert!(
            matches!(&err, FormatError::Info { path, .. } if path == "info.bpm"),
            "{err:?}"
        );
    }

    #[test]
    fn malformed_event() {
        let source = r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [[0, 2, 1, 0, 0, 10], [0, 2, -1]]}"#;
        let err = RawChart::from_json(source).unwrap_err();
        let FormatError::Event {
            index, path, span, ..
        } = err
        else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(index, 1);
        assert_eq!(path, "notes[1][2]");
        assert_eq!(&source[span.as_range()], "[0, 2, -1]");
    }

    #[test]
    fn short_event() {
        let source = r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [[0, 2, 1]]}"#;
        assert!(matches!(
            RawChart::from_json(source),
            Err(FormatError::Event { index: 0, .. })
        ));
    }

    #[test]
    fn not_json() {
        let err = RawChart::from_json("{\"info\": ").unwrap_err();
        assert!(matches!(err, FormatError::Document { .. }), "{err:?}");
    }

    #[test]
    fn unused_arguments_of_any_type() {
        let source = r#"{"info": {"bpm": 120, "dir": "x", "delay": 0},
            "notes": [[0, 2, 1, 0, 0, 10, null], [0, 2, 1, 0, 0, 21, 4, true, [1, 2], {"a": 1}]]}"#;
        let chart = RawChart::from_json(source).unwrap();
        assert_eq!(chart.events[0].args, vec![RawArg::Other(serde_json::Value::Null)]);
        assert_eq!(chart.events[1].args.len(), 4);
        assert_eq!(chart.events[1].args[0].as_int(), Some(4));
        assert_eq!(chart.events[1].args[1].as_f64(), None);
    }

    #[test]
    fn parses_from_str() {
        let chart: RawChart = r#"{"info": {"bpm": 150.5, "dir": "", "delay": -2}, "notes": [[0, 2, 1, 0, 0, 10]]}"#
            .parse()
            .unwrap();
        assert_eq!(chart.info.tempo, 150.5);
        assert_eq!(chart.info.delay, -2);
        assert_eq!(chart.events[0].code, 10);
        assert!("[]".parse::<RawChart>().is_err());
    }

    #[test]
    fn integral_floats_are_ints() {
        assert_eq!(RawArg::Float(3.0).as_int(), Some(3));
        assert_eq!(RawArg::Float(3.5).as_int(), None);
        assert_eq!(RawArg::Int(2).as_f64(), Some(2.0));
    }
}
