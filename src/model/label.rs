//! Sentiment labels.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PalateError, Result};

/// The sentiment of a review.
///
/// Human-readable formats (JSON) write labels as lowercase strings and also
/// accept the integer class codes of binary training sets: `1` is positive,
/// `0` and `-1` are negative. Compact formats (bincode) use a one-byte code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Negative,
    Neutral,
    Positive,
}

impl Label {
    /// All labels in ascending order.
    pub const ALL: [Label; 3] = [Label::Negative, Label::Neutral, Label::Positive];

    /// Lowercase name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Negative => "negative",
            Label::Neutral => "neutral",
            Label::Positive => "positive",
        }
    }

    fn code(&self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Neutral => 1,
            Label::Positive => 2,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        Label::ALL.get(usize::from(code)).copied()
    }

    /// Map an integer class code of a binary training set.
    pub fn from_class_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Label::Positive),
            0 | -1 => Some(Label::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = PalateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" => Ok(Label::Positive),
            "negative" | "neg" => Ok(Label::Negative),
            "neutral" => Ok(Label::Neutral),
            other => Err(PalateError::artifact(format!("unknown label '{other}'"))),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(self.as_str())
        } else {
            serializer.serialize_u8(self.code())
        }
    }
}

struct LabelVisitor;

impl<'de> Visitor<'de> for LabelVisitor {
    type Value = Label;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sentiment label name or binary class code")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Label, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Label, E> {
        Label::from_class_code(v)
            .ok_or_else(|| E::custom(format!("unknown class code {v}")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Label, E> {
        let code = i64::try_from(v).map_err(|_| E::custom(format!("unknown class code {v}")))?;
        self.visit_i64(code)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(LabelVisitor)
        } else {
            let code = u8::deserialize(deserializer)?;
            Label::from_code(code)
                .ok_or_else(|| de::Error::custom(format!("unknown label code {code}")))
        }
    }
}
