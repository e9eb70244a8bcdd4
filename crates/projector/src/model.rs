use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single cell value: text or number. Dates arrive as text and are
/// parsed lazily by the projector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

// Integral floats serialize as JSON integers, so a value that arrived
// as `100` leaves as `100` again (matters for save payloads, which
// echo rows back to the service).
impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
        }
    }
}

impl Scalar {
    /// The value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
        }
    }
}

/// One parsed line of the bank statement or the ledger.
///
/// Column order is preserved from the source. Rows are immutable once
/// built and carry no intrinsic key; identity is the 0-based position
/// within the owning dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Scalar)>,
}

impl Row {
    pub fn from_pairs(fields: Vec<(String, Scalar)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.fields.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    /// Case-insensitive column lookup; first match wins.
    pub fn get_ci(&self, column: &str) -> Option<&Scalar> {
        self.fields
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(column))
            .map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Rows serialize as plain JSON objects so wire payloads stay shaped
// like the upstream service's `bank_data[]` / `gl_data[]` arrays.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((column, value)) = access.next_entry::<String, Scalar>()? {
                    fields.push((column, value));
                }
                Ok(Row { fields })
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Approved,
    Rejected,
    Verified,
}

impl Default for MatchStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Verified => write!(f, "verified"),
        }
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "verified" => Ok(Self::Verified),
            other => Err(format!("unknown match status: {other}")),
        }
    }
}

/// One match record from the external matching service. Read-only
/// input to the projector; a bank index may own several historical
/// records (e.g. one rejected plus one newly created).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub bank_index: usize,
    /// Older service responses carry a single nullable `gl_index`;
    /// both shapes deserialize into the list form.
    #[serde(default, alias = "gl_index", deserialize_with = "de_gl_indexes")]
    pub gl_indexes: Vec<usize>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub linked_documents: Vec<String>,
}

fn de_gl_indexes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<usize>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Many(Vec<usize>),
        One(usize),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Many(indexes)) => indexes,
        Some(Raw::One(index)) => vec![index],
        None => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Approved,
    HighConfidence,
    LowConfidence,
    NoMatch,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::HighConfidence => write!(f, "high_confidence"),
            Self::LowConfidence => write!(f, "low_confidence"),
            Self::NoMatch => write!(f, "no_match"),
        }
    }
}

/// A ledger row nested under a matched group, keyed by its source index.
#[derive(Debug, Clone, Serialize)]
pub struct GlEntry {
    pub gl_index: usize,
    pub row: Row,
}

/// One group of the derived view. Rebuilt from scratch on every
/// projection; never mutated in place.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayGroup {
    Matched {
        bank_index: usize,
        bank_row: Row,
        gl_rows: Vec<GlEntry>,
        candidate: MatchCandidate,
        classification: Classification,
    },
    UnmatchedBank {
        bank_index: usize,
        bank_row: Row,
    },
    UnmatchedGl {
        gl_index: usize,
        gl_row: Row,
    },
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub total_groups: usize,
    pub matched: usize,
    pub approved: usize,
    pub high_confidence: usize,
    pub low_confidence: usize,
    pub no_match: usize,
    pub unmatched_bank: usize,
    pub unmatched_gl: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionMeta {
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub meta: ProjectionMeta,
    pub summary: ProjectionSummary,
    pub groups: Vec<DisplayGroup>,
}

impl Projection {
    /// The unmatched tail as parallel columns: `(bank, ledger)` slots
    /// paired by position, `None` where the shorter side ran out.
    /// Renderers pad the `None` side with an empty cell.
    pub fn aligned_unmatched(&self) -> Vec<(Option<(usize, &Row)>, Option<(usize, &Row)>)> {
        let bank: Vec<(usize, &Row)> = self
            .groups
            .iter()
            .filter_map(|g| match g {
                DisplayGroup::UnmatchedBank { bank_index, bank_row } => {
                    Some((*bank_index, bank_row))
                }
                _ => None,
            })
            .collect();
        let gl: Vec<(usize, &Row)> = self
            .groups
            .iter()
            .filter_map(|g| match g {
                DisplayGroup::UnmatchedGl { gl_index, gl_row } => Some((*gl_index, gl_row)),
                _ => None,
            })
            .collect();

        let mut slots = Vec::with_capacity(bank.len().max(gl.len()));
        for i in 0..bank.len().max(gl.len()) {
            slots.push((bank.get(i).copied(), gl.get(i).copied()));
        }
        slots
    }
}
