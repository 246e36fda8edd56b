use std::{cmp::Ordering, fmt};

use serde::Serialize;

/// Cell values recognised as missing, matching the NA conventions of common
/// dataframe CSV readers.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_TOKENS: &[&str] = &["True", "TRUE", "true"];
const FALSE_TOKENS: &[&str] = &["False", "FALSE", "false"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Boolean,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Text => "text",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl Eq for Value {}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Boolean(true) => "True".to_string(),
            Value::Boolean(false) => "False".to_string(),
            Value::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{n:.0}")
                } else {
                    n.to_string()
                }
            }
            Value::Text(s) => s.clone(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Value::Boolean(_) => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            // A column never mixes variants; rank keeps the ordering total anyway.
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

pub fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw)
}

fn looks_numeric(raw: &str) -> bool {
    raw.trim().parse::<f64>().is_ok()
}

/// Parses a numeric cell. NaN results count as missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| !value.is_nan())
}

fn parse_boolean(raw: &str) -> Option<bool> {
    if TRUE_TOKENS.contains(&raw) {
        Some(true)
    } else if FALSE_TOKENS.contains(&raw) {
        Some(false)
    } else {
        None
    }
}

/// Decides the kind of a column from all of its cells (`None` marks a missing cell).
pub fn infer_kind<'a, I>(cells: I) -> ColumnKind
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut present = 0usize;
    let mut has_missing = false;
    let mut numeric = true;
    let mut boolean = true;
    for cell in cells {
        let Some(raw) = cell else {
            has_missing = true;
            continue;
        };
        present += 1;
        numeric = numeric && looks_numeric(raw);
        boolean = boolean && parse_boolean(raw).is_some();
    }
    if numeric {
        ColumnKind::Numeric
    } else if boolean && present > 0 && !has_missing {
        ColumnKind::Boolean
    } else {
        ColumnKind::Text
    }
}

pub fn parse_typed_value(raw: &str, kind: ColumnKind) -> Option<Value> {
    match kind {
        ColumnKind::Numeric => parse_number(raw).map(Value::Number),
        ColumnKind::Boolean => parse_boolean(raw).map(Value::Boolean),
        ColumnKind::Text => Some(Value::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_kind_prefers_numeric_when_every_present_cell_parses() {
        let cells = [Some("100"), None, Some("2.5e3"), Some(" 42 ")];
        assert_eq!(infer_kind(cells), ColumnKind::Numeric);
    }

    #[test]
    fn infer_kind_treats_all_missing_column_as_numeric() {
        assert_eq!(infer_kind([None, None]), ColumnKind::Numeric);
    }

    #[test]
    fn infer_kind_detects_booleans_only_without_gaps() {
        assert_eq!(
            infer_kind([Some("True"), Some("false")]),
            ColumnKind::Boolean
        );
        assert_eq!(infer_kind([Some("True"), None]), ColumnKind::Text);
    }

    #[test]
    fn infer_kind_falls_back_to_text() {
        assert_eq!(infer_kind([Some("Sales"), Some("12")]), ColumnKind::Text);
    }

    #[test]
    fn parse_number_rejects_nan_spellings() {
        assert_eq!(parse_number("NAN"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("1500.50"), Some(1500.5));
    }

    #[test]
    fn missing_tokens_cover_common_placeholders() {
        for token in ["", "NA", "N/A", "null", "NaN", "<NA>"] {
            assert!(is_missing_token(token), "{token:?} should be missing");
        }
        assert!(!is_missing_token("na "));
        assert!(!is_missing_token("0"));
    }

    #[test]
    fn value_ordering_is_numeric_for_numbers() {
        let mut values = vec![
            Value::Number(10.0),
            Value::Number(2.0),
            Value::Number(-1.5),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Number(-1.5),
                Value::Number(2.0),
                Value::Number(10.0)
            ]
        );
    }

    #[test]
    fn value_display_drops_trailing_zero_fraction() {
        assert_eq!(Value::Number(3.0).as_display(), "3");
        assert_eq!(Value::Number(3.25).as_display(), "3.25");
        assert_eq!(Value::Boolean(true).as_display(), "True");
        assert_eq!(Value::Text("HR".into()).to_string(), "HR");
    }
}
