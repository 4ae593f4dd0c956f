use super::normalizer::{normalize_code, normalize_header, normalize_text};
use crate::questionnaire::domain::{Question, Rule, VarkStyle};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::Read;

/// One typed dataset row, tagged with the line it came from.
#[derive(Debug)]
pub(crate) struct ParsedRecord {
    pub(crate) line: u64,
    pub(crate) record: DatasetRecord,
}

#[derive(Debug)]
pub(crate) enum DatasetRecord {
    Question(Question),
    Rule(Rule),
    Strategy { category: VarkStyle, text: String },
    Unknown(String),
}

/// Reasons a single row is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    UnknownCategory(String),
    InvalidWeight(String),
    MissingCode,
    MissingRuleId,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::UnknownCategory(value) => {
                write!(f, "unknown VARK category '{value}' (expected V, A, R or K)")
            }
            RecordError::InvalidWeight(value) => {
                write!(f, "weight '{value}' must be a positive whole number")
            }
            RecordError::MissingCode => write!(f, "question row has no code"),
            RecordError::MissingRuleId => write!(f, "rule row has no id"),
        }
    }
}

impl std::error::Error for RecordError {}

#[derive(Debug)]
pub(crate) enum ParseError {
    Csv(csv::Error),
    Record { line: u64, reason: RecordError },
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ParsedRecord>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv::StringRecord::from(
        csv_reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect::<Vec<_>>(),
    );

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let mut raw = result?;
        let line = raw.position().map(|position| position.line()).unwrap_or(0);
        while raw.len() < headers.len() {
            raw.push_field("");
        }
        let row: DatasetRow = raw.deserialize(Some(&headers))?;

        let record = row
            .into_record()
            .map_err(|reason| ParseError::Record { line, reason })?;
        records.push(ParsedRecord { line, record });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(rename = "tipe", alias = "type")]
    kind: String,
    #[serde(
        rename = "kode_gejala",
        alias = "code",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    code: Option<String>,
    #[serde(
        rename = "pertanyaan",
        alias = "question",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    question: Option<String>,
    #[serde(
        rename = "gaya_vark",
        alias = "style",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    style: Option<String>,
    #[serde(
        rename = "bobot",
        alias = "weight",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    weight: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(
        rename = "rule_gejala_1",
        alias = "condition_1",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    condition_1: Option<String>,
    #[serde(
        rename = "rule_gejala_2",
        alias = "condition_2",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    condition_2: Option<String>,
    #[serde(
        rename = "rule_gejala_3",
        alias = "condition_3",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    condition_3: Option<String>,
    #[serde(
        rename = "strategi",
        alias = "strategy",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    strategy: Option<String>,
}

impl DatasetRow {
    fn into_record(self) -> Result<DatasetRecord, RecordError> {
        let kind = normalize_code(&self.kind).to_ascii_uppercase();
        match kind.as_str() {
            "GEJALA" | "QUESTION" | "SYMPTOM" => self.into_question().map(DatasetRecord::Question),
            "RULE" => self.into_rule().map(DatasetRecord::Rule),
            "STRATEGI" | "STRATEGY" => {
                let category = parse_category(self.style.as_deref())?;
                let text = self.strategy.as_deref().map(normalize_text).unwrap_or_default();
                Ok(DatasetRecord::Strategy { category, text })
            }
            _ => Ok(DatasetRecord::Unknown(kind)),
        }
    }

    fn into_question(self) -> Result<Question, RecordError> {
        let code = self
            .code
            .as_deref()
            .map(normalize_code)
            .filter(|code| !code.is_empty())
            .ok_or(RecordError::MissingCode)?;

        Ok(Question {
            code,
            text: self.question.as_deref().map(normalize_text).unwrap_or_default(),
            category: parse_category(self.style.as_deref())?,
            weight: parse_weight(self.weight.as_deref())?,
        })
    }

    fn into_rule(self) -> Result<Rule, RecordError> {
        let id = self
            .id
            .as_deref()
            .map(normalize_code)
            .filter(|id| !id.is_empty())
            .ok_or(RecordError::MissingRuleId)?;
        let category = parse_category(self.style.as_deref())?;

        let conditions = [self.condition_1, self.condition_2, self.condition_3]
            .into_iter()
            .flatten()
            .map(|code| normalize_code(&code))
            .filter(|code| !code.is_empty())
            .collect();

        Ok(Rule {
            id,
            category,
            conditions,
        })
    }
}

fn parse_category(value: Option<&str>) -> Result<VarkStyle, RecordError> {
    let raw = value.unwrap_or_default();
    VarkStyle::parse(raw).ok_or_else(|| RecordError::UnknownCategory(raw.trim().to_string()))
}

/// Blank means 1; `2` and `2.0` are both accepted.
fn parse_weight(value: Option<&str>) -> Result<u32, RecordError> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(1);
    };

    let invalid = || RecordError::InvalidWeight(raw.to_string());

    let weight = match raw.parse::<i64>() {
        Ok(whole) => whole,
        Err(_) => {
            let float = raw.parse::<f64>().map_err(|_| invalid())?;
            if !float.is_finite() || float.fract() != 0.0 {
                return Err(invalid());
            }
            float as i64
        }
    };

    if weight <= 0 {
        return Err(invalid());
    }

    u32::try_from(weight).map_err(|_| invalid())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
pub(crate) fn parse_weight_for_tests(value: Option<&str>) -> Result<u32, RecordError> {
    parse_weight(value)
}
