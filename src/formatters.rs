//! Date, money and form helpers shared by every screen.
//!
//! Display follows vi-VN conventions: `dd/mm/yyyy`, `.` as the thousands
//! separator, `,` for decimals and the dong sign after the amount. Dates are
//! shown in Vietnam time (UTC+7, no DST).

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};

const VN_OFFSET_SECS: i32 = 7 * 3600;
const NOT_AVAILABLE: &str = "N/A";
const CURRENCY_SYMBOL: &str = "₫";

fn vn_offset() -> FixedOffset {
    FixedOffset::east_opt(VN_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parse what forms and the backend send: RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`
/// (taken as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Normalize a form date for the backend.
///
/// Input that is already a UTC ISO timestamp passes through untouched. With
/// `include_time` the full instant is kept (millisecond precision), otherwise
/// it is truncated to `YYYY-MM-DDT00:00:00Z`. `None` for empty or invalid input.
pub fn to_iso_date(input: &str, include_time: bool) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.contains('T') && trimmed.ends_with('Z') && parse_instant(trimmed).is_some() {
        return Some(trimmed.to_string());
    }
    let instant = parse_instant(trimmed)?;
    if include_time {
        Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    } else {
        Some(format!("{}T00:00:00Z", instant.format("%Y-%m-%d")))
    }
}

/// `YYYY-MM-DD` for a date input, in Vietnam time. Empty when unparseable.
pub fn from_iso_date(input: &str) -> String {
    parse_instant(input)
        .map(|dt| dt.with_timezone(&vn_offset()).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// `dd/mm/yyyy`, or `N/A`.
pub fn format_date(input: &str) -> String {
    parse_instant(input)
        .map(|dt| format_timestamp_with(&dt, "%d/%m/%Y"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `dd/mm/yyyy HH:MM:SS`, or `N/A`.
pub fn format_date_time(input: &str) -> String {
    parse_instant(input)
        .map(|dt| format_timestamp_with(&dt, "%d/%m/%Y %H:%M:%S"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// [`format_date_time`] for an already decoded timestamp.
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(|dt| format_timestamp_with(dt, "%d/%m/%Y %H:%M:%S"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn format_timestamp_with(dt: &DateTime<Utc>, fmt: &str) -> String {
    dt.with_timezone(&vn_offset()).format(fmt).to_string()
}

/// Whole dong, e.g. `1.234.567 ₫`. `None` prints as zero.
pub fn format_price(amount: Option<f64>, show_symbol: bool) -> String {
    let value = amount.filter(|a| a.is_finite()).unwrap_or(0.0).round();
    let digits = group_thousands(value.abs() as u64);
    let sign = if value < 0.0 { "-" } else { "" };
    if show_symbol {
        format!("{sign}{digits} {CURRENCY_SYMBOL}")
    } else {
        format!("{sign}{digits}")
    }
}

/// Grouped number with up to three decimals, e.g. `1.234,5`.
pub fn format_number(value: Option<f64>) -> String {
    let value = value.filter(|v| v.is_finite()).unwrap_or(0.0);
    let rounded = (value * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let fraction = format!("{:.3}", abs - whole);
    let fraction = fraction
        .trim_start_matches('0')
        .trim_start_matches('.')
        .trim_end_matches('0');
    let grouped = group_thousands(whole as u64);
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{fraction}")
    }
}

fn group_thousands(n: u64) -> String {
    let raw = n.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    Date,
    DateTime,
    Number,
    #[default]
    String,
    Boolean,
    /// Passed through as-is.
    Any,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub default: Option<Value>,
}

impl FieldSpec {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

pub type FormSchema = HashMap<String, FieldSpec>;

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

fn coerce_number(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::Bool(b) => Value::from(u8::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Value::from(0);
            }
            s.parse::<f64>().map_or(Value::Null, number_value)
        }
        _ => Value::Null,
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn sanitize_date(value: &Value, default: Option<&Value>, include_time: bool) -> Value {
    if !is_truthy(value) {
        return default
            .filter(|d| is_truthy(d))
            .cloned()
            .unwrap_or(Value::Null);
    }
    value
        .as_str()
        .and_then(|s| to_iso_date(s, include_time))
        .map_or(Value::Null, Value::String)
}

/// Coerce raw form values into what the backend expects. Fields missing from
/// `schema` are treated as strings.
pub fn sanitize_form_data(data: &Map<String, Value>, schema: &FormSchema) -> Map<String, Value> {
    let fallback = FieldSpec::default();
    data.iter()
        .map(|(key, value)| {
            let spec = schema.get(key).unwrap_or(&fallback);
            let default = spec.default.as_ref();
            let sanitized = match spec.kind {
                FieldKind::Date => sanitize_date(value, default, false),
                FieldKind::DateTime => sanitize_date(value, default, true),
                FieldKind::Number => match value {
                    Value::Null => default.cloned().unwrap_or_else(|| Value::from(0)),
                    Value::String(s) if s.is_empty() => {
                        default.cloned().unwrap_or_else(|| Value::from(0))
                    }
                    other => coerce_number(other),
                },
                FieldKind::String => match value {
                    Value::Null => default
                        .cloned()
                        .unwrap_or_else(|| Value::String(String::new())),
                    other => Value::String(coerce_string(other)),
                },
                FieldKind::Boolean => Value::Bool(is_truthy(value)),
                FieldKind::Any => value.clone(),
            };
            (key.clone(), sanitized)
        })
        .collect()
}

/// Turn backend timestamps into `YYYY-MM-DD` for date inputs; everything
/// else is copied unchanged.
pub fn parse_backend_data(data: &Map<String, Value>, schema: &FormSchema) -> Map<String, Value> {
    data.iter()
        .map(|(key, value)| {
            let kind = schema.get(key).map(|s| s.kind).unwrap_or_default();
            let parsed = match kind {
                FieldKind::Date | FieldKind::DateTime => {
                    let date = value.as_str().map(from_iso_date).unwrap_or_default();
                    Value::String(date)
                }
                _ => value.clone(),
            };
            (key.clone(), parsed)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Missing, null and empty-string fields fail.
pub fn validate_required(data: &Map<String, Value>, required: &[&str]) -> Validation {
    let errors: Vec<String> = required
        .iter()
        .filter(|field| match data.get(**field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .map(|field| format!("Trường \"{field}\" là bắt buộc"))
        .collect();
    Validation {
        valid: errors.is_empty(),
        errors,
    }
}
