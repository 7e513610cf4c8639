//! String ⇄ typed-value conversion, one variant per logical type.
//!
//! There is no global registry: `Converter::for_field` matches on the field's
//! logical type, and timestamp fields compile their pattern once up front.

use chrono::format::{self, Item, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDateTime};

use crate::error::{Error, Result};
use crate::schema::{Field, LogicalType};
use crate::types::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Converter {
    Boolean,
    Double,
    Float,
    Int,
    Long,
    Str,
    Timestamp(TimestampFormat),
}

impl Converter {
    pub fn for_field(field: &Field) -> Result<Self> {
        Ok(match field.logical_type {
            LogicalType::Boolean => Converter::Boolean,
            LogicalType::Double => Converter::Double,
            LogicalType::Float => Converter::Float,
            LogicalType::Int => Converter::Int,
            LogicalType::Long => Converter::Long,
            LogicalType::String => Converter::Str,
            LogicalType::Timestamp => {
                let pattern = field.timestamp_pattern.as_deref().ok_or_else(|| {
                    Error::InvalidConfiguration(format!(
                        "timestamp field '{}' has no pattern",
                        field.name
                    ))
                })?;
                Converter::Timestamp(TimestampFormat::new(pattern)?)
            }
        })
    }

    pub fn logical_type(&self) -> LogicalType {
        match self {
            Converter::Boolean => LogicalType::Boolean,
            Converter::Double => LogicalType::Double,
            Converter::Float => LogicalType::Float,
            Converter::Int => LogicalType::Int,
            Converter::Long => LogicalType::Long,
            Converter::Str => LogicalType::String,
            Converter::Timestamp(_) => LogicalType::Timestamp,
        }
    }

    /// Parse `raw` (already trimmed) into a typed value.
    pub fn decode(&self, field: &str, raw: &str) -> Result<Value> {
        let err = |cause: &dyn std::fmt::Display| Error::malformed(field, raw, cause);
        match self {
            Converter::Boolean => parse_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| err(&"expected 'true' or 'false'")),
            Converter::Double => raw.parse().map(Value::Double).map_err(|e| err(&e)),
            Converter::Float => raw.parse().map(Value::Float).map_err(|e| err(&e)),
            Converter::Int => raw.parse().map(Value::Int).map_err(|e| err(&e)),
            Converter::Long => raw.parse().map(Value::Long).map_err(|e| err(&e)),
            Converter::Str => Ok(Value::Str(raw.to_string())),
            Converter::Timestamp(fmt) => fmt.parse(field, raw).map(Value::Timestamp),
        }
    }

    /// Render a typed value back to text. The caller checks the width.
    pub fn encode(&self, field: &str, value: &Value) -> Result<String> {
        match (self, value) {
            (Converter::Boolean, Value::Bool(b)) => Ok(b.to_string()),
            (Converter::Double, Value::Double(v)) => Ok(v.to_string()),
            (Converter::Float, Value::Float(v)) => Ok(v.to_string()),
            (Converter::Int, Value::Int(v)) => Ok(v.to_string()),
            (Converter::Long, Value::Long(v)) => Ok(v.to_string()),
            (Converter::Str, Value::Str(s)) => Ok(s.clone()),
            (Converter::Timestamp(fmt), Value::Timestamp(ms)) => fmt.format(field, *ms),
            (conv, other) => Err(Error::SchemaMismatch(format!(
                "field '{field}' expects {}, got {}",
                conv.logical_type(),
                other.logical_type()
            ))),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A date pattern (`yyyy-MM-dd HH:mm:ss`) compiled to a chrono format string.
///
/// Components the pattern leaves out take fixed defaults: 1970 for the year,
/// January, the 1st, AM, hour 0, minute 0. Without a zone letter, values are
/// read as UTC; with one, the parsed offset is applied. Formatting always
/// renders UTC, so a zone renders as `+0000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat {
    pattern: String,
    strftime: String,
    letters: PatternLetters,
}

/// Which calendar and clock components a pattern supplies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PatternLetters {
    year: bool,
    month: bool,
    day: bool,
    ordinal: bool,
    hour24: bool,
    hour12: bool,
    ampm: bool,
    minute: bool,
    zone: bool,
}

impl TimestampFormat {
    pub fn new(pattern: &str) -> Result<Self> {
        let (strftime, letters) = translate_pattern(pattern)?;
        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidConfiguration(format!(
                "unsupported timestamp pattern '{pattern}'"
            )));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            strftime,
            letters,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Parse into epoch milliseconds.
    pub fn parse(&self, field: &str, raw: &str) -> Result<i64> {
        let err = |cause: &dyn std::fmt::Display| {
            Error::malformed(field, raw, format!("does not match '{}': {cause}", self.pattern))
        };
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, raw, StrftimeItems::new(&self.strftime)).map_err(|e| err(&e))?;
        self.fill_defaults(&mut parsed).map_err(|e| err(&e))?;

        if self.letters.zone {
            let ts = parsed.to_datetime().map_err(|e| err(&e))?;
            return Ok(ts.timestamp_millis());
        }
        let date = parsed.to_naive_date().map_err(|e| err(&e))?;
        let time = parsed.to_naive_time().map_err(|e| err(&e))?;
        Ok(NaiveDateTime::new(date, time).and_utc().timestamp_millis())
    }

    pub fn format(&self, field: &str, millis: i64) -> Result<String> {
        let ts = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            Error::malformed(field, &millis.to_string(), "timestamp out of range")
        })?;
        Ok(ts.format(&self.strftime).to_string())
    }

    fn fill_defaults(&self, parsed: &mut Parsed) -> ParseResult<()> {
        let l = self.letters;
        if !l.year {
            parsed.set_year(1970)?;
        }
        if !l.ordinal {
            if !l.month {
                parsed.set_month(1)?;
            }
            if !l.day {
                parsed.set_day(1)?;
            }
        }
        if !l.hour24 {
            if !l.ampm {
                parsed.set_ampm(false)?;
            }
            if !l.hour12 {
                // hour12 of 12 is hour_mod_12 of 0
                parsed.set_hour12(12)?;
            }
        }
        if !l.minute {
            parsed.set_minute(0)?;
        }
        Ok(())
    }
}

/// Translate pattern letters into strftime specifiers, recording which
/// components the pattern supplies.
fn translate_pattern(pattern: &str) -> Result<(String, PatternLetters)> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut letters = PatternLetters::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            // '' is a literal quote; otherwise copy until the closing quote.
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            if i >= chars.len() {
                return Err(Error::InvalidConfiguration(format!(
                    "unterminated quote in timestamp pattern '{pattern}'"
                )));
            }
            i += 1;
            continue;
        }
        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let specifier = match (c, run) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1) => "%-d",
            ('d', _) => "%d",
            ('D', _) => "%j",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            ('H', 1) => "%-H",
            ('H', _) => "%H",
            ('h', _) => "%I",
            ('m', _) => "%M",
            ('s', _) => "%S",
            ('S', 3) => "%3f",
            ('a', _) => "%p",
            ('Z', _) => "%z",
            ('X', 3) => "%:z",
            _ => {
                return Err(Error::InvalidConfiguration(format!(
                    "unsupported letters '{}' in timestamp pattern '{pattern}'",
                    c.to_string().repeat(run)
                )))
            }
        };
        match c {
            'y' => letters.year = true,
            'M' => letters.month = true,
            'd' => letters.day = true,
            'D' => letters.ordinal = true,
            'H' => letters.hour24 = true,
            'h' => letters.hour12 = true,
            'a' => letters.ampm = true,
            'm' => letters.minute = true,
            'Z' | 'X' => letters.zone = true,
            _ => {}
        }
        out.push_str(specifier);
        i += run;
    }
    Ok((out, letters))
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv(t: LogicalType) -> Converter {
        Converter::for_field(&Field::new("f", t)).unwrap()
    }

    #[test]
    fn decodes_scalars() {
        assert_eq!(conv(LogicalType::Boolean).decode("f", "True").unwrap(), Value::Bool(true));
        assert_eq!(conv(LogicalType::Boolean).decode("f", "false").unwrap(), Value::Bool(false));
        assert_eq!(conv(LogicalType::Int).decode("f", "-42").unwrap(), Value::Int(-42));
        assert_eq!(conv(LogicalType::Int).decode("f", "+7").unwrap(), Value::Int(7));
        assert_eq!(
            conv(LogicalType::Long).decode("f", "9000000000").unwrap(),
            Value::Long(9_000_000_000)
        );
        assert_eq!(conv(LogicalType::Double).decode("f", "12.147").unwrap(), Value::Double(12.147));
        assert_eq!(conv(LogicalType::Float).decode("f", "1.5").unwrap(), Value::Float(1.5));
        assert_eq!(
            conv(LogicalType::String).decode("f", " keep ").unwrap(),
            Value::Str(" keep ".into())
        );
    }

    #[test]
    fn bad_input_is_malformed_not_coerced() {
        for (t, raw) in [
            (LogicalType::Boolean, "yes"),
            (LogicalType::Int, "12a"),
            (LogicalType::Int, "99999999999"),
            (LogicalType::Long, ""),
            (LogicalType::Double, "1,5"),
        ] {
            match conv(t).decode("col", raw) {
                Err(Error::MalformedField { field, raw: r, .. }) => {
                    assert_eq!(field, "col");
                    assert_eq!(r, raw);
                }
                other => panic!("{t} {raw:?}: expected MalformedField, got {other:?}"),
            }
        }
    }

    #[test]
    fn encode_is_inverse_for_scalars() {
        for (t, raw) in [
            (LogicalType::Boolean, "true"),
            (LogicalType::Int, "-17"),
            (LogicalType::Long, "1234567890123"),
            (LogicalType::Double, "12.147"),
            (LogicalType::String, "abc"),
        ] {
            let c = conv(t);
            let v = c.decode("f", raw).unwrap();
            assert_eq!(c.encode("f", &v).unwrap(), raw);
        }
    }

    #[test]
    fn encode_rejects_wrong_variant() {
        let err = conv(LogicalType::Int).encode("n", &Value::Str("1".into())).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }

    #[test]
    fn timestamp_date_only_is_midnight_utc() {
        let c = Converter::for_field(&Field::timestamp("ts", "yyyy-MM-dd")).unwrap();
        assert_eq!(c.decode("ts", "2017-01-01").unwrap(), Value::Timestamp(1_483_228_800_000));
        assert_eq!(c.decode("ts", "2017-01-22").unwrap(), Value::Timestamp(1_485_043_200_000));
        assert_eq!(c.encode("ts", &Value::Timestamp(1_485_043_200_000)).unwrap(), "2017-01-22");
    }

    #[test]
    fn timestamp_with_time_and_millis() {
        let f = TimestampFormat::new("dd/MM/yyyy HH:mm:ss.SSS").unwrap();
        assert_eq!(f.strftime(), "%d/%m/%Y %H:%M:%S.%3f");
        let ms = f.parse("ts", "01/01/1970 00:00:01.250").unwrap();
        assert_eq!(ms, 1_250);
        assert_eq!(f.format("ts", ms).unwrap(), "01/01/1970 00:00:01.250");
    }

    #[test]
    fn zone_offset_shifts_the_instant() {
        let f = TimestampFormat::new("yyyy-MM-dd HH:mmZ").unwrap();
        let utc = f.parse("ts", "2017-01-22 10:00+0000").unwrap();
        let plus_two = f.parse("ts", "2017-01-22 10:00+0200").unwrap();
        assert_eq!(utc, 1_485_079_200_000);
        assert_eq!(plus_two, 1_485_072_000_000);
        assert_eq!(f.format("ts", plus_two).unwrap(), "2017-01-22 08:00+0000");

        let iso = TimestampFormat::new("yyyy-MM-dd'T'HH:mmXXX").unwrap();
        assert_eq!(
            iso.parse("ts", "2017-01-22T10:00-05:00").unwrap(),
            1_485_097_200_000
        );
    }

    #[test]
    fn twelve_hour_clock_defaults_to_am() {
        let f = TimestampFormat::new("yyyy-MM-dd hh:mm").unwrap();
        assert_eq!(f.parse("ts", "2017-01-22 10:30").unwrap(), 1_485_081_000_000);
        assert_eq!(f.parse("ts", "2017-01-22 12:30").unwrap(), 1_485_045_000_000);

        let pm = TimestampFormat::new("yyyy-MM-dd hh:mm a").unwrap();
        assert_eq!(pm.parse("ts", "2017-01-22 10:30 PM").unwrap(), 1_485_124_200_000);
    }

    #[test]
    fn missing_minutes_default_to_zero() {
        let f = TimestampFormat::new("yyyy-MM-dd HH").unwrap();
        assert_eq!(f.parse("ts", "2017-01-22 10").unwrap(), 1_485_079_200_000);
    }

    #[test]
    fn time_only_pattern_lands_on_epoch_day() {
        let f = TimestampFormat::new("HH:mm").unwrap();
        assert_eq!(f.parse("ts", "10:30").unwrap(), 37_800_000);
        assert_eq!(f.format("ts", 37_800_000).unwrap(), "10:30");
    }

    #[test]
    fn partial_dates_fill_month_and_day() {
        let month = TimestampFormat::new("yyyy-MM").unwrap();
        assert_eq!(month.parse("ts", "2017-03").unwrap(), 1_488_326_400_000);

        let short_year = TimestampFormat::new("yy-MM-dd").unwrap();
        assert_eq!(short_year.parse("ts", "17-01-22").unwrap(), 1_485_043_200_000);

        let ordinal = TimestampFormat::new("yyyy DDD").unwrap();
        assert_eq!(ordinal.parse("ts", "2017 022").unwrap(), 1_485_043_200_000);
    }

    #[test]
    fn timestamp_mismatch_is_malformed() {
        let c = Converter::for_field(&Field::timestamp("ts", "yyyy-MM-dd")).unwrap();
        let err = c.decode("ts", "22/01/2017").unwrap_err();
        assert!(matches!(err, Error::MalformedField { field, .. } if field == "ts"));
    }

    #[test]
    fn pattern_literals_and_escapes() {
        let f = TimestampFormat::new("yyyyMMdd'T'HHmm '%' ''").unwrap();
        assert_eq!(f.strftime(), "%Y%m%dT%H%M %% '");
    }

    #[test]
    fn unsupported_pattern_letters_fail_fast() {
        assert!(matches!(
            TimestampFormat::new("yyyy-QQ"),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            TimestampFormat::new("yyyy 'open"),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn timestamp_field_without_pattern_is_config_error() {
        let f = Field::new("ts", LogicalType::Timestamp);
        assert!(matches!(Converter::for_field(&f), Err(Error::InvalidConfiguration(_))));
    }
}
