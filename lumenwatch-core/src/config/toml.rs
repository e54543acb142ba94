//! Simple TOML parser for the device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `lumenwatch.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] and [section.subsection] headers
//! - Decimal and `0x` hexadecimal integers, `_` separators
//! - Basic strings with `\n`, `\t`, `\\` and `\"` escapes
//! - Comments (# ...), also after a value
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Literal and multi-line strings
//! - Floats and datetimes
//!
//! Keys missing from the file keep their [`Config::default`] value.

use super::{Config, Message, Response};

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// What went wrong on the offending line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Malformed or unknown section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Key not known in the current section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String longer than the message capacity
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Sensor,
    Response,
    ResponseDark,
    ResponseLight,
}

impl Section {
    fn from_header(name: &str) -> Option<Self> {
        match name.trim() {
            "display" => Some(Section::Display),
            "sensor" => Some(Section::Sensor),
            "response" => Some(Section::Response),
            "response.dark" => Some(Section::ResponseDark),
            "response.light" => Some(Section::ResponseLight),
            _ => None,
        }
    }
}

/// Parse TOML configuration into [`Config`]
pub fn parse_config(input: &str) -> Result<Config, ParseError> {
    let mut config = Config::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let fail = |kind| ParseError {
            line: line_no,
            kind,
        };

        let line = strip_comment(raw).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(fail(ParseErrorKind::InvalidSection))?;
            section = Section::from_header(name).ok_or(fail(ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(fail(ParseErrorKind::InvalidLine))?;
        let key = key.trim();
        let value = value.trim();

        apply(&mut config, section, key, value).map_err(fail)?;
    }

    Ok(config)
}

fn apply(config: &mut Config, section: Section, key: &str, value: &str) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Display, "address") => config.display.address = parse_int(value)?,
        (Section::Display, "frequency") => config.display.frequency = parse_int(value)?,
        (Section::Display, "welcome") => config.display.welcome = parse_string(value)?,
        (Section::Display, "farewell") => config.display.farewell = parse_string(value)?,

        (Section::Sensor, "debounce_ms") => config.sensor.debounce_ms = parse_int(value)?,
        (Section::Sensor, "dark_when_high") => config.sensor.dark_when_high = parse_bool(value)?,

        (Section::ResponseDark, _) => apply_response(&mut config.response.dark, key, value)?,
        (Section::ResponseLight, _) => apply_response(&mut config.response.light, key, value)?,

        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

fn apply_response(response: &mut Response, key: &str, value: &str) -> Result<(), ParseErrorKind> {
    match key {
        "message" => response.message = parse_string(value)?,
        "brightness" => response.brightness = parse_int(value)?,
        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseErrorKind> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseErrorKind::InvalidValue)?;
    }

    let parsed = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    }
    .map_err(|_| ParseErrorKind::InvalidValue)?;

    T::try_from(parsed).map_err(|_| ParseErrorKind::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

fn parse_string(value: &str) -> Result<Message, ParseErrorKind> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseErrorKind::InvalidValue)?;

    let mut out = Message::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        let c = match c {
            '\\' => match chars.next() {
                Some('n') => '\n',
                Some('t') => '\t',
                Some('\\') => '\\',
                Some('"') => '"',
                _ => return Err(ParseErrorKind::InvalidValue),
            },
            '"' => return Err(ParseErrorKind::InvalidValue),
            c => c,
        };
        out.push(c).map_err(|_| ParseErrorKind::TooLong)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::message;

    const SAMPLE: &str = r##"
# Lumenwatch configuration
[display]
address = 0x3D
frequency = 100_000
welcome = "HELLO\nTHERE\n"   # splash
farewell = "BYE"

[sensor]
debounce_ms = 750
dark_when_high = false

[response.dark]
message = "Lights out #1\n"
brightness = 200

[response.light]
message = "Someone \"here\"\n"
brightness = 0x05
"##;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.display.address, 0x3D);
        assert_eq!(config.display.frequency, 100_000);
        assert_eq!(config.display.welcome, message("HELLO\nTHERE\n"));
        assert_eq!(config.display.farewell, message("BYE"));

        assert_eq!(config.sensor.debounce_ms, 750);
        assert!(!config.sensor.dark_when_high);

        assert_eq!(config.response.dark.message, message("Lights out #1\n"));
        assert_eq!(config.response.dark.brightness, 200);
        assert_eq!(config.response.light.message, message("Someone \"here\"\n"));
        assert_eq!(config.response.light.brightness, 5);
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
        assert_eq!(parse_config("# nothing\n\n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = parse_config("[response.light]\nbrightness = 9\n").unwrap();
        assert_eq!(config.response.light.brightness, 9);
        assert_eq!(
            config.response.light.message,
            Config::default().response.light.message
        );
    }

    #[test]
    fn test_unknown_section() {
        let err = parse_config("[display]\naddress = 60\n[motor]\n").unwrap_err();
        assert_eq!(
            err,
            ParseError {
                line: 3,
                kind: ParseErrorKind::InvalidSection
            }
        );
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_config("[sensor]\npin = 4\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_key_outside_section() {
        let err = parse_config("address = 60\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);
    }

    #[test]
    fn test_out_of_range_value() {
        let err = parse_config("[response.dark]\nbrightness = 256\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);
    }

    #[test]
    fn test_invalid_bool() {
        let err = parse_config("[sensor]\ndark_when_high = yes\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);
    }

    #[test]
    fn test_unterminated_header() {
        let err = parse_config("[display\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSection);
    }

    #[test]
    fn test_missing_equals() {
        let err = parse_config("[display]\naddress 60\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidLine);
    }

    #[test]
    fn test_string_too_long() {
        let mut input = heapless::String::<128>::new();
        input.push_str("[display]\nwelcome = \"").unwrap();
        for _ in 0..70 {
            input.push('x').unwrap();
        }
        input.push_str("\"\n").unwrap();

        let err = parse_config(&input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooLong);
    }

    #[test]
    fn test_bad_escape() {
        let err = parse_config("[display]\nfarewell = \"a\\qb\"\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);
    }

    #[test]
    fn test_unquoted_string() {
        let err = parse_config("[display]\nfarewell = BYE\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);
    }
}
