//! Severity tables.
//!
//! [`StyleTable`] binds each [`Severity`] to a display [`Style`];
//! [`KEYWORD_TABLE`] maps whole-word keywords to the severity they imply when
//! a line carries no explicit `level=` tag. Both are built once at start-up
//! and only read afterwards.
//!
//! Styles are written as `"[bold] <fg> [on <bg>]"`, e.g. `"black on orange3"`.

use std::collections::BTreeMap;

use crate::types::{Level, Severity};
use crate::Error;

/// Keyword → severity fallback, in precedence order.
///
/// The first keyword in this table that occurs anywhere in the line as a
/// whole word wins, regardless of where in the line it appears.
pub const KEYWORD_TABLE: &[(&str, Severity)] = &[
    ("fatal", Severity::Critical),
    ("panic", Severity::Emergency),
    ("error", Severity::Error),
    ("err", Severity::Error),
    ("fail", Severity::Error),
    ("warning", Severity::Warning),
    ("warn", Severity::Warning),
    ("log", Severity::Info),
    ("hint", Severity::Notice),
    ("notice", Severity::Notice),
    ("alert", Severity::Alert),
    ("emergency", Severity::Emergency),
    ("debug", Severity::Debug),
];

// ---------------------------------------------------------------------------
// Colours and styles
// ---------------------------------------------------------------------------

/// Terminal colour, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// xterm 256-colour palette index.
    Indexed(u8),
    Rgb(u8, u8, u8),
}

/// xterm palette index of `orange3`.
const ORANGE3: u8 = 172;

/// Foreground/background pair attached to a rendered line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Style {
    const fn fg(fg: Color) -> Self {
        Style { fg: Some(fg), bg: None, bold: false }
    }

    const fn pair(fg: Color, bg: Color) -> Self {
        Style { fg: Some(fg), bg: Some(bg), bold: false }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::BrightBlack => "bright_black",
            Color::BrightRed => "bright_red",
            Color::BrightGreen => "bright_green",
            Color::BrightYellow => "bright_yellow",
            Color::BrightBlue => "bright_blue",
            Color::BrightMagenta => "bright_magenta",
            Color::BrightCyan => "bright_cyan",
            Color::BrightWhite => "bright_white",
            Color::Indexed(ORANGE3) => "orange3",
            Color::Indexed(n) => return write!(f, "indexed:{n}"),
            Color::Rgb(r, g, b) => return write!(f, "#{r:02x}{g:02x}{b:02x}"),
        };
        f.write_str(name)
    }
}

/// Writes the style back in the form [`parse_style`] accepts.
impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if self.bold {
            parts.push("bold".to_string());
        }
        if let Some(fg) = self.fg {
            parts.push(fg.to_string());
        }
        if let Some(bg) = self.bg {
            parts.push(format!("on {bg}"));
        }
        f.write_str(&parts.join(" "))
    }
}

impl std::str::FromStr for Style {
    type Err = Error;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        parse_style(spec)
    }
}

/// Parse `"[bold] [<fg>] [on <bg>]"`. An empty spec is the plain style.
pub fn parse_style(spec: &str) -> Result<Style, Error> {
    let malformed = || Error::MalformedStyle(spec.to_string());
    let mut style = Style::default();
    let mut tokens = spec.split_whitespace().peekable();

    if tokens.peek().is_some_and(|t| t.eq_ignore_ascii_case("bold")) {
        style.bold = true;
        tokens.next();
    }

    match tokens.next() {
        None => {}
        Some(on) if on.eq_ignore_ascii_case("on") => {
            style.bg = Some(parse_color(tokens.next().ok_or_else(malformed)?)?);
        }
        Some(fg) => {
            style.fg = Some(parse_color(fg)?);
            match tokens.next() {
                None => {}
                Some(on) if on.eq_ignore_ascii_case("on") => {
                    style.bg = Some(parse_color(tokens.next().ok_or_else(malformed)?)?);
                }
                Some(_) => return Err(malformed()),
            }
        }
    }

    if tokens.next().is_some() {
        return Err(malformed());
    }
    Ok(style)
}

/// Parse a colour name.
///
/// Accepts named colours (case-insensitive, `bright_` prefix for the bright
/// variants), `orange3`, hex RGB `#rrggbb`, and `indexed:N`.
pub fn parse_color(s: &str) -> Result<Color, Error> {
    let unknown = || Error::UnknownColor(s.to_string());
    let lower = s.to_ascii_lowercase();
    let color = match lower.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "bright_black" | "grey" | "gray" => Color::BrightBlack,
        "bright_red" => Color::BrightRed,
        "bright_green" => Color::BrightGreen,
        "bright_yellow" => Color::BrightYellow,
        "bright_blue" => Color::BrightBlue,
        "bright_magenta" => Color::BrightMagenta,
        "bright_cyan" => Color::BrightCyan,
        "bright_white" => Color::BrightWhite,
        "orange3" => Color::Indexed(ORANGE3),
        hex if hex.starts_with('#') => {
            let digits = &hex[1..];
            if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(unknown());
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&digits[range], 16).map_err(|_| unknown())
            };
            Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)
        }
        idx if idx.starts_with("indexed:") => {
            Color::Indexed(idx["indexed:".len()..].parse().map_err(|_| unknown())?)
        }
        _ => return Err(unknown()),
    };
    Ok(color)
}

// ---------------------------------------------------------------------------
// StyleTable
// ---------------------------------------------------------------------------

/// Severity → style mapping. Exactly one style per severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    styles: [Style; 8],
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl StyleTable {
    /// The built-in styles, indexed in [`Severity::ALL`] order.
    pub fn defaults() -> Self {
        Self {
            styles: [
                Style::fg(Color::BrightCyan),
                Style::pair(Color::Black, Color::Indexed(ORANGE3)),
                Style::pair(Color::White, Color::Red),
                Style::pair(Color::Black, Color::Yellow),
                Style::pair(Color::Black, Color::Cyan),
                Style::pair(Color::White, Color::Blue),
                Style::pair(Color::White, Color::Magenta),
                Style::pair(Color::Black, Color::Green),
            ],
        }
    }

    /// Start from the defaults and replace the styles named in `overrides`
    /// (severity name → style spec).
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, Error> {
        let mut table = Self::defaults();
        for (name, spec) in overrides {
            let severity: Severity = name.parse()?;
            table.styles[severity as usize] = parse_style(spec)?;
        }
        Ok(table)
    }

    pub fn get(&self, severity: Severity) -> Style {
        self.styles[severity as usize]
    }

    /// Style for a resolved level; `None` for an unrecognised explicit tag.
    pub fn style_for(&self, level: &Level) -> Option<Style> {
        level.severity().map(|s| self.get(s))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_distinct_per_severity() {
        let table = StyleTable::defaults();
        let unique: std::collections::HashSet<_> =
            Severity::ALL.iter().map(|s| table.get(*s)).collect();
        assert_eq!(unique.len(), Severity::ALL.len());
    }

    #[test]
    fn default_table_matches_style_specs() {
        let table = StyleTable::defaults();
        let specs = [
            (Severity::Info, "bright_cyan"),
            (Severity::Debug, "black on orange3"),
            (Severity::Error, "white on red"),
            (Severity::Warning, "black on yellow"),
            (Severity::Notice, "black on cyan"),
            (Severity::Alert, "white on blue"),
            (Severity::Emergency, "white on magenta"),
            (Severity::Critical, "black on green"),
        ];
        for (severity, spec) in specs {
            assert_eq!(table.get(severity), parse_style(spec).unwrap(), "{severity}");
        }
    }

    #[test]
    fn unrecognized_level_has_no_style() {
        let table = StyleTable::defaults();
        assert_eq!(table.style_for(&Level::Unrecognized("warn".into())), None);
        assert_eq!(
            table.style_for(&Level::Known(Severity::Error)),
            Some(table.get(Severity::Error))
        );
    }

    #[test]
    fn overrides_replace_only_named_severities() {
        let overrides = BTreeMap::from([("Error".to_string(), "bold yellow on #102030".to_string())]);
        let table = StyleTable::with_overrides(&overrides).unwrap();
        assert_eq!(
            table.get(Severity::Error),
            Style {
                fg: Some(Color::Yellow),
                bg: Some(Color::Rgb(0x10, 0x20, 0x30)),
                bold: true,
            }
        );
        assert_eq!(table.get(Severity::Info), StyleTable::defaults().get(Severity::Info));
    }

    #[test]
    fn overrides_reject_unknown_severity() {
        let overrides = BTreeMap::from([("verbose".to_string(), "red".to_string())]);
        assert!(matches!(
            StyleTable::with_overrides(&overrides),
            Err(Error::UnknownSeverity(_))
        ));
    }

    #[test]
    fn parse_background_only() {
        assert_eq!(
            parse_style("on indexed:42").unwrap(),
            Style { fg: None, bg: Some(Color::Indexed(42)), bold: false }
        );
    }

    #[test]
    fn parse_empty_spec_is_plain() {
        assert_eq!(parse_style("  ").unwrap(), Style::default());
    }

    #[test]
    fn parse_rejects_trailing_tokens() {
        assert!(matches!(parse_style("red on blue green"), Err(Error::MalformedStyle(_))));
        assert!(matches!(parse_style("red blue"), Err(Error::MalformedStyle(_))));
        assert!(matches!(parse_style("red on"), Err(Error::MalformedStyle(_))));
    }

    #[test]
    fn parse_unknown_color() {
        assert!(matches!(parse_color("chartreuse"), Err(Error::UnknownColor(_))));
        assert!(matches!(parse_color("#zz0000"), Err(Error::UnknownColor(_))));
        assert!(matches!(parse_color("#12345"), Err(Error::UnknownColor(_))));
        // six bytes, but not six hex digits
        assert!(matches!(parse_color("#a\u{e9}\u{e9}c"), Err(Error::UnknownColor(_))));
        assert!(matches!(parse_color("#+1+2+3"), Err(Error::UnknownColor(_))));
    }

    #[test]
    fn multibyte_colour_in_overrides_is_an_error() {
        let overrides =
            BTreeMap::from([("error".to_string(), "white on #a\u{e9}\u{e9}c".to_string())]);
        assert!(matches!(
            StyleTable::with_overrides(&overrides),
            Err(Error::UnknownColor(_))
        ));
    }

    #[test]
    fn style_display_parses_back() {
        let table = StyleTable::defaults();
        assert_eq!(table.get(Severity::Debug).to_string(), "black on orange3");
        assert_eq!(table.get(Severity::Info).to_string(), "bright_cyan");
        for style in [
            parse_style("bold yellow on #102030").unwrap(),
            parse_style("on indexed:42").unwrap(),
            Style::default(),
        ] {
            assert_eq!(parse_style(&style.to_string()).unwrap(), style);
        }
    }

    #[test]
    fn keyword_table_names_are_lowercase_words() {
        for (keyword, _) in KEYWORD_TABLE {
            assert!(keyword.chars().all(|c| c.is_ascii_lowercase()), "{keyword}");
        }
    }
}
