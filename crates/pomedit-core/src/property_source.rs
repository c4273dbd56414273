//! Reading properties from a `.properties` file and inline `key=value` lists

use crate::types::Properties;
use crate::{Error, Result};
use pomedit_fs::FileSystem;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

const WHITESPACE: &[char] = &[' ', '\t', '\x0c'];

/// Character encoding of a properties file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertiesEncoding {
    /// UTF-8 (malformed sequences become U+FFFD)
    #[default]
    Utf8,
    /// ISO-8859-1, also used for US-ASCII input
    Latin1,
}

impl FromStr for PropertiesEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Self::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "ISO_8859_1" | "LATIN1" | "LATIN-1" | "US-ASCII"
            | "ASCII" => Ok(Self::Latin1),
            _ => Err(Error::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl PropertiesEncoding {
    /// Decode raw file bytes
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

/// Where the properties for `add-properties` come from
#[derive(Debug, Clone, Default)]
pub struct PropertySources {
    /// Optional `.properties` file
    pub file: Option<PathBuf>,
    /// Inline `key=value` entries; these win over the file on collisions
    pub inline: Vec<String>,
    /// Encoding of `file`
    pub encoding: PropertiesEncoding,
}

impl PropertySources {
    /// True when neither a file nor inline entries were supplied
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.inline.is_empty()
    }

    /// Load the file (if readable) and overlay the inline entries
    ///
    /// # Errors
    /// Returns an error for malformed inline entries, malformed `\uXXXX`
    /// escapes in the file, or property names that cannot become XML
    /// elements. An unreadable file is skipped with a warning.
    pub fn load<F: FileSystem>(&self, fs: &Arc<F>) -> Result<Properties> {
        let mut merged = match &self.file {
            Some(path) => read_properties_file(fs, path, self.encoding)?.unwrap_or_default(),
            None => Properties::new(),
        };

        merged.extend(parse_inline(&self.inline)?);

        if let Some(name) = merged.keys().find(|name| !is_valid_property_name(name)) {
            return Err(Error::InvalidPropertyName(name.clone()));
        }

        Ok(merged)
    }
}

/// Read a properties file, returning `None` (after a warning) when it cannot be read
///
/// # Errors
/// Returns an error when the file is readable but malformed.
pub fn read_properties_file<F: FileSystem>(
    fs: &Arc<F>,
    path: &Path,
    encoding: PropertiesEncoding,
) -> Result<Option<Properties>> {
    match fs.read(path) {
        Ok(bytes) => {
            let properties = parse_properties(&encoding.decode(&bytes))?;
            debug!(path = %path.display(), count = properties.len(), "Read properties file");
            Ok(Some(properties))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read properties file, skipping it");
            Ok(None)
        }
    }
}

/// Parse inline `key=value` entries
///
/// Each entry is split on its first `=`. A value wrapped in double quotes
/// loses one pair of them.
pub fn parse_inline(entries: &[String]) -> Result<Properties> {
    let mut properties = Properties::new();
    for entry in entries {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| Error::InvalidProperty(entry.clone()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidProperty(entry.clone()));
        }
        properties.insert(key.to_string(), strip_quotes(value).to_string());
    }
    Ok(properties)
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Whether `name` can be used as a property element name
pub fn is_valid_property_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        }
        _ => false,
    }
}

/// Parse text in `.properties` syntax
///
/// Supports `#`/`!` comments, `=`, `:` or whitespace separators, backslash
/// line continuations and the usual escapes including `\uXXXX`.
///
/// # Errors
/// Returns an error for a `\u` escape not followed by four hex digits.
pub fn parse_properties(text: &str) -> Result<Properties> {
    let mut properties = Properties::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let mut logical = line.trim_start_matches(WHITESPACE).to_string();
        if logical.is_empty() || logical.starts_with('#') || logical.starts_with('!') {
            continue;
        }

        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        properties.insert(unescape(key)?, unescape(value)?);
    }

    Ok(properties)
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(WHITESPACE);
    let value = match rest.strip_prefix(&['=', ':'][..]) {
        Some(after) => after.trim_start_matches(WHITESPACE),
        None => rest,
    };
    (&line[..key_end], value)
}

fn unescape(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_hex4(&mut chars)
                    .ok_or_else(|| Error::MalformedProperties(raw.to_string()))?;
                let mut units = vec![unit];
                if (0xD800..0xDC00).contains(&unit) {
                    let mut lookahead = chars.clone();
                    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
                        if let Some(low) = read_hex4(&mut lookahead) {
                            units.push(low);
                            chars = lookahead;
                        }
                    }
                }
                out.extend(
                    char::decode_utf16(units).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
                );
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Exactly four ASCII hex digits
fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u16> {
    let mut unit = 0u16;
    for _ in 0..4 {
        let digit = chars.next()?.to_digit(16)?;
        unit = unit * 16 + digit as u16;
    }
    Some(unit)
}
