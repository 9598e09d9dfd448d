//! Converters available to every content type.

use serde_json::Value;

use super::Converter;
use crate::grid::{format_width, parse_width};

/// Column widths: stored as `"<n>%"`, written to the DOM the same way.
#[derive(Debug, Default)]
pub struct WidthConverter;

impl Converter for WidthConverter {
    fn from_dom(&self, value: &str) -> Value {
        parse_width(value).map_or(Value::Null, |w| Value::from(format_width(w)))
    }

    fn to_dom(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => n.as_f64().map(format_width).unwrap_or_default(),
            Value::String(s) => parse_width(s).map(format_width).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Hex colours, normalized to lowercase six-digit form.
#[derive(Debug, Default)]
pub struct ColorConverter;

impl ColorConverter {
    fn normalize(value: &str) -> Option<String> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        Some(format!("#{}", expanded.to_ascii_lowercase()))
    }
}

impl Converter for ColorConverter {
    fn from_dom(&self, value: &str) -> Value {
        Self::normalize(value).map_or(Value::from(""), Value::from)
    }

    fn to_dom(&self, value: &Value) -> String {
        value
            .as_str()
            .and_then(Self::normalize)
            .unwrap_or_default()
    }
}

/// Flags stored as booleans, written as `"true"`/`"false"`.
#[derive(Debug, Default)]
pub struct BooleanConverter;

impl Converter for BooleanConverter {
    fn from_dom(&self, value: &str) -> Value {
        let value = value.trim();
        Value::from(value.eq_ignore_ascii_case("true") || value == "1")
    }

    fn to_dom(&self, value: &Value) -> String {
        let flag = match value {
            Value::Bool(b) => *b,
            Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
            Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
            _ => false,
        };
        flag.to_string()
    }
}

/// Whole numbers; anything unparsable reads as zero.
#[derive(Debug, Default)]
pub struct IntegerConverter;

impl Converter for IntegerConverter {
    fn from_dom(&self, value: &str) -> Value {
        Value::from(value.trim().parse::<i64>().unwrap_or(0))
    }

    fn to_dom(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => n.as_i64().unwrap_or(0).to_string(),
            Value::String(s) => s.trim().parse::<i64>().unwrap_or(0).to_string(),
            _ => "0".to_string(),
        }
    }
}

/// Text content: HTML special characters are escaped on the way out.
#[derive(Debug, Default)]
pub struct HtmlEntitiesConverter;

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

impl Converter for HtmlEntitiesConverter {
    fn from_dom(&self, value: &str) -> Value {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(pos) = rest.find('&') {
            out.push_str(rest.get(..pos).unwrap_or_default());
            let tail = rest.get(pos..).unwrap_or_default();
            match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
                Some((entity, c)) => {
                    out.push(*c);
                    rest = tail.get(entity.len()..).unwrap_or_default();
                }
                None => {
                    out.push('&');
                    rest = tail.get(1..).unwrap_or_default();
                }
            }
        }
        out.push_str(rest);
        Value::from(out)
    }

    fn to_dom(&self, value: &Value) -> String {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match ENTITIES.iter().find(|(_, ch)| *ch == c) {
                Some((entity, _)) => out.push_str(entity),
                None => out.push(c),
            }
        }
        out
    }
}
