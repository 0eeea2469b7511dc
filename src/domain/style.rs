//! Draw.io style strings: ordered `key=value` pairs joined by `;`.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

/// Marker for attributes left to the renderer's default.
pub const DEFAULT_VALUE: &str = "default";

/// Ordered set of style attributes. Setting an existing key keeps its
/// position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStyle {
    attrs: Vec<(String, String)>,
}

impl NodeStyle {
    /// Base style shared by every mind map node.
    pub fn base() -> Self {
        let mut style = Self::default();
        style
            .set("rounded", "1")
            .set("whiteSpace", "wrap")
            .set("html", "1")
            .set("fillColor", DEFAULT_VALUE)
            .set("strokeColor", DEFAULT_VALUE);
        style
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_fill_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.set("fillColor", color)
    }

    pub fn set_bold(&mut self) -> &mut Self {
        self.set("fontStyle", "1")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for NodeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .attrs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .join(";");
        f.write_str(&joined)
    }
}

impl FromStr for NodeStyle {
    type Err = std::convert::Infallible;

    /// Lenient parse: empty segments are skipped, a segment without `=`
    /// becomes a key with an empty value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut style = Self::default();
        for segment in s.split(';').filter(|seg| !seg.is_empty()) {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            style.set(key, value);
        }
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_base_style_when_rendered_then_fixed_order() {
        assert_eq!(
            NodeStyle::base().to_string(),
            "rounded=1;whiteSpace=wrap;html=1;fillColor=default;strokeColor=default"
        );
    }

    #[test]
    fn given_bold_style_when_rendered_then_font_style_last() {
        let mut style = NodeStyle::base();
        style.set_bold();
        assert!(style.to_string().ends_with(";fontStyle=1"));
    }

    #[test]
    fn given_overwritten_key_when_rendered_then_position_kept() {
        let mut style = NodeStyle::base();
        style.set_fill_color("#3cb44b");
        assert_eq!(
            style.to_string(),
            "rounded=1;whiteSpace=wrap;html=1;fillColor=#3cb44b;strokeColor=default"
        );
    }

    #[test]
    fn given_emitted_style_when_parsed_then_same_attributes_same_order() {
        let mut style = NodeStyle::base();
        style.set_fill_color("#f02355").set_bold();

        let parsed: NodeStyle = style.to_string().parse().unwrap();

        assert_eq!(parsed, style);
        let keys: Vec<_> = parsed.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["rounded", "whiteSpace", "html", "fillColor", "strokeColor", "fontStyle"]
        );
    }
}
