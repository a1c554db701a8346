//! `{{variable}}` substitution for the HTML map pages.

use std::collections::HashMap;

use serde_json::Value;

use super::error::{MapError, MapResult};

/// An HTML page with `{{variable}}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct MapTemplate {
    pub name: &'static str,
    pub source: &'static str,
}

impl MapTemplate {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    /// Render the template in a single pass.
    ///
    /// Substituted values are copied verbatim and never rescanned, so a
    /// value containing `{{` is safe. Every placeholder must have a value.
    pub fn render(&self, variables: &HashMap<&str, String>) -> MapResult<String> {
        let mut output = String::with_capacity(self.source.len());
        let mut rest = self.source;

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| MapError::template(self.name, "unclosed placeholder"))?;

            let key = after_open[..end].trim();
            let value = variables
                .get(key)
                .ok_or_else(|| MapError::template(self.name, format!("no value for '{}'", key)))?;
            output.push_str(value);

            rest = &after_open[end + 2..];
        }

        output.push_str(rest);
        Ok(output)
    }
}

/// Serialize JSON for inlining inside a `<script>` element.
///
/// `</` is escaped so string values cannot close the script tag early.
pub fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Escape text for an HTML text node such as `<title>`.
pub fn html_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Quote a value for an ArcGIS `definitionExpression` inside a JS string.
pub fn sql_in_js(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\'', "''")
        .replace('<', "\\u003c")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GREETING: MapTemplate = MapTemplate::new("greeting", "<h1>{{ title }}</h1><p>{{body}}</p>");

    #[test]
    fn test_render_substitutes_all() {
        let vars = HashMap::from([("title", "Gauges".to_string()), ("body", "MI".to_string())]);
        assert_eq!(GREETING.render(&vars).unwrap(), "<h1>Gauges</h1><p>MI</p>");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let vars = HashMap::from([("title", "{{body}}".to_string()), ("body", "x".to_string())]);
        assert_eq!(GREETING.render(&vars).unwrap(), "<h1>{{body}}</h1><p>x</p>");
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let vars = HashMap::from([("title", "Gauges".to_string())]);
        let err = GREETING.render(&vars).unwrap_err();
        assert_eq!(err.to_string(), "Template 'greeting': no value for 'body'");
    }

    #[test]
    fn test_unclosed_placeholder() {
        let broken = MapTemplate::new("broken", "a {{b");
        assert!(broken.render(&HashMap::new()).is_err());
    }

    #[test]
    fn test_script_json_escapes_closing_tags() {
        let value = json!({ "name": "</script><b>" });
        assert_eq!(script_json(&value), r#"{"name":"<\/script><b>"}"#);
    }

    #[test]
    fn test_sql_in_js() {
        assert_eq!(sql_in_js("Hawai'i"), "Hawai''i");
        assert_eq!(html_text("A & B <c>"), "A &amp; B &lt;c&gt;");
    }

    #[test]
    fn test_sql_in_js_escapes_line_breaks() {
        assert_eq!(sql_in_js("New\nYork\r"), "New\\nYork\\r");
        assert_eq!(
            sql_in_js("a\u{2028}b\u{2029}c"),
            "a\\u2028b\\u2029c"
        );
        assert!(!sql_in_js("x\ny").contains('\n'));
    }
}
