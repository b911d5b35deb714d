//! `{{ placeholder }}` substitution for notification templates.

use std::collections::HashMap;

/// Replaces `{{name}}` / `{{ name }}` placeholders with values from `variables`.
///
/// Placeholders without a value, and unterminated `{{`, are left verbatim.
pub fn render(template: &str, variables: &HashMap<String, String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            output.push_str(&rest[start..]);
            return output;
        };

        let name = after_open[..end].trim();
        match variables.get(name) {
            Some(value) => output.push_str(value),
            None => output.push_str(&rest[start..start + 2 + end + 2]),
        }

        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    output
}
