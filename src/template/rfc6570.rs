//! RFC 6570 URI template expansion (levels 1-4).

use super::{TemplateError, UriTemplateExpander, Variables};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

/// Everything but `ALPHA / DIGIT / "-" / "." / "_" / "~"` is encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Unreserved plus the RFC 3986 reserved set pass through.
const RESERVED: &AsciiSet = &UNRESERVED
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// Default [`UriTemplateExpander`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rfc6570Expander;

impl UriTemplateExpander for Rfc6570Expander {
    fn expand(&self, template: &str, variables: &Variables) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        let mut offset = 0;

        while let Some(start) = rest.find('{') {
            out.push_str(&encode(&rest[..start], true));

            let expression = &rest[start + 1..];
            let end = expression
                .find('}')
                .ok_or(TemplateError::Unterminated(offset + start))?;
            expand_expression(&expression[..end], variables, &mut out)?;

            let consumed = start + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }

        out.push_str(&encode(rest, true));
        Ok(out)
    }
}

/// Expansion behaviour of an expression operator (RFC 6570, Appendix A).
#[derive(Clone, Copy, Debug)]
struct Operator {
    first: &'static str,
    sep: &'static str,
    named: bool,
    if_empty: &'static str,
    allow_reserved: bool,
}

impl Operator {
    const SIMPLE: Operator = Operator::new("", ",", false, "", false);

    const fn new(
        first: &'static str,
        sep: &'static str,
        named: bool,
        if_empty: &'static str,
        allow_reserved: bool,
    ) -> Self {
        Operator {
            first,
            sep,
            named,
            if_empty,
            allow_reserved,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::new("", ",", false, "", true)),
            '#' => Some(Operator::new("#", ",", false, "", true)),
            '.' => Some(Operator::new(".", ".", false, "", false)),
            '/' => Some(Operator::new("/", "/", false, "", false)),
            ';' => Some(Operator::new(";", ";", true, "", false)),
            '?' => Some(Operator::new("?", "&", true, "=", false)),
            '&' => Some(Operator::new("&", "&", true, "=", false)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Modifier {
    None,
    Prefix(usize),
    Explode,
}

/// A variable value after dropping undefined members.
enum Defined {
    Scalar(String),
    List(Vec<String>),
    Assoc(Vec<(String, String)>),
}

fn expand_expression(
    expression: &str,
    variables: &Variables,
    out: &mut String,
) -> Result<(), TemplateError> {
    let mut chars = expression.chars();
    let (operator, varlist) = match chars.next() {
        Some(c) if matches!(c, '=' | ',' | '!' | '@' | '|') => {
            return Err(TemplateError::UnsupportedOperator(c))
        }
        Some(c) => match Operator::from_char(c) {
            Some(operator) => (operator, chars.as_str()),
            None => (Operator::SIMPLE, expression),
        },
        None => return Err(TemplateError::InvalidExpression(expression.to_string())),
    };

    let mut first = true;
    for varspec in varlist.split(',') {
        let (name, modifier) = parse_varspec(varspec)
            .ok_or_else(|| TemplateError::InvalidExpression(expression.to_string()))?;

        let Some(value) = defined(variables.get(name)) else {
            continue;
        };

        out.push_str(if first { operator.first } else { operator.sep });
        first = false;

        expand_value(name, value, modifier, operator, out)?;
    }

    Ok(())
}

fn parse_varspec(varspec: &str) -> Option<(&str, Modifier)> {
    let (name, modifier) = if let Some(name) = varspec.strip_suffix('*') {
        (name, Modifier::Explode)
    } else if let Some((name, length)) = varspec.split_once(':') {
        let length: usize = length.parse().ok()?;
        if !(1..10000).contains(&length) {
            return None;
        }
        (name, Modifier::Prefix(length))
    } else {
        (varspec, Modifier::None)
    };

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '%'));
    valid.then_some((name, modifier))
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn defined(value: Option<&Value>) -> Option<Defined> {
    match value? {
        Value::Null => None,
        Value::Array(items) => {
            let items: Vec<String> = items.iter().filter_map(scalar).collect();
            (!items.is_empty()).then_some(Defined::List(items))
        }
        Value::Object(map) => {
            let pairs: Vec<(String, String)> = map
                .iter()
                .filter_map(|(k, v)| scalar(v).map(|v| (k.clone(), v)))
                .collect();
            (!pairs.is_empty()).then_some(Defined::Assoc(pairs))
        }
        other => scalar(other).map(Defined::Scalar),
    }
}

fn expand_value(
    name: &str,
    value: Defined,
    modifier: Modifier,
    operator: Operator,
    out: &mut String,
) -> Result<(), TemplateError> {
    let reserved = operator.allow_reserved;

    match (value, modifier) {
        (Defined::Scalar(s), modifier) => {
            let s = match modifier {
                Modifier::Prefix(length) => s.chars().take(length).collect(),
                _ => s,
            };
            if operator.named {
                out.push_str(name);
                out.push_str(if s.is_empty() { operator.if_empty } else { "=" });
            }
            out.push_str(&encode(&s, reserved));
        }
        (Defined::List(_) | Defined::Assoc(_), Modifier::Prefix(_)) => {
            return Err(TemplateError::PrefixOnComposite(name.to_string()));
        }
        (Defined::List(items), Modifier::Explode) => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| {
                    if operator.named {
                        named_pair(name, item, operator)
                    } else {
                        encode(item, reserved)
                    }
                })
                .collect();
            out.push_str(&parts.join(operator.sep));
        }
        (Defined::Assoc(pairs), Modifier::Explode) => {
            let parts: Vec<String> = pairs
                .iter()
                .map(|(k, v)| {
                    if operator.named {
                        named_pair(k, v, operator)
                    } else {
                        format!("{}={}", encode(k, reserved), encode(v, reserved))
                    }
                })
                .collect();
            out.push_str(&parts.join(operator.sep));
        }
        (Defined::List(items), Modifier::None) => {
            if operator.named {
                out.push_str(name);
                out.push('=');
            }
            let parts: Vec<String> = items.iter().map(|item| encode(item, reserved)).collect();
            out.push_str(&parts.join(","));
        }
        (Defined::Assoc(pairs), Modifier::None) => {
            if operator.named {
                out.push_str(name);
                out.push('=');
            }
            let parts: Vec<String> = pairs
                .iter()
                .flat_map(|(k, v)| [encode(k, reserved), encode(v, reserved)])
                .collect();
            out.push_str(&parts.join(","));
        }
    }

    Ok(())
}

fn named_pair(name: &str, value: &str, operator: Operator) -> String {
    let name = encode(name, operator.allow_reserved);
    if value.is_empty() {
        format!("{}{}", name, operator.if_empty)
    } else {
        format!("{}={}", name, encode(value, operator.allow_reserved))
    }
}

/// Percent-encode a value. In reserved mode existing `%XX` triplets are kept.
fn encode(value: &str, allow_reserved: bool) -> String {
    if !allow_reserved {
        return utf8_percent_encode(value, UNRESERVED).to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(idx) = rest.find('%') {
        out.extend(utf8_percent_encode(&rest[..idx], RESERVED));
        let tail = rest[idx..].as_bytes();
        if tail.len() >= 3 && tail[1].is_ascii_hexdigit() && tail[2].is_ascii_hexdigit() {
            out.push_str(&rest[idx..idx + 3]);
            rest = &rest[idx + 3..];
        } else {
            out.push_str("%25");
            rest = &rest[idx + 1..];
        }
    }
    out.extend(utf8_percent_encode(rest, RESERVED));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars() -> Variables {
        json!({
            "var": "value",
            "hello": "Hello World!",
            "path": "/foo/bar",
            "empty": "",
            "x": 1024,
            "y": 768,
            "list": ["red", "green", "blue"],
            "keys": {"semi": ";", "dot": ".", "comma": ","},
            "nothing": null,
            "empty_list": [],
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn expand(template: &str) -> String {
        Rfc6570Expander.expand(template, &vars()).unwrap()
    }

    #[test]
    fn test_simple_expansion() {
        assert_eq!(expand("{var}"), "value");
        assert_eq!(expand("{hello}"), "Hello%20World%21");
        assert_eq!(expand("{x,y}"), "1024,768");
        assert_eq!(expand("{var:3}"), "val");
    }

    #[test]
    fn test_reserved_and_fragment() {
        assert_eq!(expand("{+path}/here"), "/foo/bar/here");
        assert_eq!(expand("{+hello}"), "Hello%20World!");
        assert_eq!(expand("{#x,hello}"), "#1024,Hello%20World!");
    }

    #[test]
    fn test_label_and_path_segments() {
        assert_eq!(expand("{.list}"), ".red,green,blue");
        assert_eq!(expand("{/list*}"), "/red/green/blue");
        assert_eq!(expand("{/var,x}/here"), "/value/1024/here");
    }

    #[test]
    fn test_path_parameters() {
        assert_eq!(expand("{;x,y,empty}"), ";x=1024;y=768;empty");
        assert_eq!(expand("{;list*}"), ";list=red;list=green;list=blue");
    }

    #[test]
    fn test_query_forms() {
        assert_eq!(expand("{?x,y,empty}"), "?x=1024&y=768&empty=");
        assert_eq!(expand("?fixed=yes{&x}"), "?fixed=yes&x=1024");
        assert_eq!(expand("{?list}"), "?list=red,green,blue");
        assert_eq!(expand("{?keys*}"), "?semi=%3B&dot=.&comma=%2C");
    }

    #[test]
    fn test_assoc_without_explode() {
        assert_eq!(expand("{keys}"), "semi,%3B,dot,.,comma,%2C");
    }

    #[test]
    fn test_undefined_variables_are_skipped() {
        assert_eq!(expand("/documents{?missing,nothing,empty_list}"), "/documents");
        assert_eq!(expand("/documents{?page,x}"), "/documents?x=1024");
    }

    #[test]
    fn test_unterminated_expression() {
        let err = Rfc6570Expander.expand("/a{var", &vars()).unwrap_err();
        assert_eq!(err, TemplateError::Unterminated(2));
    }

    #[test]
    fn test_reserved_operator_rejected() {
        let err = Rfc6570Expander.expand("{|var}", &vars()).unwrap_err();
        assert_eq!(err, TemplateError::UnsupportedOperator('|'));
    }

    #[test]
    fn test_prefix_on_list_rejected() {
        let err = Rfc6570Expander.expand("{list:2}", &vars()).unwrap_err();
        assert_eq!(err, TemplateError::PrefixOnComposite("list".to_string()));
    }

    #[test]
    fn test_literal_percent_triplets_preserved() {
        assert_eq!(expand("/a%20b/{var}"), "/a%20b/value");
    }
}
