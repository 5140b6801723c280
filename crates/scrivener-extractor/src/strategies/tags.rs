//! Parameters, responses and response fields from handler tags
//!
//! ```text
//! @urlParam id integer required The ID of the post. Example: 12
//! @queryParam page integer Page to fetch. Example: 2
//! @bodyParam tags string[] Tags to attach.
//! @header X-Api-Version 2
//! @response 404 scenario="post missing" {"message": "Not found"}
//! @responseField id integer required The post ID.
//! ```

use crate::config::RouteRules;
use crate::context::EndpointContext;
use crate::error::StrategyError;
use crate::parser::Tag;
use crate::strategy::Strategy;
use scrivener_domain::{
    ParameterDescriptor, ParameterLocation, ResponseContent, ResponseDescriptor, ResponseField,
};
use serde_json::Value;
use tracing::debug;

const KNOWN_TYPES: [&str; 10] = [
    "string", "integer", "int", "number", "float", "boolean", "bool", "object", "array", "file",
];

/// Parameters of one location from `@urlParam`, `@queryParam`, `@header`
/// or `@bodyParam` tags
#[derive(Debug, Clone, Copy)]
pub struct TagParameters {
    location: ParameterLocation,
}

impl TagParameters {
    /// Strategy for one parameter location
    pub fn new(location: ParameterLocation) -> Self {
        Self { location }
    }

    fn tag_name(&self) -> &'static str {
        match self.location {
            ParameterLocation::Url => "urlParam",
            ParameterLocation::Query => "queryParam",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "bodyParam",
        }
    }
}

impl Strategy for TagParameters {
    type Output = Vec<ParameterDescriptor>;

    fn invoke(
        &self,
        endpoint: &EndpointContext<'_>,
        _rules: &RouteRules,
    ) -> Result<Option<Self::Output>, StrategyError> {
        let tags: Vec<&Tag> = endpoint.handler_doc().tags_named(self.tag_name()).collect();
        if tags.is_empty() {
            return Ok(None);
        }

        let parameters = tags
            .into_iter()
            .filter_map(|tag| {
                let parsed = match self.location {
                    ParameterLocation::Header => parse_header_tag(tag),
                    location => parse_parameter_tag(location, tag),
                };
                if parsed.is_none() {
                    debug!("Skipping @{} without a name", tag.name());
                }
                parsed
            })
            .collect();
        Ok(Some(parameters))
    }
}

/// Responses from `@response` tags
#[derive(Debug, Clone, Copy, Default)]
pub struct TagResponses;

impl Strategy for TagResponses {
    type Output = Vec<ResponseDescriptor>;

    fn invoke(
        &self,
        endpoint: &EndpointContext<'_>,
        _rules: &RouteRules,
    ) -> Result<Option<Self::Output>, StrategyError> {
        let responses: Vec<_> = endpoint
            .handler_doc()
            .tags_named("response")
            .map(parse_response_tag)
            .collect();
        Ok((!responses.is_empty()).then_some(responses))
    }
}

/// Response fields from `@responseField` tags
#[derive(Debug, Clone, Copy, Default)]
pub struct TagResponseFields;

impl Strategy for TagResponseFields {
    type Output = Vec<ResponseField>;

    fn invoke(
        &self,
        endpoint: &EndpointContext<'_>,
        _rules: &RouteRules,
    ) -> Result<Option<Self::Output>, StrategyError> {
        let tags: Vec<&Tag> = endpoint.handler_doc().tags_named("responseField").collect();
        if tags.is_empty() {
            return Ok(None);
        }
        Ok(Some(tags.into_iter().filter_map(parse_response_field_tag).collect()))
    }
}

/// `<name> [<type>] [required|optional] [<description>] [Example: <value>]`
fn parse_parameter_tag(location: ParameterLocation, tag: &Tag) -> Option<ParameterDescriptor> {
    let content = tag.content();
    let (name, rest) = split_first_word(&content)?;

    let (kind, rest) = split_type(rest);
    let (required, rest) = match split_first_word(rest) {
        Some(("required", rest)) => (true, rest),
        Some(("optional", rest)) => (false, rest),
        _ => (location == ParameterLocation::Url, rest),
    };
    let (description, example) = split_example(rest);

    let mut parameter = ParameterDescriptor::new(name)
        .with_type(kind)
        .with_description(description)
        .required(required);
    parameter.example = example.map(|raw| cast_example(kind, raw));
    Some(parameter)
}

/// `<Name> [<example value>]`
fn parse_header_tag(tag: &Tag) -> Option<ParameterDescriptor> {
    let content = tag.content();
    let (name, value) = split_first_word(&content)?;

    let header = ParameterDescriptor::new(name);
    Some(if value.is_empty() {
        header
    } else {
        header.with_example(value)
    })
}

/// `[<status>] [scenario="<description>"] <content>`
fn parse_response_tag(tag: &Tag) -> ResponseDescriptor {
    let content = tag.content();

    let (status, rest) = match split_first_word(&content) {
        Some((word, rest)) => match parse_status(word) {
            Some(status) => (status, rest),
            None => (200, content.as_str()),
        },
        None => (200, ""),
    };

    let (scenario, body) = split_scenario(rest);
    let response = ResponseDescriptor::new(status, ResponseContent::parse(body));
    match scenario {
        Some(scenario) => response.with_description(scenario),
        None => response,
    }
}

/// `<name> [<type>] [required] [<description>]`
fn parse_response_field_tag(tag: &Tag) -> Option<ResponseField> {
    let content = tag.content();
    let (name, rest) = split_first_word(&content)?;

    let (kind, rest) = split_type(rest);
    let (required, rest) = match split_first_word(rest) {
        Some(("required", rest)) => (true, rest),
        _ => (false, rest),
    };

    Some(
        ResponseField::new(name)
            .with_type(kind)
            .with_description(rest.trim())
            .required(required),
    )
}

fn split_first_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(end) => Some((&text[..end], text[end..].trim_start())),
        None => Some((text, "")),
    }
}

fn split_type(text: &str) -> (&str, &str) {
    match split_first_word(text) {
        Some((word, rest)) if is_type(word) => (word, rest),
        _ => ("string", text),
    }
}

fn is_type(word: &str) -> bool {
    word.ends_with("[]") || KNOWN_TYPES.contains(&word)
}

fn split_example(text: &str) -> (&str, Option<&str>) {
    match text.rfind("Example:") {
        Some(index) => {
            let example = text[index + "Example:".len()..].trim();
            let description = text[..index].trim();
            (description, (!example.is_empty()).then_some(example))
        }
        None => (text.trim(), None),
    }
}

fn split_scenario(text: &str) -> (Option<&str>, &str) {
    let Some(rest) = text.strip_prefix("scenario=\"") else {
        return (None, text);
    };
    match rest.find('"') {
        Some(end) => (Some(&rest[..end]), rest[end + 1..].trim_start()),
        None => (None, text),
    }
}

fn parse_status(word: &str) -> Option<u16> {
    if word.len() != 3 || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse().ok().filter(|status| (100..600).contains(status))
}

/// Cast an example to the declared type, keeping the text when it does not fit
fn cast_example(kind: &str, raw: &str) -> Value {
    let cast = match kind {
        "integer" | "int" => raw.parse::<i64>().ok().map(Value::from),
        "number" | "float" => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        "boolean" | "bool" => match raw {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        "object" | "array" => serde_json::from_str(raw).ok(),
        _ if kind.ends_with("[]") => serde_json::from_str(raw).ok(),
        _ => None,
    };
    cast.unwrap_or_else(|| Value::String(raw.to_string()))
}
