//! Endpoint, parameter and request-body field edits.

use apidocs_util::split_list;

use crate::error::{EditError, NameKind};
use crate::model::{Endpoint, HttpMethod, Param, ParamLocation, RequestBody, SchemaKind, SchemaType};

#[derive(Debug, Clone, PartialEq)]
pub enum EndpointField {
    Method(HttpMethod),
    Path(String),
    Summary(String),
    /// Comma-separated tag list.
    Tags(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamField {
    Name(String),
    In(ParamLocation),
    /// Ignored when `false` for a path parameter.
    Required(bool),
    Description(String),
    /// Switches the parameter schema to this type. Scalar metadata is kept
    /// when both types are scalar.
    SchemaType(SchemaType),
    /// Raw text, coerced to the schema type when it is scalar; empty clears.
    Example(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBodyField {
    Description(String),
    Required(bool),
    ContentType(String),
}

pub fn update_endpoint(endpoint: &mut Endpoint, field: EndpointField) {
    match field {
        EndpointField::Method(method) => endpoint.method = method,
        EndpointField::Path(path) => endpoint.path = path,
        EndpointField::Summary(summary) => endpoint.summary = summary,
        EndpointField::Tags(raw) => endpoint.tags = split_list(&raw),
    }
}

/// # Errors
///
/// [`EditError::InvalidNumber`] for a non-numeric example on a numeric
/// parameter. The parameter is unchanged.
pub fn update_param(param: &mut Param, field: ParamField) -> Result<(), EditError> {
    match field {
        ParamField::Name(name) => param.name = name,
        ParamField::In(location) => param.set_location(location),
        ParamField::Required(required) => param.set_required(required),
        ParamField::Description(description) => param.description = description,
        ParamField::SchemaType(ty) => param.schema.set_type(ty),
        ParamField::Example(raw) => {
            param.example = match &param.schema.kind {
                SchemaKind::Scalar(ty, _) => ty.coerce(&raw)?,
                _ if raw.is_empty() => None,
                _ => Some(raw.into()),
            };
        }
    }
    Ok(())
}

/// # Errors
///
/// [`EditError::EmptyName`] for a blank content type.
pub fn update_request_body(
    body: &mut RequestBody,
    field: RequestBodyField,
) -> Result<(), EditError> {
    match field {
        RequestBodyField::Description(description) => body.description = description,
        RequestBodyField::Required(required) => body.required = required,
        RequestBodyField::ContentType(raw) => {
            let content_type = raw.trim();
            if content_type.is_empty() {
                return Err(EditError::EmptyName(NameKind::ContentType));
            }
            body.content_type = content_type.to_string();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_endpoint_tags() {
        let mut ep = Endpoint::new(1);
        update_endpoint(&mut ep, EndpointField::Tags(" orders, ,admin ".into()));
        assert_eq!(ep.tags, vec!["orders", "admin"]);
        update_endpoint(&mut ep, EndpointField::Method(HttpMethod::Delete));
        assert_eq!(ep.method, HttpMethod::Delete);
    }

    #[test]
    fn test_update_param_location_forces_required() {
        let mut param = Param::new(1);
        update_param(&mut param, ParamField::In(ParamLocation::Path)).unwrap();
        update_param(&mut param, ParamField::Required(false)).unwrap();
        assert!(param.required);
    }

    #[test]
    fn test_update_param_example_coerced() {
        let mut param = Param::new(1);
        update_param(&mut param, ParamField::SchemaType(SchemaType::Integer)).unwrap();
        update_param(&mut param, ParamField::Example("12".into())).unwrap();
        assert_eq!(param.example, Some(json!(12)));
        assert!(update_param(&mut param, ParamField::Example("x".into())).is_err());
        assert_eq!(param.example, Some(json!(12)));
        update_param(&mut param, ParamField::Example("".into())).unwrap();
        assert_eq!(param.example, None);
    }

    #[test]
    fn test_update_request_body_content_type() {
        let mut body = RequestBody::default();
        assert!(update_request_body(&mut body, RequestBodyField::ContentType(" ".into())).is_err());
        update_request_body(&mut body, RequestBodyField::ContentType("text/plain".into())).unwrap();
        assert_eq!(body.content_type, "text/plain");
    }
}
