//! Context keys.
//!
//! A context key names the subtree a path is relative to: a parameter schema,
//! the request-body schema or example, or a response content schema or named
//! example. Its string form is a kind tag followed by `|`-separated,
//! percent-escaped parts, so it can travel through the same string-only
//! channels as an encoded path:
//!
//! ```text
//! param|3|1
//! response-example|3|201|application%2Fjson|ok
//! ```

use std::fmt;
use std::str::FromStr;

use apidocs_path::{escape_step, unescape_step};

use crate::error::EditError;
use crate::model::{EndpointId, ParamId};

const SEPARATOR: char = '|';

const TAG_PARAM: &str = "param";
const TAG_REQUEST_SCHEMA: &str = "request-schema";
const TAG_REQUEST_EXAMPLE: &str = "request-example";
const TAG_RESPONSE_SCHEMA: &str = "response-schema";
const TAG_RESPONSE_EXAMPLE: &str = "response-example";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextKey {
    ParamSchema {
        endpoint: EndpointId,
        param: ParamId,
    },
    RequestSchema {
        endpoint: EndpointId,
    },
    RequestExample {
        endpoint: EndpointId,
    },
    ResponseSchema {
        endpoint: EndpointId,
        code: String,
        content_type: String,
    },
    ResponseExample {
        endpoint: EndpointId,
        code: String,
        content_type: String,
        example: String,
    },
}

impl ContextKey {
    pub fn param(endpoint: EndpointId, param: ParamId) -> Self {
        ContextKey::ParamSchema { endpoint, param }
    }

    pub fn request_schema(endpoint: EndpointId) -> Self {
        ContextKey::RequestSchema { endpoint }
    }

    pub fn request_example(endpoint: EndpointId) -> Self {
        ContextKey::RequestExample { endpoint }
    }

    pub fn response_schema(endpoint: EndpointId, code: &str, content_type: &str) -> Self {
        ContextKey::ResponseSchema {
            endpoint,
            code: code.to_string(),
            content_type: content_type.to_string(),
        }
    }

    pub fn response_example(
        endpoint: EndpointId,
        code: &str,
        content_type: &str,
        example: &str,
    ) -> Self {
        ContextKey::ResponseExample {
            endpoint,
            code: code.to_string(),
            content_type: content_type.to_string(),
            example: example.to_string(),
        }
    }

    pub fn endpoint_id(&self) -> EndpointId {
        match self {
            ContextKey::ParamSchema { endpoint, .. }
            | ContextKey::RequestSchema { endpoint }
            | ContextKey::RequestExample { endpoint }
            | ContextKey::ResponseSchema { endpoint, .. }
            | ContextKey::ResponseExample { endpoint, .. } => *endpoint,
        }
    }

    /// Whether the key addresses an example tree rather than a schema tree.
    pub fn is_example(&self) -> bool {
        matches!(
            self,
            ContextKey::RequestExample { .. } | ContextKey::ResponseExample { .. }
        )
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ContextKey::ParamSchema { .. } => TAG_PARAM,
            ContextKey::RequestSchema { .. } => TAG_REQUEST_SCHEMA,
            ContextKey::RequestExample { .. } => TAG_REQUEST_EXAMPLE,
            ContextKey::ResponseSchema { .. } => TAG_RESPONSE_SCHEMA,
            ContextKey::ResponseExample { .. } => TAG_RESPONSE_EXAMPLE,
        }
    }

    pub fn encode(&self) -> String {
        let mut out = String::from(self.tag());
        let mut push = |part: &str| {
            out.push(SEPARATOR);
            out.push_str(&escape_step(part));
        };
        match self {
            ContextKey::ParamSchema { endpoint, param } => {
                push(&endpoint.to_string());
                push(&param.to_string());
            }
            ContextKey::RequestSchema { endpoint } | ContextKey::RequestExample { endpoint } => {
                push(&endpoint.to_string());
            }
            ContextKey::ResponseSchema {
                endpoint,
                code,
                content_type,
            } => {
                push(&endpoint.to_string());
                push(code);
                push(content_type);
            }
            ContextKey::ResponseExample {
                endpoint,
                code,
                content_type,
                example,
            } => {
                push(&endpoint.to_string());
                push(code);
                push(content_type);
                push(example);
            }
        }
        out
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for ContextKey {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditError::InvalidContextKey(s.to_string());
        let mut raw = s.split(SEPARATOR);
        let tag = raw.next().ok_or_else(invalid)?;
        let parts = raw
            .map(unescape_step)
            .collect::<Result<Vec<String>, _>>()
            .map_err(|_| invalid())?;
        let id = |i: usize| -> Result<u64, EditError> {
            parts
                .get(i)
                .and_then(|p| p.parse::<u64>().ok())
                .ok_or_else(invalid)
        };
        let expect_len = |n: usize| -> Result<(), EditError> {
            if parts.len() == n {
                Ok(())
            } else {
                Err(invalid())
            }
        };
        match tag {
            TAG_PARAM => {
                expect_len(2)?;
                Ok(ContextKey::ParamSchema {
                    endpoint: id(0)?,
                    param: id(1)?,
                })
            }
            TAG_REQUEST_SCHEMA => {
                expect_len(1)?;
                Ok(ContextKey::RequestSchema { endpoint: id(0)? })
            }
            TAG_REQUEST_EXAMPLE => {
                expect_len(1)?;
                Ok(ContextKey::RequestExample { endpoint: id(0)? })
            }
            TAG_RESPONSE_SCHEMA => {
                expect_len(3)?;
                Ok(ContextKey::ResponseSchema {
                    endpoint: id(0)?,
                    code: parts[1].clone(),
                    content_type: parts[2].clone(),
                })
            }
            TAG_RESPONSE_EXAMPLE => {
                expect_len(4)?;
                Ok(ContextKey::ResponseExample {
                    endpoint: id(0)?,
                    code: parts[1].clone(),
                    content_type: parts[2].clone(),
                    example: parts[3].clone(),
                })
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_escapes_parts() {
        let key = ContextKey::response_example(3, "201", "application/json", "a|b");
        assert_eq!(key.encode(), "response-example|3|201|application%2Fjson|a%7Cb");
    }

    #[test]
    fn test_roundtrip_all_kinds() {
        let keys = [
            ContextKey::param(1, 2),
            ContextKey::request_schema(4),
            ContextKey::request_example(4),
            ContextKey::response_schema(5, "404", "text/plain; charset=utf-8"),
            ContextKey::response_example(5, "200", "application/json", "성공"),
        ];
        for key in keys {
            assert_eq!(key.encode().parse::<ContextKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in [
            "",
            "param",
            "param|1",
            "param|x|1",
            "request-schema|1|2",
            "response-schema|1|200",
            "unknown|1",
            "request-example|%FF",
        ] {
            assert!(
                matches!(bad.parse::<ContextKey>(), Err(EditError::InvalidContextKey(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_endpoint_id_and_kind() {
        let key = ContextKey::response_example(9, "200", "application/json", "ok");
        assert_eq!(key.endpoint_id(), 9);
        assert!(key.is_example());
        assert!(!ContextKey::param(9, 1).is_example());
    }
}
