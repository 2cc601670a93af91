//! Identifier formats built on the extension point
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaError;
use crate::schema::{NarrowWith, Schema};
use crate::value::{quote, Value};
use std::fmt;
use url::Url;

/// Options for [`uri_with`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriOptions {
    /// Required scheme including the trailing colon, e.g. `"did:"`
    pub protocol: Option<String>,
}

impl UriOptions {
    pub fn protocol(protocol: impl Into<String>) -> Self {
        Self {
            protocol: Some(protocol.into()),
        }
    }
}

struct Uri;

impl NarrowWith for Uri {
    type Settings = UriOptions;

    fn narrow_with(&self, input: &Value, options: &UriOptions) -> Result<Value, SchemaError> {
        let Value::String(text) = input else {
            return Err(SchemaError::new(format!(
                "Expected URI but got {}",
                input.kind_name()
            )));
        };

        let url = Url::parse(text).map_err(|_| SchemaError::constraint("Invalid URI"))?;

        if let Some(protocol) = &options.protocol {
            if url.scheme() != protocol.trim_end_matches(':') {
                return Err(SchemaError::constraint(format!(
                    "Expected {} URI instead got {}",
                    protocol,
                    url.as_str()
                )));
            }
        }

        Ok(Value::String(url.into()))
    }

    fn describe(&self, options: &UriOptions, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &options.protocol {
            Some(protocol) => write!(f, "uri({{ protocol: {} }})", quote(protocol)),
            None => f.write_str("uri()"),
        }
    }
}

/// Absolute URI, read into its normalized form
pub fn uri() -> Schema {
    uri_with(UriOptions::default())
}

/// Absolute URI, optionally restricted to one protocol
pub fn uri_with(options: UriOptions) -> Schema {
    Schema::custom_with(Uri, options)
}

struct Did;

impl NarrowWith for Did {
    type Settings = Option<String>;

    fn narrow_with(&self, input: &Value, method: &Option<String>) -> Result<Value, SchemaError> {
        let Value::String(text) = input else {
            return Err(SchemaError::type_mismatch("string", input));
        };

        let prefix = match method {
            Some(method) => format!("did:{}:", method),
            None => "did:".to_string(),
        };
        if text.starts_with(&prefix) {
            Ok(input.clone())
        } else {
            Err(SchemaError::constraint(format!(
                "Expected a {} but got \"{}\" instead",
                prefix, text
            )))
        }
    }

    fn describe(&self, method: &Option<String>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match method {
            Some(method) => write!(f, "did({{ method: {} }})", quote(method)),
            None => f.write_str("did()"),
        }
    }
}

/// Decentralized identifier of any method
pub fn did() -> Schema {
    Schema::custom_with(Did, None)
}

/// Decentralized identifier of the given method, e.g. `did_method("key")`
pub fn did_method(method: impl Into<String>) -> Schema {
    Schema::custom_with(Did, Some(method.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_normalizes() {
        let schema = uri();
        assert_eq!(
            schema.read(&Value::from("HTTPS://Example.com")).unwrap(),
            Value::from("https://example.com/")
        );
        assert_eq!(schema.to_string(), "uri()");
    }

    #[test]
    fn test_uri_rejections() {
        let schema = uri();
        assert_eq!(
            schema.read(&Value::from(5)).unwrap_err().message(),
            "Expected URI but got number"
        );
        assert_eq!(
            schema.read(&Value::from("not a uri")).unwrap_err().message(),
            "Invalid URI"
        );
    }

    #[test]
    fn test_uri_protocol() {
        let schema = uri_with(UriOptions::protocol("mailto:"));
        assert!(schema.is(&Value::from("mailto:alice@example.com")));
        assert_eq!(
            schema
                .read(&Value::from("https://example.com/"))
                .unwrap_err()
                .message(),
            "Expected mailto: URI instead got https://example.com/"
        );
        assert_eq!(schema.to_string(), "uri({ protocol: \"mailto:\" })");
    }

    #[test]
    fn test_did_methods() {
        assert!(did().is(&Value::from("did:web:example.com")));
        assert!(did_method("key").is(&Value::from("did:key:z6Mkk")));

        let err = did_method("key")
            .read(&Value::from("did:web:example.com"))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Expected a did:key: but got \"did:web:example.com\" instead"
        );
        assert_eq!(did_method("key").to_string(), "did({ method: \"key\" })");
    }

    #[test]
    fn test_formats_compose() {
        let audience = did().or(uri_with(UriOptions::protocol("https:")));
        assert!(audience.is(&Value::from("https://service.example/")));
        assert!(!audience.is(&Value::from("ftp://files.example/")));
    }
}
