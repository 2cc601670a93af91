//! Fixture-driven schema tests
//!
//! Every YAML file under `tests/fixtures/` lists suites of cases for a named
//! schema. Each case is checked through `read`, `from` and `is`, and each
//! suite checks the schema's rendering.

use pretty_assertions::assert_eq;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use warrant_schema::{
    array, boolean, dictionary, did_method, enumeration, fields, float, integer, literal, never,
    number, result, string, structure, tuple, unknown, uri_with, Schema, UriOptions, Value,
};

#[derive(Debug, Deserialize)]
struct Suite {
    schema: String,
    rendered: Option<String>,
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    /// Missing means `undefined`
    #[serde(default)]
    input: Value,
    /// Missing means the input is expected back unchanged
    #[serde(default, deserialize_with = "present")]
    output: Option<Value>,
    error: Option<String>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn schema_named(name: &str) -> Schema {
    match name {
        "never" => never(),
        "unknown" => unknown(),
        "boolean" => boolean(),
        "number" => number().into(),
        "integer" => integer().into(),
        "float" => float().into(),
        "string" => string().into(),
        "literal_foo" => literal("foo").into(),
        "color" => enumeration(["Red", "Green", "Blue"]),
        "percentage" => number().greater_than(0).less_than(100).into(),
        "resource" => string().starts_with("did:").ends_with("#key").into(),
        "integers" => array(integer()).into(),
        "pair" => tuple([string().into(), integer().into()]),
        "permissions" => dictionary(boolean()).into(),
        "point" => structure(fields! {
            "type" => "Point",
            "x" => integer(),
            "y" => integer(),
        })
        .unwrap()
        .into(),
        "query" => structure(fields! {
            "limit" => integer().default(10).unwrap(),
            "cursor" => string().optional(),
            "reverse" => boolean().default(false).unwrap(),
        })
        .unwrap()
        .into(),
        "receipt" => result(
            integer(),
            structure(fields! { "message" => string() }).unwrap(),
        )
        .into(),
        "maybe_number" => number().optional(),
        "maybe_name" => string().nullable(),
        "id" => integer().or(string()),
        "positive_integer" => integer().and(number().greater_than(0)),
        "fallback" => unknown().optional().default("none").unwrap(),
        "audience" => did_method("key"),
        "endpoint" => uri_with(UriOptions::protocol("https:")),
        other => panic!("fixture references unknown schema {:?}", other),
    }
}

fn load_suites() -> Vec<(PathBuf, Suite)> {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixture_dir())
        .expect("fixture directory should exist")
        .map(|entry| entry.expect("readable fixture entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "yaml"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .flat_map(|path| {
            let content = fs::read_to_string(&path).expect("readable fixture");
            let suites: Vec<Suite> = serde_yaml::from_str(&content)
                .unwrap_or_else(|e| panic!("invalid fixture {}: {}", path.display(), e));
            suites.into_iter().map(move |suite| (path.clone(), suite))
        })
        .collect()
}

fn check_case(path: &Path, suite: &Suite, schema: &Schema, index: usize, case: &Case) {
    let label = format!("{} {}[{}] input {}", path.display(), suite.schema, index, case.input);
    let result = schema.read(&case.input);

    match &case.error {
        Some(expected) => {
            let err = result.expect_err(&label);
            assert_eq!(err.to_string(), *expected, "{}", label);
            assert!(!schema.is(&case.input), "{}", label);
            assert!(schema.from(case.input.clone()).is_err(), "{}", label);
        }
        None => {
            let expected = case.output.as_ref().unwrap_or(&case.input);
            let output = result.unwrap_or_else(|e| panic!("{}: {}", label, e));
            assert_eq!(&output, expected, "{}", label);
            assert!(schema.is(&case.input), "{}", label);
            assert_eq!(schema.from(case.input.clone()).ok().as_ref(), Some(expected), "{}", label);
        }
    }
}

#[test]
fn test_fixture_corpus() {
    let suites = load_suites();
    assert!(suites.len() >= 3, "expected fixture suites, found {}", suites.len());

    let mut checked = 0;
    for (path, suite) in &suites {
        let schema = schema_named(&suite.schema);
        if let Some(rendered) = &suite.rendered {
            assert_eq!(schema.to_string(), *rendered, "{} {}", path.display(), suite.schema);
        }
        for (index, case) in suite.cases.iter().enumerate() {
            check_case(path, suite, &schema, index, case);
            checked += 1;
        }
    }
    assert!(checked > 50, "only {} fixture cases ran", checked);
}

#[test]
fn test_every_fixture_file_parses() {
    for (path, suite) in load_suites() {
        assert!(
            !suite.cases.is_empty(),
            "{} {} has no cases",
            path.display(),
            suite.schema
        );
    }
}
