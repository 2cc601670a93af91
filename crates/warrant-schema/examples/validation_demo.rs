//! Validation demonstration example
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

use serde_json::json;
use warrant_schema::{
    did, fields, integer, literal, read_batch, string, structure, uri, BatchConfig, StructSchema,
    Value,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Warrant Schema Validation Demo ===\n");

    let capability = capability_schema()?;
    println!("Capability schema: {}\n", capability);

    demo_single_reads(&capability)?;

    println!();

    demo_batch_read(&capability)?;

    Ok(())
}

fn capability_schema() -> Result<StructSchema, Box<dyn std::error::Error>> {
    let caveats = structure(fields! {
        "audience" => did(),
        "size" => integer().greater_than(0).default(1)?,
    })?;

    let capability = structure(fields! {
        "with" => uri(),
        "can" => literal("store/add").or(literal("store/remove")),
        "nb" => caveats.optional(),
        "note" => string().nullable().optional(),
    })?;

    Ok(capability)
}

fn demo_single_reads(capability: &StructSchema) -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Single Reads ---");

    let valid = Value::from(json!({
        "with": "https://storage.example",
        "can": "store/add",
        "nb": {"audience": "did:key:z6MkpTHR", "size": 1024}
    }));

    println!("✅ Reading valid capability:");
    let output = capability.read(&valid)?;
    println!("   {}", output);

    let wrong_ability = Value::from(json!({
        "with": "https://storage.example",
        "can": "store/*"
    }));

    println!("\n❌ Reading capability with unknown ability:");
    match capability.read(&wrong_ability) {
        Ok(_) => println!("   Unexpectedly valid!"),
        Err(e) => println!("   Error: {}", e),
    }

    let bad_caveat = Value::from(json!({
        "with": "https://storage.example",
        "can": "store/remove",
        "nb": {"audience": "alice", "size": -1}
    }));

    println!("\n❌ Reading capability with invalid caveats:");
    match capability.read(&bad_caveat) {
        Ok(_) => println!("   Unexpectedly valid!"),
        Err(e) => {
            println!("   Error: {}", e);
            println!("   Serialized: {}", serde_json::to_string_pretty(&e)?);
        }
    }

    Ok(())
}

fn demo_batch_read(capability: &StructSchema) -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Batch Read ---");

    let inputs: Vec<Value> = vec![
        json!({"with": "https://a.example", "can": "store/add"}).into(),
        json!({"with": "not a uri", "can": "store/add"}).into(),
        json!({"with": "https://b.example", "can": "store/list"}).into(),
    ];

    let config = BatchConfig::from_env();
    println!("🔍 Using {:?}", config);
    match read_batch(capability, &inputs, &config) {
        Ok(values) => println!("   All {} inputs valid", values.len()),
        Err(errors) => println!("   {}", errors),
    }

    Ok(())
}
