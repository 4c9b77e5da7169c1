//! Schema merging example.
//!
//! Builds a base schema and a plugin overlay, merges them with `+` and
//! validates a configuration that needs both. Also shows the merge
//! conflicts that are reported as schema errors.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p dataschema-demos --example merge_schemas
//! ```

use dataschema_core::{Definition, Map, MapDefinition, Schema, Value, ValueKind, ValueNode};

fn main() {
    let base = Schema::new(
        MapDefinition::new()
            .key("name", ValueKind::String)
            .key("timeout", ValueNode::int().default(30))
            .type_key(ValueKind::String, ValueKind::Any),
    )
    .unwrap();

    let plugin = Schema::new(
        MapDefinition::new()
            .key("timeout", ValueNode::float().default(2.5))
            .key("plugin", MapDefinition::new().key("enabled", ValueKind::Bool))
            .type_key(ValueKind::String, ValueKind::Any),
    )
    .unwrap();

    let merged = (&base + &plugin).unwrap();
    let config = Value::map([
        ("name", Value::from("svc")),
        ("plugin", Value::map([("enabled", true)])),
        ("note", Value::from("anything goes here")),
    ]);
    let validated = merged.validate(&config).unwrap();
    println!("Merged schema output:");
    println!("{}", serde_json::to_string_pretty(&validated).unwrap());
    println!();

    // Type keys declared on both sides must agree.
    let conflicting = Schema::new(
        MapDefinition::new().type_key(ValueKind::String, ValueKind::Int),
    )
    .unwrap();
    report("type key conflict", &base + &conflicting);

    // Only one side may carry a default.
    let with_default = |key: &str| {
        Schema::new(
            MapDefinition::new()
                .key(key, ValueKind::Int)
                .default(Map::from([(Value::from(key), Value::Int(1))])),
        )
        .unwrap()
    };
    report("default conflict", with_default("a") + with_default("b"));

    // Conjunctions and disjunctions don't mix.
    let and = Schema::new(Definition::and([ValueKind::Int])).unwrap();
    let or = Schema::new(Definition::or([ValueKind::String])).unwrap();
    report("and + or", and + or);
}

fn report(label: &str, result: Result<Schema, dataschema_core::SchemaError>) {
    match result {
        Ok(_) => println!("{label}: merged"),
        Err(err) => println!("{label}: {err}"),
    }
}
