//! Type-key mapping example.
//!
//! Validates a YAML document whose mapping keys have mixed types. Boolean
//! keys are checked before integer keys, integer keys before any others.
//! With `bool_is_int` enabled, booleans also count as integers.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p dataschema-demos --example type_keys
//! ```

use dataschema_core::{MapDefinition, Schema, SchemaOptions, Value, ValueKind};

const DOCUMENT: &str = r#"
true: enabled
1: 10
2: 20
label: ports
"#;

fn main() {
    let definition = || {
        MapDefinition::new()
            .type_key(ValueKind::Any, ValueKind::String)
            .type_key(ValueKind::Int, ValueKind::Int)
            .type_key(ValueKind::Bool, ValueKind::String)
    };
    let data: Value = serde_yaml::from_str(DOCUMENT).unwrap();

    let strict = Schema::new(definition()).unwrap();
    println!("Matching order:");
    if let dataschema_core::NodeKind::Map(map) = strict.root().kind() {
        for (kind, node) in map.type_keys() {
            println!("  <{kind}> -> {}", node.path());
        }
    }
    println!();

    println!("strict:  {:?}", strict.validate(&data).map(|v| v.to_string()));

    let options: SchemaOptions = serde_yaml::from_str("bool_is_int: true").unwrap();
    let lenient = Schema::with_options(definition(), options).unwrap();
    println!("lenient: {:?}", lenient.validate(&data).map(|v| v.to_string()));

    let only_ints = MapDefinition::new().type_key(ValueKind::Int, ValueKind::Any);
    let flag = Value::map([(Value::Bool(true), Value::from("on"))]);
    println!();
    println!(
        "int keys, strict:  {}",
        describe(Schema::new(only_ints.clone()).unwrap().validate(&flag))
    );
    println!(
        "int keys, lenient: {}",
        describe(
            Schema::with_options(only_ints, options)
                .unwrap()
                .validate(&flag)
        )
    );
}

fn describe(result: Result<Value, dataschema_core::ValidationError>) -> String {
    match result {
        Ok(value) => format!("ok {value}"),
        Err(err) => format!("error: {err}"),
    }
}
