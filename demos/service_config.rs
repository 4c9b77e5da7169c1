//! Service configuration example.
//!
//! Validates a YAML service configuration, fills in defaults and prints the
//! result as JSON. Then shows the errors produced by a broken configuration.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p dataschema-demos --example service_config
//! ```

use dataschema_core::{
    Convert, Decorate, Definition, Length, MapDefinition, Range, Regex, Schema, Value, ValueKind,
    ValueNode,
};

const GOOD: &str = r#"
name: billing
version: 3
listen:
  host: 0.0.0.0
replicas: "4"
owners: [payments@example.com]
"#;

const BROKEN: &str = r#"
name: ""
version: 0
listen:
  port: 99999
owners: []
extra: true
"#;

fn main() {
    let schema = build_schema();

    println!("Schema:");
    println!("{schema}");
    println!();

    let config: Value = serde_yaml::from_str(GOOD).unwrap();
    let validated = schema.validate(&config).unwrap();
    println!("Validated configuration:");
    println!("{}", serde_json::to_string_pretty(&validated).unwrap());
    println!();

    let broken: Value = serde_yaml::from_str(BROKEN).unwrap();
    match schema.validate(&broken) {
        Ok(_) => println!("Broken configuration unexpectedly validated"),
        Err(err) => {
            println!("Broken configuration rejected:");
            println!("  at:      {}", err.path());
            println!("  message: {err}");
        }
    }
}

fn build_schema() -> Schema {
    let listen = MapDefinition::new()
        .key("host", ValueNode::string().default("127.0.0.1"))
        .key(
            "port",
            Range::between(1, 65535).wrap(ValueNode::int().default(8080)),
        )
        .default(Default::default());

    let email = Regex::new(r"[^@\s]+@[^@\s]+\.[a-z]+$").unwrap();

    Schema::new(
        MapDefinition::new()
            .key(
                "name",
                Length::not_empty()
                    .wrap(ValueKind::String)
                    .with_description("service name"),
            )
            .key(
                "version",
                Definition::from(ValueKind::Int)
                    .and_then(Range::min(1))
                    .with_message("version must be a positive integer"),
            )
            .key("debug", ValueNode::boolean().default(false))
            .key("listen", listen)
            .key("replicas", Convert::to_int().default("1"))
            .key(
                "owners",
                Definition::list(email.wrap(ValueKind::String)).and_then(Length::not_empty()),
            ),
    )
    .unwrap()
}
