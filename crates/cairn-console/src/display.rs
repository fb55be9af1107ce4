use cairn_core::TableDescriptor;
use cairn_core::encoding::bytes;
use serde_json::{Map, Value, json};

use crate::executor::CommandResult;

/// Output mode for rendering command results.
pub enum OutputMode {
    /// Human-readable output.
    Pretty,
    /// Machine-parseable JSON (one JSON object per result on stdout).
    Json,
}

/// Render a command result to stdout in the given mode.
pub fn render(result: &CommandResult, mode: &OutputMode) {
    match result {
        CommandResult::Ok(msg) => match mode {
            OutputMode::Pretty => println!("{msg}"),
            OutputMode::Json => println!("{}", json!({"ok": true, "message": msg})),
        },
        CommandResult::Defaults(defaults) => match mode {
            OutputMode::Pretty => print_defaults(defaults),
            OutputMode::Json => {
                let map: Map<String, Value> = defaults
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect();
                println!("{}", Value::Object(map));
            }
        },
        CommandResult::Descriptor { desc, customized } => match mode {
            OutputMode::Pretty if *customized => println!("{}", desc.to_string_customized_values()),
            OutputMode::Pretty => println!("{desc}"),
            OutputMode::Json => println!("{}", descriptor_json(desc)),
        },
    }
}

/// Render an error to stderr.
pub fn render_error(err: &dyn std::fmt::Display, mode: &OutputMode) {
    match mode {
        OutputMode::Pretty => eprintln!("Error: {err}"),
        OutputMode::Json => eprintln!("{}", json!({"error": err.to_string()})),
    }
}

fn print_defaults(defaults: &[(String, String)]) {
    let width = defaults.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in defaults {
        println!("  {key:<width$}  {value}");
    }
}

/// Non-UTF-8 bytes are escaped as `\xHH`.
fn byte_map_json<'a>(entries: impl Iterator<Item = (&'a Vec<u8>, &'a Vec<u8>)>) -> Value {
    let map: Map<String, Value> = entries
        .map(|(k, v)| {
            (
                bytes::to_string_binary(k),
                Value::String(bytes::to_string_binary(v)),
            )
        })
        .collect();
    Value::Object(map)
}

pub fn descriptor_json(desc: &TableDescriptor) -> Value {
    let families: Vec<Value> = desc
        .families()
        .map(|f| {
            json!({
                "name": bytes::to_string_binary(f.name()),
                "settings": byte_map_json(f.values().iter()),
            })
        })
        .collect();
    let servers: Vec<String> = desc
        .servers()
        .iter()
        .map(|s| s.host_name_with_port())
        .collect();
    json!({
        "name": bytes::to_string_binary(desc.name()),
        "is_root": desc.is_root_region(),
        "is_meta": desc.is_meta_region(),
        "attributes": byte_map_json(desc.values().iter()),
        "families": families,
        "servers": servers,
    })
}
