use serde_json::Value;

/// Print output as YAML. serde_yaml terminates documents with a newline, so
/// no trailing println is needed.
pub fn print_yaml(value: &Value) {
    match serde_yaml::to_string(value) {
        Ok(s) => print!("{}", s),
        Err(e) => eprintln!("YAML serialization error: {}", e),
    }
}
