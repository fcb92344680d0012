#![allow(dead_code)]

use serde_json::Value;

/// Load the JSON file at `tests/data/<path>`, and get the hyper parameters
/// it contains as a JSON string
pub fn load_hyperparameters(path: &str) -> String {
    let json = std::fs::read_to_string(format!("tests/data/{}", path))
        .expect("failed to read input file");

    let data: Value = serde_json::from_str(&json).expect("failed to parse JSON");
    assert!(data["hyperparameters"].is_object(), "hyperparameters must be an object");

    data["hyperparameters"].to_string()
}

/// Extract the calculator name and JSON parameters from the code
/// `Calculator::new("<name>", r#"<json>"#.to_owned())`
pub fn parse_generated_code(code: &str) -> (String, String) {
    let code = code.trim();
    let code = code.strip_prefix("Calculator::new(\"").expect("missing Calculator::new");
    let code = code.strip_suffix("\"#.to_owned())").expect("missing .to_owned()");

    let (name, json) = code.split_once("\", r#\"").expect("missing raw string");
    (name.to_owned(), json.to_owned())
}
