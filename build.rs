use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    let callouts = table
        .get("callouts")
        .and_then(|value| value.as_table())
        .expect("default_config.toml is missing [callouts]");
    for kind in ["disclaimer", "warning", "important", "note"] {
        let style = callouts
            .get(kind)
            .and_then(|value| value.as_table())
            .unwrap_or_else(|| panic!("default_config.toml is missing [callouts.{}]", kind));
        for key in ["icon", "accent", "background"] {
            if !style.get(key).is_some_and(|value| value.is_str()) {
                panic!("[callouts.{}] needs a string `{}`", kind, key);
            }
        }
    }
}
