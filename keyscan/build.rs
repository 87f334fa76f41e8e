use std::path::Path;
use std::{env, fs};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct KeyscanToml {
    #[serde(default)]
    matrix: MatrixToml,
}

#[derive(Debug, Deserialize)]
struct MatrixToml {
    #[serde(default = "default_debounce")]
    debounce: u8,
    #[serde(default = "default_select_delay_us")]
    select_delay_us: u32,
    #[serde(default = "default_debounce_tick_us")]
    debounce_tick_us: u32,
}

impl Default for MatrixToml {
    fn default() -> Self {
        Self {
            debounce: default_debounce(),
            select_delay_us: default_select_delay_us(),
            debounce_tick_us: default_debounce_tick_us(),
        }
    }
}

fn default_debounce() -> u8 {
    5
}

fn default_select_delay_us() -> u32 {
    30
}

fn default_debounce_tick_us() -> u32 {
    1000
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=KEYSCAN_CONFIG_PATH");

    // Read the matrix config if it's present
    let user_config_str = if let Ok(toml_path) = env::var("KEYSCAN_CONFIG_PATH") {
        println!("cargo:rerun-if-changed={toml_path}");
        fs::read_to_string(&toml_path).expect("Failed to read KEYSCAN_CONFIG_PATH file")
    } else {
        String::new()
    };

    let user_toml: KeyscanToml = toml::from_str(&user_config_str).expect("Failed to parse KEYSCAN_CONFIG_PATH file\n");

    let constants = get_constants_str(&user_toml.matrix);

    // Write to constants.rs file
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("constants.rs");
    fs::write(&dest_path, constants).expect("Failed to write constants.rs file");
}

fn get_constants_str(matrix: &MatrixToml) -> String {
    [
        format!("pub(crate) const DEBOUNCE_THRESHOLD: u8 = {};\n", matrix.debounce),
        format!("pub(crate) const SELECT_DELAY_US: u32 = {};\n", matrix.select_delay_us),
        format!("pub(crate) const DEBOUNCE_TICK_US: u32 = {};\n", matrix.debounce_tick_us),
    ]
    .concat()
}
