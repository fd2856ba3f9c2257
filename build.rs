use std::{env, fs, path::PathBuf};

const SETTINGS_FILENAME: &str = "settings.json";

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS_FILENAME}");

    // OUT_DIR is target/<profile>/build/<pkg>/out; the binary lives three levels up.
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let Some(target_dir) = out_dir.ancestors().nth(3) else {
        return;
    };

    fs::copy(SETTINGS_FILENAME, target_dir.join(SETTINGS_FILENAME))
        .expect("Failed to copy settings.json next to the binary");
}
