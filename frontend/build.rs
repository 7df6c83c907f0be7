use std::env;
use std::fs;
use std::path::Path;

/// 构建期配置：从 `.env` 转发到 `option_env!`
const FORWARDED_KEYS: [&str; 2] = ["DECORFLOW_API_BASE", "DECORFLOW_LOG_LEVEL"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for key in FORWARDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    if !env_file.exists() {
        return;
    }
    println!("cargo:rerun-if-changed=.env");

    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=.env exists but could not be read");
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // 只转发已知键，且已设置的环境变量优先
            if FORWARDED_KEYS.contains(&key) && env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    }
}
