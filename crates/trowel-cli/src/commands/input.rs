use std::io::Read;

use anyhow::Context;
use serde_json::Value;

use crate::cli::root_commands::InputArgs;

/// Read a JSON document from a file, or from stdin for `-`.
pub fn read_json(args: &InputArgs) -> anyhow::Result<Value> {
    read_json_from(&args.input)
}

pub fn read_json_from(source: &str) -> anyhow::Result<Value> {
    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?
    };

    let name = if source == "-" { "stdin" } else { source };
    serde_json::from_str(&text).with_context(|| format!("{name} is not valid JSON"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::read_json_from;

    #[test]
    fn reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"materials": 10}}"#).expect("write");
        let value = read_json_from(file.path().to_str().expect("utf-8 path")).expect("json");
        assert_eq!(value["materials"], 10);
    }

    #[test]
    fn invalid_json_names_the_source() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");
        let path = file.path().to_str().expect("utf-8 path").to_owned();
        let err = read_json_from(&path).expect_err("should fail");
        assert!(format!("{err:#}").contains("is not valid JSON"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_json_from("/definitely/not/here.json").expect_err("should fail");
        assert!(err.to_string().contains("failed to read"));
    }
}
