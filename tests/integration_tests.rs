use anyhow::Result;
use hotel_join::core::Pipeline;
use hotel_join::{CliConfig, EtlEngine, JoinError, JoinPipeline, LocalStorage, TomlConfig};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const PRICES: &str = r#"{"hotels":[{"id":"H1","price":100},{"id":"H2","price":200}]}"#;
const DETAILS: &str = r#"[{"id":"H1","name":"Hotel One","rating":4,"image_details":{"prefix":"http://img/","count":3,"suffix":".jpg"},"trustyou":{"score":{"kaligo_overall":85}}}]"#;

const EXPECTED: &str = r#"[
    {
        "id": "H1",
        "price": 100,
        "name": "Hotel One",
        "imageUrl": "http://img/2.jpg",
        "StarRating": 4,
        "GuestRating": 85
    }
]"#;

fn write_inputs(dir: &Path, prices: &str, details: &str) -> Result<()> {
    std::fs::write(dir.join("jsonA.json"), prices)?;
    std::fs::write(dir.join("jsonB.json"), details)?;
    Ok(())
}

fn cli_config(base_dir: &str) -> CliConfig {
    CliConfig {
        base_dir: base_dir.to_string(),
        price_file: "jsonA.json".to_string(),
        detail_file: "jsonB.json".to_string(),
        output_file: "combined_data.json".to_string(),
        no_echo: true,
        verbose: false,
        config: None,
    }
}

#[test]
fn test_end_to_end_join_writes_combined_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base_dir = temp_dir.path().to_str().unwrap().to_string();
    write_inputs(temp_dir.path(), PRICES, DETAILS)?;

    let storage = LocalStorage::new(base_dir.clone());
    let engine = EtlEngine::new(JoinPipeline::new(storage, cli_config(&base_dir)));
    let output_path = engine.run()?;

    assert!(output_path.ends_with("combined_data.json"));
    let written = std::fs::read_to_string(temp_dir.path().join("combined_data.json"))?;
    assert_eq!(written, EXPECTED);
    Ok(())
}

#[test]
fn test_end_to_end_with_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base_dir = temp_dir.path().to_str().unwrap().replace('\\', "/");
    std::fs::write(temp_dir.path().join("prices.json"), PRICES)?;
    std::fs::write(temp_dir.path().join("details.json"), DETAILS)?;

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[input]
base_dir = "{}"
price_file = "prices.json"
detail_file = "details.json"

[output]
file = "out/merged.json"
echo_stdout = false
"#,
        base_dir
    ))?;

    let storage = LocalStorage::new(base_dir);
    let engine = EtlEngine::new(JoinPipeline::new(storage, config));
    engine.run()?;

    let written = std::fs::read_to_string(temp_dir.path().join("out").join("merged.json"))?;
    assert_eq!(written, EXPECTED);
    Ok(())
}

#[test]
fn test_missing_input_file_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base_dir = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("jsonA.json"), PRICES)?;

    let storage = LocalStorage::new(base_dir.clone());
    let engine = EtlEngine::new(JoinPipeline::new(storage, cli_config(&base_dir)));

    match engine.run() {
        Err(JoinError::FileNotFound { path }) => assert!(path.ends_with("jsonB.json")),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_malformed_matched_record_leaves_no_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base_dir = temp_dir.path().to_str().unwrap().to_string();
    write_inputs(
        temp_dir.path(),
        PRICES,
        r#"[{"id":"H1","name":"Hotel One","rating":4,"trustyou":{"score":{"kaligo_overall":85}}}]"#,
    )?;

    let storage = LocalStorage::new(base_dir.clone());
    let pipeline = JoinPipeline::new(storage, cli_config(&base_dir));
    let sources = pipeline.extract()?;

    assert!(matches!(
        pipeline.transform(sources),
        Err(JoinError::MissingField { ref field, .. }) if field == "image_details.prefix"
    ));
    assert!(!temp_dir.path().join("combined_data.json").exists());
    Ok(())
}

#[test]
fn test_binary_without_arguments_prints_and_writes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_inputs(temp_dir.path(), PRICES, DETAILS)?;

    let output = Command::new(env!("CARGO_BIN_EXE_hotel-join"))
        .current_dir(temp_dir.path())
        .env_remove("RUST_LOG")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout, format!("{}\n", EXPECTED));

    let written = std::fs::read_to_string(temp_dir.path().join("combined_data.json"))?;
    assert_eq!(written, EXPECTED);
    Ok(())
}

#[test]
fn test_binary_fails_on_malformed_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_inputs(temp_dir.path(), "{\"hotels\": [", DETAILS)?;

    let output = Command::new(env!("CARGO_BIN_EXE_hotel-join"))
        .current_dir(temp_dir.path())
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!temp_dir.path().join("combined_data.json").exists());
    Ok(())
}

#[test]
fn test_binary_fails_when_inputs_missing() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let output = Command::new(env!("CARGO_BIN_EXE_hotel-join"))
        .current_dir(temp_dir.path())
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_binary_output_matches_ascii_escaped_layout() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_inputs(
        temp_dir.path(),
        r#"{"hotels":[{"id":7,"price":99.5},{"id":"skip","price":1}]}"#,
        r#"[{"id":7,"name":"Hôtel Été","rating":null,"image_details":{"prefix":"https://i/","count":1,"suffix":".jpg"},"trustyou":{"score":{"kaligo_overall":null}}}]"#,
    )?;

    let output = Command::new(env!("CARGO_BIN_EXE_hotel-join"))
        .current_dir(temp_dir.path())
        .output()?;
    assert!(output.status.success());

    let expected = r#"[
    {
        "id": 7,
        "price": 99.5,
        "name": "H\u00f4tel \u00c9t\u00e9",
        "imageUrl": "https://i/0.jpg",
        "StarRating": null,
        "GuestRating": null
    }
]"#;
    assert_eq!(String::from_utf8(output.stdout)?, format!("{}\n", expected));
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("combined_data.json"))?,
        expected
    );
    Ok(())
}

#[test]
fn test_binary_rejects_flags_next_to_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_inputs(temp_dir.path(), PRICES, DETAILS)?;
    std::fs::write(temp_dir.path().join("join.toml"), "")?;

    let output = Command::new(env!("CARGO_BIN_EXE_hotel-join"))
        .args(["--config", "join.toml", "--no-echo"])
        .current_dir(temp_dir.path())
        .output()?;

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("combined_data.json").exists());
    Ok(())
}
