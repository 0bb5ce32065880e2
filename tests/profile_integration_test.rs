use tempfile::TempDir;
use xray_flatten::config::toml_config::TomlConfig;
use xray_flatten::core::pipeline::OUTPUT_SEMICOLON;
use xray_flatten::utils::validation::Validate;
use xray_flatten::{FlattenEngine, FlattenPipeline, LocalStorage};

/// A localized export: different column names, comma-delimited.
const FIXTURE: &str = concat!(
    "Ticket,Titel,Testschritte\n",
    "DE-1,Anmeldung,\"[{\"\"index\"\":1,\"\"fields\"\":{\"\"Action\"\":\"\"App starten\"\",\"\"Expected Result\"\":\"\"App startet\"\"}}]\"\n",
    "DE-2,Abmeldung,\n",
);

#[tokio::test]
async fn profile_with_custom_labels_and_delimiter() {
    let temp = TempDir::new().unwrap();
    let input_path = temp.path().join("export.csv");
    std::fs::write(&input_path, FIXTURE).unwrap();
    let out_dir = temp.path().join("out");

    let profile = format!(
        r#"
[pipeline]
name = "localized-export"
description = "German Jira instance"

[source]
input_path = "{}"
delimiter = ","

[transform]
collapse_repeats = true

[transform.labels]
steps = "Testschritte"
key = "Ticket"
summary = "Titel"

[load]
output_path = "{}"
"#,
        input_path.to_str().unwrap(),
        out_dir.to_str().unwrap()
    );

    let config = TomlConfig::from_toml_str(&profile).unwrap();
    config.validate().unwrap();

    let storage = LocalStorage::new(".".to_string());
    let pipeline = FlattenPipeline::new(storage, config);
    let report = FlattenEngine::new(pipeline).run().await.unwrap();

    assert_eq!(report.input_rows, 2);
    assert_eq!(report.output_rows, 2);
    assert_eq!(report.case_count, 2);
    assert_eq!(report.step_count, 1);

    let semicolon = std::fs::read(out_dir.join(OUTPUT_SEMICOLON)).unwrap();
    let text = String::from_utf8(semicolon[3..].to_vec()).unwrap();
    let expected = concat!(
        "Case #;Issue key;Summary;Step #;Action;Data;Expected Result\n",
        "1;DE-1;Anmeldung;1;App starten;;App startet\n",
        "2;DE-2;Abmeldung;;;;\n",
    );
    assert_eq!(text, expected);
}
