use anyhow::Result;
use small_calc::core::batch_pipeline::{FAILURES_JSON, RESULTS_CSV, RESULTS_JSON};
use small_calc::{BatchPipeline, CalcEngine, CalcError, LocalStorage, TomlConfig};
use tempfile::TempDir;

const REQUESTS: &str = "\
id,operation,a,b
1,add,2,3
2,subtract,-2,1
3,multiply,-1,2
4,divide,6,3
5,divide,1,0
";

fn job_config(temp_path: &str, extra: &str) -> String {
    format!(
        r#"
[job]
name = "integration"

[input]
path = "{temp_path}/requests.csv"

[output]
path = "{temp_path}/out"
formats = ["csv", "json"]
{extra}
"#
    )
}

fn normalized(temp_dir: &TempDir) -> String {
    temp_dir.path().to_str().unwrap().replace('\\', "/")
}

#[tokio::test]
async fn test_end_to_end_batch_writes_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = normalized(&temp_dir);
    tokio::fs::write(format!("{temp_path}/requests.csv"), REQUESTS).await?;

    let config = TomlConfig::from_toml_str(&job_config(&temp_path, ""))?;
    let pipeline = BatchPipeline::new(LocalStorage::new("."), config);
    let engine = CalcEngine::new(pipeline);

    let output_path = engine.run().await?;
    assert_eq!(output_path, format!("{temp_path}/out"));

    let csv_content = tokio::fs::read_to_string(format!("{temp_path}/out/{RESULTS_CSV}")).await?;
    let lines: Vec<&str> = csv_content.lines().collect();
    assert_eq!(lines[0], "id,operation,a,b,result,error");
    assert_eq!(lines[1], "1,add,2,3,5,");
    assert_eq!(lines[2], "2,subtract,-2,1,-3,");
    assert_eq!(lines[3], "3,multiply,-1,2,-2,");
    assert_eq!(lines[4], "4,divide,6,3,2,");
    assert!(lines[5].starts_with("5,divide,1,0,,"));

    let report: serde_json::Value = serde_json::from_slice(
        &tokio::fs::read(format!("{temp_path}/out/{RESULTS_JSON}")).await?,
    )?;
    assert_eq!(report["total"], 5);
    assert_eq!(report["failed"], 1);

    let failures: serde_json::Value = serde_json::from_slice(
        &tokio::fs::read(format!("{temp_path}/out/{FAILURES_JSON}")).await?,
    )?;
    assert_eq!(failures[0]["id"], 5);
    assert!(failures[0]["error"]
        .as_str()
        .unwrap()
        .contains("division by zero"));

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_batch_with_compression() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = normalized(&temp_dir);
    tokio::fs::write(format!("{temp_path}/requests.csv"), REQUESTS).await?;

    let extra = r#"
[output.compression]
enabled = true
filename = "calc_output.zip"
"#;
    let config = TomlConfig::from_toml_str(&job_config(&temp_path, extra))?;
    let engine = CalcEngine::new(BatchPipeline::new(LocalStorage::new("."), config));

    let output_path = engine.run().await?;
    assert!(output_path.ends_with("calc_output.zip"));

    let zip_data = std::fs::read(&output_path)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec![FAILURES_JSON, RESULTS_CSV, RESULTS_JSON]);

    Ok(())
}

#[tokio::test]
async fn test_abort_policy_fails_the_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = normalized(&temp_dir);
    tokio::fs::write(format!("{temp_path}/requests.csv"), REQUESTS).await?;

    let extra = r#"
[error_handling]
on_error = "abort"
"#;
    let config = TomlConfig::from_toml_str(&job_config(&temp_path, extra))?;
    let engine = CalcEngine::new(BatchPipeline::new(LocalStorage::new("."), config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, CalcError::InvalidArgument { .. }));
    assert!(!std::path::Path::new(&format!("{temp_path}/out")).exists());

    Ok(())
}

#[tokio::test]
async fn test_malformed_input_reports_line() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = normalized(&temp_dir);
    tokio::fs::write(
        format!("{temp_path}/requests.csv"),
        "operation,a,b\nadd,1,2\nadd,1,two\n",
    )
    .await?;

    let config = TomlConfig::from_toml_str(&job_config(&temp_path, ""))?;
    let engine = CalcEngine::new(BatchPipeline::new(LocalStorage::new("."), config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, CalcError::ParseError { line: 3, .. }));

    Ok(())
}

#[tokio::test]
async fn test_monitored_run_produces_same_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = normalized(&temp_dir);
    tokio::fs::write(format!("{temp_path}/requests.csv"), REQUESTS).await?;

    let config = TomlConfig::from_toml_str(&job_config(&temp_path, ""))?;
    let engine =
        CalcEngine::new_with_monitoring(BatchPipeline::new(LocalStorage::new("."), config), true);

    let output_path = engine.run().await?;
    assert_eq!(output_path, format!("{temp_path}/out"));

    let csv_content = tokio::fs::read_to_string(format!("{temp_path}/out/{RESULTS_CSV}")).await?;
    assert_eq!(csv_content.lines().count(), 6);

    Ok(())
}
