//! Basic processing integration tests

use crate::config::{ExtractConfig, OutputFormat};
use crate::models::{AreaType, ParseStatus, StatValue};
use crate::processor::BatchProcessor;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a results folder with three zones for the DF metric
fn create_results_folder(temp_dir: &TempDir) -> PathBuf {
    let folder = temp_dir.path().join("radiance");
    fs::create_dir_all(&folder).unwrap();

    let living = "\
[RADIANCE] v5.4
[Zone] [L01] Living Room
[Sim]
[Metric] Daylight Factor
[MMA] 0.8 6.2 2.4 10 20 1.1 5.0 2.9
[Sim]
[Metric] Daylight Factor (winter)
[MMA] 0.5 4.0 1.9
";
    let kitchen = "\
[Sim]
[MMA] 1.2 3.4 2.0 1 1 1.5 3.0 2.2
";
    let store = "[Zone] [S01] Store\n[RADIANCE] header only\n";

    fs::write(folder.join("L01_DF.wpd"), living).unwrap();
    fs::write(folder.join("K02_Kitchen_DF.wpd"), kitchen).unwrap();
    fs::write(folder.join("S01_DF.wpd"), store).unwrap();
    fs::write(folder.join("L01_sDA.wpd"), "[Sim]\n[MMA] 50 90 70").unwrap();

    folder
}

fn quiet_config() -> ExtractConfig {
    ExtractConfig::default()
        .without_progress()
        .with_max_concurrent_files(2)
}

#[tokio::test]
async fn test_extract_full_area() {
    let temp_dir = TempDir::new().unwrap();
    let folder = create_results_folder(&temp_dir);

    let processor = BatchProcessor::new(folder).unwrap().with_config(quiet_config());
    let result = processor.extract("DF", AreaType::Full).await.unwrap();

    // Files are processed in name order: K02, L01, S01
    let zones: Vec<_> = result.records.iter().map(|r| r.zone_id.as_str()).collect();
    assert_eq!(zones, vec!["K02", "L01", "L01"]);

    assert_eq!(result.records[0].zone_name, "Unknown");
    assert_eq!(result.records[1].description, "[Metric] Daylight Factor");
    assert_eq!(result.records[1].average, StatValue::Value(2.4));
    assert_eq!(result.records[2].description, "[Metric] Daylight Factor (winter)");
    assert!(result.records.iter().all(|r| r.status == ParseStatus::Ok));

    assert_eq!(result.stats.files_discovered, 3);
    assert_eq!(result.stats.files_processed, 2);
    assert_eq!(result.stats.files_empty, 1);
    assert_eq!(result.stats.files_failed, 0);
    assert_eq!(result.stats.total_records, 3);
}

#[tokio::test]
async fn test_extract_aoi_area() {
    let temp_dir = TempDir::new().unwrap();
    let folder = create_results_folder(&temp_dir);

    let processor = BatchProcessor::new(folder).unwrap().with_config(quiet_config());
    let result = processor.extract("DF", AreaType::Aoi).await.unwrap();

    assert_eq!(result.records.len(), 3);
    assert_eq!(result.records[0].min, StatValue::Value(1.5));
    assert_eq!(result.records[1].max, StatValue::Value(5.0));
    assert_eq!(result.records[2].status, ParseStatus::AoiMissing);
    assert_eq!(result.records[2].effective_area_label, "AOI (Not Found)");
    assert_eq!(result.stats.records_with_issues, 1);
}

#[tokio::test]
async fn test_order_is_independent_of_concurrency() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("many");
    fs::create_dir_all(&folder).unwrap();
    for i in 0..40 {
        let content = format!("[Sim]\n[MMA] {} {} {}\n", i, i + 1, i + 2);
        fs::write(folder.join(format!("Z{:02}_DF.wpd", i)), content).unwrap();
    }

    let sequential = BatchProcessor::new(folder.clone())
        .unwrap()
        .with_config(quiet_config().with_max_concurrent_files(1))
        .extract("DF", AreaType::Full)
        .await
        .unwrap();
    let concurrent = BatchProcessor::new(folder)
        .unwrap()
        .with_config(quiet_config().with_max_concurrent_files(8))
        .extract("DF", AreaType::Full)
        .await
        .unwrap();

    assert_eq!(sequential.records, concurrent.records);
    assert_eq!(concurrent.records[17].zone_id, "Z17");
    assert_eq!(concurrent.records[17].min, StatValue::Value(17.0));
}

#[tokio::test]
async fn test_run_writes_default_output() {
    let temp_dir = TempDir::new().unwrap();
    let folder = create_results_folder(&temp_dir);

    let processor = BatchProcessor::new(folder.clone())
        .unwrap()
        .with_config(quiet_config());
    let stats = processor.run("DF", AreaType::Full, None).await.unwrap();

    let expected = folder.join("Daylight_Stats_DF_Full.csv");
    assert_eq!(stats.output_path, expected);
    assert!(expected.exists());

    let csv = fs::read_to_string(&expected).unwrap();
    assert_eq!(csv.lines().count(), 4);
}

#[tokio::test]
async fn test_run_infers_parquet_from_extension() {
    let temp_dir = TempDir::new().unwrap();
    let folder = create_results_folder(&temp_dir);
    let output = temp_dir.path().join("export").join("df.parquet");

    let processor = BatchProcessor::new(folder)
        .unwrap()
        .with_config(quiet_config().with_output_format(OutputFormat::Csv));
    let stats = processor
        .run("DF", AreaType::Aoi, Some(output.clone()))
        .await
        .unwrap();

    assert_eq!(stats.output_path, output);
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..4], b"PAR1");
}

#[test]
fn test_discover_metrics_through_processor() {
    let temp_dir = TempDir::new().unwrap();
    let folder = create_results_folder(&temp_dir);

    let processor = BatchProcessor::new(folder.clone()).unwrap();
    assert_eq!(processor.folder(), folder.as_path());
    assert_eq!(processor.discover_metrics().unwrap(), vec!["DF", "sDA"]);
}
