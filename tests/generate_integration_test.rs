use anyhow::Result;
use binluhn::{
    generate, generate_batch, validate, BatchWriter, Brand, BinluhnError, GenerateRequest,
    GenerationStrategy, LocalStorage, OutputFormat, Settings,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_every_brand_generates_valid_numbers() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for brand in Brand::ALL {
        for strategy in [
            GenerationStrategy::CheckDigit,
            GenerationStrategy::RejectionSampling,
        ] {
            let request = GenerateRequest::for_brand(brand, 25).strategy(strategy);
            let batch = generate_batch(&request, &mut rng).unwrap();

            assert_eq!(batch.numbers.len(), 25);
            for number in &batch.numbers {
                assert_eq!(number.len(), brand.default_length());
                assert!(number.starts_with(brand.prefix()));
                assert!(validate(number).unwrap(), "{} failed Luhn", number);
            }
        }
    }
}

#[test]
fn test_generate_with_thread_rng() {
    let mut rng = rand::rng();
    let first = generate("4", 16, &mut rng).unwrap();
    let second = generate("4", 16, &mut rng).unwrap();

    assert!(validate(&first).unwrap());
    assert!(validate(&second).unwrap());
    assert!(first.starts_with('4') && second.starts_with('4'));
}

#[test]
fn test_generate_rejects_length_without_room() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let result = generate("3", 5, &mut rng);
    assert!(matches!(result, Err(BinluhnError::InvalidArgument { .. })));
}

#[tokio::test]
async fn test_batch_written_to_local_storage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let batch = generate_batch(&GenerateRequest::with_prefix("5425", 16, 5), &mut rng)?;

    let writer = BatchWriter::new(LocalStorage::new(output_path.clone()));
    let written = writer
        .save(
            &batch,
            &[OutputFormat::Txt, OutputFormat::Csv, OutputFormat::Json],
        )
        .await?;

    assert_eq!(written.len(), 3);
    for filename in &written {
        assert!(filename.starts_with("generated_"));
        assert!(temp_dir.path().join(filename).exists());
    }

    let txt = std::fs::read_to_string(temp_dir.path().join(&written[0]))?;
    let lines: Vec<&str> = txt.lines().collect();
    assert_eq!(lines, batch.numbers);

    let mut reader = csv::Reader::from_path(temp_dir.path().join(&written[1]))?;
    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|row| &row[1] == "5425" && &row[3] == "true"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join(&written[2]))?)?;
    assert_eq!(json["prefix"], "5425");
    assert_eq!(json["strategy"], "check-digit");
    assert_eq!(json["numbers"].as_array().map(|a| a.len()), Some(5));
    Ok(())
}

#[test]
fn test_custom_brand_from_config_file() -> Result<()> {
    let mut config_file = NamedTempFile::new()?;
    config_file.write_all(
        br#"
[generate]
count = 3
strategy = "rejection-sampling"

[brands.discover]
prefix = "6011"
length = 16
"#,
    )?;

    let settings = Settings::load(Some(config_file.path()))?;
    let (prefix, length) = settings.resolve_target(Some("Discover"), None, None)?;
    let request =
        GenerateRequest::with_prefix(prefix, length, settings.count).strategy(settings.strategy);

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let batch = generate_batch(&request, &mut rng)?;

    assert_eq!(batch.numbers.len(), 3);
    assert_eq!(batch.strategy, GenerationStrategy::RejectionSampling);
    assert!(batch
        .numbers
        .iter()
        .all(|n| n.starts_with("6011") && n.len() == 16 && validate(n).unwrap()));
    Ok(())
}
