use investment_scorecard::chart::to_chart_series;
use investment_scorecard::config::{
    build_scorecard, load_scorecard_file, save_scorecard_file, validate_scorecard_file,
    ScorecardFile, SubfactorEntry, WeightSource,
};
use investment_scorecard::error::ScorecardError;
use investment_scorecard::export::{
    to_csv, to_pdf, write_export, ExportFormat, ExportRecord, DEFAULT_CSV_NAME, DEFAULT_PDF_NAME,
};
use investment_scorecard::scoring::{aggregate, normalize, FactorName, FactorWeights, SubfactorName};

fn file_with(weights: FactorWeights, ratings: [u8; 9]) -> ScorecardFile {
    let mut file = ScorecardFile {
        weights: Some(weights),
        ..Default::default()
    };
    for (name, r) in SubfactorName::ALL.iter().zip(ratings) {
        file.subfactors.insert(
            *name,
            SubfactorEntry {
                rating: Some(r),
                comment: String::new(),
            },
        );
    }
    file
}

#[test]
fn equal_weights_with_neutral_ratings() {
    let card = build_scorecard(&ScorecardFile::default(), WeightSource::Equal).unwrap();
    let summary = aggregate(&card);
    for fs in &summary.factors {
        assert_eq!(fs.weight, 1.0 / 3.0);
        assert_eq!(fs.score, 3.0);
    }
    assert!((summary.overall - 3.0).abs() < 1e-12);
    assert_eq!(summary.overall_rating(), 3);
}

#[test]
fn skewed_weights_and_ratings() {
    let file = file_with(FactorWeights::new(2.0, 1.0, 1.0), [5, 5, 5, 1, 1, 1, 3, 3, 3]);
    validate_scorecard_file(&file).unwrap();
    let card = build_scorecard(&file, WeightSource::File).unwrap();
    let summary = aggregate(&card);

    assert_eq!(summary.factor(FactorName::Team).weight, 0.5);
    assert_eq!(summary.factor(FactorName::Product).weight, 0.25);
    assert!((summary.overall - 3.5).abs() < 1e-12);
    assert!((summary.percentage() - 70.0).abs() < 1e-9);

    let values: Vec<f64> = to_chart_series(&summary).iter().map(|p| p.value).collect();
    assert_eq!(values, vec![5.0, 1.0, 3.0]);
}

#[test]
fn zero_weights_are_rejected() {
    assert!(matches!(
        normalize(FactorWeights::new(0.0, 0.0, 0.0)),
        Err(ScorecardError::InvalidWeight(_))
    ));

    let file = file_with(FactorWeights::new(0.0, 0.0, 0.0), [3; 9]);
    assert!(validate_scorecard_file(&file).is_err());
}

#[test]
fn scorecard_file_to_exports_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let scorecard_path = dir.path().join("scorecard.yaml");

    let mut file = file_with(FactorWeights::new(2.0, 1.0, 1.0), [5, 5, 5, 1, 1, 1, 3, 3, 3]);
    file.subfactors
        .get_mut(&SubfactorName::Ability)
        .unwrap()
        .comment = "Second-time founders, \"strong\" references".to_string();
    save_scorecard_file(&scorecard_path, &file).unwrap();

    let loaded = load_scorecard_file(Some(scorecard_path)).unwrap();
    validate_scorecard_file(&loaded).unwrap();
    let card = build_scorecard(&loaded, WeightSource::File).unwrap();
    let record = ExportRecord::from_scorecard(&card);

    let csv_path = dir.path().join(DEFAULT_CSV_NAME);
    let pdf_path = dir.path().join(DEFAULT_PDF_NAME);
    write_export(&csv_path, ExportFormat::Csv, &record).unwrap();
    write_export(&pdf_path, ExportFormat::Pdf, &record).unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Factor,Subfactor,Score,Comment,Weight\n"));
    assert!(csv.contains("Team,Ability,5,\"Second-time founders, \"\"strong\"\" references\",0.50\n"));
    assert!(csv.contains("Total Score,3.50\n"));
    assert!(csv.contains("Percentage of Max Score,70.00%\n"));

    let pdf = std::fs::read(&pdf_path).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert_eq!(pdf, to_pdf(&record).unwrap());
}

#[test]
fn exports_agree_on_scores() {
    let file = file_with(FactorWeights::new(0.7, 0.2, 0.1), [4, 2, 5, 3, 3, 1, 2, 5, 4]);
    let card = build_scorecard(&file, WeightSource::File).unwrap();
    let record = ExportRecord::from_scorecard(&card);

    let csv = String::from_utf8(to_csv(&record).unwrap()).unwrap();
    let pdf = to_pdf(&record).unwrap();
    let pdf_text = String::from_utf8_lossy(&pdf);

    let overall = format!("{:.2}", record.overall);
    assert!(csv.contains(&format!("Total Score,{}", overall)));
    assert!(pdf_text.contains(&format!("Total Score: {} / 5.00", overall)));
    for fs in &record.factor_scores {
        let score = format!("{:.2}", fs.score);
        assert!(csv.contains(&format!("{},{},", fs.name.label(), score)));
        assert!(pdf_text.contains(&format!("{}: Average Score {}", fs.name.label(), score)));
    }
}

#[test]
fn override_weights_beat_file_weights() {
    let file = file_with(FactorWeights::new(1.0, 1.0, 1.0), [5, 5, 5, 1, 1, 1, 1, 1, 1]);
    let card =
        build_scorecard(&file, WeightSource::Override(FactorWeights::new(3.0, 1.0, 0.0001))).unwrap();
    let summary = aggregate(&card);
    assert!(summary.overall > 3.9);
}
