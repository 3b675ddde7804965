use std::path::PathBuf;

use catnb::config::{EstimatorKind, ModelConfig};
use catnb::dataset::{TrainingRow, TrainingSet};
use catnb::error::{CatnbError, Result};
use catnb::model::{self, FrequencyIndex, NaiveBayesClassifier};
use catnb::schema::ModelShape;

fn resource(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("resource")
        .join(relative)
}

fn open(name: &str, estimator: EstimatorKind) -> Result<NaiveBayesClassifier> {
    let mut config = ModelConfig::from_path(resource(&format!("models/{name}.json")))?;
    config.estimator = estimator;
    let classifier = NaiveBayesClassifier::from_model_config(&config)?;
    classifier.load_training_data(resource(&format!("data/{name}.csv")))?;
    Ok(classifier)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn career_profiles_predict_expected_classes() -> Result<()> {
    let cases: [([&str; 4], usize, f64); 5] = [
        (["expert", "excellent", "excellent", "exceptional"], 1, 0.998377),
        (["beginner", "poor", "poor", "weak"], 0, 0.999341),
        (["intermediate", "good", "average", "moderate"], 0, 0.800532),
        (["advanced", "good", "good", "strong"], 1, 0.997957),
        (["intermediate", "fair", "average", "moderate"], 0, 0.972312),
    ];

    for kind in [EstimatorKind::Rescan, EstimatorKind::Indexed] {
        let classifier = open("career_success", kind)?;
        assert_eq!(classifier.training_size(), Some(20));

        for (query, class, confidence) in cases {
            let result = classifier.classify(&query)?;
            assert_eq!(result.predicted_class(), class, "{query:?}");
            assert_close(result.confidence(), confidence);
            assert_eq!(result.class_counts(), &[8, 12]);
            assert_eq!(result.query(), &query);
        }
    }
    Ok(())
}

#[test]
fn food_profiles_predict_expected_classes() -> Result<()> {
    let classifier = open("food_freshness", EstimatorKind::Rescan)?;

    let fresh = classifier.classify(&["freezer", "short", "meat", "vacuum_packed"])?;
    assert_eq!(fresh.predicted_class(), 1);
    assert_close(fresh.probabilities()[1], 0.979021);

    let spoiled = classifier.classify(&["left_outside", "very_long", "vegetable", "damaged"])?;
    assert_eq!(spoiled.predicted_class(), 0);
    assert_close(spoiled.probabilities()[0], 0.991736);

    let mixed = classifier.classify(&["fridge", "medium", "meat", "sealed"])?;
    assert_eq!(mixed.predicted_class(), 1);
    assert_close(mixed.confidence(), 0.727273);
    Ok(())
}

#[test]
fn probabilities_are_normalized_and_confidence_matches() -> Result<()> {
    let classifier = open("food_freshness", EstimatorKind::Indexed)?;
    let queries = [
        ["pantry", "medium", "grain", "sealed"],
        ["fridge", "long", "vegetable", "sealed"],
        ["pantry", "short", "canned", "sealed"],
        ["fridge", "medium", "dairy", "loose"],
    ];

    for query in queries {
        let result = classifier.classify(&query)?;
        let sum: f64 = result.probabilities().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(result.probabilities().iter().all(|p| (0.0..=1.0).contains(p)));
        assert_eq!(
            result.confidence(),
            result.probabilities()[result.predicted_class()]
        );

        for feature in 0..4 {
            assert!(result.joint_counts().row(feature).iter().all(|&c| c > 0));
        }
    }
    Ok(())
}

#[test]
fn unseen_values_fall_back_to_priors_and_smoothing() -> Result<()> {
    let classifier = open("career_success", EstimatorKind::Indexed)?;
    let result = classifier.classify(&["unknown", "unknown", "unknown", "unknown"])?;

    assert!(result.raw_joint_counts().rows().all(|row| row == [0, 0]));
    assert!(result.joint_counts().rows().all(|row| row == [1, 1]));
    assert_eq!(result.predicted_class(), 0);
    assert_close(result.probabilities()[0], 0.678146);
    Ok(())
}

#[test]
fn repeated_classification_is_deterministic() -> Result<()> {
    let classifier = open("career_success", EstimatorKind::Indexed)?;
    let query = ["advanced", "good", "good", "strong"];

    let first = classifier.classify(&query)?;
    for _ in 0..10 {
        let again = classifier.classify(&query)?;
        assert_eq!(again.probabilities(), first.probabilities());
        assert_eq!(again.scores(), first.scores());
    }
    Ok(())
}

#[test]
fn three_row_scenario_matches_hand_computation() -> Result<()> {
    let training = TrainingSet::new(
        ModelShape::new(3, 2)?,
        vec![
            TrainingRow::new(&["a", "x", "p"], 0),
            TrainingRow::new(&["a", "y", "p"], 1),
            TrainingRow::new(&["b", "x", "q"], 1),
        ],
    )?;

    let rescan = model::classify(&training, &["a", "x", "p"])?;
    let index = FrequencyIndex::build(&training);
    let indexed = model::classify_with(&index, &["a", "x", "p"])?;

    for result in [&rescan, &indexed] {
        assert_eq!(result.raw_joint_counts().to_nested(), vec![
            vec![1, 1],
            vec![1, 1],
            vec![1, 1]
        ]);
        assert_eq!(result.class_counts(), &[1, 2]);
        assert_close(result.scores()[0], 1.0 / 24.0);
        assert_close(result.scores()[1], 16.0 / 375.0);
        assert_close(result.probabilities()[0], 375.0 / 759.0);
        assert_eq!(result.predicted_class(), 1);
    }
    Ok(())
}

#[test]
fn malformed_queries_are_rejected() -> Result<()> {
    let classifier = open("career_success", EstimatorKind::Rescan)?;

    let short = classifier.classify(&["expert", "excellent", "exceptional"]);
    assert!(matches!(
        short,
        Err(CatnbError::SchemaMismatch {
            expected: 4,
            found: 3,
            ..
        })
    ));

    let long = classifier.classify(&["a", "b", "c", "d", "e"]);
    assert!(matches!(long, Err(CatnbError::SchemaMismatch { .. })));
    Ok(())
}

#[test]
fn batch_classification_preserves_query_order() -> Result<()> {
    let classifier = open("food_freshness", EstimatorKind::Indexed)?;
    let queries = vec![
        vec!["freezer", "short", "meat", "vacuum_packed"],
        vec!["left_outside", "very_long", "vegetable", "damaged"],
        vec!["fridge", "medium", "meat", "sealed"],
    ];

    let results = classifier.classify_batch(&queries)?;
    let predicted: Vec<usize> = results.iter().map(|r| r.predicted_class()).collect();
    assert_eq!(predicted, vec![1, 0, 1]);
    assert_eq!(results[1].query()[0], "left_outside");
    Ok(())
}
