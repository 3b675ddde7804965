use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use catnb::dataset::{TrainingRow, TrainingSet};
use catnb::error::Result;
use catnb::model::{self, FrequencyEstimator, FrequencyIndex};
use catnb::schema::ModelShape;

const VALUES: [&str; 5] = ["v0", "v1", "v2", "v3", "v4"];

fn random_training(rng: &mut StdRng, shape: ModelShape, rows: usize) -> Result<TrainingSet> {
    let rows = (0..rows)
        .map(|_| {
            let features: Vec<&str> = (0..shape.feature_count)
                .map(|_| VALUES[rng.random_range(0..VALUES.len())])
                .collect();
            TrainingRow::new(&features, rng.random_range(0..shape.class_count))
        })
        .collect();
    TrainingSet::new(shape, rows)
}

fn random_query(rng: &mut StdRng, feature_count: usize) -> Vec<String> {
    // one extra value that never appears in training
    (0..feature_count)
        .map(|_| {
            let pick = rng.random_range(0..=VALUES.len());
            VALUES.get(pick).copied().unwrap_or("unseen").to_string()
        })
        .collect()
}

#[test]
fn indexed_counts_match_rescan_on_random_data() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let shape = ModelShape::new(rng.random_range(1..6), rng.random_range(1..5))?;
        let rows = rng.random_range(1..60);
        let training = random_training(&mut rng, shape, rows)?;
        let index = FrequencyIndex::build(&training);

        for _ in 0..10 {
            let query = random_query(&mut rng, shape.feature_count);
            let values: Vec<&str> = query.iter().map(String::as_str).collect();

            let expected = training.estimate(&values)?;
            let actual = index.estimate(&values)?;
            assert_eq!(actual, expected, "query {query:?}");

            let rescan = model::classify(&training, &query)?;
            let indexed = model::classify_with(&index, &query)?;
            assert_eq!(indexed.probabilities(), rescan.probabilities());
            assert_eq!(indexed.predicted_class(), rescan.predicted_class());
        }
    }
    Ok(())
}

#[test]
fn joint_counts_never_exceed_class_counts() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let shape = ModelShape::new(4, 3)?;
    let training = random_training(&mut rng, shape, 200)?;

    for _ in 0..100 {
        let query = random_query(&mut rng, shape.feature_count);
        let values: Vec<&str> = query.iter().map(String::as_str).collect();
        let counts = training.estimate(&values)?;

        assert_eq!(counts.classes.iter().sum::<usize>(), training.len());
        for row in counts.joint.rows() {
            for (joint, class) in row.iter().zip(&counts.classes) {
                assert!(joint <= class);
            }
        }
    }
    Ok(())
}
