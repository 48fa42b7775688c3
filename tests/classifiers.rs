mod common;

use approx::assert_abs_diff_eq;

use eeg_classify::prelude::*;
use eeg_classify::research::{CrossValidation, train_test_split};

use common::*;


/// Tests for the classifier life-cycle shared by every algorithm.
#[cfg(test)]
pub mod lifecycle_tests {
    use super::*;

    fn check_lifecycle<C: Classifier>(mut clf: C, examples: &[Example]) {
        assert!(!clf.is_trained());
        assert!(matches!(
            clf.predict(&examples[0]),
            Err(ClassifierError::NotTrained)
        ));

        clf.train(examples).unwrap();
        assert!(clf.is_trained());
        assert!(accuracy(&clf, examples) >= 0.9);

        let p = clf.predict(&examples[0]).unwrap();
        assert!((0.0..=1.0).contains(&p.confidence));
    }


    #[test]
    fn every_classifier() {
        let examples = gaussian_clusters(80, 6, 0.3, (3, 4), 17);

        check_lifecycle(Binary::new(DecisionStump::default()), &examples);
        check_lifecycle(Binary::new(AdaBoost::new()), &examples);
        check_lifecycle(Binary::new(VotedPerceptron::default()), &examples);
        check_lifecycle(Binary::new(LogisticRegression::default()), &examples);
        check_lifecycle(KNearestNeighbors::default().k(5), &examples);
        check_lifecycle(Online::new(Binary::new(DecisionStump::default())), &examples);
    }


    #[test]
    fn confidence_flags() {
        assert!(!Binary::new(DecisionStump::default()).computes_confidence());
        assert!(!Binary::new(AdaBoost::new()).computes_confidence());
        assert!(!Binary::new(VotedPerceptron::default()).computes_confidence());
        assert!(Binary::new(LogisticRegression::default()).computes_confidence());
        assert!(KNearestNeighbors::default().computes_confidence());
    }


    #[test]
    fn binary_adapter_maps_labels() {
        let examples = gaussian_clusters(40, 2, 0.2, (4, 3), 8);
        let mut clf = Binary::new(LogisticRegression::default());
        clf.train(&examples).unwrap();

        // The smaller label takes the negative slot.
        assert_eq!(clf.binary_class(3), Some(false));
        assert_eq!(clf.binary_class(4), Some(true));
        assert_eq!(clf.binary_class(5), None);

        let labels = clf.predict_all(&examples).unwrap();
        assert!(labels.iter().all(|l| *l == 3 || *l == 4));
    }


    #[test]
    fn binary_adapter_rejects_a_third_label() {
        let mut examples = gaussian_clusters(20, 2, 0.2, (0, 1), 3);
        examples.push(Example::new(2, &[0.0, 0.0]).unwrap());
        let mut clf = Binary::new(DecisionStump::default());
        assert!(matches!(
            clf.train(&examples),
            Err(ClassifierError::InvalidTrainingSet { .. })
        ));
        assert!(!clf.is_trained());

        // A third label arriving through incremental training.
        let mut clf = Binary::new(VotedPerceptron::default());
        clf.train(&gaussian_clusters(20, 2, 0.2, (0, 1), 4)).unwrap();
        let extra = vec![Example::new(7, &[1.0, 1.0]).unwrap()];
        assert!(matches!(
            clf.train_more(&extra),
            Err(ClassifierError::UnknownClass(7))
        ));
    }


    #[test]
    fn single_class_training() {
        let examples = gaussian_clusters(10, 2, 0.2, (6, 6), 5);
        let mut clf = Binary::new(DecisionStump::default());
        clf.train(&examples).unwrap();
        for label in clf.predict_all(&examples).unwrap() {
            assert_eq!(label, 6);
        }

        // Queries outside the training range.
        let mut stump = Binary::new(DecisionStump::default());
        stump.train(&[
            Example::new(6, &[1.0]).unwrap(),
            Example::new(6, &[2.0]).unwrap(),
        ]).unwrap();
        for x in [-5.0, 1.5, 50.0] {
            let query = Example::new(0, &[x]).unwrap();
            assert_eq!(stump.predict(&query).unwrap().label, 6);
        }
    }


    #[test]
    fn weight_length_must_match() {
        let examples = gaussian_clusters(10, 2, 0.2, (0, 1), 6);
        let mut clf = Binary::new(DecisionStump::default());
        assert!(matches!(
            clf.train_weighted(&examples, &[1.0; 3]),
            Err(ClassifierError::WeightLengthMismatch { examples: 10, weights: 3 })
        ));
    }
}


/// Tests for `KNearestNeighbors`.
#[cfg(test)]
pub mod knn_tests {
    use super::*;

    #[test]
    fn three_classes() {
        let mut examples = gaussian_clusters(60, 3, 0.2, (0, 1), 21);
        examples.extend(
            gaussian_clusters(30, 3, 0.2, (2, 2), 22)
                .into_iter()
                .map(|ex| {
                    let shifted = ex.iter().map(|x| x + 5.0).collect();
                    Example::from_vec(2, shifted).unwrap()
                })
        );
        let (train, test) = train_test_split(&examples, 0.2, 1).unwrap();

        let mut knn = KNearestNeighbors::default().k(3).weighted_voting(true);
        knn.train(&train).unwrap();
        assert!(accuracy(&knn, &test) >= 0.9);
    }


    #[test]
    fn incremental_and_empty() {
        let mut knn = KNearestNeighbors::default();
        knn.train(&[]).unwrap();
        let query = Example::new(0, &[0.0]).unwrap();
        assert!(matches!(
            knn.predict(&query),
            Err(ClassifierError::EmptyNeighborSet)
        ));

        knn.train_more(&[Example::new(8, &[1.0]).unwrap()]).unwrap();
        let p = knn.predict(&query).unwrap();
        assert_eq!(p.label, 8);
        assert_abs_diff_eq!(p.confidence, 1.0);
    }
}


/// Tests for `LogisticRegression`.
#[cfg(test)]
pub mod logistic_tests {
    use super::*;

    #[test]
    fn separable_clusters() {
        let examples = gaussian_clusters(100, 4, 0.3, (0, 1), 31);
        let mut clf = Binary::new(LogisticRegression::default());
        clf.train(&examples).unwrap();

        let model = clf.inner();
        assert!(model.iterations() <= model.config().max_iterations);
        assert_eq!(accuracy(&clf, &examples), 1.0);

        for ex in &examples {
            let p = clf.predict(ex).unwrap();
            assert!(p.confidence >= 0.5 && p.confidence <= 1.0);
        }
    }


    #[test]
    fn converges_on_overlapping_clusters() {
        let examples = gaussian_clusters(200, 3, 1.5, (0, 1), 32);
        let mut clf = Binary::new(LogisticRegression::default().lambda(0.01));
        clf.train(&examples).unwrap();
        assert!(clf.inner().converged());
        assert!(accuracy(&clf, &examples) >= 0.6);
    }
}


/// Tests for `VotedPerceptron` and the online adapters.
#[cfg(test)]
pub mod online_tests {
    use super::*;

    #[test]
    fn perceptron_kernels() {
        let examples = gaussian_clusters(80, 5, 0.3, (0, 1), 41);
        let kernels = [
            Kernel::Basic,
            Kernel::Polynomial { scale: 1.0, offset: 0.0, degree: 3 },
            Kernel::Tanh { scale: 0.5, offset: 0.0 },
        ];
        for kernel in kernels {
            let mut clf = Binary::new(
                VotedPerceptron::default().kernel(kernel).epochs(2)
            );
            clf.train(&examples).unwrap();
            assert!(accuracy(&clf, &examples) >= 0.9, "{kernel:?}");
        }
    }


    #[test]
    fn native_train_more_matches_batch() {
        let examples = gaussian_clusters(40, 3, 0.3, (0, 1), 42);
        let (head, tail) = examples.split_at(25);

        let mut batch = Binary::new(VotedPerceptron::default());
        batch.train(&examples).unwrap();

        let mut online = Binary::new(VotedPerceptron::default());
        online.train(head).unwrap();
        online.train_more(tail).unwrap();

        assert_abs_diff_eq!(
            batch.inner().confidence_range(),
            online.inner().confidence_range()
        );
        assert_eq!(batch.inner().n_mistakes(), online.inner().n_mistakes());
        assert_eq!(
            batch.predict_all(&examples).unwrap(),
            online.predict_all(&examples).unwrap()
        );
    }


    #[test]
    fn online_adapter_retrains_on_history() {
        let examples = gaussian_clusters(60, 2, 0.3, (0, 1), 43);
        let (head, tail) = examples.split_at(20);

        let mut clf = Online::new(Binary::new(LogisticRegression::default()));
        clf.train_more(head).unwrap();
        assert!(clf.is_trained());
        assert_eq!(clf.history().len(), 20);

        clf.train_more(tail).unwrap();
        assert_eq!(clf.history().len(), 60);

        let mut batch = Binary::new(LogisticRegression::default());
        batch.train(&examples).unwrap();
        for (a, b) in clf.inner().inner().weights()
            .iter()
            .zip(batch.inner().weights())
        {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }

        // A failed retrain keeps the previous history.
        let bad = vec![Example::new(0, &[1.0, 2.0, 3.0]).unwrap()];
        assert!(clf.train_more(&bad).is_err());
        assert_eq!(clf.history().len(), 60);
    }
}


/// Tests for configuration, normalization, and evaluation helpers.
#[cfg(test)]
pub mod config_tests {
    use super::*;

    #[test]
    fn configs_from_json() {
        let config: AdaBoostConfig = config_from_json(
            r#"{ "rounds": 25, "mode": "SequentialTimeBin" }"#
        ).unwrap();
        assert_eq!(config.rounds, 25);
        assert_eq!(config.mode, WeakLearnerTrainingMode::SequentialTimeBin);
        assert_eq!(config.channel_count, 14);

        let config: VotedPerceptronConfig = config_from_json(
            r#"{ "kernel": { "Polynomial": { "scale": 2.0, "offset": 1.0, "degree": 2 } } }"#
        ).unwrap();
        assert_eq!(config.epochs, 1);
        assert_eq!(
            config.kernel,
            Kernel::Polynomial { scale: 2.0, offset: 1.0, degree: 2 }
        );

        let err = config_from_json::<LogisticRegressionConfig>(
            r#"{ "lambda": 2.0 }"#
        ).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidParameters(_)));
        assert!(err.to_string().contains("lambda"));

        assert!(matches!(
            config_from_json::<KnnConfig>("{ k: 3 }"),
            Err(ClassifierError::Config(_))
        ));
    }


    #[test]
    fn defaults() {
        assert_eq!(KnnConfig::default().k, 1);
        assert!(!KnnConfig::default().weighted_voting);
        assert_eq!(DecisionStumpConfig::default().feature, 0);
        assert_eq!(AdaBoostConfig::default().mode, WeakLearnerTrainingMode::RandomSubset);

        let plr = LogisticRegressionConfig::default();
        assert_eq!(plr.lambda, 1e-4);
        assert_eq!(plr.min_distance, 1e-6);
        assert_eq!(plr.max_iterations, 100);
    }


    #[test]
    fn z_scored_training() {
        let examples = gaussian_clusters(100, 4, 0.3, (0, 1), 51)
            .into_iter()
            .map(|ex| {
                let raw = ex.iter().map(|x| 1000.0 + 50.0 * x).collect();
                Example::from_vec(ex.class(), raw).unwrap()
            })
            .collect::<Vec<_>>();
        let (normalized, stats) = z_score(&examples).unwrap();

        for j in 0..4 {
            let mean = normalized.iter().map(|e| e.value_at(j)).sum::<f64>() / 100.0;
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-9);
        }

        let mut clf = KNearestNeighbors::default().k(3);
        clf.train(&normalized).unwrap();
        let query = stats.apply(&examples[1]).unwrap();
        assert_eq!(clf.predict(&query).unwrap().label, examples[1].class());
    }


    #[test]
    fn cross_validation_folds() {
        let examples = gaussian_clusters(50, 3, 0.3, (0, 1), 61);
        let cv = CrossValidation::new(&examples)
            .n_folds(5)
            .seed(777)
            .verbose(true)
            .shuffle();
        assert!(cv.validate().is_ok());

        let mut n_folds = 0;
        for (train, test) in cv {
            assert_eq!((train.len(), test.len()), (40, 10));
            let mut clf = Binary::new(DecisionStump::default());
            clf.train(&train).unwrap();
            assert!(accuracy(&clf, &test) >= 0.9);
            n_folds += 1;
        }
        assert_eq!(n_folds, 5);
    }
}
