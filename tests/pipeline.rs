use std::fs;
use std::path::{Path, PathBuf};

use titanic_survival::io::{read_frame, read_records};
use titanic_survival::pipeline::analysis::{
    ACCURACIES_FILE, FEATURE_RANKS_FILE, MODEL_FILE, TEST_PREDICTION_FILE, TRAIN_PREDICTION_FILE,
};
use titanic_survival::{
    run_analysis, run_clean, AccuracySummary, AnalysisConfig, CleanConfig, Error, FeatureRank,
    LabelPolicy, Passenger, SearchConfig,
};

const RAW_HEADER: &str = "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";

/// Выживают только женщины; остальные признаки не разделяют классы
fn raw_row(id: usize, with_target: bool) -> String {
    let male = id % 2 == 0;
    let age = if id % 7 == 3 { String::new() } else { (18 + (id * 7) % 40).to_string() };
    let fare = if id % 11 == 5 { String::new() } else { format!("{:.2}", 7.25 + ((id * 13) % 50) as f64) };
    let survived = if with_target { format!("{},", u8::from(!male)) } else { String::new() };

    format!(
        "{id},{survived}{pclass},\"Doe, {title} {id}\",{sex},{age},{sibsp},{parch},A/5 {id},{fare},,S",
        pclass = id % 3 + 1,
        title = if male { "Mr." } else { "Mrs." },
        sex = if male { "male" } else { "female" },
        sibsp = id % 4,
        parch = (id / 2) % 3,
    )
}

fn write_raw(dir: &Path, train_rows: std::ops::Range<usize>, test_rows: std::ops::Range<usize>) -> CleanConfig {
    let train_path = dir.join("train.csv");
    let test_path = dir.join("test.csv");
    let labels_path = dir.join("gender_submission.csv");

    let mut train = vec![RAW_HEADER.to_string()];
    train.extend(train_rows.map(|id| raw_row(id, true)));
    fs::write(&train_path, train.join("\n")).unwrap();

    let test_header = RAW_HEADER.replace("Survived,", "");
    let mut test = vec![test_header];
    let mut labels = vec!["PassengerId,Survived".to_string()];
    for id in test_rows {
        test.push(raw_row(id, false));
        labels.push(format!("{id},{}", u8::from(id % 2 == 1)));
    }
    fs::write(&test_path, test.join("\n")).unwrap();
    fs::write(&labels_path, labels.join("\n")).unwrap();

    CleanConfig {
        train_path,
        test_path,
        labels_path,
        cleaned_train_path: dir.join("cleaned_train.csv"),
        cleaned_test_path: dir.join("cleaned_test.csv"),
        label_policy: LabelPolicy::Left,
    }
}

fn analysis_config(clean: &CleanConfig, output_dir: PathBuf) -> AnalysisConfig {
    AnalysisConfig {
        train_path: clean.cleaned_train_path.clone(),
        test_path: clean.cleaned_test_path.clone(),
        output_dir,
        search: SearchConfig::default(),
    }
}

#[test]
fn cleaner_writes_complete_numeric_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_raw(dir.path(), 1..61, 892..912);

    let report = run_clean(&config).unwrap();
    assert_eq!(report.train_rows, 60);
    assert_eq!(report.test_rows, 20);
    assert_eq!(report.unlabeled_test_rows, 0);

    let header = fs::read_to_string(&config.cleaned_train_path).unwrap();
    assert!(header.starts_with("PassengerId,Pclass,Sex,Age,SibSp,Parch,Fare,Survived\n"));

    let train: Vec<Passenger> = read_records(&config.cleaned_train_path, &[]).unwrap();
    let test: Vec<Passenger> = read_records(&config.cleaned_test_path, &[]).unwrap();

    for p in train.iter().chain(test.iter()) {
        assert!(p.age.is_finite() && p.fare.is_finite());
        assert!(p.sex <= 1);
        assert!(p.survived.is_some());
    }
    assert_eq!(train.iter().filter(|p| p.sex == 1).count(), 30);

    // Пропуски в test заполнены статистиками train
    let id = |p: &Passenger| p.passenger_id.parse::<usize>().unwrap();
    let filled_age = test.iter().find(|p| id(p) % 7 == 3).unwrap().age;
    assert_eq!(filled_age, report.imputer.age_mean);
    let filled_fare = test.iter().find(|p| id(p) % 11 == 5).unwrap().fare;
    assert_eq!(filled_fare, report.imputer.fare_median);
}

#[test]
fn cleaner_uses_training_statistics_for_test_table() {
    let dir = tempfile::tempdir().unwrap();
    let header = "PassengerId,Survived,Pclass,Sex,Age,SibSp,Parch,Fare";
    fs::write(
        dir.path().join("train.csv"),
        format!("{header}\n1,0,3,male,22,1,0,7\n2,1,1,female,,1,0,8\n3,1,3,female,24,0,0,\n"),
    )
    .unwrap();
    fs::write(
        dir.path().join("test.csv"),
        "PassengerId,Pclass,Sex,Age,SibSp,Parch,Fare\n4,3,male,90,0,0,100\n5,3,female,,0,0,200\n6,2,male,80,0,0,\n",
    )
    .unwrap();
    fs::write(dir.path().join("labels.csv"), "PassengerId,Survived\n6,0\n4,0\n5,1\n").unwrap();

    let config = CleanConfig {
        train_path: dir.path().join("train.csv"),
        test_path: dir.path().join("test.csv"),
        labels_path: dir.path().join("labels.csv"),
        cleaned_train_path: dir.path().join("out_train.csv"),
        cleaned_test_path: dir.path().join("out_test.csv"),
        label_policy: LabelPolicy::Strict,
    };
    run_clean(&config).unwrap();

    assert_eq!(
        fs::read_to_string(&config.cleaned_test_path).unwrap(),
        "PassengerId,Pclass,Sex,Age,SibSp,Parch,Fare,Survived\n\
         4,3,1,90.0,0,0,100.0,0\n\
         5,3,0,23.0,0,0,200.0,1\n\
         6,2,1,80.0,0,0,7.5,0\n"
    );
}

#[test]
fn cleaner_keys_on_first_column_whatever_its_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("train.csv"),
        "Id,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Fare\n\
         P001,0,3,\"Braund, Mr. Owen\",male,22,1,0,7\n\
         P002,1,1,\"Cumings, Mrs. John\",female,,1,0,8\n\
         P003,1,3,\"Heikkinen, Miss. Laina\",female,24,0,0,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("test.csv"),
        "Id,Pclass,Sex,Age,SibSp,Parch,Fare\nT-2,3,female,,0,0,200\nT-1,3,male,90,0,0,100\n",
    )
    .unwrap();
    fs::write(dir.path().join("labels.csv"), "Key,Survived\nT-1,0\nT-2,1\n").unwrap();

    let config = CleanConfig {
        train_path: dir.path().join("train.csv"),
        test_path: dir.path().join("test.csv"),
        labels_path: dir.path().join("labels.csv"),
        cleaned_train_path: dir.path().join("out_train.csv"),
        cleaned_test_path: dir.path().join("out_test.csv"),
        label_policy: LabelPolicy::Strict,
    };
    let report = run_clean(&config).unwrap();
    assert_eq!(report.unlabeled_test_rows, 0);

    assert_eq!(
        fs::read_to_string(&config.cleaned_train_path).unwrap(),
        "Id,Pclass,Sex,Age,SibSp,Parch,Fare,Survived\n\
         P001,3,1,22.0,1,0,7.0,0\n\
         P002,1,0,23.0,1,0,8.0,1\n\
         P003,3,0,24.0,0,0,7.5,1\n"
    );
    assert_eq!(
        fs::read_to_string(&config.cleaned_test_path).unwrap(),
        "Id,Pclass,Sex,Age,SibSp,Parch,Fare,Survived\n\
         T-2,3,0,23.0,0,0,200.0,1\n\
         T-1,3,1,90.0,0,0,100.0,0\n"
    );

    // Обучение читает индекс по позиции, поэтому те же файлы подходят без переименования
    let frame = read_frame(&config.cleaned_test_path).unwrap();
    assert_eq!(frame.index_name, "Id");
    assert_eq!(frame.index, vec!["T-2", "T-1"]);
}

#[test]
fn cleaner_rejects_missing_columns_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_raw(dir.path(), 1..21, 900..905);
    fs::write(&config.train_path, "PassengerId,Survived,Pclass,Sex,Age\n1,0,3,male,22\n").unwrap();

    let err = run_clean(&config).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "SibSp"));
    assert!(!config.cleaned_train_path.exists());
    assert!(!config.cleaned_test_path.exists());
}

#[test]
fn strict_policy_fails_on_unlabeled_passenger() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_raw(dir.path(), 1..21, 900..905);
    fs::write(&config.labels_path, "PassengerId,Survived\n900,0\n901,1\n").unwrap();

    config.label_policy = LabelPolicy::Strict;
    assert!(matches!(
        run_clean(&config),
        Err(Error::MissingLabel { ref passenger_id }) if passenger_id == "902"
    ));

    config.label_policy = LabelPolicy::Left;
    let report = run_clean(&config).unwrap();
    assert_eq!(report.unlabeled_test_rows, 3);

    // Пустая цель не проходит split_data
    let analysis = analysis_config(&config, dir.path().join("results"));
    assert!(matches!(run_analysis(&analysis), Err(Error::InvalidTarget { .. })));
}

#[test]
fn analysis_selects_depth_and_exports_reports() {
    let dir = tempfile::tempdir().unwrap();
    let clean = write_raw(dir.path(), 1..61, 892..912);
    run_clean(&clean).unwrap();

    let output_dir = dir.path().join("results");
    let report = run_analysis(&analysis_config(&clean, output_dir.clone())).unwrap();

    // Все глубины дают точность 1.0, выбирается первая
    assert_eq!(report.best_depth, 1);

    for name in [MODEL_FILE, TRAIN_PREDICTION_FILE, TEST_PREDICTION_FILE, ACCURACIES_FILE, FEATURE_RANKS_FILE] {
        assert!(output_dir.join(name).exists(), "{name} missing");
    }

    let accuracies: Vec<AccuracySummary> = read_records(&output_dir.join(ACCURACIES_FILE), &[]).unwrap();
    assert_eq!(accuracies.len(), 2);
    assert_eq!(accuracies[0].set, "train");
    assert_eq!(accuracies[0].n_total, 60);
    assert_eq!(accuracies[1].set, "test");
    assert_eq!(accuracies[1].n_total, 20);
    assert!(accuracies.iter().all(|a| a.accuracy == 1.0));
    assert!(accuracies.iter().all(|a| a.n_correct_pred + a.n_incorrect_pred == a.n_total));

    let ranks: Vec<FeatureRank> = read_records(&output_dir.join(FEATURE_RANKS_FILE), &[]).unwrap();
    assert_eq!(ranks.len(), 6);
    assert_eq!(ranks[0].feature, "Sex");
    assert!(ranks.iter().all(|r| r.importance >= 0.0));
    assert_eq!(ranks.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    let rest: Vec<&str> = ranks[1..].iter().map(|r| r.feature.as_str()).collect();
    assert_eq!(rest, vec!["Pclass", "Age", "SibSp", "Parch", "Fare"]);

    let predicted = read_frame(&output_dir.join(TEST_PREDICTION_FILE)).unwrap();
    assert_eq!(predicted.columns.last().map(String::as_str), Some("Prediction"));
    assert_eq!(predicted.nrows(), 20);
    assert_eq!(predicted.column("Prediction").unwrap(), predicted.column("Survived").unwrap());

    let model: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output_dir.join(MODEL_FILE)).unwrap()).unwrap();
    assert_eq!(model["selected_depth"], 1);
    assert_eq!(model["feature_names"][1], "Sex");
}

#[test]
fn analysis_bounds_hold_on_noisy_data() {
    let dir = tempfile::tempdir().unwrap();
    let clean = write_raw(dir.path(), 1..81, 892..922);
    run_clean(&clean).unwrap();

    // Переворачиваем часть меток train, чтобы данные не были разделимы
    let mut train = fs::read_to_string(&clean.cleaned_train_path).unwrap();
    train = train
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i > 0 && i % 9 == 0 {
                let (head, target) = line.rsplit_once(',').unwrap();
                format!("{head},{}", if target == "1" { 0 } else { 1 })
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&clean.cleaned_train_path, train).unwrap();

    let mut config = analysis_config(&clean, dir.path().join("results"));
    config.search.max_depth = 12;
    let report = run_analysis(&config).unwrap();

    assert!((1..=12).contains(&report.best_depth));
    for summary in &report.accuracies {
        assert!(summary.accuracy >= 0.5 && summary.accuracy <= 1.0);
    }
    assert_eq!(report.feature_ranks.len(), 6);
    let total: f64 = report.feature_ranks.iter().map(|r| r.importance).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(report
        .feature_ranks
        .windows(2)
        .all(|w| w[0].importance >= w[1].importance));
}
