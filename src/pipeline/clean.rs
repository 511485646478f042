//! Очистка сырых таблиц Titanic

use crate::config::{CleanConfig, LabelPolicy};
use crate::error::{Error, Result};
use crate::io::{self, KeyedRecords};
use crate::preprocessing::{FeatureEngineer, Imputer};
use crate::types::{LabelRecord, Passenger, RawPassenger, FEATURE_COLUMNS, TARGET_COLUMN};

#[derive(Debug, Clone, PartialEq)]
pub struct CleanReport {
    pub imputer: Imputer,
    pub train_rows: usize,
    pub test_rows: usize,
    pub unlabeled_test_rows: usize,
}

/// Присоединение меток, заполнение пропусков по статистикам train, кодирование Sex
pub fn clean(
    train: Vec<RawPassenger>,
    test: Vec<RawPassenger>,
    labels: &[LabelRecord],
    policy: LabelPolicy,
) -> Result<(Vec<Passenger>, Vec<Passenger>, Imputer)> {
    if let Some(row) = train.iter().find(|p| p.survived.is_none()) {
        return Err(Error::MissingTrainingTarget {
            passenger_id: row.passenger_id.clone(),
        });
    }

    let mut test = FeatureEngineer::join_labels(test, labels, policy)?;
    let mut train = train;

    let imputer = Imputer::fit(&train);
    let filled = imputer.transform(&mut train) + imputer.transform(&mut test);
    tracing::debug!(
        "Filled {} cells (Age mean {:.4}, Fare median {:.4})",
        filled,
        imputer.age_mean,
        imputer.fare_median
    );

    let train = FeatureEngineer::encode_sex(train)?;
    let test = FeatureEngineer::encode_sex(test)?;

    Ok((train, test, imputer))
}

pub fn run_clean(config: &CleanConfig) -> Result<CleanReport> {
    let mut train_columns = FEATURE_COLUMNS.to_vec();
    let test_columns = train_columns.clone();
    train_columns.push(TARGET_COLUMN);

    let train: KeyedRecords<RawPassenger> = io::read_keyed_records(&config.train_path, &train_columns)?;
    let mut test: KeyedRecords<RawPassenger> = io::read_keyed_records(&config.test_path, &test_columns)?;
    let labels: KeyedRecords<LabelRecord> = io::read_keyed_records(&config.labels_path, &[TARGET_COLUMN])?;
    tracing::info!(
        "Raw data imported: {} train rows, {} test rows, {} labels",
        train.records.len(),
        test.records.len(),
        labels.records.len()
    );

    // Цель тестовой выборки берётся только из таблицы меток
    for row in test.records.iter_mut() {
        row.survived = None;
    }

    let (cleaned_train, cleaned_test, imputer) =
        clean(train.records, test.records, &labels.records, config.label_policy)?;
    tracing::info!("Finished cleaning");

    io::write_records_with_header(
        &config.cleaned_train_path,
        &cleaned_header(&train.index_name),
        &cleaned_train,
    )?;
    io::write_records_with_header(
        &config.cleaned_test_path,
        &cleaned_header(&test.index_name),
        &cleaned_test,
    )?;
    tracing::info!(
        "Clean data exported to {} and {}",
        config.cleaned_train_path.display(),
        config.cleaned_test_path.display()
    );

    Ok(CleanReport {
        imputer,
        train_rows: cleaned_train.len(),
        test_rows: cleaned_test.len(),
        unlabeled_test_rows: cleaned_test.iter().filter(|p| p.survived.is_none()).count(),
    })
}

/// Заголовок очищенной таблицы: исходное имя индекса, признаки, Survived
fn cleaned_header(index_name: &str) -> Vec<&str> {
    let mut header = vec![index_name];
    header.extend(FEATURE_COLUMNS);
    header.push(TARGET_COLUMN);
    header
}
