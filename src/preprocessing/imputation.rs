//! Заполнение пропусков Age и Fare

use ndarray::Array1;

use crate::types::RawPassenger;

/// Статистики заполнения, вычисляемые только по обучающей выборке:
/// среднее для Age, медиана для Fare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Imputer {
    pub age_mean: f64,
    pub fare_median: f64,
}

impl Imputer {
    /// Пустая колонка даёт NaN, который затем попадает в заполненные ячейки
    pub fn fit(train: &[RawPassenger]) -> Self {
        let ages: Array1<f64> = train.iter().filter_map(|p| p.age).filter(|v| !v.is_nan()).collect();
        let fares: Vec<f64> = train.iter().filter_map(|p| p.fare).filter(|v| !v.is_nan()).collect();

        let imputer = Self {
            age_mean: ages.mean().unwrap_or(f64::NAN),
            fare_median: median(fares),
        };

        if imputer.age_mean.is_nan() {
            tracing::warn!("Age column has no values; missing ages will be filled with NaN");
        }
        if imputer.fare_median.is_nan() {
            tracing::warn!("Fare column has no values; missing fares will be filled with NaN");
        }

        imputer
    }

    /// Заполняет пропуски статистиками обучающей выборки
    pub fn transform(&self, records: &mut [RawPassenger]) -> usize {
        let mut filled = 0;
        for record in records.iter_mut() {
            if record.age.map_or(true, f64::is_nan) {
                record.age = Some(self.age_mean);
                filled += 1;
            }
            if record.fare.map_or(true, f64::is_nan) {
                record.fare = Some(self.fare_median);
                filled += 1;
            }
        }
        filled
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
