/// Типы данных пассажиров и результатов анализа

use serde::{Deserialize, Serialize};

pub const PASSENGER_ID: &str = "PassengerId";
pub const TARGET_COLUMN: &str = "Survived";
pub const PREDICTION_COLUMN: &str = "Prediction";

/// Признаки модели в порядке колонок очищенной таблицы
pub const FEATURE_COLUMNS: [&str; 6] = ["Pclass", "Sex", "Age", "SibSp", "Parch", "Fare"];

/// Строка сырой таблицы (train.csv / test.csv).
/// Идентификатор - первая колонка файла под любым заголовком, остальные
/// колонки выбираются по имени. Лишние (Name, Ticket, Cabin, ...) отбрасываются.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPassenger {
    #[serde(rename = "PassengerId")]
    pub passenger_id: String,
    #[serde(rename = "Pclass")]
    pub pclass: u8,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Age")]
    pub age: Option<f64>,
    #[serde(rename = "SibSp")]
    pub sib_sp: u32,
    #[serde(rename = "Parch")]
    pub parch: u32,
    #[serde(rename = "Fare")]
    pub fare: Option<f64>,
    #[serde(rename = "Survived", default)]
    pub survived: Option<u8>,
}

/// Строка таблицы меток (gender_submission.csv)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LabelRecord {
    #[serde(rename = "PassengerId")]
    pub passenger_id: String,
    #[serde(rename = "Survived")]
    pub survived: u8,
}

/// Очищенный пассажир: пропуски заполнены, пол закодирован (male=1, female=0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(rename = "PassengerId")]
    pub passenger_id: String,
    #[serde(rename = "Pclass")]
    pub pclass: u8,
    #[serde(rename = "Sex")]
    pub sex: u8,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "SibSp")]
    pub sib_sp: u32,
    #[serde(rename = "Parch")]
    pub parch: u32,
    #[serde(rename = "Fare")]
    pub fare: f64,
    #[serde(rename = "Survived")]
    pub survived: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub set: String,
    pub n_total: usize,
    pub n_correct_pred: usize,
    pub n_incorrect_pred: usize,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRank {
    #[serde(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "Importance")]
    pub importance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthScore {
    pub max_depth: usize,
    pub mean_accuracy: f64,
}
