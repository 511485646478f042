//! Присоединение меток и кодирование категориальных признаков

use std::collections::HashMap;

use crate::config::LabelPolicy;
use crate::error::{Error, Result};
use crate::types::{LabelRecord, Passenger, RawPassenger};

pub struct FeatureEngineer;

impl FeatureEngineer {
    /// Добавляет Survived к тестовой выборке по идентификатору (текстовому ключу).
    /// Значения цели берутся только из таблицы меток.
    pub fn join_labels(
        mut test: Vec<RawPassenger>,
        labels: &[LabelRecord],
        policy: LabelPolicy,
    ) -> Result<Vec<RawPassenger>> {
        let mut by_id: HashMap<&str, u8> = HashMap::with_capacity(labels.len());
        for label in labels {
            if by_id.insert(label.passenger_id.as_str(), label.survived).is_some() {
                return Err(Error::DuplicateLabel {
                    passenger_id: label.passenger_id.clone(),
                });
            }
        }

        let mut unlabeled = 0;
        for record in test.iter_mut() {
            record.survived = by_id.get(record.passenger_id.as_str()).copied();
            if record.survived.is_none() {
                if policy == LabelPolicy::Strict {
                    return Err(Error::MissingLabel {
                        passenger_id: record.passenger_id.clone(),
                    });
                }
                unlabeled += 1;
            }
        }

        if unlabeled > 0 {
            tracing::warn!("{} test passengers have no label; Survived left empty", unlabeled);
        }

        Ok(test)
    }

    /// Sex: "male" -> 1, "female" -> 0. Прочие значения отклоняются.
    pub fn encode_sex(records: Vec<RawPassenger>) -> Result<Vec<Passenger>> {
        records
            .into_iter()
            .map(|r| {
                let sex = match r.sex.as_str() {
                    "male" => 1,
                    "female" => 0,
                    _ => {
                        return Err(Error::InvalidSex {
                            passenger_id: r.passenger_id,
                            value: r.sex,
                        })
                    }
                };

                Ok(Passenger {
                    passenger_id: r.passenger_id,
                    pclass: r.pclass,
                    sex,
                    age: r.age.unwrap_or(f64::NAN),
                    sib_sp: r.sib_sp,
                    parch: r.parch,
                    fare: r.fare.unwrap_or(f64::NAN),
                    survived: r.survived,
                })
            })
            .collect()
    }
}
