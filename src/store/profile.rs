use crate::chart::{BirthParameters, Sex};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A persisted birth profile. How profiles are stored is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub label: String,
    pub birth_date: NaiveDate,
    pub birth_time_slot: u8,
    pub sex: Sex,
}

impl Profile {
    pub fn birth(&self) -> BirthParameters {
        BirthParameters {
            birth_date: self.birth_date,
            birth_time_slot: self.birth_time_slot,
            sex: self.sex,
        }
    }
}
