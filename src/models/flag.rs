//! Boolean columns come back from the backend either as JSON booleans or as `0`/`1`.

use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
}

impl RawFlag {
    fn into_bool<E: de::Error>(self) -> Result<bool, E> {
        match self {
            RawFlag::Bool(value) => Ok(value),
            RawFlag::Int(0) => Ok(false),
            RawFlag::Int(1) => Ok(true),
            RawFlag::Int(other) => Err(E::custom(format!("invalid flag value {other}"))),
        }
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    RawFlag::deserialize(deserializer)?.into_bool()
}

pub mod option {
    use super::RawFlag;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        Option::<RawFlag>::deserialize(deserializer)?
            .map(RawFlag::into_bool)
            .transpose()
    }
}
