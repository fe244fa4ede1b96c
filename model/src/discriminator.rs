use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::Formatter;

/// Legacy 4-digit user tag. Migrated accounts carry a zero discriminator
/// and are addressed by username alone.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Discriminator(pub u16);

impl Discriminator {
    pub fn is_migrated(self) -> bool {
        self.0 == 0
    }
}

impl Serialize for Discriminator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:0>4}", self.0))
    }
}

impl<'de> Deserialize<'de> for Discriminator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Discriminator(
            String::deserialize(deserializer)?
                .parse()
                .map_err(Error::custom)?,
        ))
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padded() {
        let json = serde_json::to_string(&Discriminator(7)).unwrap();
        assert_eq!(json, r#""0007""#);
    }

    #[test]
    fn test_migrated() {
        let d: Discriminator = serde_json::from_str(r#""0""#).unwrap();
        assert!(d.is_migrated());
        assert!(!Discriminator(1234).is_migrated());
    }
}
