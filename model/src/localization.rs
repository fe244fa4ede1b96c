use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Locale tag (e.g. `en-US`) to translated string. `*_localizations` wire
/// fields deserialize into this; a null or absent field is an empty map.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct LocalizationMap(HashMap<Box<str>, Box<str>>);

impl LocalizationMap {
    pub fn new() -> LocalizationMap {
        LocalizationMap(HashMap::new())
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(|s| &**s)
    }

    pub fn insert(&mut self, locale: impl Into<Box<str>>, value: impl Into<Box<str>>) {
        self.0.insert(locale.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (&**k, &**v))
    }
}
