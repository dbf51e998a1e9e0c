use crate::config::{ListConfig, RemovalPolicy};
use crate::error::WheelError;
use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// A wheel option. Its text is its identity.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered, duplicate-free labels. Position decides the segment on the wheel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionList(Vec<Label>);

impl OptionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list by adding each label in turn, so every add rule applies.
    /// The result must also hold at least `min_options` labels.
    pub fn from_labels<I, S>(labels: I, limits: &ListConfig) -> Result<Self, WheelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for label in labels {
            list.add(label.as_ref(), limits)?;
        }
        if list.len() < limits.min_options {
            return Err(WheelError::BelowMinimum {
                min: limits.min_options,
            });
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Label> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Label] {
        &self.0
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.0.iter().position(|l| l == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Trims and checks `text` against the list. `exempt` is the index whose current
    /// value may be repeated (the option being edited).
    fn validate(
        &self,
        text: &str,
        limits: &ListConfig,
        exempt: Option<usize>,
    ) -> Result<Label, WheelError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(WheelError::EmptyOption);
        }
        if text.chars().count() > limits.max_option_length {
            return Err(WheelError::TooLong {
                max: limits.max_option_length,
            });
        }
        if let Some(i) = self.position(text)
            && Some(i) != exempt
        {
            return Err(WheelError::DuplicateOption(Label::new(text)));
        }
        Ok(Label::new(text))
    }

    pub fn add(&mut self, text: &str, limits: &ListConfig) -> Result<&Label, WheelError> {
        let label = self.validate(text, limits, None)?;
        if self.len() >= limits.max_options {
            return Err(WheelError::ListFull {
                max: limits.max_options,
            });
        }
        self.0.push(label);
        Ok(&self.0[self.0.len() - 1])
    }

    pub fn edit(
        &mut self,
        label: &str,
        text: &str,
        limits: &ListConfig,
    ) -> Result<&Label, WheelError> {
        let index = self
            .position(label)
            .ok_or_else(|| WheelError::UnknownOption(Label::new(label)))?;
        let replacement = self.validate(text, limits, Some(index))?;
        self.0[index] = replacement;
        Ok(&self.0[index])
    }

    pub fn remove(&mut self, label: &str, limits: &ListConfig) -> Result<Label, WheelError> {
        let index = self
            .position(label)
            .ok_or_else(|| WheelError::UnknownOption(Label::new(label)))?;
        if limits.removal == RemovalPolicy::Block && self.len() <= limits.min_options {
            return Err(WheelError::BelowMinimum {
                min: limits.min_options,
            });
        }
        Ok(self.0.remove(index))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
