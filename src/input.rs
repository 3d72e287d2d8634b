//! Word input: raw text, a bare word list, or explicit weights.

use std::collections::HashMap;

use rand::Rng;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use crate::error::{CloudError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct WordEntry {
    pub text: String,
    pub weight: f64,
}

/// Unique words with positive weights, in first-seen order.
///
/// Keys are NFC-normalized, so canonically equivalent spellings of a word (for
/// example a precomposed two-part vowel sign versus its parts) collapse into
/// one entry. Re-inserting a word replaces its weight but keeps its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightedWords {
    entries: Vec<WordEntry>,
    index: HashMap<String, usize>,
}

impl WeightedWords {
    pub fn new() -> WeightedWords {
        WeightedWords::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<WeightedWords>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut words = WeightedWords::new();
        for (text, weight) in pairs {
            words.insert(text.as_ref(), weight)?;
        }
        Ok(words)
    }

    pub fn insert(&mut self, text: &str, weight: f64) -> Result<()> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(CloudError::InvalidWeight {
                word: text.to_owned(),
                weight,
            });
        }
        let text: String = text.nfc().collect();
        match self.index.get(&text) {
            Some(&ix) => self.entries[ix].weight = weight,
            None => {
                self.index.insert(text.clone(), self.entries.len());
                self.entries.push(WordEntry { text, weight });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    /// Heaviest first. Equal weights keep first-seen order.
    pub fn by_weight(&self) -> Vec<&WordEntry> {
        let mut sorted: Vec<&WordEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        sorted
    }
}

/// Integer weights drawn uniformly from `min..=max` for unweighted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomWeights {
    pub min: u32,
    pub max: u32,
}

impl Default for RandomWeights {
    fn default() -> Self {
        RandomWeights { min: 1, max: 20 }
    }
}

impl RandomWeights {
    pub fn draw<G: Rng + ?Sized>(&self, rng: &mut G) -> f64 {
        rng.random_range(self.min..=self.max) as f64
    }

    fn validate(&self) -> Result<()> {
        if self.min == 0 || self.min > self.max {
            return Err(CloudError::InvalidConfig(format!(
                "random weight range {}..={} must be positive and non-empty",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum WordInput {
    /// Whitespace-separated words, weighted at random.
    Text(String),
    /// Words taken verbatim, weighted at random.
    List(Vec<String>),
    Weighted(Vec<(String, f64)>),
}

impl WordInput {
    pub fn text(text: impl Into<String>) -> WordInput {
        WordInput::Text(text.into())
    }

    pub fn list<I, S>(words: I) -> WordInput
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WordInput::List(words.into_iter().map(Into::into).collect())
    }

    pub fn weighted<I, S>(pairs: I) -> WordInput
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        WordInput::Weighted(pairs.into_iter().map(|(w, f)| (w.into(), f)).collect())
    }

    /// Accepts a string, an array of strings, or an object mapping words to numbers.
    pub fn from_json(value: &Value) -> Result<WordInput> {
        match value {
            Value::String(text) => Ok(WordInput::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_owned).ok_or_else(|| {
                        CloudError::UnsupportedInputType(format!(
                            "a list containing {}",
                            describe(item)
                        ))
                    })
                })
                .collect::<Result<_>>()
                .map(WordInput::List),
            Value::Object(map) => map
                .iter()
                .map(|(word, weight)| {
                    weight.as_f64().map(|w| (word.clone(), w)).ok_or_else(|| {
                        CloudError::UnsupportedInputType(format!(
                            "a mapping with {} as the weight of {:?}",
                            describe(weight),
                            word
                        ))
                    })
                })
                .collect::<Result<_>>()
                .map(WordInput::Weighted),
            other => Err(CloudError::UnsupportedInputType(describe(other).into())),
        }
    }

    pub fn resolve<G: Rng + ?Sized>(
        self,
        weights: &RandomWeights,
        rng: &mut G,
    ) -> Result<WeightedWords> {
        match self {
            WordInput::Text(text) => {
                weights.validate()?;
                let mut words = WeightedWords::new();
                for word in text.split_whitespace() {
                    words.insert(word, weights.draw(rng))?;
                }
                Ok(words)
            }
            WordInput::List(list) => {
                weights.validate()?;
                let mut words = WeightedWords::new();
                for word in &list {
                    words.insert(word, weights.draw(rng))?;
                }
                Ok(words)
            }
            WordInput::Weighted(pairs) => WeightedWords::from_pairs(pairs),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
