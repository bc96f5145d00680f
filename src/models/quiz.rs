use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ZoneId;

/// Raw quiz answers: question id (e.g. `q3`) to option id (e.g. `b`)
///
/// Backed by a `BTreeMap` so iteration order never depends on hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizAnswers(BTreeMap<String, String>);

impl QuizAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, replacing any earlier answer to the same question
    pub fn answer(&mut self, question_id: impl Into<String>, option_id: impl Into<String>) {
        self.0.insert(question_id.into(), option_id.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(q, a)| (q.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<Q: Into<String>, A: Into<String>> FromIterator<(Q, A)> for QuizAnswers {
    fn from_iter<I: IntoIterator<Item = (Q, A)>>(iter: I) -> Self {
        let answers = iter.into_iter().map(|(q, a)| (q.into(), a.into()));
        Self(answers.collect())
    }
}

/// Points an answer option awards to one zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneContribution {
    pub zone: ZoneId,
    pub points: u32,
}

/// One selectable answer to a quiz question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizOption {
    pub id: &'static str,
    pub label: &'static str,
    /// Partial credit: one option may feed up to three zones
    #[serde(skip)]
    pub contributions: Vec<ZoneContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}
