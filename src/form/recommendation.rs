use serde::{Deserialize, Serialize};

use crate::form::rules::{check, FieldErrors, FieldRule};

const RECOMMENDATION_RULES: [FieldRule; 6] = [
    FieldRule::required("title", "Title", 256),
    FieldRule::required("conclusion", "Conclusion", 1000),
    FieldRule::required("recommendation", "Recommendation", 1000),
    FieldRule::required("discussion", "Discussion", 1000),
    FieldRule::required_unbounded("combatFunction", "Combat function"),
    FieldRule::required_unbounded("level", "Level"),
];

/// Editable fields of one recommendation step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDraft {
    pub title: String,
    pub conclusion: String,
    pub recommendation: String,
    pub discussion: String,
    pub combat_function: String,
    pub level: String,
}

impl RecommendationDraft {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let values = [
            ("title", self.title.as_str()),
            ("conclusion", self.conclusion.as_str()),
            ("recommendation", self.recommendation.as_str()),
            ("discussion", self.discussion.as_str()),
            ("combatFunction", self.combat_function.as_str()),
            ("level", self.level.as_str()),
        ];
        check(&RECOMMENDATION_RULES, &values).into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    pub observation_id: i64,
    #[serde(flatten)]
    pub fields: RecommendationDraft,
}

/// Recommendations attached to one observation, edited locally before the
/// observation is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationList {
    observation_id: i64,
    items: Vec<Recommendation>,
    next_id: i64,
}

impl RecommendationList {
    pub fn new(observation_id: i64) -> Self {
        Self {
            observation_id,
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Continues numbering after the highest id already present.
    pub fn from_existing(observation_id: i64, items: Vec<Recommendation>) -> Self {
        let next_id = items.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            observation_id,
            items,
            next_id,
        }
    }

    /// Appends a valid draft and returns its new local id.
    pub fn add(&mut self, draft: RecommendationDraft) -> Result<i64, FieldErrors> {
        draft.validate()?;
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Recommendation {
            id,
            observation_id: self.observation_id,
            fields: draft,
        });
        Ok(id)
    }

    /// Replaces the fields of `id`. `Ok(false)` when no such entry exists.
    pub fn edit(&mut self, id: i64, draft: RecommendationDraft) -> Result<bool, FieldErrors> {
        draft.validate()?;
        match self.items.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                existing.fields = draft;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id != id);
        self.items.len() != before
    }

    pub fn get(&self, id: i64) -> Option<&Recommendation> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.items.iter()
    }

    pub fn observation_id(&self) -> i64 {
        self.observation_id
    }
}
