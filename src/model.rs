use std::cmp::Ordering;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Highest level a skill can have.
pub const MAX_LEVEL: f32 = 10.0;

static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|(?:rgba?|hsla?)\([0-9a-z.,%\s/+-]*\)|[a-zA-Z]+)$",
    )
    .unwrap()
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub level: f32,
    #[serde(default)]
    pub years_of_experience: f32,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl SkillCategory {
    /// Mean level of the category's skills, clamped to `0..=MAX_LEVEL`.
    /// A category without skills averages to zero.
    pub fn average_level(&self) -> f32 {
        if self.skills.is_empty() {
            return 0.0;
        }
        let total: f32 = self.skills.iter().map(|skill| skill.level).sum();
        let avg = total / self.skills.len() as f32;
        if avg.is_nan() {
            return 0.0;
        }
        avg.clamp(0.0, MAX_LEVEL)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SkillsData {
    pub skill_categories: Vec<SkillCategory>,
    #[serde(default)]
    pub summary: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSkillsData {
    skill_categories: Option<Vec<SkillCategory>>,
    #[serde(default)]
    summary: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A skill together with the category it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillRef<'a> {
    pub skill: &'a Skill,
    pub category_id: &'a str,
    pub category_name: &'a str,
    pub category_color: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub total_skills: usize,
    pub average_level: f32,
    pub max_experience: f32,
}

impl SkillsData {
    /// Decodes and validates a skills payload.
    pub fn from_json(input: &str) -> Result<Self, DataError> {
        let raw: RawSkillsData = serde_json::from_str(input)?;
        let categories = raw.skill_categories.ok_or(DataError::MissingCategories)?;
        Self::from_categories(categories, raw.summary.unwrap_or_default())
    }

    pub fn from_categories(
        categories: Vec<SkillCategory>,
        summary: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, DataError> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(categories.len());
        for category in categories {
            if category.skills.is_empty() {
                log::warn!("Dropping skill category \"{}\" without skills", category.id);
                continue;
            }
            if !seen.insert(category.id.clone()) {
                return Err(DataError::DuplicateCategory(category.id));
            }
            if !COLOR_RE.is_match(category.color.trim()) {
                return Err(DataError::InvalidColor {
                    category: category.id,
                    color: category.color,
                });
            }
            for skill in &category.skills {
                if !(0.0..=MAX_LEVEL).contains(&skill.level) {
                    log::warn!(
                        "Skill \"{}\" in \"{}\" has level {} outside 0-{}",
                        skill.name,
                        category.id,
                        skill.level,
                        MAX_LEVEL
                    );
                }
                if skill.years_of_experience < 0.0 {
                    log::warn!(
                        "Skill \"{}\" in \"{}\" has negative years of experience",
                        skill.name,
                        category.id
                    );
                }
            }
            kept.push(category);
        }
        if kept.is_empty() {
            return Err(DataError::NoCategories);
        }
        Ok(Self {
            skill_categories: kept,
            summary,
        })
    }

    pub fn category(&self, id: &str) -> Option<&SkillCategory> {
        self.skill_categories.iter().find(|cat| cat.id == id)
    }

    pub fn category_ids(&self) -> Vec<&str> {
        self.skill_categories.iter().map(|cat| cat.id.as_str()).collect()
    }

    pub fn skills_by_category(&self, id: &str) -> &[Skill] {
        self.category(id)
            .map(|cat| cat.skills.as_slice())
            .unwrap_or(&[])
    }

    pub fn all_skills(&self) -> Vec<SkillRef<'_>> {
        self.skill_categories
            .iter()
            .flat_map(|category| {
                category.skills.iter().map(move |skill| SkillRef {
                    skill,
                    category_id: &category.id,
                    category_name: &category.name,
                    category_color: &category.color,
                })
            })
            .collect()
    }

    /// Highest-level skills first; ties keep dataset order.
    pub fn top_skills(&self, limit: usize) -> Vec<SkillRef<'_>> {
        let mut skills = self.all_skills();
        skills.sort_by(|a, b| {
            b.skill
                .level
                .partial_cmp(&a.skill.level)
                .unwrap_or(Ordering::Equal)
        });
        skills.truncate(limit);
        skills
    }

    pub fn search(&self, query: &str) -> Vec<SkillRef<'_>> {
        let needle = query.to_lowercase();
        self.all_skills()
            .into_iter()
            .filter(|entry| {
                entry.skill.name.to_lowercase().contains(&needle)
                    || entry.skill.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn skills_above_level(&self, min_level: f32) -> Vec<SkillRef<'_>> {
        self.all_skills()
            .into_iter()
            .filter(|entry| entry.skill.level >= min_level)
            .collect()
    }

    pub fn summary_stats(&self) -> SummaryStats {
        summary_stats(self.skill_categories.iter())
    }
}

/// Totals for a set of categories: skill count, mean of category averages and
/// the longest experience of any single skill.
pub fn summary_stats<'a>(categories: impl IntoIterator<Item = &'a SkillCategory>) -> SummaryStats {
    let mut total_skills = 0;
    let mut level_sum = 0.0;
    let mut category_count = 0;
    let mut max_experience: f32 = 0.0;
    for category in categories {
        total_skills += category.skills.len();
        level_sum += category.average_level();
        category_count += 1;
        for skill in &category.skills {
            max_experience = max_experience.max(skill.years_of_experience);
        }
    }
    let average_level = if category_count > 0 {
        level_sum / category_count as f32
    } else {
        0.0
    };
    SummaryStats {
        total_skills,
        average_level,
        max_experience,
    }
}
