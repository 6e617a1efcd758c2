//! Weighted scoring of model profiles against task requirements.
//!
//! Each dimension contributes independently and is capped well below the
//! total, so no single dimension decides the outcome on its own:
//!
//! | dimension      | max |
//! |----------------|-----|
//! | complexity     | 25  |
//! | language       | 25  |
//! | speed/urgency  | 20  |
//! | specialty      | 20  |
//! | quality        | 10  |
//! | output length  | 5   |
//!
//! The speed table is built so that raising urgency widens the gap in
//! favour of faster models at every step (low → medium → high). Since no
//! other dimension reads urgency, a more urgent request can never select a
//! slower model than a less urgent one.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::types::{
    Complexity, CostTier, ModelProfile, OutputLength, Quality, ScoreBreakdown, ScoredModel,
    Speed, TaskRequirements, Urgency,
};

const COMPLEXITY_EXACT: f64 = 25.0;
const COMPLEXITY_ADJACENT: f64 = 12.0;
const LANGUAGE_SUPPORTED: f64 = 25.0;
const TASK_TYPE_EXACT: f64 = 12.0;
const TASK_TYPE_PARTIAL: f64 = 8.0;
const CONTEXT_MAX: f64 = 8.0;
/// Context keyword matches beyond this earn nothing more.
const CONTEXT_MATCH_CAP: usize = 4;
/// Shorter context words are too generic to count as keywords.
const MIN_KEYWORD_LEN: usize = 4;

/// Score one profile.
pub(crate) fn score_profile(profile: &ModelProfile, req: &TaskRequirements) -> ScoredModel {
    let breakdown = ScoreBreakdown {
        complexity: complexity_points(profile.complexity, req.complexity),
        language: if profile.supports_language(&req.language) {
            LANGUAGE_SUPPORTED
        } else {
            0.0
        },
        speed: speed_points(req.urgency, profile.speed),
        specialty: specialty_points(profile, req),
        quality: quality_points(req.quality, profile),
        output_length: output_length_points(req.output_length, profile),
    };
    ScoredModel {
        profile: profile.clone(),
        score: breakdown.total(),
        breakdown,
    }
}

/// Score every profile and sort best first.
///
/// Ties go to the profile with more languages, then to the smaller id.
pub(crate) fn rank<'a>(
    profiles: impl IntoIterator<Item = &'a ModelProfile>,
    req: &TaskRequirements,
) -> Vec<ScoredModel> {
    let mut scored: Vec<ScoredModel> = profiles
        .into_iter()
        .map(|p| score_profile(p, req))
        .collect();
    scored.sort_by(compare_ranked);
    scored
}

fn compare_ranked(a: &ScoredModel, b: &ScoredModel) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.profile.languages.len().cmp(&a.profile.languages.len()))
        .then_with(|| a.profile.id.cmp(&b.profile.id))
}

fn complexity_points(model: Complexity, wanted: Complexity) -> f64 {
    match model.distance(wanted) {
        0 => COMPLEXITY_EXACT,
        1 => COMPLEXITY_ADJACENT,
        _ => 0.0,
    }
}

fn speed_points(urgency: Urgency, speed: Speed) -> f64 {
    match (urgency, speed) {
        (Urgency::High, Speed::Fast) => 20.0,
        (Urgency::High, Speed::Medium) => 10.0,
        (Urgency::High, Speed::Slow) => 0.0,
        (Urgency::Medium, Speed::Fast) => 14.0,
        (Urgency::Medium, Speed::Medium) => 14.0,
        (Urgency::Medium, Speed::Slow) => 6.0,
        (Urgency::Low, Speed::Fast) => 8.0,
        (Urgency::Low, Speed::Medium) => 10.0,
        (Urgency::Low, Speed::Slow) => 12.0,
    }
}

fn specialty_points(profile: &ModelProfile, req: &TaskRequirements) -> f64 {
    let task_type = req.task_type.trim().to_lowercase();
    let vocabulary = vocabulary(profile);

    let task_points = if profile
        .specialties
        .iter()
        .any(|s| s.to_lowercase() == task_type)
    {
        TASK_TYPE_EXACT
    } else {
        let tokens = tokenize(&task_type);
        if tokens.is_empty() {
            0.0
        } else {
            let matched = tokens.iter().filter(|t| vocabulary.contains(*t)).count();
            TASK_TYPE_PARTIAL * matched as f64 / tokens.len() as f64
        }
    };

    let context_points = req.context.as_deref().map_or(0.0, |context| {
        let matched = context_keywords(context)
            .iter()
            .filter(|k| vocabulary.contains(*k))
            .count()
            .min(CONTEXT_MATCH_CAP);
        CONTEXT_MAX * matched as f64 / CONTEXT_MATCH_CAP as f64
    });

    task_points + context_points
}

fn quality_points(quality: Quality, profile: &ModelProfile) -> f64 {
    match quality {
        Quality::Premium => {
            let depth = match profile.complexity {
                Complexity::Complex => 6.0,
                Complexity::Medium => 3.0,
                Complexity::Simple => 0.0,
            };
            let patience = match profile.speed {
                Speed::Slow => 4.0,
                Speed::Medium => 2.0,
                Speed::Fast => 0.0,
            };
            depth + patience
        }
        Quality::Standard => {
            let depth = match profile.complexity {
                Complexity::Medium => 5.0,
                Complexity::Simple | Complexity::Complex => 3.0,
            };
            let pace = match profile.speed {
                Speed::Medium => 5.0,
                Speed::Fast => 4.0,
                Speed::Slow => 2.0,
            };
            depth + pace
        }
        Quality::Draft => {
            let pace = match profile.speed {
                Speed::Fast => 6.0,
                Speed::Medium => 3.0,
                Speed::Slow => 0.0,
            };
            let cost = match profile.cost_tier {
                CostTier::Low => 4.0,
                CostTier::Medium => 2.0,
                CostTier::High => 0.0,
            };
            pace + cost
        }
    }
}

fn output_length_points(length: OutputLength, profile: &ModelProfile) -> f64 {
    match length {
        OutputLength::Long => match profile.complexity {
            Complexity::Complex => 5.0,
            Complexity::Medium => 3.0,
            Complexity::Simple => 1.0,
        },
        OutputLength::Short => match profile.speed {
            Speed::Fast => 5.0,
            Speed::Medium => 3.0,
            Speed::Slow => 1.0,
        },
        OutputLength::Medium => 3.0,
    }
}

/// Lowercase tokens of every specialty and strength.
fn vocabulary(profile: &ModelProfile) -> BTreeSet<String> {
    profile
        .specialties
        .iter()
        .chain(profile.strengths.iter())
        .flat_map(|s| tokenize(&s.to_lowercase()))
        .collect()
}

fn tokenize(s: &str) -> Vec<String> {
    s.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn context_keywords(context: &str) -> BTreeSet<String> {
    context
        .split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
        .collect()
}

/// Explain why `top` won.
///
/// One line per dimension that earned points, in scoring order, plus a
/// warning when the requested language forced a fallback.
pub(crate) fn explain(
    top: &ScoredModel,
    req: &TaskRequirements,
    any_supports_language: bool,
) -> Vec<String> {
    let profile = &top.profile;
    let b = &top.breakdown;
    let mut reasons = Vec::new();

    match profile.complexity.distance(req.complexity) {
        0 => reasons.push(format!(
            "Complexity match: built for {} tasks",
            req.complexity.as_str()
        )),
        1 => reasons.push(format!(
            "Close complexity fit: {} model for a {} task",
            profile.complexity.as_str(),
            req.complexity.as_str()
        )),
        _ => {}
    }

    if b.language > 0.0 {
        reasons.push(format!("Supports {}", req.language.trim()));
    } else if !any_supports_language {
        reasons.push(format!(
            "No catalog model supports {}; chose the best overall match",
            req.language.trim()
        ));
    }

    reasons.push(match (req.urgency, profile.speed) {
        (Urgency::High, Speed::Fast) => "High urgency: fast response speed".to_string(),
        (Urgency::Low, Speed::Slow | Speed::Medium) => format!(
            "Low urgency: {} speed accepted in favour of depth",
            profile.speed.as_str()
        ),
        (urgency, speed) => format!(
            "{} urgency: {} response speed",
            capitalize(urgency.as_str()),
            speed.as_str()
        ),
    });

    if b.specialty > 0.0 {
        let task_type = req.task_type.trim().to_lowercase();
        if profile.specialties.iter().any(|s| s.to_lowercase() == task_type) {
            reasons.push(format!("Specializes in {task_type}"));
        } else {
            reasons.push(format!(
                "Related strengths: {}",
                profile
                    .strengths
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
    }

    if b.quality > 0.0 {
        reasons.push(
            match req.quality {
                Quality::Draft => "Draft quality: favours speed and low cost",
                Quality::Standard => "Standard quality: balances capability and speed",
                Quality::Premium => "Premium quality: favours deeper, more capable models",
            }
            .to_string(),
        );
    }

    reasons
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
