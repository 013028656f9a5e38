use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{Technician, TechnicianId};

const MINIMUM_POOL: usize = 6;
const MAX_TEAM: usize = 8;
const QUALIFYING_SCORE: u8 = 20;
const TRAINING_LEADS: usize = 2;
const TRAINING_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamTier {
    HighPerformance,
    Standard,
    Training,
}

impl TeamTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::HighPerformance, Self::Standard, Self::Training]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighPerformance => "High-Performance",
            Self::Standard => "Standard",
            Self::Training => "Training",
        }
    }

    /// Label and fixed score used when too few technicians qualify.
    const fn fallback(self) -> (&'static str, u8) {
        match self {
            Self::HighPerformance => ("Best Available", 75),
            Self::Standard => ("Standard", 70),
            Self::Training => ("Training", 65),
        }
    }

    const fn id(self) -> &'static str {
        match self {
            Self::HighPerformance => "team-a",
            Self::Standard => "team-b",
            Self::Training => "team-c",
        }
    }
}

/// Ephemeral crew suggestion; regenerated whenever the available pool changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTeam {
    pub id: String,
    pub tier: TeamTier,
    pub label: String,
    pub score: u8,
    pub members: Vec<Technician>,
}

impl CandidateTeam {
    pub fn member_ids(&self) -> Vec<TechnicianId> {
        self.members.iter().map(|member| member.id.clone()).collect()
    }
}

/// Bucket a scored pool into at most three overlapping candidate teams.
///
/// Output order is always High-Performance, Standard, Training. Pools with
/// fewer than six technicians produce no proposals.
pub fn propose(pool: &[Technician]) -> Vec<CandidateTeam> {
    let qualified = sorted_by_score(
        pool.iter()
            .filter(|tech| tech.match_score > QUALIFYING_SCORE),
    );

    if qualified.len() >= MINIMUM_POOL {
        return tiered_teams(&qualified);
    }

    let everyone = sorted_by_score(pool.iter());
    if everyone.len() < MINIMUM_POOL {
        return Vec::new();
    }

    let members: Vec<Technician> = everyone
        .iter()
        .take(MAX_TEAM)
        .map(|tech| (*tech).clone())
        .collect();

    TeamTier::ordered()
        .into_iter()
        .map(|tier| {
            let (label, score) = tier.fallback();
            CandidateTeam {
                id: tier.id().to_string(),
                tier,
                label: label.to_string(),
                score,
                members: members.clone(),
            }
        })
        .collect()
}

fn sorted_by_score<'a>(technicians: impl Iterator<Item = &'a Technician>) -> Vec<&'a Technician> {
    let mut sorted: Vec<&Technician> = technicians.collect();
    sorted.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    sorted
}

fn tiered_teams(qualified: &[&Technician]) -> Vec<CandidateTeam> {
    let n = qualified.len();

    let high: Vec<&Technician> = qualified.iter().take(MAX_TEAM).copied().collect();

    let standard_start = (n / 3).min(6);
    let mut standard: Vec<&Technician> = qualified
        .iter()
        .skip(standard_start)
        .take(MAX_TEAM)
        .copied()
        .collect();
    pad_from_front(&mut standard, qualified);

    let training_start = (n / 2).min(10);
    let mut training: Vec<&Technician> = Vec::new();
    for tech in qualified
        .iter()
        .take(TRAINING_LEADS)
        .chain(qualified.iter().skip(training_start).take(TRAINING_WINDOW))
        .copied()
    {
        if !training.iter().any(|member| member.id == tech.id) {
            training.push(tech);
        }
    }
    pad_from_front(&mut training, qualified);

    [
        (TeamTier::HighPerformance, high),
        (TeamTier::Standard, standard),
        (TeamTier::Training, training),
    ]
    .into_iter()
    .map(|(tier, members)| CandidateTeam {
        id: tier.id().to_string(),
        tier,
        label: tier.label().to_string(),
        score: team_score(&members),
        members: members.into_iter().cloned().collect(),
    })
    .collect()
}

/// Top up a short team with the best technicians it does not already contain.
fn pad_from_front<'a>(team: &mut Vec<&'a Technician>, sorted: &[&'a Technician]) {
    if team.len() >= MINIMUM_POOL {
        return;
    }
    let mut present: HashSet<&'a TechnicianId> =
        team.iter().copied().map(|tech| &tech.id).collect();
    for &tech in sorted {
        if team.len() >= MINIMUM_POOL {
            break;
        }
        if present.insert(&tech.id) {
            team.push(tech);
        }
    }
}

fn team_score(members: &[&Technician]) -> u8 {
    if members.is_empty() {
        return 60;
    }
    let total: u32 = members.iter().map(|tech| u32::from(tech.match_score)).sum();
    let mean = f64::from(total) / members.len() as f64;
    mean.clamp(60.0, 98.0).round() as u8
}
