use super::super::domain::{Authorization, MaintenanceVisit, Technician};
use super::config::EligibilityConfig;
use super::{EligibilityCriterion, ScoreComponent};

const MAX_SCORE: u16 = 100;

pub(crate) fn score_technician(
    technician: &Technician,
    visit: &MaintenanceVisit,
    config: &EligibilityConfig,
) -> (Vec<ScoreComponent>, u8) {
    let mut components = Vec::new();
    let weights = &config.weights;
    let aircraft = visit.aircraft_name.trim().to_lowercase();

    if let Some(auth) = technician
        .authorizations
        .iter()
        .find(|auth| authorization_covers_aircraft(auth, &aircraft))
    {
        components.push(ScoreComponent {
            criterion: EligibilityCriterion::AircraftType,
            points: weights.aircraft_type,
            notes: format!(
                "authorized on {} for {}",
                authorization_label(auth),
                visit.aircraft_name
            ),
        });
    }

    let registration = visit.registration.trim();
    let certified = technician.certifications.iter().any(|cert| {
        let Some(target) = &cert.aircraft else {
            return false;
        };
        let type_texts = [&target.aircraft_type, &target.type_code];
        let type_match = type_texts
            .into_iter()
            .flatten()
            .any(|text| contains_needle(text, &aircraft))
            || family_hint_matches(type_texts, &aircraft);
        let registration_match = !registration.is_empty()
            && target
                .registration
                .as_deref()
                .map(|value| value.trim().eq_ignore_ascii_case(registration))
                .unwrap_or(false);
        type_match || registration_match
    });
    if certified {
        components.push(ScoreComponent {
            criterion: EligibilityCriterion::Certification,
            points: weights.certification,
            notes: format!("certified for {} ({})", visit.aircraft_name, visit.registration),
        });
    }

    let qualifying_basis = technician.authorizations.iter().find_map(|auth| {
        [&auth.basis, &auth.category]
            .into_iter()
            .flatten()
            .map(|code| code.trim())
            .find(|code| {
                config
                    .qualifying_bases
                    .iter()
                    .any(|basis| basis.eq_ignore_ascii_case(code))
            })
    });
    if let Some(code) = qualifying_basis {
        components.push(ScoreComponent {
            criterion: EligibilityCriterion::AuthorizationBasis,
            points: weights.authorization_basis,
            notes: format!("holds {code} authorization basis"),
        });
    }

    let available_code = technician.support_codes_on(visit.start_date).find(|code| {
        config
            .availability_codes
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(code.trim()))
    });
    if let Some(code) = available_code {
        components.push(ScoreComponent {
            criterion: EligibilityCriterion::Availability,
            points: weights.availability,
            notes: format!("support code {} on {}", code.trim(), visit.start_date),
        });
    }

    let title = technician.job_title.to_lowercase();
    if let Some(keyword) = config
        .job_title_keywords
        .iter()
        .find(|keyword| contains_needle(&title, &keyword.to_lowercase()))
    {
        components.push(ScoreComponent {
            criterion: EligibilityCriterion::JobTitle,
            points: weights.job_title,
            notes: format!("job title mentions {keyword}"),
        });
    }

    for rule in &config.bonus_rules {
        if rule.condition.matches(technician, visit) {
            components.push(ScoreComponent {
                criterion: EligibilityCriterion::Bonus,
                points: rule.bonus,
                notes: rule.name.clone(),
            });
        }
    }

    let total: u16 = components
        .iter()
        .map(|component| u16::from(component.points))
        .sum();

    (components, total.min(MAX_SCORE) as u8)
}

fn authorization_covers_aircraft(auth: &Authorization, aircraft: &str) -> bool {
    let direct = [&auth.aircraft_model, &auth.aircraft_type, &auth.aircraft_type_code]
        .into_iter()
        .flatten()
        .any(|text| contains_needle(text, aircraft));
    direct || family_hint_matches([&auth.aircraft_type, &auth.aircraft_type_code], aircraft)
}

/// A "boeing" or "airbus" visit accepts type text naming the family or starting with its initial.
fn family_hint_matches(texts: [&Option<String>; 2], aircraft: &str) -> bool {
    [("boeing", 'b'), ("airbus", 'a')]
        .into_iter()
        .filter(|(family, _)| aircraft.contains(family))
        .any(|(family, initial)| {
            texts
                .into_iter()
                .flatten()
                .map(|text| text.trim().to_lowercase())
                .any(|text| text.contains(family) || text.starts_with(initial))
        })
}

fn authorization_label(auth: &Authorization) -> &str {
    [&auth.aircraft_type, &auth.aircraft_model, &auth.aircraft_type_code]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .next()
        .unwrap_or("unspecified type")
}

/// Case-insensitive substring test; an empty needle never matches.
fn contains_needle(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(needle)
}
