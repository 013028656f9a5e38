use super::super::domain::{Authorization, Trade};

const BASIS_TRADES: [(&str, Trade); 3] = [
    ("B1", Trade::B1Tech),
    ("B2", Trade::B2Tech),
    ("C", Trade::BaseMaintenance),
];

const TITLE_TRADES: [(&[&str], Trade); 4] = [
    (&["struc", "composite", "sheet metal"], Trade::StructuresAndComposites),
    (&["paint"], Trade::Paint),
    (&["cabin", "interior"], Trade::Cabin),
    (&["ndt", "non-destructive", "non destructive"], Trade::Ndt),
];

/// Derive a technician's trade: authorization basis first, then job title, then General.
///
/// Basis codes are ranked B1 over B2 over C so the result does not depend on
/// the order authorizations were fetched in.
pub fn classify_trade(job_title: &str, authorizations: &[Authorization]) -> Trade {
    let by_basis = BASIS_TRADES.iter().find(|(code, _)| {
        authorizations.iter().any(|auth| {
            [&auth.basis, &auth.category]
                .into_iter()
                .flatten()
                .any(|value| value.trim().eq_ignore_ascii_case(code))
        })
    });
    if let Some((_, trade)) = by_basis {
        return *trade;
    }

    let title = job_title.to_lowercase();
    TITLE_TRADES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| title.contains(keyword)))
        .map(|(_, trade)| *trade)
        .unwrap_or(Trade::General)
}
