//! One-time backfill of the explicit `cadence` and `is_haircut` service
//! fields from the legacy name conventions ("monthly package" / "pacote
//! mensal", "normal trim" / "tosa normal", ...). Runs once when a legacy
//! snapshot is loaded; runtime classification reads the explicit fields
//! only.

use std::sync::OnceLock;

use regex::Regex;

use crate::records::{Cadence, Service};

static PACKAGE_RE: OnceLock<Regex> = OnceLock::new();
static MONTHLY_RE: OnceLock<Regex> = OnceLock::new();
static BIWEEKLY_RE: OnceLock<Regex> = OnceLock::new();
static HAIRCUT_RE: OnceLock<Regex> = OnceLock::new();

fn package_re() -> &'static Regex {
    PACKAGE_RE.get_or_init(|| {
        Regex::new(r"(?i)package|pacote").expect("invalid package regex")
    })
}

fn monthly_re() -> &'static Regex {
    MONTHLY_RE.get_or_init(|| Regex::new(r"(?i)monthly|mensal").expect("invalid monthly regex"))
}

fn biweekly_re() -> &'static Regex {
    BIWEEKLY_RE
        .get_or_init(|| Regex::new(r"(?i)biweekly|quinzenal").expect("invalid biweekly regex"))
}

fn haircut_re() -> &'static Regex {
    HAIRCUT_RE.get_or_init(|| {
        Regex::new(r"(?i)normal trim|scissor trim|tosa normal|tosa tesoura")
            .expect("invalid haircut regex")
    })
}

/// Cadence a legacy service name encodes, if any. The package token must be
/// present together with a cadence token.
pub fn cadence_from_name(name: &str) -> Cadence {
    if !package_re().is_match(name) {
        return Cadence::None;
    }
    if biweekly_re().is_match(name) {
        Cadence::Biweekly
    } else if monthly_re().is_match(name) {
        Cadence::Monthly
    } else {
        Cadence::None
    }
}

pub fn is_haircut_name(name: &str) -> bool {
    haircut_re().is_match(name)
}

/// Populates missing explicit fields across a legacy catalog. Returns how
/// many services changed. Explicit fields already set are left alone.
pub fn backfill_services(services: &mut [Service]) -> usize {
    let mut changed = 0;
    for service in services.iter_mut() {
        let mut touched = false;
        if service.cadence == Cadence::None {
            let derived = cadence_from_name(&service.name);
            if derived != Cadence::None {
                service.cadence = derived;
                touched = true;
            }
        }
        if !service.is_haircut && is_haircut_name(&service.name) {
            service.is_haircut = true;
            touched = true;
        }
        if touched {
            changed += 1;
            tracing::info!(service = %service.name, cadence = ?service.cadence, haircut = service.is_haircut, "backfilled service fields");
        }
    }
    changed
}
