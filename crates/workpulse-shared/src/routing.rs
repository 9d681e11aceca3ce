//! Deep link routing: maps a notification's semantic category to an in-app
//! navigation target.
//!
//! The mapping is a lookup table so a new notification category is an
//! addition to [`ROUTES`], not a control-flow edit.

use crate::types::NotificationData;

/// Where a notification category lands in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteTarget {
    /// Proposals on a specific job, or the employer dashboard without one.
    JobProposals,
    /// A specific contract, or the contracts list without one.
    Contract,
    /// The Stripe Connect payments view.
    Payments,
}

/// Category → target table, consulted after an explicit `link` override.
const ROUTES: &[(&str, RouteTarget)] = &[
    ("new_proposal", RouteTarget::JobProposals),
    ("contract_created", RouteTarget::Contract),
    ("contract_signed", RouteTarget::Contract),
    ("milestone_submitted", RouteTarget::Contract),
    ("milestone_approved", RouteTarget::Contract),
    ("payment_received", RouteTarget::Payments),
];

/// Resolve a clicked notification to a navigation path.
///
/// Priority: an explicit `link` always wins; otherwise the category table;
/// unrecognized or absent categories fall back to the application root.
pub fn route(data: &NotificationData) -> String {
    if let Some(link) = &data.link {
        return link.clone();
    }

    let target = data
        .kind
        .as_deref()
        .and_then(|kind| ROUTES.iter().find(|(k, _)| *k == kind))
        .map(|(_, target)| *target);

    match target {
        Some(RouteTarget::JobProposals) => match &data.job_id {
            Some(job_id) => format!("/remote-jobs/{job_id}/proposals"),
            None => "/employer".to_string(),
        },
        Some(RouteTarget::Contract) => match &data.contract_id {
            Some(contract_id) => format!("/contracts/{contract_id}"),
            None => "/contracts".to_string(),
        },
        Some(RouteTarget::Payments) => "/stripe-connect".to_string(),
        None => "/".to_string(),
    }
}
