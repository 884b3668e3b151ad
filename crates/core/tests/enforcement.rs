//! Enforcement decision coverage: zero budgets, rule ordering, and
//! fail-closed handling of bad rules.

mod support;

use tabguard_core::ports::Clock;
use tabguard_domain::{DailyStats, SiteUsage};

use support::{domain_limit, regex_limit, Harness};

const EXAMPLE: &str = "https://example.com/";

fn seed_time(h: &Harness, domain: &str, seconds: u64) {
    let today = h.today();
    let now = h.clock.now();
    let mut stats = DailyStats::empty(today, now);
    stats.site_breakdown.insert(
        domain.to_string(),
        SiteUsage { time_seconds: seconds, visit_count: 1, last_known_title: String::new() },
    );
    stats.total_time_seconds = seconds;
    h.stats.daily.lock().insert(today, stats);
}

#[tokio::test]
async fn unmatched_urls_are_allowed() {
    let h = Harness::new();
    seed_time(&h, "example.com", 10_000);
    let decision = h.enforcer.check(EXAMPLE).await.unwrap();
    assert!(!decision.blocked);
    assert!(decision.limit.is_none());
    assert_eq!(decision.time_spent_seconds, 10_000);
}

#[tokio::test]
async fn zero_budget_blocks_with_no_accrued_time() {
    let h = Harness::new();
    h.limits.push(domain_limit("example.com", 0));
    let decision = h.enforcer.check(EXAMPLE).await.unwrap();
    assert!(decision.blocked);
    assert_eq!(decision.time_spent_seconds, 0);
}

#[tokio::test]
async fn budget_boundary_is_inclusive() {
    let h = Harness::new();
    h.limits.push(domain_limit("example.com", 60));

    seed_time(&h, "example.com", 59);
    assert!(!h.enforcer.check(EXAMPLE).await.unwrap().blocked);

    seed_time(&h, "example.com", 60);
    assert!(h.enforcer.check(EXAMPLE).await.unwrap().blocked);
}

#[tokio::test]
async fn first_matching_rule_in_stored_order_governs() {
    let h = Harness::new();
    let generous = domain_limit("example.com", 100_000);
    let strict = regex_limit("example", 0);
    h.limits.push(generous.clone());
    h.limits.push(strict);

    let decision = h.enforcer.check(EXAMPLE).await.unwrap();
    assert!(!decision.blocked);
    assert_eq!(decision.limit.unwrap().id, generous.id);

    // Reversed order flips the outcome.
    let h = Harness::new();
    let strict = regex_limit("example", 0);
    h.limits.push(strict.clone());
    h.limits.push(domain_limit("example.com", 100_000));

    let decision = h.enforcer.check(EXAMPLE).await.unwrap();
    assert!(decision.blocked);
    assert_eq!(decision.limit.unwrap().id, strict.id);
}

#[tokio::test]
async fn disabled_rules_are_skipped() {
    let h = Harness::new();
    let mut disabled = domain_limit("example.com", 0);
    disabled.enabled = false;
    h.limits.push(disabled);

    assert!(!h.enforcer.check(EXAMPLE).await.unwrap().blocked);
}

#[tokio::test]
async fn an_invalid_regex_rule_never_matches_and_never_fails() {
    let h = Harness::new();
    h.limits.push(regex_limit("(", 0));
    h.limits.push(domain_limit("example.com", 0));

    // The broken rule is passed over; the valid one still governs.
    let decision = h.enforcer.check(EXAMPLE).await.unwrap();
    assert!(decision.blocked);
    assert_eq!(decision.limit.unwrap().pattern, "example.com");
}

#[tokio::test]
async fn registry_rejects_invalid_patterns_up_front() {
    let h = Harness::new();
    assert!(h.registry.add(regex_limit("(", 60)).await.is_err());
    assert!(h.registry.add(domain_limit("  ", 60)).await.is_err());
    assert!(h.registry.add(domain_limit("example.com", 60)).await.is_ok());
    assert_eq!(h.registry.list().await.unwrap().len(), 1);
}
