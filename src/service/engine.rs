//! Orchestration of the rewards calculations over external collaborators.
//!
//! Every call starts from fresh snapshots; nothing computed here is stored
//! except the last good profile, which is kept in the snapshot cache as an
//! advisory fallback for display.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    BalanceSource, CheckoutValidation, aggregate_points, classify_employer, classify_jobseeker,
    compute_checkout_totals, resolve_available_points, score_profile_completion,
    split_referral_points, validate_checkout,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CartLineItem, Profile, Snapshot, SubjectType,
    WarningSeverity,
};

use super::sources::{ProfileStore, ReferralHistorySource, SnapshotCache};
use super::summary::{
    CheckoutDecision, CompletionSummary, PointsSummary, ReferralSummary, RewardsSummary,
};

/// Collects audit steps and warnings while a calculation runs.
struct TraceBuilder {
    started: Instant,
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

impl TraceBuilder {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn next_step(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    fn push(&mut self, step: AuditStep) {
        self.steps.push(step);
    }

    fn warn(&mut self, code: &str, message: impl Into<String>, severity: WarningSeverity) {
        self.warnings.push(AuditWarning::new(code, message, severity));
    }

    fn finish(self) -> AuditTrace {
        AuditTrace {
            steps: self.steps,
            warnings: self.warnings,
            duration_us: self.started.elapsed().as_micros() as u64,
        }
    }
}

/// Balance figures derived from one profile snapshot.
struct Ledger {
    completion: CompletionSummary,
    referral: ReferralSummary,
    points: PointsSummary,
}

/// Computes rewards summaries and checkout decisions for users.
///
/// # Example
///
/// ```
/// use rewards_engine::config::{ConfigLoader, ProgramMetadata};
/// use rewards_engine::error::{EngineError, EngineResult};
/// use rewards_engine::models::{Profile, ReferralHistory, SubjectType, Tier};
/// use rewards_engine::service::{
///     InMemorySnapshotCache, ProfileStore, ReferralHistorySource, RewardsEngine,
/// };
///
/// struct StaticProfiles;
/// impl ProfileStore for StaticProfiles {
///     fn fetch_profile(&self, _user_id: &str) -> EngineResult<Profile> {
///         Ok(Profile { nationality: Some("Emirati".to_string()), ..Default::default() })
///     }
/// }
///
/// struct NoReferrals;
/// impl ReferralHistorySource for NoReferrals {
///     fn fetch_referral_history(&self, _user_id: &str) -> EngineResult<ReferralHistory> {
///         Err(EngineError::SourceUnavailable {
///             source_name: "referral_history".to_string(),
///             message: "offline".to_string(),
///         })
///     }
/// }
///
/// let config = ConfigLoader::from_parts(
///     ProgramMetadata {
///         code: "DEMO".to_string(),
///         name: "Demo".to_string(),
///         version: "1".to_string(),
///         currency: "AED".to_string(),
///     },
///     vec![],
/// );
/// let engine = RewardsEngine::new(config, StaticProfiles, NoReferrals, InMemorySnapshotCache::new());
///
/// let summary = engine.summarize("user_001", SubjectType::Jobseeker).unwrap();
/// assert_eq!(summary.tier, Tier::Platinum);
/// assert_eq!(summary.points.base_points, 58);
/// ```
pub struct RewardsEngine<P, R, C> {
    config: Arc<ConfigLoader>,
    profiles: P,
    referrals: R,
    cache: C,
}

impl<P, R, C> RewardsEngine<P, R, C>
where
    P: ProfileStore,
    R: ReferralHistorySource,
    C: SnapshotCache,
{
    /// Creates a new engine over the given collaborators.
    pub fn new(config: ConfigLoader, profiles: P, referrals: R, cache: C) -> Self {
        Self {
            config: Arc::new(config),
            profiles,
            referrals,
            cache,
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Computes the full rewards summary for a user.
    ///
    /// The profile is fetched fresh; if the profile store is unavailable a
    /// cached profile is used and the summary is marked accordingly. A
    /// missing hired count or server balance degrades the figures and adds
    /// a warning to the audit trace instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `ProfileUnavailable` when neither a fresh nor a cached
    /// profile can be obtained.
    pub fn summarize(&self, user_id: &str, subject: SubjectType) -> EngineResult<RewardsSummary> {
        let calculation_id = Uuid::new_v4();
        info!(correlation_id = %calculation_id, user_id, ?subject, "Computing rewards summary");

        let mut trace = TraceBuilder::new();
        let profile = self.load_profile(user_id, &mut trace)?;
        let ledger = self.compute_ledger(user_id, &profile.value, &mut trace);

        let decision = match subject {
            SubjectType::Jobseeker => classify_jobseeker(
                ledger.points.available_points,
                profile.value.years_of_experience(),
                profile.value.nationality.as_deref(),
                trace.next_step(),
            ),
            SubjectType::Employer => classify_employer(
                ledger.points.available_points,
                profile.value.team_size.as_deref(),
                profile.value.company_name.as_deref(),
                self.config.top_companies(),
                trace.next_step(),
            ),
        };
        trace.push(decision.audit_step);

        let balance = Snapshot {
            value: ledger.points.available_points,
            freshness: profile.freshness,
            fetched_at: profile.fetched_at,
        };
        let audit_trace = trace.finish();

        info!(
            correlation_id = %calculation_id,
            user_id,
            tier = decision.tier.label(),
            available_points = ledger.points.available_points,
            balance_source = ?ledger.points.balance_source,
            warnings = audit_trace.warnings.len(),
            duration_us = audit_trace.duration_us,
            "Rewards summary computed"
        );

        Ok(RewardsSummary {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id: user_id.to_string(),
            subject,
            completion: ledger.completion,
            referral: ledger.referral,
            points: ledger.points,
            tier: decision.tier,
            next_tier: decision.tier.next(),
            balance,
            audit_trace,
        })
    }

    /// Computes cart totals and decides whether checkout may proceed.
    ///
    /// The profile is always refetched; a cached profile is never used to
    /// authorize a purchase.
    ///
    /// # Errors
    ///
    /// Propagates the profile store's error when it is unavailable, and
    /// returns `DiscountExceedsBalance`, `InvalidCartItem` or
    /// `AmountOverflow` for bad input.
    /// An unaffordable cart is not an error: it yields a decision with
    /// `validation.ok == false`.
    pub fn prepare_checkout(
        &self,
        user_id: &str,
        cart_items: &[CartLineItem],
        points_discount: u64,
    ) -> EngineResult<CheckoutDecision> {
        let calculation_id = Uuid::new_v4();
        info!(
            correlation_id = %calculation_id,
            user_id,
            line_items = cart_items.len(),
            points_discount,
            "Preparing checkout"
        );

        let mut trace = TraceBuilder::new();
        let profile = self.profiles.fetch_profile(user_id).inspect_err(|err| {
            warn!(
                correlation_id = %calculation_id,
                user_id,
                error = %err,
                "Profile store unavailable; refusing checkout"
            );
        })?;
        let profile = Snapshot::fresh(profile);
        self.cache.store(user_id, &profile);

        let ledger = self.compute_ledger(user_id, &profile.value, &mut trace);
        let balance = Snapshot {
            value: ledger.points.available_points,
            freshness: profile.freshness,
            fetched_at: profile.fetched_at,
        };

        let computation = compute_checkout_totals(
            cart_items,
            points_discount,
            balance.value,
            trace.next_step(),
        )
        .inspect_err(|err| {
            warn!(correlation_id = %calculation_id, user_id, error = %err, "Checkout rejected");
        })?;
        trace.push(computation.audit_step);

        let validation = validate_checkout(&computation.totals, &balance)?;
        trace.push(validation_step(
            trace.next_step(),
            &validation,
            computation.totals.final_points_total,
            balance.value,
        ));

        let audit_trace = trace.finish();
        if validation.ok {
            info!(
                correlation_id = %calculation_id,
                user_id,
                final_points_total = computation.totals.final_points_total,
                final_aed_total = %computation.totals.final_aed_total,
                "Checkout affordable"
            );
        } else {
            warn!(
                correlation_id = %calculation_id,
                user_id,
                final_points_total = computation.totals.final_points_total,
                available_points = balance.value,
                "Checkout refused: insufficient points"
            );
        }

        Ok(CheckoutDecision {
            calculation_id,
            user_id: user_id.to_string(),
            requires_currency_settlement: computation.totals.requires_currency_settlement(),
            totals: computation.totals,
            validation,
            balance,
            audit_trace,
        })
    }

    /// Fetches a fresh profile, falling back to the cache.
    fn load_profile(
        &self,
        user_id: &str,
        trace: &mut TraceBuilder,
    ) -> EngineResult<Snapshot<Profile>> {
        match self.profiles.fetch_profile(user_id) {
            Ok(profile) => {
                let snapshot = Snapshot::fresh(profile);
                self.cache.store(user_id, &snapshot);
                Ok(snapshot)
            }
            Err(err) => {
                warn!(user_id, error = %err, "Profile store unavailable; trying cache");
                let cached = self.cache.load(user_id).ok_or_else(|| {
                    EngineError::ProfileUnavailable {
                        user_id: user_id.to_string(),
                    }
                })?;
                trace.warn(
                    AuditWarning::PROFILE_FROM_CACHE,
                    format!(
                        "Profile store unavailable ({}); using profile cached at {}",
                        err, cached.fetched_at
                    ),
                    WarningSeverity::High,
                );
                Ok(cached)
            }
        }
    }

    /// Runs completion scoring, referral split, aggregation and balance
    /// resolution for one profile.
    fn compute_ledger(&self, user_id: &str, profile: &Profile, trace: &mut TraceBuilder) -> Ledger {
        let completion = score_profile_completion(profile, trace.next_step());
        let completion_summary = CompletionSummary {
            completed_count: completion.completed_count,
            percentage: completion.percentage,
            missing_fields: completion
                .missing_fields
                .iter()
                .map(|f| f.to_string())
                .collect(),
        };
        trace.push(completion.audit_step);

        let hired_referral_count = match self.referrals.fetch_referral_history(user_id) {
            Ok(history) => Some(history.stats.hired),
            Err(err) => {
                warn!(user_id, error = %err, "Referral history unavailable; attributing all referral points to placements");
                trace.warn(
                    AuditWarning::REFERRAL_HISTORY_UNAVAILABLE,
                    format!(
                        "Referral history unavailable ({}); all referral points treated as placement points",
                        err
                    ),
                    WarningSeverity::Medium,
                );
                None
            }
        };
        let split = split_referral_points(
            profile.rewards.referral_reward_points,
            hired_referral_count,
            trace.next_step(),
        );
        let referral = ReferralSummary {
            hired_referral_count,
            placement_points: split.placement_points,
            signup_points: split.signup_points,
            attribution: split.attribution,
        };
        trace.push(split.audit_step);

        let breakdown = aggregate_points(
            completion.percentage,
            &profile.rewards,
            profile.deducted_points,
            referral.placement_points,
            referral.signup_points,
            trace.next_step(),
        );
        trace.push(breakdown.audit_step.clone());
        let resolved = resolve_available_points(profile.points, &breakdown, trace.next_step());
        if resolved.source == BalanceSource::LocalRecomputation {
            warn!(user_id, "Server-computed balance unavailable; using local recomputation");
            trace.warn(
                AuditWarning::AUTHORITATIVE_BALANCE_UNAVAILABLE,
                "Server-computed balance unavailable; available points recomputed locally",
                WarningSeverity::Low,
            );
        }

        let points = PointsSummary {
            base_points: breakdown.base_points,
            activity_points: breakdown.activity_points,
            total_points: breakdown.total_points,
            deducted_points: breakdown.deducted_points,
            local_available_points: breakdown.available_points,
            available_points: resolved.available_points,
            balance_source: resolved.source,
        };
        trace.push(resolved.audit_step);

        Ledger {
            completion: completion_summary,
            referral,
            points,
        }
    }
}

/// Records the affordability decision in the audit trace.
fn validation_step(
    step_number: u32,
    validation: &CheckoutValidation,
    final_points_total: u64,
    available_points: u64,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "checkout_validation".to_string(),
        rule_name: "Checkout Affordability".to_string(),
        input: serde_json::json!({
            "final_points_total": final_points_total,
            "available_points": available_points
        }),
        output: serde_json::json!({
            "ok": validation.ok,
            "reason": validation.reason
        }),
        reasoning: if validation.ok {
            format!(
                "{} points owed <= {} available",
                final_points_total, available_points
            )
        } else {
            format!(
                "{} points owed > {} available: insufficient points",
                final_points_total, available_points
            )
        },
    }
}
