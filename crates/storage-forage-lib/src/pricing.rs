use serde::Serialize;

/// Objects smaller than this are not charged a monitoring fee.
pub const MIN_MONITORED_OBJECT_MB: f64 = 0.125;

/// A unit-rate band. `capacity_gb == None` marks the final, unbounded tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitTier {
    pub capacity_gb: Option<f64>,
    pub rate_per_gb: f64,
    pub label: &'static str,
}

impl UnitTier {
    pub const fn bounded(capacity_gb: f64, rate_per_gb: f64, label: &'static str) -> Self {
        Self {
            capacity_gb: Some(capacity_gb),
            rate_per_gb,
            label,
        }
    }

    pub const fn unbounded(rate_per_gb: f64, label: &'static str) -> Self {
        Self {
            capacity_gb: None,
            rate_per_gb,
            label,
        }
    }
}

/// A subscription plan matched when an account's allocation is at most
/// `threshold_gb`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BundleTier {
    pub threshold_gb: f64,
    pub monthly_price: f64,
    pub label: &'static str,
}

impl BundleTier {
    pub const fn new(threshold_gb: f64, monthly_price: f64, label: &'static str) -> Self {
        Self {
            threshold_gb,
            monthly_price,
            label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TieredPlan {
    pub name: &'static str,
    pub tiers: &'static [UnitTier],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TieringOptimizedPlan {
    pub name: &'static str,
    pub hot: TieredPlan,
    pub archive_rate_per_gb: f64,
    pub archive_label: &'static str,
    pub monitoring_rate_per_1000_objects: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BundlePlan {
    pub name: &'static str,
    pub per_account_cap_gb: f64,
    pub tiers: &'static [BundleTier],
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanQuote {
    monthly_cost: f64,
    plan_label: String,
}

impl PlanQuote {
    pub fn new(monthly_cost: f64, plan_label: String) -> Self {
        Self {
            monthly_cost,
            plan_label,
        }
    }

    pub fn monthly_cost(&self) -> f64 {
        self.monthly_cost
    }

    pub fn plan_label(&self) -> &str {
        &self.plan_label
    }

    pub fn into_parts(self) -> (f64, String) {
        (self.monthly_cost, self.plan_label)
    }
}

/// Every pricing model the projection knows how to quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PricingProvider {
    Tiered(TieredPlan),
    TieringOptimized(TieringOptimizedPlan),
    Bundle(BundlePlan),
}

impl PricingProvider {
    pub fn quote(
        &self,
        total_volume_gb: f64,
        hot_volume_gb: f64,
        avg_file_size_mb: f64,
    ) -> PlanQuote {
        match self {
            PricingProvider::Tiered(plan) => {
                plan.quote(total_volume_gb, hot_volume_gb, avg_file_size_mb)
            }
            PricingProvider::TieringOptimized(plan) => {
                plan.quote(total_volume_gb, hot_volume_gb, avg_file_size_mb)
            }
            PricingProvider::Bundle(plan) => plan.quote(total_volume_gb),
        }
    }

    pub fn plan_name(&self) -> &'static str {
        match self {
            PricingProvider::Tiered(plan) => plan.name,
            PricingProvider::TieringOptimized(plan) => plan.name,
            PricingProvider::Bundle(plan) => plan.name,
        }
    }
}

impl TieredPlan {
    /// Walks the tiers in order; hot volume and file size do not affect a
    /// plain tiered plan.
    pub fn quote(
        &self,
        total_volume_gb: f64,
        _hot_volume_gb: f64,
        _avg_file_size_mb: f64,
    ) -> PlanQuote {
        let (cost, tier) = self.walk(total_volume_gb);
        let label = match tier {
            Some(tier) => format!("{} ({})", self.name, tier.label),
            None => self.name.to_string(),
        };
        PlanQuote::new(cost, label)
    }

    pub fn cost(&self, volume_gb: f64) -> f64 {
        self.walk(volume_gb).0
    }

    fn walk(&self, volume_gb: f64) -> (f64, Option<&'static UnitTier>) {
        let mut remaining = volume_gb.max(0.0);
        let mut cost = 0.0;
        let mut reached = self.tiers.first();

        for tier in self.tiers {
            if remaining <= 0.0 {
                break;
            }
            let billed = match tier.capacity_gb {
                Some(capacity) => remaining.min(capacity),
                None => remaining,
            };
            cost += billed * tier.rate_per_gb;
            remaining -= billed;
            reached = Some(tier);
        }

        (cost, reached)
    }
}

impl TieringOptimizedPlan {
    pub fn quote(
        &self,
        total_volume_gb: f64,
        hot_volume_gb: f64,
        avg_file_size_mb: f64,
    ) -> PlanQuote {
        let hot = hot_volume_gb.min(total_volume_gb).max(0.0);
        let cold = (total_volume_gb - hot).max(0.0);

        let hot_quote = self.hot.quote(hot, 0.0, avg_file_size_mb);
        let archive_cost = cold * self.archive_rate_per_gb;
        let monitoring = self.monitoring_surcharge(total_volume_gb, avg_file_size_mb);

        let mut label = format!(
            "{}: {} + {}",
            self.name,
            hot_quote.plan_label(),
            self.archive_label
        );
        if monitoring > 0.0 {
            label.push_str(" + monitoring");
        }

        PlanQuote::new(hot_quote.monthly_cost() + archive_cost + monitoring, label)
    }

    pub fn monitoring_surcharge(&self, total_volume_gb: f64, avg_file_size_mb: f64) -> f64 {
        monitoring_surcharge(
            total_volume_gb,
            avg_file_size_mb,
            self.monitoring_rate_per_1000_objects,
        )
    }
}

/// Per-object monitoring fee. Object count is `(GB * 1024) / MB`, billed per
/// thousand objects.
pub fn monitoring_surcharge(
    total_volume_gb: f64,
    avg_file_size_mb: f64,
    rate_per_1000_objects: f64,
) -> f64 {
    if avg_file_size_mb.is_nan() || avg_file_size_mb < MIN_MONITORED_OBJECT_MB {
        return 0.0;
    }
    ((total_volume_gb * 1024.0) / avg_file_size_mb) / 1000.0 * rate_per_1000_objects
}

/// Consecutive accounts billed at the same tier, numbered from
/// `first_account` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccountRun {
    pub tier: BundleTier,
    pub first_account: u128,
    pub count: u128,
}

impl AccountRun {
    pub fn last_account(&self) -> u128 {
        self.first_account + (self.count - 1)
    }

    pub fn monthly_cost(&self) -> f64 {
        self.count as f64 * self.tier.monthly_price
    }

    fn label(&self) -> String {
        if self.count == 1 {
            format!("{} (#{})", self.tier.label, self.first_account)
        } else {
            format!(
                "{} (#{}-#{})",
                self.tier.label,
                self.first_account,
                self.last_account()
            )
        }
    }
}

/// Per-account breakdown of a bundle quote, grouped into runs of
/// identically billed accounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleAllocation {
    pub runs: Vec<AccountRun>,
    pub monthly_cost: f64,
}

impl BundleAllocation {
    pub fn account_count(&self) -> u128 {
        self.runs.iter().map(|run| run.count).sum()
    }

    /// Tier billed for the 1-based account `number`.
    pub fn tier_for_account(&self, number: u128) -> Option<&BundleTier> {
        self.runs
            .iter()
            .find(|run| run.first_account <= number && number <= run.last_account())
            .map(|run| &run.tier)
    }
}

impl BundlePlan {
    pub fn quote(&self, total_volume_gb: f64) -> PlanQuote {
        let allocation = self.allocate(total_volume_gb);

        if allocation.runs.is_empty() {
            let fallback = self.tiers.first().map(|tier| tier.label).unwrap_or("Free");
            return PlanQuote::new(0.0, format!("{}: {}", self.name, fallback));
        }

        let accounts = allocation
            .runs
            .iter()
            .map(AccountRun::label)
            .collect::<Vec<_>>()
            .join(" + ");
        let count = allocation.account_count();
        let noun = if count == 1 { "account" } else { "accounts" };

        PlanQuote::new(
            allocation.monthly_cost,
            format!("{} [{} {}]: {}", self.name, count, noun, accounts),
        )
    }

    /// Fills `ceil(total / cap)` accounts: every account but the last holds a
    /// full cap, the last holds the remainder. Each account is billed at the
    /// cheapest tier that holds its share.
    pub fn allocate(&self, total_volume_gb: f64) -> BundleAllocation {
        let total = total_volume_gb.max(0.0);
        let cap = self.per_account_cap_gb;

        if total == 0.0 || !total.is_finite() || cap <= 0.0 {
            return BundleAllocation {
                runs: Vec::new(),
                monthly_cost: 0.0,
            };
        }

        let accounts = (total / cap).ceil() as u128;
        let full_accounts = accounts - 1;
        // Float error at very large totals can push the remainder outside
        // (0, cap]; the last account still holds something.
        let last_share = (total - full_accounts as f64 * cap).clamp(f64::MIN_POSITIVE, cap);

        let mut runs: Vec<AccountRun> = Vec::new();
        if full_accounts > 0 {
            if let Some(tier) = self.select_tier(cap) {
                runs.push(AccountRun {
                    tier: *tier,
                    first_account: 1,
                    count: full_accounts,
                });
            }
        }
        if let Some(tier) = self.select_tier(last_share) {
            match runs.last_mut() {
                Some(run) if run.tier == *tier => run.count += 1,
                _ => runs.push(AccountRun {
                    tier: *tier,
                    first_account: full_accounts + 1,
                    count: 1,
                }),
            }
        }

        let monthly_cost = runs.iter().map(AccountRun::monthly_cost).sum();

        BundleAllocation { runs, monthly_cost }
    }

    /// Ascending scan, first tier with `share <= threshold` wins. Falls back
    /// to the largest tier if the table ends below the cap.
    pub fn select_tier(&self, share_gb: f64) -> Option<&'static BundleTier> {
        self.tiers
            .iter()
            .find(|tier| share_gb <= tier.threshold_gb)
            .or_else(|| self.tiers.last())
    }
}

const GB_PER_TB: f64 = 1024.0;

pub const S3_STANDARD_TIERS: [UnitTier; 3] = [
    UnitTier::bounded(50.0 * GB_PER_TB, 0.023, "first 50 TB"),
    UnitTier::bounded(450.0 * GB_PER_TB, 0.022, "next 450 TB"),
    UnitTier::unbounded(0.021, "over 500 TB"),
];

pub const B2_TIERS: [UnitTier; 2] = [
    UnitTier::bounded(10.0, 0.0, "first 10 GB free"),
    UnitTier::unbounded(0.006, "pay as you go"),
];

pub const GOOGLE_ONE_TIERS: [BundleTier; 8] = [
    BundleTier::new(15.0, 0.0, "Free 15 GB"),
    BundleTier::new(100.0, 19.99 / 12.0, "Basic 100 GB (annual)"),
    BundleTier::new(200.0, 29.99 / 12.0, "Standard 200 GB (annual)"),
    BundleTier::new(2048.0, 99.99 / 12.0, "Premium 2 TB (annual)"),
    BundleTier::new(5120.0, 249.99 / 12.0, "Premium 5 TB (annual)"),
    BundleTier::new(10240.0, 49.99, "Premium 10 TB"),
    BundleTier::new(20480.0, 99.99, "Premium 20 TB"),
    BundleTier::new(30720.0, 149.99, "Premium 30 TB"),
];

pub const ONEDRIVE_TIERS: [BundleTier; 4] = [
    BundleTier::new(5.0, 0.0, "Free 5 GB"),
    BundleTier::new(100.0, 1.99, "Microsoft 365 Basic 100 GB"),
    BundleTier::new(1024.0, 6.99, "Microsoft 365 Personal 1 TB"),
    BundleTier::new(6144.0, 9.99, "Microsoft 365 Family 6 TB"),
];

pub const S3_STANDARD: TieredPlan = TieredPlan {
    name: "S3 Standard",
    tiers: &S3_STANDARD_TIERS,
};

pub const S3_INTELLIGENT_TIERING: TieringOptimizedPlan = TieringOptimizedPlan {
    name: "S3 Intelligent-Tiering",
    hot: S3_STANDARD,
    archive_rate_per_gb: 0.00099,
    archive_label: "Deep Archive Access",
    monitoring_rate_per_1000_objects: 0.0025,
};

pub const BACKBLAZE_B2: TieredPlan = TieredPlan {
    name: "B2 Cloud Storage",
    tiers: &B2_TIERS,
};

pub const GOOGLE_ONE: BundlePlan = BundlePlan {
    name: "Google One",
    per_account_cap_gb: 30_000.0,
    tiers: &GOOGLE_ONE_TIERS,
};

pub const ONEDRIVE: BundlePlan = BundlePlan {
    name: "OneDrive",
    per_account_cap_gb: 6_000.0,
    tiers: &ONEDRIVE_TIERS,
};

#[cfg(test)]
mod tests {
    use super::*;

    const TB50: f64 = 50.0 * 1024.0;
    const TB500: f64 = 500.0 * 1024.0;

    #[test]
    fn test_s3_standard_first_tier() {
        let quote = S3_STANDARD.quote(100.0, 0.0, 5.0);
        assert!((quote.monthly_cost() - 2.3).abs() < 1e-9);
        assert_eq!(quote.plan_label(), "S3 Standard (first 50 TB)");
    }

    #[test]
    fn test_s3_standard_spans_tiers() {
        let cost = S3_STANDARD.cost(TB500 + 1000.0);
        let expected = TB50 * 0.023 + (TB500 - TB50) * 0.022 + 1000.0 * 0.021;
        assert!((cost - expected).abs() < 1e-6);
        assert_eq!(
            S3_STANDARD.quote(TB500 + 1000.0, 0.0, 1.0).plan_label(),
            "S3 Standard (over 500 TB)"
        );
    }

    #[test]
    fn test_tiered_continuous_at_boundaries() {
        for boundary in [TB50, TB500] {
            let below = S3_STANDARD.cost(boundary - 1e-6);
            let at = S3_STANDARD.cost(boundary);
            let above = S3_STANDARD.cost(boundary + 1e-6);
            assert!(below <= at && at <= above);
            assert!(above - below < 1e-6);
        }
    }

    #[test]
    fn test_b2_free_tier() {
        assert_eq!(BACKBLAZE_B2.cost(10.0), 0.0);
        assert!((BACKBLAZE_B2.cost(110.0) - 0.6).abs() < 1e-9);
        assert_eq!(
            BACKBLAZE_B2.quote(0.0, 0.0, 0.0).plan_label(),
            "B2 Cloud Storage (first 10 GB free)"
        );
    }

    #[test]
    fn test_monitoring_surcharge_threshold() {
        assert_eq!(monitoring_surcharge(1000.0, 0.1, 0.0025), 0.0);
        assert_eq!(monitoring_surcharge(1000.0, 0.0, 0.0025), 0.0);
        assert_eq!(monitoring_surcharge(1000.0, f64::NAN, 0.0025), 0.0);

        let expected = ((1000.0 * 1024.0) / 0.125) / 1000.0 * 0.0025;
        assert_eq!(monitoring_surcharge(1000.0, 0.125, 0.0025), expected);
    }

    #[test]
    fn test_intelligent_tiering_split() {
        let quote = S3_INTELLIGENT_TIERING.quote(1000.0, 100.0, 0.1);
        let expected = 100.0 * 0.023 + 900.0 * 0.00099;
        assert!((quote.monthly_cost() - expected).abs() < 1e-9);
        assert_eq!(
            quote.plan_label(),
            "S3 Intelligent-Tiering: S3 Standard (first 50 TB) + Deep Archive Access"
        );

        let with_monitoring = S3_INTELLIGENT_TIERING.quote(1000.0, 100.0, 4.0);
        let surcharge = ((1000.0 * 1024.0) / 4.0) / 1000.0 * 0.0025;
        assert!((with_monitoring.monthly_cost() - (expected + surcharge)).abs() < 1e-9);
        assert!(with_monitoring.plan_label().ends_with("+ monitoring"));
    }

    fn only_tier(allocation: &BundleAllocation) -> &'static str {
        assert_eq!(allocation.runs.len(), 1);
        allocation.runs[0].tier.label
    }

    #[test]
    fn test_bundle_single_account_tiers() {
        assert_eq!(only_tier(&GOOGLE_ONE.allocate(10.0)), "Free 15 GB");
        assert_eq!(only_tier(&GOOGLE_ONE.allocate(15.0)), "Free 15 GB");
        assert_eq!(only_tier(&GOOGLE_ONE.allocate(15.5)), "Basic 100 GB (annual)");
        assert_eq!(only_tier(&GOOGLE_ONE.allocate(2048.0)), "Premium 2 TB (annual)");
        assert_eq!(only_tier(&GOOGLE_ONE.allocate(12_000.0)), "Premium 20 TB");
    }

    #[test]
    fn test_bundle_rollover_at_cap() {
        let one = GOOGLE_ONE.allocate(30_000.0);
        assert_eq!(one.account_count(), 1);
        assert_eq!(only_tier(&one), "Premium 30 TB");

        let two = GOOGLE_ONE.allocate(30_001.0);
        assert_eq!(two.account_count(), 2);
        assert_eq!(two.tier_for_account(2).unwrap().label, "Free 15 GB");
        assert!((two.monthly_cost - 149.99).abs() < 1e-9);
    }

    #[test]
    fn test_bundle_account_count_matches_ceiling() {
        let allocation = GOOGLE_ONE.allocate(65_000.0);
        assert_eq!(allocation.account_count(), 3);
        assert_eq!(allocation.tier_for_account(2).unwrap().label, "Premium 30 TB");
        assert_eq!(allocation.tier_for_account(3).unwrap().label, "Premium 5 TB (annual)");
        assert!(allocation.tier_for_account(4).is_none());
        let expected = 149.99 + 149.99 + 249.99 / 12.0;
        assert!((allocation.monthly_cost - expected).abs() < 1e-9);

        let onedrive = ONEDRIVE.allocate(13_000.0);
        assert_eq!(onedrive.account_count(), 3);
        assert_eq!(
            onedrive.tier_for_account(3).unwrap().label,
            "Microsoft 365 Personal 1 TB"
        );
    }

    #[test]
    fn test_bundle_full_accounts_share_one_run() {
        let allocation = GOOGLE_ONE.allocate(90_000.0);
        assert_eq!(allocation.runs.len(), 1);
        assert_eq!(allocation.runs[0].count, 3);
        assert_eq!(
            GOOGLE_ONE.quote(90_000.0).plan_label(),
            "Google One [3 accounts]: Premium 30 TB (#1-#3)"
        );
    }

    #[test]
    fn test_bundle_label_format() {
        let quote = ONEDRIVE.quote(6_050.0);
        assert_eq!(
            quote.plan_label(),
            "OneDrive [2 accounts]: Microsoft 365 Family 6 TB (#1) + Microsoft 365 Basic 100 GB (#2)"
        );
        assert!((quote.monthly_cost() - (9.99 + 1.99)).abs() < 1e-9);

        let quote = GOOGLE_ONE.quote(1_200_050.0);
        assert_eq!(
            quote.plan_label(),
            "Google One [41 accounts]: Premium 30 TB (#1-#40) + Basic 100 GB (annual) (#41)"
        );
    }

    #[test]
    fn test_bundle_huge_volume_is_arithmetic() {
        // Far past the point where subtracting a cap no longer changes the total.
        let total = 1e21;
        assert_eq!(total - GOOGLE_ONE.per_account_cap_gb, total);

        let allocation = GOOGLE_ONE.allocate(total);
        assert_eq!(allocation.account_count(), (total / 30_000.0).ceil() as u128);
        assert!(allocation.runs.len() <= 2);
        assert!(allocation.monthly_cost.is_finite());
        assert!(allocation.monthly_cost > 0.0);
    }

    #[test]
    fn test_bundle_zero_volume_uses_free_label() {
        let quote = ONEDRIVE.quote(0.0);
        assert_eq!(quote.monthly_cost(), 0.0);
        assert_eq!(quote.plan_label(), "OneDrive: Free 5 GB");
        assert_eq!(ONEDRIVE.allocate(0.0).account_count(), 0);
    }

    #[test]
    fn test_provider_dispatch() {
        let provider = PricingProvider::Bundle(GOOGLE_ONE);
        assert_eq!(provider.plan_name(), "Google One");
        assert_eq!(provider.quote(50.0, 10.0, 1.0), GOOGLE_ONE.quote(50.0));
    }
}
