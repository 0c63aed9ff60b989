use crate::features::WalletFeatures;

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletScore {
    pub wallet_id: String,
    pub score: i64,
}

/// Activity volume: log-damped transaction count, capped at 200.
pub fn activity_term(tx_count: u32) -> f64 {
    (f64::from(tx_count).ln_1p() * 60.0).min(200.0)
}

/// Capital moved: square root of total value in ETH, capped at 200.
pub fn capital_term(total_value_eth: f64) -> f64 {
    (total_value_eth.sqrt() * 40.0).min(200.0)
}

/// Counterparty diversity: 4 points per distinct recipient, capped at 100.
pub fn recipient_term(unique_recipients: u32) -> f64 {
    (f64::from(unique_recipients) * 4.0).min(100.0)
}

/// Protocol diversity: 6 points per distinct method, capped at 100.
pub fn method_term(unique_methods: u32) -> f64 {
    (f64::from(unique_methods) * 6.0).min(100.0)
}

/// Typical transaction size: log-damped average value in ETH, capped at 200.
pub fn typical_size_term(avg_value_eth: f64) -> f64 {
    (avg_value_eth.ln_1p() * 60.0).min(200.0)
}

/// Reliability: success rate scaled to at most 200.
pub fn reliability_term(success_rate: f64) -> f64 {
    success_rate * 200.0
}

/// Combine the six capped terms and clamp to [0, 1000].
///
/// The five capped terms sum to at most 800 and reliability contributes up
/// to 200, so 1000 is reachable only with every cap saturated and a perfect
/// success rate. Pure function of the feature set.
pub fn compute_score(f: &WalletFeatures) -> i64 {
    let sum = activity_term(f.tx_count)
        + capital_term(f.total_value_eth)
        + recipient_term(f.unique_recipients)
        + method_term(f.unique_methods)
        + typical_size_term(f.avg_value_eth)
        + reliability_term(f.success_rate);

    (sum.round() as i64).clamp(MIN_SCORE, MAX_SCORE)
}

/// One score row per feature set, preserving input order.
pub fn score_all(features: &[WalletFeatures]) -> Vec<WalletScore> {
    features
        .iter()
        .map(|f| WalletScore {
            wallet_id: f.wallet_id.clone(),
            score: compute_score(f),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(
        tx_count: u32,
        total_value_eth: f64,
        avg_value_eth: f64,
        unique_recipients: u32,
        unique_methods: u32,
        success_rate: f64,
    ) -> WalletFeatures {
        WalletFeatures {
            wallet_id: "0xaaa".to_string(),
            tx_count,
            total_value_eth,
            avg_value_eth,
            unique_recipients,
            unique_methods,
            failed_count: 0,
            success_rate,
        }
    }

    #[test]
    fn test_all_zero_features_score_zero() {
        let f = features(0, 0.0, 0.0, 0, 0, 0.0);
        assert_eq!(compute_score(&f), 0);
    }

    #[test]
    fn test_single_clean_zero_value_transaction_scores_252() {
        // count=1, one recipient, one method, success_rate=1:
        // ln(2)*60 + 0 + 4 + 6 + 0 + 200 = 251.59 -> 252
        let f = features(1, 0.0, 0.0, 1, 1, 1.0);
        assert_eq!(compute_score(&f), 252);
    }

    #[test]
    fn test_saturated_caps_reach_exactly_1000() {
        let f = features(10_000, 1_000_000.0, 1_000_000.0, 1_000, 1_000, 1.0);
        assert_eq!(compute_score(&f), 1000);
    }

    #[test]
    fn test_each_term_respects_its_cap() {
        assert_eq!(activity_term(u32::MAX), 200.0);
        assert_eq!(capital_term(1e12), 200.0);
        assert_eq!(recipient_term(500), 100.0);
        assert_eq!(method_term(500), 100.0);
        assert_eq!(typical_size_term(1e12), 200.0);
        assert_eq!(reliability_term(1.0), 200.0);
    }

    #[test]
    fn test_score_always_in_range() {
        let cases = [
            features(0, 0.0, 0.0, 0, 0, 0.0),
            features(1, 0.5, 0.5, 1, 1, 0.5),
            features(50, 100.0, 2.0, 30, 20, 1.0),
            features(u32::MAX, f64::MAX, f64::MAX, u32::MAX, u32::MAX, 1.0),
        ];
        for f in &cases {
            let score = compute_score(f);
            assert!((MIN_SCORE..=MAX_SCORE).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let f = features(7, 12.5, 1.8, 5, 3, 0.9);
        assert_eq!(compute_score(&f), compute_score(&f));
    }

    #[test]
    fn test_score_all_preserves_order() {
        let rows = score_all(&[features(0, 0.0, 0.0, 0, 0, 0.0), features(1, 0.0, 0.0, 1, 1, 1.0)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].score, 0);
        assert_eq!(rows[1].score, 252);
    }
}
