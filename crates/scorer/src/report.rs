use crate::decollision::COLLISION_THRESHOLD;
use crate::scoring::WalletScore;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Bucket labels in display order. The first bucket is closed on both ends;
/// the rest are half-open, so a score of exactly 200 lands in "0-200".
pub const BUCKET_LABELS: [&str; 5] = ["0-200", "200-400", "400-600", "600-800", "800-1000"];

pub fn bucket_label(score: i64) -> &'static str {
    match score {
        i64::MIN..=200 => BUCKET_LABELS[0],
        201..=400 => BUCKET_LABELS[1],
        401..=600 => BUCKET_LABELS[2],
        601..=800 => BUCKET_LABELS[3],
        _ => BUCKET_LABELS[4],
    }
}

pub fn write_scores_csv(path: &Path, rows: &[WalletScore]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = String::from("wallet_id,score\n");
    for row in rows {
        out.push_str(&row.wallet_id);
        out.push(',');
        out.push_str(&row.score.to_string());
        out.push('\n');
    }
    std::fs::write(path, out)
        .with_context(|| format!("failed to write scores to {}", path.display()))
}

pub fn read_scores_csv(path: &Path) -> Result<Vec<WalletScore>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scores from {}", path.display()))?;

    let mut rows = Vec::new();
    for (lineno, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let (wallet_id, score) = line
            .rsplit_once(',')
            .with_context(|| format!("malformed scores row at line {}", lineno + 1))?;
        rows.push(WalletScore {
            wallet_id: wallet_id.to_string(),
            score: score
                .trim()
                .parse()
                .with_context(|| format!("malformed score at line {}", lineno + 1))?,
        });
    }
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    pub total_wallets: usize,
    pub duplicate_wallet_ids: usize,
    pub bucket_counts: Vec<(&'static str, usize)>,
    /// Score values still shared by more than COLLISION_THRESHOLD wallets
    /// after de-collision, with their counts.
    pub overloaded_scores: Vec<(i64, usize)>,
}

pub fn summarize(rows: &[WalletScore]) -> ScoreSummary {
    let mut bucket_counts: Vec<(&'static str, usize)> =
        BUCKET_LABELS.iter().map(|&l| (l, 0)).collect();
    let mut score_counts: HashMap<i64, usize> = HashMap::new();
    let mut wallet_counts: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let label = bucket_label(row.score);
        if let Some(entry) = bucket_counts.iter_mut().find(|(l, _)| *l == label) {
            entry.1 += 1;
        }
        *score_counts.entry(row.score).or_insert(0) += 1;
        *wallet_counts.entry(&row.wallet_id).or_insert(0) += 1;
    }

    let duplicate_wallet_ids = wallet_counts.values().map(|&c| c - 1).sum();

    let mut overloaded_scores: Vec<(i64, usize)> = score_counts
        .into_iter()
        .filter(|&(_, count)| count > COLLISION_THRESHOLD)
        .collect();
    overloaded_scores.sort_unstable();

    ScoreSummary {
        total_wallets: rows.len(),
        duplicate_wallet_ids,
        bucket_counts,
        overloaded_scores,
    }
}

pub fn print_summary(summary: &ScoreSummary) {
    println!("Score range distribution:");
    for (label, count) in &summary.bucket_counts {
        println!("{label:>10}  {count}");
    }

    println!();
    println!("Quality check:");
    println!("  total wallets: {}", summary.total_wallets);
    println!("  duplicate wallet_ids: {}", summary.duplicate_wallet_ids);

    if summary.overloaded_scores.is_empty() {
        println!(
            "  no score repeated more than {COLLISION_THRESHOLD} times"
        );
    } else {
        println!("  scores repeated more than {COLLISION_THRESHOLD} times:");
        for (score, count) in &summary.overloaded_scores {
            println!("  {score:>6}  x{count}");
        }
    }
}
