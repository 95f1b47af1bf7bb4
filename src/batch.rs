//! Corpus-aware batch scoring and incremental re-scoring.
//!
//! One batch sees one corpus snapshot and one `now`: the novelty context is
//! built once per batch, not once per article, so every article in the batch
//! is compared against the same view of history. Two duplicates submitted in
//! the same batch are therefore *not* detected against each other — only
//! against the pre-existing corpus. That is a documented limitation of the
//! protocol, not a bug; exact-title duplicates are rejected earlier by
//! `dedup_against_corpus`.

use crate::aggregate::{ScoreBreakdown, SmartScorer};
use crate::article::Article;
use crate::corpus::CorpusSnapshot;
use crate::legacy::legacy_score;
use chrono::{DateTime, Utc};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use std::time::Instant;
use tracing::{debug, info};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("smartsort_scored_total", "Articles scored in batches.");
        describe_counter!(
            "smartsort_dedup_total",
            "Articles skipped by exact-title dedup before scoring."
        );
        describe_counter!("smartsort_rescored_total", "Single-article re-scores.");
        describe_histogram!("smartsort_batch_ms", "Batch scoring time in milliseconds.");
    });
}

/// Short anonymized id for log lines; raw titles are never logged.
fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// An article with both persisted score fields attached.
#[derive(Debug, Clone)]
pub struct ScoredArticle {
    pub article: Article,
    /// The smart score used for "smart" sort order.
    pub smart_score: f32,
    /// The legacy composite score, kept for older serving paths.
    pub score: f32,
    pub breakdown: ScoreBreakdown,
}

/// Persistence-boundary dedup: drop articles whose (normalized) title already
/// exists in the corpus. Skipped articles are never scored. Returns the kept
/// articles and the number skipped.
pub fn dedup_against_corpus(
    articles: Vec<Article>,
    corpus: &CorpusSnapshot,
) -> (Vec<Article>, usize) {
    ensure_metrics_described();

    let mut kept = Vec::with_capacity(articles.len());
    let mut skipped = 0usize;
    for a in articles {
        if corpus.contains_title(&a.title) {
            debug!(id = %a.id, title_hash = %anon_hash(&a.title), "duplicate title, skipping");
            skipped += 1;
            continue;
        }
        kept.push(a);
    }
    counter!("smartsort_dedup_total").increment(skipped as u64);
    (kept, skipped)
}

impl SmartScorer {
    /// Score a batch of new articles against one corpus snapshot.
    ///
    /// Every article sees the same snapshot and the same `now`. The result
    /// carries both score fields per article and is sorted by smart score,
    /// highest first (ties keep submission order).
    pub fn score_batch(
        &self,
        new_articles: Vec<Article>,
        corpus: &CorpusSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<ScoredArticle> {
        ensure_metrics_described();
        let started = Instant::now();
        let batch_len = new_articles.len();

        let mut out: Vec<ScoredArticle> = new_articles
            .into_iter()
            .map(|article| self.score_one(article, corpus, now))
            .collect();

        out.sort_by(|a, b| b.smart_score.total_cmp(&a.smart_score));

        let elapsed_ms = started.elapsed().as_millis() as f64;
        counter!("smartsort_scored_total").increment(batch_len as u64);
        histogram!("smartsort_batch_ms").record(elapsed_ms);
        info!(
            batch = batch_len,
            corpus = corpus.len(),
            elapsed_ms,
            "scored batch"
        );

        out
    }

    /// Re-score one article after a mutable field changed (vote count,
    /// summary metadata). Runs the exact same aggregation path as initial
    /// scoring so the two can never drift; freshness is recomputed against
    /// the supplied `now` as a side effect.
    pub fn rescore(
        &self,
        article: Article,
        corpus: &CorpusSnapshot,
        now: DateTime<Utc>,
    ) -> ScoredArticle {
        ensure_metrics_described();
        counter!("smartsort_rescored_total").increment(1);
        debug!(id = %article.id, title_hash = %anon_hash(&article.title), "rescoring");
        self.score_one(article, corpus, now)
    }

    fn score_one(
        &self,
        article: Article,
        corpus: &CorpusSnapshot,
        now: DateTime<Utc>,
    ) -> ScoredArticle {
        let smart = self.score(&article, corpus, now);
        let score = legacy_score(&self.config().legacy, &article, corpus, now);
        ScoredArticle {
            article,
            smart_score: smart.value,
            score,
            breakdown: smart.breakdown,
        }
    }
}
