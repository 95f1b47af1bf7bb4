//! Scoring configuration: weight table, keyword/source tiers, time buckets
//! and similarity thresholds.
//!
//! The whole configuration is one immutable value constructed (and validated)
//! in a single place, then passed into every scorer — there is no module-level
//! mutable state. Share it behind an `Arc` and swap the whole `Arc` to
//! hot-reload; never mutate it while a scoring pass is in flight.
//!
//! - Loads from TOML (path via `SMART_SORT_CONFIG_PATH`, default
//!   `config/scoring.toml`); any section left out falls back to the built-in
//!   seed, so a config file can override just the weights.
//! - A config that parses but fails validation (weights not summing to 1.0,
//!   empty tier tables, non-monotone buckets) is a fatal error: a silently
//!   wrong configuration would corrupt every ranking decision.

use anyhow::{anyhow, bail, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/scoring.toml";
pub const ENV_CONFIG_PATH: &str = "SMART_SORT_CONFIG_PATH";

/// Tolerance when checking that weights sum to 1.0.
const WEIGHT_SUM_EPS: f32 = 1e-4;

/// Per-dimension weights of the smart score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Weights {
    pub significance: f32,
    pub freshness: f32,
    pub source_weight: f32,
    pub popularity: f32,
    pub novelty: f32,
    pub summary_quality: f32,
}

impl Weights {
    pub fn sum(&self) -> f32 {
        self.significance
            + self.freshness
            + self.source_weight
            + self.popularity
            + self.novelty
            + self.summary_quality
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            significance: 0.30,
            freshness: 0.20,
            source_weight: 0.15,
            popularity: 0.10,
            novelty: 0.15,
            summary_quality: 0.10,
        }
    }
}

/// Inclusive clamp range for a score.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScoreRange {
    pub min: f32,
    pub max: f32,
}

impl ScoreRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.min && x <= self.max
    }
}

/// One significance tier: the score awarded when any of its keywords occurs
/// as a substring of the lower-cased title+content.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordTier {
    pub score: f32,
    pub keywords: Vec<String>,
}

/// One source-credibility tier. Lookup is exact and case-sensitive.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceTier {
    pub score: f32,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FreshnessBucket {
    pub max_hours: f32,
    pub score: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FreshnessConfig {
    /// Ascending by `max_hours`; scores must be non-increasing.
    pub buckets: Vec<FreshnessBucket>,
    /// Score once elapsed time exceeds the last bucket.
    pub beyond_score: f32,
    /// Neutral default for articles without a usable publish timestamp.
    pub missing_score: f32,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            buckets: vec![
                FreshnessBucket { max_hours: 1.0, score: 10.0 },
                FreshnessBucket { max_hours: 3.0, score: 10.0 },
                FreshnessBucket { max_hours: 6.0, score: 7.0 },
                FreshnessBucket { max_hours: 12.0, score: 5.0 },
                FreshnessBucket { max_hours: 24.0, score: 3.0 },
                FreshnessBucket { max_hours: 48.0, score: 1.0 },
            ],
            beyond_score: 0.0,
            missing_score: 6.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopularityConfig {
    pub no_votes: f32,
    /// 1–5 votes.
    pub low_votes: f32,
    /// 6–10 votes.
    pub medium_votes: f32,
    /// More than 10 votes.
    pub high_votes: f32,
    /// Added once per duplicate report from another source.
    pub duplicate_bonus: f32,
    pub range: ScoreRange,
}

impl Default for PopularityConfig {
    fn default() -> Self {
        Self {
            no_votes: 0.0,
            low_votes: 3.0,
            medium_votes: 6.0,
            high_votes: 10.0,
            duplicate_bonus: 2.0,
            range: ScoreRange::new(6.0, 6.3),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SummaryTier {
    pub min_structure: f32,
    pub score: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryQualityConfig {
    /// Descending by `min_structure`; first tier the raw structure score
    /// reaches wins.
    pub tiers: Vec<SummaryTier>,
    /// Score for a missing summary, or a structure score below every tier.
    pub none_score: f32,
}

impl Default for SummaryQualityConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                SummaryTier { min_structure: 8.0, score: 10.0 },
                SummaryTier { min_structure: 6.0, score: 8.0 },
                SummaryTier { min_structure: 4.0, score: 6.0 },
                SummaryTier { min_structure: 1.0, score: 3.0 },
            ],
            none_score: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NoveltyTier {
    pub min_similarity: f32,
    pub score: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoveltyConfig {
    /// Descending by `min_similarity` (strictest first); the first tier the
    /// maximum corpus similarity reaches wins.
    pub tiers: Vec<NoveltyTier>,
    /// Score when nothing in the corpus comes close (or the corpus is empty).
    pub unique_score: f32,
}

impl Default for NoveltyConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                NoveltyTier { min_similarity: 0.95, score: 5.9 }, // exact match
                NoveltyTier { min_similarity: 0.80, score: 6.0 }, // high
                NoveltyTier { min_similarity: 0.60, score: 6.1 }, // medium
                NoveltyTier { min_similarity: 0.30, score: 6.2 }, // low
            ],
            unique_score: 6.5,
        }
    }
}

/// Weights of the legacy composite score.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LegacyWeights {
    pub time: f32,
    pub structure: f32,
    pub source: f32,
    pub keyword_novelty: f32,
    pub headline: f32,
}

impl LegacyWeights {
    pub fn sum(&self) -> f32 {
        self.time + self.structure + self.source + self.keyword_novelty + self.headline
    }
}

impl Default for LegacyWeights {
    fn default() -> Self {
        Self {
            time: 0.40,
            structure: 0.20,
            source: 0.15,
            keyword_novelty: 0.15,
            headline: 0.10,
        }
    }
}

/// Tables of the legacy composite scorer (the persisted `score` field that
/// predates the smart score).
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyConfig {
    /// Source name -> rating on a 1–5 scale.
    pub source_ratings: HashMap<String, f32>,
    pub default_rating: f32,
    pub max_rating: f32,
    /// Half-life of the exponential time decay, in hours.
    pub half_life_hours: f32,
    /// Vote count at which the headline component saturates at 1.0.
    pub headline_saturation: f32,
    pub weights: LegacyWeights,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        let mut source_ratings = HashMap::new();
        for (name, rating) in [
            ("Financial Times", 5.0),
            ("Wall Street Journal", 5.0),
            ("WSJ", 5.0),
            ("Reuters", 4.0),
            ("AP", 4.0),
            ("AP News", 4.0),
            ("BBC", 4.0),
            ("CNN", 3.0),
            ("The Guardian", 3.0),
            ("NYTimes", 4.0),
            ("The New York Times", 4.0),
            ("Bloomberg", 4.0),
            ("Al Jazeera", 3.0),
            ("NPR", 3.0),
            ("Fox News", 2.0),
            ("Sky News", 3.0),
            ("TechCrunch", 3.0),
            ("Ars Technica", 3.0),
            ("Wired", 3.0),
            ("The Verge", 3.0),
            ("Engadget", 2.0),
            ("Gizmodo", 2.0),
            ("Mashable", 2.0),
            ("VentureBeat", 3.0),
            ("CNET", 2.0),
        ] {
            source_ratings.insert(name.to_string(), rating);
        }
        Self {
            source_ratings,
            default_rating: 2.0,
            max_rating: 5.0,
            half_life_hours: 12.0,
            headline_saturation: 20.0,
            weights: LegacyWeights::default(),
        }
    }
}

/// The full, validated scoring configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: Weights,
    #[serde(default = "seed_significance")]
    pub significance: Vec<KeywordTier>,
    #[serde(default = "seed_significance_range")]
    pub significance_range: ScoreRange,
    #[serde(default = "seed_sources")]
    pub sources: Vec<SourceTier>,
    #[serde(default = "seed_default_source_score")]
    pub default_source_score: f32,
    #[serde(default)]
    pub freshness: FreshnessConfig,
    #[serde(default)]
    pub popularity: PopularityConfig,
    #[serde(default)]
    pub summary_quality: SummaryQualityConfig,
    #[serde(default)]
    pub novelty: NoveltyConfig,
    /// Final clamp applied to the weighted aggregate.
    #[serde(default = "seed_global_range")]
    pub global_range: ScoreRange,
    #[serde(default)]
    pub legacy: LegacyConfig,
}

fn seed_significance_range() -> ScoreRange {
    ScoreRange::new(6.0, 6.5)
}

fn seed_default_source_score() -> f32 {
    6.0
}

fn seed_global_range() -> ScoreRange {
    ScoreRange::new(5.9, 6.5)
}

fn seed_significance() -> Vec<KeywordTier> {
    fn tier(score: f32, kws: &[&str]) -> KeywordTier {
        KeywordTier {
            score,
            keywords: kws.iter().map(|s| s.to_string()).collect(),
        }
    }
    vec![
        // Major international politics, war, breakthroughs, crises.
        tier(
            10.0,
            &[
                "war", "conflict", "invasion", "attack", "missile", "nuclear", "weapon",
                "president", "prime minister", "election", "vote", "referendum", "breakthrough",
                "discovery", "invention", "innovation", "revolutionary", "crisis", "emergency",
                "disaster", "catastrophe", "pandemic", "epidemic",
            ],
        ),
        // Economic policy, elections, major natural disasters.
        tier(
            8.0,
            &[
                "economy", "economic", "policy", "regulation", "law", "bill", "act", "election",
                "campaign", "candidate", "political", "government", "earthquake", "tsunami",
                "hurricane", "tornado", "flood", "wildfire", "trade", "tariff", "sanction",
                "embargo", "diplomatic", "treaty",
            ],
        ),
        // Business deals, major sports and entertainment events.
        tier(
            6.0,
            &[
                "merger", "acquisition", "takeover", "deal", "agreement", "partnership",
                "olympics", "world cup", "championship", "tournament", "final", "award", "oscar",
                "grammy", "nobel", "prize", "celebration", "business", "corporate", "company",
                "stock", "market", "investment",
            ],
        ),
        // General business and local politics.
        tier(
            4.0,
            &[
                "local", "city", "town", "community", "neighborhood", "district", "business",
                "company", "startup", "funding", "venture", "capital", "technology", "software",
                "app", "platform", "service", "product",
            ],
        ),
        // Entertainment gossip and lifestyle.
        tier(
            1.0,
            &[
                "celebrity", "star", "actor", "actress", "singer", "musician", "gossip", "rumor",
                "scandal", "divorce", "marriage", "wedding", "lifestyle", "fashion", "beauty",
                "food", "recipe", "travel",
            ],
        ),
    ]
}

fn seed_sources() -> Vec<SourceTier> {
    fn tier(score: f32, names: &[&str]) -> SourceTier {
        SourceTier {
            score,
            names: names.iter().map(|s| s.to_string()).collect(),
        }
    }
    vec![
        tier(
            10.0,
            &["Financial Times", "The New York Times", "Reuters", "Associated Press", "AP", "AP News"],
        ),
        tier(9.0, &["BBC News", "BBC", "The Washington Post", "The Guardian"]),
        tier(8.0, &["Bloomberg", "CNBC", "Los Angeles Times"]),
        tier(7.0, &["NBC News", "CBS News", "ABC News"]),
        tier(6.0, &["Fox News", "Sky News", "The Telegraph"]),
        tier(5.0, &["The Independent", "Euronews", "Deutsche Welle"]),
        tier(4.0, &["Al Jazeera", "Axios"]),
        tier(3.0, &["other", "unknown", "blog", "social"]),
    ]
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl ScoringConfig {
    /// Built-in seed configuration. Always valid.
    pub fn default_seed() -> Self {
        Self {
            weights: Weights::default(),
            significance: seed_significance(),
            significance_range: seed_significance_range(),
            sources: seed_sources(),
            default_source_score: seed_default_source_score(),
            freshness: FreshnessConfig::default(),
            popularity: PopularityConfig::default(),
            summary_quality: SummaryQualityConfig::default(),
            novelty: NoveltyConfig::default(),
            global_range: seed_global_range(),
            legacy: LegacyConfig::default(),
        }
    }

    /// Load and validate from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let cfg: ScoringConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate from a TOML file. Any error here is fatal.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read scoring config at {}: {e}", path.display()))?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow!("invalid scoring config at {}: {e}", path.display()))
    }

    /// Resolve the config path from `SMART_SORT_CONFIG_PATH` (or the default
    /// location). An explicitly configured file must load cleanly; if no file
    /// exists at the default location the built-in seed is used.
    pub fn from_env() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            return Self::load_from_file(PathBuf::from(p));
        }
        let default = Path::new(DEFAULT_CONFIG_PATH);
        if default.exists() {
            Self::load_from_file(default)
        } else {
            Ok(Self::default_seed())
        }
    }

    /// Fail fast on anything that would silently corrupt ranking decisions.
    pub fn validate(&self) -> Result<()> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPS {
            bail!("smart-score weights must sum to 1.0, got {sum}");
        }
        let legacy_sum = self.legacy.weights.sum();
        if (legacy_sum - 1.0).abs() > WEIGHT_SUM_EPS {
            bail!("legacy weights must sum to 1.0, got {legacy_sum}");
        }

        if self.significance.is_empty() {
            bail!("significance tier table is empty");
        }
        for t in &self.significance {
            if t.keywords.is_empty() {
                bail!("significance tier {} has no keywords", t.score);
            }
        }

        if self.sources.is_empty() {
            bail!("source tier table is empty");
        }
        for t in &self.sources {
            if t.names.is_empty() {
                bail!("source tier {} has no names", t.score);
            }
        }

        if self.freshness.buckets.is_empty() {
            bail!("freshness bucket table is empty");
        }
        for w in self.freshness.buckets.windows(2) {
            if w[1].max_hours <= w[0].max_hours {
                bail!(
                    "freshness buckets must be ascending by max_hours ({} then {})",
                    w[0].max_hours,
                    w[1].max_hours
                );
            }
            if w[1].score > w[0].score {
                bail!("freshness scores must be non-increasing with age");
            }
        }
        if let Some(last) = self.freshness.buckets.last() {
            if self.freshness.beyond_score > last.score {
                bail!("freshness beyond_score must not exceed the last bucket score");
            }
        }

        if self.novelty.tiers.is_empty() {
            bail!("novelty tier table is empty");
        }
        for w in self.novelty.tiers.windows(2) {
            if w[1].min_similarity >= w[0].min_similarity {
                bail!("novelty tiers must be strictly descending by min_similarity");
            }
        }

        if self.summary_quality.tiers.is_empty() {
            bail!("summary quality tier table is empty");
        }
        for w in self.summary_quality.tiers.windows(2) {
            if w[1].min_structure >= w[0].min_structure {
                bail!("summary quality tiers must be strictly descending by min_structure");
            }
        }

        for (name, r) in [
            ("significance_range", self.significance_range),
            ("popularity.range", self.popularity.range),
            ("global_range", self.global_range),
        ] {
            if r.min > r.max {
                bail!("{name} has min {} > max {}", r.min, r.max);
            }
        }

        if self.legacy.half_life_hours <= 0.0 {
            bail!("legacy half_life_hours must be positive");
        }
        if self.legacy.headline_saturation <= 0.0 {
            bail!("legacy headline_saturation must be positive");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_valid() {
        ScoringConfig::default_seed().validate().unwrap();
    }

    #[test]
    fn seed_weights_sum_to_one() {
        let w = Weights::default();
        assert!((w.sum() - 1.0).abs() < 1e-6);
        let lw = LegacyWeights::default();
        assert!((lw.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_toml_falls_back_to_seed_sections() {
        let cfg = ScoringConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.significance.len(), 5);
        assert!((cfg.global_range.max - 6.5).abs() < 1e-6);
    }

    #[test]
    fn partial_override_keeps_other_sections() {
        let toml = r#"
            [weights]
            significance = 0.5
            freshness = 0.1
            source_weight = 0.1
            popularity = 0.1
            novelty = 0.1
            summary_quality = 0.1
        "#;
        let cfg = ScoringConfig::from_toml_str(toml).unwrap();
        assert!((cfg.weights.significance - 0.5).abs() < 1e-6);
        // untouched section still seeded
        assert!((cfg.novelty.unique_score - 6.5).abs() < 1e-6);
    }

    #[test]
    fn bad_weight_sum_is_fatal() {
        let toml = r#"
            [weights]
            significance = 0.9
            freshness = 0.9
            source_weight = 0.1
            popularity = 0.1
            novelty = 0.1
            summary_quality = 0.1
        "#;
        let err = ScoringConfig::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"), "{err}");
    }

    #[test]
    fn empty_tier_table_is_fatal() {
        let toml = "significance = []";
        assert!(ScoringConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn non_monotone_freshness_is_fatal() {
        let toml = r#"
            [freshness]
            beyond_score = 0.0
            missing_score = 6.0
            [[freshness.buckets]]
            max_hours = 1.0
            score = 5.0
            [[freshness.buckets]]
            max_hours = 3.0
            score = 7.0
        "#;
        assert!(ScoringConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn novelty_tiers_must_descend() {
        let toml = r#"
            [novelty]
            unique_score = 6.5
            [[novelty.tiers]]
            min_similarity = 0.3
            score = 6.2
            [[novelty.tiers]]
            min_similarity = 0.95
            score = 5.9
        "#;
        assert!(ScoringConfig::from_toml_str(toml).is_err());
    }
}
