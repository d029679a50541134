//! Headless battle replay: advance, evaluate, smooth, record.

use std::time::Instant;

use contracts::{ReplayConfig, SectorKey, SectorResult};
use race_engine::{
    advance_step, evaluate_frame, BattleFrame, BattleSetup, ProbabilitySmoother, RaceAnalysis,
};
use tracing::debug;

use super::sector_cache::SectorCache;
use super::stats::ReplayStats;

/// One replayed frame
#[derive(Debug, Clone)]
pub struct ReplayTick {
    pub frame: BattleFrame,
    /// EMA of the probability percent, host-side state
    pub smoothed_percent: f64,
    /// Sector comparison for this lap pair, set when the pair changes
    pub new_sectors: Option<Vec<SectorResult>>,
}

/// Frame loop state owned by the host
pub struct Replay<'a> {
    analysis: &'a RaceAnalysis,
    setup: BattleSetup,
    hero_len: usize,
    step: usize,
    multiplier: usize,
    smoother: ProbabilitySmoother,
    sectors: SectorCache,
    last_key: Option<SectorKey>,
    stats: ReplayStats,
    started: Instant,
}

impl<'a> Replay<'a> {
    pub fn new(
        analysis: &'a RaceAnalysis,
        setup: BattleSetup,
        start_step: usize,
        config: &ReplayConfig,
    ) -> Self {
        let hero_len = analysis.series(&setup.hero_id).map_or(0, |s| s.len());
        Self {
            analysis,
            setup,
            hero_len,
            step: start_step,
            multiplier: config.speed_multiplier,
            smoother: ProbabilitySmoother::new(config.smoothing_alpha),
            sectors: SectorCache::new(),
            last_key: None,
            stats: ReplayStats::default(),
            started: Instant::now(),
        }
    }

    pub fn setup(&self) -> &BattleSetup {
        &self.setup
    }

    /// Hero series length (frames in one pass at multiplier 1)
    pub fn hero_len(&self) -> usize {
        self.hero_len
    }

    /// Evaluate the current step, then advance (wrapping at the end)
    pub fn tick(&mut self) -> Option<ReplayTick> {
        let frame = evaluate_frame(self.analysis, &self.setup, self.step)?;

        let smoothed_percent = self.smoother.update(frame.assessment.probability_percent);
        observability::record_assessment(&frame.assessment);
        observability::record_smoothed_probability(smoothed_percent);
        self.stats.aggregator.update(&frame.assessment);
        self.stats.frames += 1;

        let new_sectors = self.sectors_for(&frame);

        self.step = advance_step(self.step, self.multiplier, self.hero_len);
        self.stats.duration = self.started.elapsed();

        Some(ReplayTick {
            frame,
            smoothed_percent,
            new_sectors,
        })
    }

    /// Consume the replay, returning final statistics
    pub fn finish(mut self) -> ReplayStats {
        self.stats.duration = self.started.elapsed();
        self.stats.sector_cache_hits = self.sectors.hits();
        self.stats.sector_cache_misses = self.sectors.misses();
        self.stats
    }

    /// Sector deltas of the current lap pair, only when the pair changed
    fn sectors_for(&mut self, frame: &BattleFrame) -> Option<Vec<SectorResult>> {
        let rival_lap = frame.rival_lap?;
        let key = SectorKey {
            hero_id: self.setup.hero_id.clone(),
            hero_lap: frame.hero_lap,
            rival_id: self.setup.rival_id.clone(),
            rival_lap,
        };
        if self.last_key.as_ref() == Some(&key) {
            return None;
        }

        let analysis = self.analysis;
        let sectors = self
            .sectors
            .get_or_compute(key.clone(), || {
                analysis.analyze_sectors(
                    analysis.lap_series(&key.hero_id, key.hero_lap),
                    analysis.lap_series(&key.rival_id, key.rival_lap),
                )
            })
            .map(<[SectorResult]>::to_vec);

        debug!(
            hero_lap = key.hero_lap,
            rival_lap = key.rival_lap,
            sectors = sectors.as_ref().map_or(0, Vec::len),
            "Lap pair changed"
        );
        self.last_key = Some(key);
        sectors
    }
}
