//! # Integration Tests
//!
//! Cross-crate end-to-end tests.
//!
//! Covers:
//! - CSV -> load -> RaceAnalysis -> battle frames
//! - Lap derivation, fill and re-pivot invariants on loaded sessions
//! - Overtake scenarios fed through the full ingestion path

#[cfg(test)]
mod fixtures {
    use std::io::Write;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use contracts::{EngineConfig, WideTable};
    use tempfile::NamedTempFile;

    pub fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 4, 18, 0, 0).unwrap()
    }

    /// Long-format CSV built row by row
    pub struct SessionCsv {
        body: String,
    }

    impl SessionCsv {
        pub fn new() -> Self {
            Self {
                body: String::from("timestamp,vehicle_id,channel_name,value\n"),
            }
        }

        pub fn push(&mut self, secs: i64, vehicle: &str, channel: &str, value: impl ToString) {
            let ts = (base() + Duration::seconds(secs)).to_rfc3339();
            self.body
                .push_str(&format!("{},{},{},{}\n", ts, vehicle, channel, value.to_string()));
        }

        /// One row per `(channel, value)` at the same instant
        pub fn snapshot(&mut self, secs: i64, vehicle: &str, values: &[(&str, f64)]) {
            for (channel, value) in values {
                self.push(secs, vehicle, channel, value);
            }
        }

        pub fn write(&self) -> NamedTempFile {
            let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
            file.write_all(self.body.as_bytes()).unwrap();
            file
        }

        pub fn load(&self) -> WideTable {
            let file = self.write();
            ingestion::load(file.path()).unwrap()
        }

        pub fn load_with(&self, config: &EngineConfig) -> WideTable {
            let file = self.write();
            ingestion::load_with_config(file.path(), &config.ingestion)
                .unwrap()
                .0
        }
    }

    /// A lap driven at constant speed, sampled at 1 Hz
    pub struct Lap {
        pub duration_s: i64,
        pub start_m: f64,
        pub end_m: f64,
    }

    impl Lap {
        pub fn new(duration_s: i64, start_m: f64, end_m: f64) -> Self {
            Self {
                duration_s,
                start_m,
                end_m,
            }
        }
    }

    /// Append consecutive laps for one car.
    ///
    /// Throttle is logged only every 10 s and an unused engine channel is
    /// mixed in, as real loggers do.
    pub fn drive(csv: &mut SessionCsv, vehicle: &str, laps: &[Lap]) {
        let mut t = 0;
        for lap in laps {
            let speed_kmh = (lap.end_m - lap.start_m) / lap.duration_s as f64 * 3.6;
            for i in 0..=lap.duration_s {
                let d = lap.start_m + (lap.end_m - lap.start_m) * i as f64 / lap.duration_s as f64;
                csv.push(t, vehicle, "Speed", speed_kmh);
                csv.push(t, vehicle, "Laptrigger_lapdist_dls", d);
                csv.push(t, vehicle, "nmot", 6500);
                if t % 10 == 0 {
                    csv.push(t, vehicle, "aps", 80 + t % 20);
                }
                t += 1;
            }
        }
    }

    /// Two GR86s: car 002 starts mid-lap (45 s partial), car 004 from the line
    pub fn practice_session() -> SessionCsv {
        let mut csv = SessionCsv::new();
        drive(
            &mut csv,
            "GR86-002",
            &[
                Lap::new(45, 1500.0, 2990.0),
                Lap::new(90, 0.0, 2990.0),
                Lap::new(100, 0.0, 2990.0),
            ],
        );
        drive(
            &mut csv,
            "GR86-004",
            &[Lap::new(120, 0.0, 2990.0), Lap::new(95, 0.0, 2990.0)],
        );
        csv
    }
}

#[cfg(test)]
mod ingestion_e2e {
    use contracts::{Channel, EngineConfig};
    use race_engine::RaceAnalysis;

    use crate::fixtures::{practice_session, SessionCsv};

    #[test]
    fn test_session_loads_both_cars() {
        let table = practice_session().load();
        let analysis = RaceAnalysis::new(table);

        let ids: Vec<&str> = analysis.vehicle_ids().map(|v| v.as_str()).collect();
        assert_eq!(ids, vec!["GR86-002", "GR86-004"]);
        assert_eq!(analysis.series("GR86-002").unwrap().len(), 46 + 91 + 101);
        assert_eq!(analysis.series("GR86-004").unwrap().len(), 121 + 96);
    }

    #[test]
    fn test_lap_numbers_non_decreasing_per_vehicle() {
        let analysis = RaceAnalysis::new(practice_session().load());

        for series in analysis.index().iter() {
            let id = series.vehicle_id();
            let laps: Vec<u32> = series.samples().iter().map(|s| s.lap_number).collect();
            assert!(
                laps.windows(2).all(|w| w[0] <= w[1]),
                "{id}: laps decrease somewhere in {laps:?}"
            );
            assert_eq!(laps.first(), Some(&1));
        }
        assert_eq!(analysis.lap_series("GR86-002", 3).len(), 101);
        assert!(analysis.lap_series("GR86-004", 3).is_empty());
    }

    #[test]
    fn test_repivot_keeps_lap_numbers() {
        let config = EngineConfig::default();
        let table = practice_session().load_with(&config);
        let before: Vec<u32> = table.rows().iter().map(|r| r.lap_number).collect();

        let (repivoted, stats) = ingestion::pivot_events(&table.melt(), &config.ingestion);
        let after: Vec<u32> = repivoted.rows().iter().map(|r| r.lap_number).collect();

        assert_eq!(before, after);
        assert_eq!(stats.duplicates, 0);
    }

    #[test]
    fn test_sparse_channel_filled_everywhere() {
        let table = practice_session().load();

        assert!(table.rows().iter().all(|r| r.get(Channel::Throttle).is_some()));
        // Never logged, so never invented
        assert!(table.rows().iter().all(|r| r.get(Channel::BrakeFront).is_none()));
    }

    #[test]
    fn test_short_track_lap_reset_from_config() {
        let mut csv = SessionCsv::new();
        for (t, d) in [900.0, 950.0, 990.0, 40.0, 80.0].into_iter().enumerate() {
            csv.push(t as i64, "GR86-010", "Laptrigger_lapdist_dls", d);
        }

        let config = config_loader::ConfigLoader::load_from_str(
            "[ingestion]\nlap_reset_threshold_m = 900.0\n",
            config_loader::ConfigFormat::Toml,
        )
        .unwrap();
        let laps: Vec<u32> = csv.load_with(&config).rows().iter().map(|r| r.lap_number).collect();
        assert_eq!(laps, vec![1, 1, 1, 2, 2]);

        // A 950 m drop is not a reset at the stock 1000 m threshold
        let laps: Vec<u32> = csv.load().rows().iter().map(|r| r.lap_number).collect();
        assert_eq!(laps, vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_missing_required_column_is_schema_error() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        std::fs::write(file.path(), "timestamp,channel_name,value\n").unwrap();

        let err = ingestion::load(file.path()).unwrap_err();
        assert!(
            matches!(err, contracts::ContractError::Schema { ref missing } if missing == &["vehicle_id"]),
            "got: {err}"
        );
    }
}

#[cfg(test)]
mod laps_e2e {
    use race_engine::RaceAnalysis;

    use crate::fixtures::practice_session;

    #[test]
    fn test_partial_lap_never_fastest() {
        let analysis = RaceAnalysis::new(practice_session().load());

        let times = analysis.lap_times();
        let shortest = times
            .iter()
            .min_by(|a, b| a.elapsed_s.total_cmp(&b.elapsed_s))
            .unwrap();
        assert_eq!(shortest.elapsed_s, 45.0);

        let fastest = analysis.fastest_lap().unwrap();
        assert_eq!(fastest.vehicle_id.as_str(), "GR86-002");
        assert_eq!(fastest.lap_number, 2);
        assert_eq!(fastest.elapsed_s, 90.0);
    }

    #[test]
    fn test_sectors_between_fastest_and_slower_lap() {
        let analysis = RaceAnalysis::new(practice_session().load());

        let sectors = analysis
            .analyze_sectors(
                analysis.lap_series("GR86-004", 1),
                analysis.lap_series("GR86-002", 2),
            )
            .unwrap();
        assert_eq!(sectors.len(), 3);
        // 120 s vs 90 s at constant speed: hero loses in every sector
        for s in &sectors {
            assert!(s.delta_s > 0.0, "{s:?}");
            assert!(!s.hero_faster());
        }
    }
}

#[cfg(test)]
mod overtake_e2e {
    use contracts::OvertakeConfig;
    use race_engine::overtake::{estimate_gap, Motion};
    use race_engine::{calculate_overtake_metrics, OvertakeEngine, RaceAnalysis};

    use crate::fixtures::SessionCsv;

    fn battle(hero: &[(&str, f64)], rival: &[(&str, f64)]) -> RaceAnalysis {
        let mut csv = SessionCsv::new();
        csv.snapshot(0, "hero", hero);
        csv.snapshot(0, "rival", rival);
        RaceAnalysis::new(csv.load())
    }

    fn pair(analysis: &RaceAnalysis) -> (&contracts::VehicleSample, &contracts::VehicleSample) {
        (
            &analysis.series("hero").unwrap().samples()[0],
            &analysis.series("rival").unwrap().samples()[0],
        )
    }

    #[test]
    fn test_easy_overtake_on_straight() {
        let analysis = battle(
            &[
                ("Speed", 150.0),
                ("accx_can", 0.1),
                ("accy_can", 0.0),
                ("Steering_Angle", 0.0),
                ("Laptrigger_lapdist_dls", 1000.0),
            ],
            &[
                ("Speed", 130.0),
                ("accx_can", 0.0),
                ("accy_can", 0.0),
                ("Steering_Angle", 0.0),
                ("pbrake_f", 0.0),
                ("Laptrigger_lapdist_dls", 1010.0),
            ],
        );

        let (hero, rival) = pair(&analysis);
        let assessment = analysis.calculate_overtake_probability(Some(hero), Some(rival));
        let metrics = assessment.metrics.as_ref().unwrap();

        assert!(metrics.decision);
        assert!(metrics.probability > 0.8, "probability {}", metrics.probability);
        assert_eq!(metrics.gap_m, 10.0);
        assert_eq!(assessment.reasons.first().map(String::as_str), Some("Overtake Feasible"));
        assert!(assessment.reasons.contains(&"Space Available".to_string()));
    }

    #[test]
    fn test_blocked_in_braking_corner() {
        let analysis = battle(
            &[
                ("Speed", 100.0),
                ("accx_can", -0.5),
                ("accy_can", 0.5),
                ("Steering_Angle", 30.0),
                ("Laptrigger_lapdist_dls", 1000.0),
            ],
            &[
                ("Speed", 90.0),
                ("accx_can", -1.0),
                ("accy_can", 0.5),
                ("Steering_Angle", 30.0),
                ("pbrake_f", 50.0),
                ("Laptrigger_lapdist_dls", 1050.0),
            ],
        );

        let (hero, rival) = pair(&analysis);
        let m = calculate_overtake_metrics(hero, rival);
        assert!(!m.space_ok);
        assert!(!m.decision);
        assert!(m.probability < 0.65, "probability {}", m.probability);

        let assessment = analysis.calculate_overtake_probability(Some(hero), Some(rival));
        assert!(assessment.reasons.contains(&"No Space / Cornering".to_string()));
    }

    #[test]
    fn test_gap_symmetric_and_closing_antisymmetric() {
        let analysis = battle(
            &[
                ("Speed", 140.0),
                ("accx_can", 0.2),
                ("Laptrigger_lapdist_dls", 1200.0),
            ],
            &[
                ("Speed", 135.0),
                ("accx_can", -0.1),
                ("Laptrigger_lapdist_dls", 1234.5),
            ],
        );
        let (hero, rival) = pair(&analysis);
        let config = OvertakeConfig::default();

        assert_eq!(
            estimate_gap(hero, rival, &config),
            estimate_gap(rival, hero, &config)
        );

        let forward = calculate_overtake_metrics(hero, rival);
        let backward = calculate_overtake_metrics(rival, hero);
        assert_eq!(forward.gap_m, backward.gap_m);
        assert!((forward.closing_speed_mps + backward.closing_speed_mps).abs() < 1e-12);
        assert!(forward.closing_speed_mps > 0.0);
    }

    #[test]
    fn test_closing_exactly_at_threshold_is_infinite() {
        let analysis = battle(
            &[("Speed", 100.36), ("Laptrigger_lapdist_dls", 10.0)],
            &[("Speed", 100.0), ("Laptrigger_lapdist_dls", 20.0)],
        );
        let (hero, rival) = pair(&analysis);

        let closing = Motion::project(hero, 2.0).future_speed_mps
            - Motion::project(rival, 2.0).future_speed_mps;
        assert!((closing - 0.1).abs() < 1e-9);
        let engine = OvertakeEngine::new(OvertakeConfig {
            min_closing_speed_mps: closing,
            ..OvertakeConfig::default()
        });

        let m = engine.evaluate(hero, rival);
        assert!(m.time_to_close_s.is_infinite());
        assert_eq!(m.gap_score, 0.0);
    }
}

#[cfg(test)]
mod battle_e2e {
    use race_engine::{advance_step, evaluate_frame, BattleSetup, ProbabilitySmoother, RaceAnalysis, RivalMode};

    use crate::fixtures::{practice_session, SessionCsv};

    #[test]
    fn test_ghost_mode_chases_session_best() {
        let analysis = RaceAnalysis::new(practice_session().load());
        let setup = BattleSetup::resolve(&analysis, "GR86-004", "GR86-004", RivalMode::Ghost);

        assert_eq!(setup.rival_id.as_str(), "GR86-002");
        assert_eq!(setup.rival_lap, Some(2));

        // Lap 2 of car 004 still chases the ghost's lap 2
        let frame = evaluate_frame(&analysis, &setup, 150).unwrap();
        assert_eq!(frame.hero_lap, 2);
        assert_eq!(frame.rival_lap, Some(2));
        assert!(frame.assessment.metrics.is_some());
    }

    #[test]
    fn test_live_mode_follows_hero_lap() {
        let analysis = RaceAnalysis::new(practice_session().load());
        let setup = BattleSetup::resolve(&analysis, "GR86-004", "GR86-002", RivalMode::Live);

        let first = evaluate_frame(&analysis, &setup, 60).unwrap();
        assert_eq!(first.rival_lap, Some(1));

        let second = evaluate_frame(&analysis, &setup, 200).unwrap();
        assert_eq!(second.hero_lap, 2);
        assert_eq!(second.rival_lap, Some(2));
        let metrics = second.assessment.metrics.as_ref().unwrap();
        assert!(metrics.gap_m < 2000.0);
    }

    #[test]
    fn test_step_past_end_clamps_to_last_sample() {
        let analysis = RaceAnalysis::new(practice_session().load());
        let setup = BattleSetup::resolve(&analysis, "GR86-004", "GR86-002", RivalMode::Live);
        let len = analysis.series("GR86-004").unwrap().len();

        let frame = evaluate_frame(&analysis, &setup, len + 50).unwrap();
        assert_eq!(frame.step, len - 1);
        assert_eq!(advance_step(len - 1, 2, len), 0);
    }

    #[test]
    fn test_rival_without_lap_is_missing_data() {
        let mut csv = SessionCsv::new();
        csv.snapshot(0, "hero", &[("Speed", 120.0), ("Laptrigger_lapdist_dls", 500.0)]);
        csv.snapshot(0, "rival", &[("Speed", 110.0)]);
        let analysis = RaceAnalysis::new(csv.load());

        let setup = BattleSetup::resolve(&analysis, "hero", "rival", RivalMode::Live);
        let frame = evaluate_frame(&analysis, &setup, 0).unwrap();
        assert!(frame.assessment.metrics.is_none());
        assert_eq!(frame.assessment.probability_percent, 0.0);
        assert_eq!(frame.assessment.reasons, vec!["Missing Data"]);
    }

    #[test]
    fn test_host_smoothing_over_replayed_frames() {
        let analysis = RaceAnalysis::new(practice_session().load());
        let setup = BattleSetup::resolve(&analysis, "GR86-004", "GR86-002", RivalMode::Live);
        let len = analysis.series("GR86-004").unwrap().len();

        let mut smoother = ProbabilitySmoother::default();
        let mut step = 0;
        for _ in 0..20 {
            let frame = evaluate_frame(&analysis, &setup, step).unwrap();
            let smoothed = smoother.update(frame.assessment.probability_percent);
            assert!((0.0..=100.0).contains(&smoothed));
            step = advance_step(step, 2, len);
        }
        assert_eq!(step, 40);
        assert!(smoother.value() > 0.0);
    }
}
