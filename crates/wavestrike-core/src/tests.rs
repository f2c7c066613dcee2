#[cfg(test)]
mod tests {
    use crate::commands::{PlayerCommand, PlayerIntent};
    use crate::constants::MAX_TIMER_MS;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::state::GameStateSnapshot;
    use crate::tuning::{ConfigError, Tuning};
    use crate::types::{Extents, Position, SimTime};

    /// Verify the tagged movement pattern survives serde_json.
    #[test]
    fn test_movement_pattern_serde() {
        let patterns = vec![
            MovementPattern::Straight,
            MovementPattern::Sinusoidal {
                initial_x: 200.0,
                phase: 0.25,
            },
            MovementPattern::Diagonal {
                direction: -1.0,
                has_bounced: true,
            },
        ];
        for p in patterns {
            let json = serde_json::to_string(&p).unwrap();
            assert!(json.contains("\"type\""), "Pattern should be tagged: {json}");
            let back: MovementPattern = serde_json::from_str(&json).unwrap();
            assert_eq!(p, back);
        }
    }

    #[test]
    fn test_game_event_tagged_json() {
        let event = GameEvent::RunOver {
            score: 1250,
            waves_completed: 2,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"RunOver\""));
        assert!(json.contains("\"waves_completed\":2"));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_player_command_from_frontend_json() {
        let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"TogglePause"}"#).unwrap();
        assert_eq!(cmd, PlayerCommand::TogglePause);
        let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"Restart"}"#).unwrap();
        assert_eq!(cmd, PlayerCommand::Restart);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
        assert_eq!(back.wave.phase, WavePhase::Intermission);
    }

    // ---- Intent ----

    #[test]
    fn test_intent_axes_are_clamped() {
        let intent = PlayerIntent::new(5, -9, true);
        assert_eq!(intent.move_x, 1);
        assert_eq!(intent.move_y, -1);
        assert!(intent.firing);

        let raw = PlayerIntent {
            move_x: -3,
            move_y: 0,
            firing: false,
        };
        assert_eq!(raw.clamped().move_x, -1);
    }

    // ---- Types ----

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_extents_from_size() {
        let e = Extents::from_size(32.0, 16.0);
        assert_eq!(e.half_w, 16.0);
        assert_eq!(e.half_h, 8.0);
    }

    #[test]
    fn test_sim_time_pause_shifts_clock() {
        let mut time = SimTime::default();
        time.advance(1000);
        assert_eq!(time.now_ms, 1000);
        assert_eq!(time.tick, 1);

        // 500 ms of wall clock spent paused.
        time.pause_for(500);
        time.advance(1600);
        assert_eq!(time.now_ms, 1100, "Paused time must not reach the sim clock");
        assert_eq!(time.tick, 2);
    }

    #[test]
    fn test_sim_time_never_moves_backwards() {
        let mut time = SimTime::default();
        time.advance(2000);
        time.advance(1500);
        assert_eq!(time.now_ms, 2000);
    }

    // ---- Tuning ----

    #[test]
    fn test_tuning_defaults_match_reference() {
        let t = Tuning::default();
        assert_eq!(t.max_lives, 3);
        assert_eq!(t.first_wave_duration_ms, 10_000);
        assert_eq!(t.wave_duration_step_ms, 5_000);
        assert_eq!(t.invulnerability_ms, 1000);
        assert_eq!(t.pickup_lifetime_ms, 5000);
        assert!((t.player_projectile_speed / t.enemy_projectile_speed - 6.0).abs() < 1e-9);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_tuning_partial_json_keeps_defaults() {
        let t = Tuning::from_json_str(r#"{ "max_lives": 5, "enemy_speed": 1.5 }"#).unwrap();
        assert_eq!(t.max_lives, 5);
        assert_eq!(t.enemy_speed, 1.5);
        assert_eq!(t.world_width, Tuning::default().world_width);
    }

    #[test]
    fn test_tuning_rejects_zero_lives() {
        let err = Tuning::from_json_str(r#"{ "max_lives": 0 }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "max_lives"),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_tuning_rejects_inverted_pickup_delay() {
        let err = Tuning::from_json_str(
            r#"{ "pickup_delay_min_ms": 9000, "pickup_delay_max_ms": 1000 }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("pickup_delay_min_ms"));
    }

    #[test]
    fn test_tuning_parse_error() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_tuning_rejects_oversized_player_bounds() {
        let err = Tuning::from_json_str(r#"{ "player_bounds": { "half_w": 300.0, "half_h": 16.0 } }"#)
            .unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "player_bounds"),
            other => panic!("Expected Invalid, got {other:?}"),
        }

        // Exactly the playfield width still fits.
        assert!(Tuning::from_json_str(r#"{ "player_bounds": { "half_w": 240.0, "half_h": 16.0 } }"#).is_ok());
    }

    #[test]
    fn test_tuning_rejects_negative_extents() {
        let err = Tuning::from_json_str(r#"{ "enemy_bounds": { "half_w": -1.0, "half_h": 16.0 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("enemy_bounds"));
    }

    #[test]
    fn test_tuning_rejects_unbounded_timers() {
        let err = Tuning::from_json_str(r#"{ "intermission_ms": 18446744073709551615 }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "intermission_ms"),
            other => panic!("Expected Invalid, got {other:?}"),
        }
        assert!(Tuning::from_json_str(&format!(r#"{{ "bonus_delay_ms": {MAX_TIMER_MS} }}"#)).is_ok());
    }
}
