//! Loading and playing the bundled trajectory fixtures

use glam::Vec3;
use towr_replay::{
    AdvanceMode, EffectorLayout, LoadError, ParseError, PlaybackStatus, TrajectoryFile,
    TrajectoryPlaybackEngine,
};

use crate::helpers::{approx_eq, fixture};

fn engine(layout: EffectorLayout) -> TrajectoryPlaybackEngine {
    TrajectoryPlaybackEngine::new(AdvanceMode::Truncate, layout)
}

#[test]
fn quadruped_walk_loads_every_data_row() {
    let mut engine = engine(EffectorLayout::Interleaved);
    engine.load(fixture("quadruped_walk.csv")).unwrap();

    assert_eq!(engine.status(), PlaybackStatus::Playing);
    assert_eq!(engine.len(), 40);
    assert_eq!(engine.effector_count(), 4);
    assert_eq!(engine.timestep(), 0.0025);
    assert_eq!(engine.cursor(), 0);
}

#[test]
fn first_sample_is_scaled_to_centimetres() {
    let mut engine = engine(EffectorLayout::Interleaved);
    engine.load(fixture("quadruped_walk.csv")).unwrap();

    let pose = engine.current_pose();
    assert_eq!(pose.position, Vec3::new(0.0, 0.0, 50.0));
    assert_eq!(pose.orientation.w, 1.0);

    assert!(engine
        .end_effector_position(0)
        .abs_diff_eq(Vec3::new(35.0, 20.0, 0.0), 1e-3));
    assert!(engine
        .end_effector_position(3)
        .abs_diff_eq(Vec3::new(-35.0, -20.0, 0.0), 1e-3));
}

#[test]
fn sixty_hz_host_walks_through_trajectory() {
    let mut engine = engine(EffectorLayout::Interleaved);
    engine.load(fixture("quadruped_walk.csv")).unwrap();

    // 1/60 s is 6.67 samples at 2.5 ms; truncation keeps 6 per frame
    engine.advance(1.0 / 60.0);
    assert_eq!(engine.cursor(), 6);
    assert!(approx_eq(engine.current_pose().position.x, 6.0));

    // Foot 0 is lifted in samples 3..=6 of the first gait cycle
    assert!(approx_eq(engine.end_effector_position(0).z, 5.0));
    assert!(approx_eq(engine.end_effector_position(1).z, 0.0));

    engine.advance(1.0 / 60.0);
    assert_eq!(engine.cursor(), 12);
}

#[test]
fn playback_holds_last_sample() {
    let mut engine = engine(EffectorLayout::Interleaved);
    engine.load(fixture("quadruped_walk.csv")).unwrap();

    for _ in 0..100 {
        engine.advance(1.0 / 60.0);
    }
    assert_eq!(engine.cursor(), 39);
    assert!(engine.is_finished());
    assert!(approx_eq(engine.current_pose().position.x, 39.0));
    assert!(approx_eq(engine.end_effector_position(0).x, 35.0 + 39.0));
}

#[test]
fn grouped_layout_reads_biped_feet() {
    let mut engine = engine(EffectorLayout::Grouped);
    engine.load(fixture("biped_grouped.csv")).unwrap();

    assert_eq!(engine.len(), 5);
    assert_eq!(engine.effector_count(), 2);
    assert_eq!(engine.timestep(), 0.005);

    engine.advance(0.01);
    assert_eq!(engine.cursor(), 2);
    let right = engine.end_effector_position(1);
    assert!(approx_eq(right.x, 4.0));
    assert!(approx_eq(right.y, -10.0));
}

#[test]
fn interleaved_layout_misreads_grouped_file() {
    let file = TrajectoryFile::parse(fixture("biped_grouped.csv"), EffectorLayout::Interleaved)
        .unwrap();

    // Stride still fits, but the second block starts inside foot 1's velocity
    assert_eq!(file.effector_count(), 2);
    assert_eq!(file.samples[2].foot_positions[1], Vec3::ZERO);
}

#[test]
fn bad_stride_fails_without_partial_trajectory() {
    let mut engine = engine(EffectorLayout::Interleaved);
    let err = engine.load(fixture("bad_stride.csv")).unwrap_err();

    match err {
        LoadError::MalformedRow(ParseError::EffectorStride { row, found, .. }) => {
            assert_eq!(row, 4);
            assert_eq!(found, 74);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(engine.is_empty());
    assert_eq!(engine.status(), PlaybackStatus::Disabled);
}

#[test]
fn bad_number_names_token() {
    let err = TrajectoryFile::parse(fixture("bad_number.csv"), EffectorLayout::Interleaved)
        .unwrap_err();

    match err {
        LoadError::MalformedRow(ParseError::InvalidNumber { row, column, token }) => {
            assert_eq!((row, column), (3, 3));
            assert_eq!(token, "abc");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn too_few_rows_is_malformed_file() {
    let mut engine = engine(EffectorLayout::Interleaved);
    let err = engine.load(fixture("too_short.csv")).unwrap_err();
    assert!(matches!(err, LoadError::MalformedFile(_)));
    assert_eq!(engine.status(), PlaybackStatus::Disabled);
}

#[test]
fn missing_file_degrades_to_defaults() {
    let mut engine = engine(EffectorLayout::Interleaved);
    let err = engine.load("/nonexistent").unwrap_err();
    assert!(err.to_string().contains("/nonexistent"));

    engine.advance(1.0);
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.current_pose().position, Vec3::ZERO);
    assert_eq!(engine.end_effector_position(0), Vec3::ZERO);
}

#[test]
fn accumulate_mode_reaches_end_sooner_with_short_frames() {
    let mut truncate = engine(EffectorLayout::Interleaved);
    let mut accumulate =
        TrajectoryPlaybackEngine::new(AdvanceMode::Accumulate, EffectorLayout::Interleaved);
    truncate.load(fixture("quadruped_walk.csv")).unwrap();
    accumulate.load(fixture("quadruped_walk.csv")).unwrap();

    // 1 ms frames are shorter than a sample
    for _ in 0..50 {
        truncate.advance(0.001);
        accumulate.advance(0.001);
    }
    assert_eq!(truncate.cursor(), 0);
    assert!((19..=20).contains(&accumulate.cursor()));
}
