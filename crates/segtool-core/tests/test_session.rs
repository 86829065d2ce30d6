use std::cell::RefCell;
use std::rc::Rc;

use image::RgbImage;
use ndarray::Array2;

use segtool_core::command::{ButtonKind, Command, Modifiers, Outcome};
use segtool_core::config::SessionConfig;
use segtool_core::error::SegtoolError;
use segtool_core::mask::{Label, LabelMask};
use segtool_core::oracle::SegmentationOracle;
use segtool_core::session::EditSession;

/// Oracle that returns the mask unchanged.
struct IdentityOracle;

impl SegmentationOracle for IdentityOracle {
    fn initialize(&mut self, _: &RgbImage, mask: &LabelMask) -> segtool_core::error::Result<LabelMask> {
        Ok(mask.clone())
    }
    fn refine(&mut self, _: &RgbImage, mask: &LabelMask) -> segtool_core::error::Result<LabelMask> {
        Ok(mask.clone())
    }
}

/// Oracle that records every mask it is handed.
#[derive(Default)]
struct RecordingOracle {
    initialized: Rc<RefCell<usize>>,
    refined: Rc<RefCell<Vec<LabelMask>>>,
}

impl SegmentationOracle for RecordingOracle {
    fn initialize(&mut self, _: &RgbImage, mask: &LabelMask) -> segtool_core::error::Result<LabelMask> {
        *self.initialized.borrow_mut() += 1;
        Ok(mask.clone())
    }
    fn refine(&mut self, _: &RgbImage, mask: &LabelMask) -> segtool_core::error::Result<LabelMask> {
        self.refined.borrow_mut().push(mask.clone());
        Ok(mask.clone())
    }
}

/// 20x20 image with a centered 8x8 seed block; display matches the image so
/// screen coordinates equal image coordinates.
fn small_config() -> SessionConfig {
    SessionConfig {
        structuring_radius: 3,
        brush_radius: 2,
        display_width: 20,
        display_height: 20,
        ..SessionConfig::default()
    }
}

fn small_seed() -> Array2<bool> {
    let mut seed = Array2::from_elem((20, 20), false);
    for row in 6..14 {
        for col in 6..14 {
            seed[[row, col]] = true;
        }
    }
    seed
}

fn small_session() -> EditSession {
    EditSession::from_seed(
        RgbImage::new(20, 20),
        small_seed(),
        Box::new(IdentityOracle),
        &small_config(),
    )
    .unwrap()
}

#[test]
fn test_load_seed_initializes_oracle_once() {
    let oracle = RecordingOracle::default();
    let initialized = oracle.initialized.clone();
    let refined = oracle.refined.clone();

    let session = EditSession::from_seed(
        RgbImage::new(20, 20),
        small_seed(),
        Box::new(oracle),
        &small_config(),
    )
    .unwrap();

    assert_eq!(*initialized.borrow(), 1);
    assert!(refined.borrow().is_empty());
    assert_eq!(session.iteration(), 0);
    assert!(session.overlay().is_clear());
}

#[test]
fn test_paint_stages_only_in_overlay() {
    let mut session = small_session();
    let before = session.mask().clone();

    session.paint((10.0, 10.0), Label::DefiniteBackground);
    session.paint((3.0, 3.0), Label::ProbableForeground);

    assert_eq!(*session.mask(), before);
    assert!(!session.overlay().is_clear());
}

#[test]
fn test_discard_pending_restores_pre_paint_state() {
    let mut session = small_session();
    let before = session.mask().clone();

    for i in 0..5 {
        session.paint((2.0 + i as f32, 10.0), Label::DefiniteForeground);
    }
    session.discard_pending();

    assert_eq!(*session.mask(), before);
    assert!(session.overlay().is_clear());
    assert_eq!(session.iteration(), 0);
}

#[test]
fn test_commit_merges_whole_overlay_before_refining() {
    let oracle = RecordingOracle::default();
    let refined = oracle.refined.clone();

    let mut session = EditSession::from_seed(
        RgbImage::new(20, 20),
        small_seed(),
        Box::new(oracle),
        &small_config(),
    )
    .unwrap();

    session.paint((2.0, 2.0), Label::DefiniteForeground);
    session.paint((17.0, 17.0), Label::ProbableBackground);
    session.commit_and_refine().unwrap();

    // The oracle saw the merged mask: every painted pixel carries its
    // painted label.
    let seen = &refined.borrow()[0];
    assert_eq!(seen.data[[2, 2]], Label::DefiniteForeground);
    assert_eq!(seen.data[[17, 17]], Label::ProbableBackground);

    assert_eq!(session.iteration(), 1);
    assert!(session.overlay().is_clear());
    assert_eq!(session.mask().data[[2, 2]], Label::DefiniteForeground);
}

#[test]
fn test_uncommitted_strokes_never_reach_oracle() {
    let oracle = RecordingOracle::default();
    let refined = oracle.refined.clone();

    let mut session = EditSession::from_seed(
        RgbImage::new(20, 20),
        small_seed(),
        Box::new(oracle),
        &small_config(),
    )
    .unwrap();

    session.paint((2.0, 2.0), Label::DefiniteForeground);
    session.discard_pending();
    session.commit_and_refine().unwrap();

    let seen = &refined.borrow()[0];
    assert_eq!(seen.data[[2, 2]], Label::DefiniteBackground);
}

#[test]
fn test_reset_discards_iterations_and_reinitializes() {
    let oracle = RecordingOracle::default();
    let initialized = oracle.initialized.clone();

    let mut session = EditSession::from_seed(
        RgbImage::new(20, 20),
        small_seed(),
        Box::new(oracle),
        &small_config(),
    )
    .unwrap();
    let initial_mask = session.mask().clone();

    session.paint((2.0, 2.0), Label::DefiniteForeground);
    session.commit_and_refine().unwrap();
    assert_eq!(session.iteration(), 1);
    assert_ne!(*session.mask(), initial_mask);

    session.reset().unwrap();
    assert_eq!(session.iteration(), 0);
    assert_eq!(*session.mask(), initial_mask);
    assert!(session.overlay().is_clear());
    assert_eq!(*initialized.borrow(), 2);
}

#[test]
fn test_resume_skips_trimap_builder() {
    let mut mask = LabelMask::new(20, 20);
    mask.data[[5, 5]] = Label::ProbableForeground;
    mask.data[[6, 6]] = Label::DefiniteForeground;

    let session = EditSession::from_resume(
        RgbImage::new(20, 20),
        mask.clone(),
        Box::new(IdentityOracle),
        &small_config(),
    )
    .unwrap();

    // With an identity oracle the resumed mask is adopted verbatim: no
    // trimap bands were re-derived.
    assert_eq!(*session.mask(), mask);
}

#[test]
fn test_empty_seed_is_rejected() {
    let err = EditSession::from_seed(
        RgbImage::new(20, 20),
        Array2::from_elem((20, 20), false),
        Box::new(IdentityOracle),
        &small_config(),
    )
    .unwrap_err();
    assert!(matches!(err, SegtoolError::EmptySeed));
}

#[test]
fn test_dimension_mismatch_is_rejected() {
    let err = EditSession::from_seed(
        RgbImage::new(20, 20),
        Array2::from_elem((10, 10), true),
        Box::new(IdentityOracle),
        &small_config(),
    )
    .unwrap_err();
    assert!(matches!(err, SegtoolError::DimensionMismatch { .. }));
}

#[test]
fn test_brush_radius_floors_at_minimum() {
    let mut session = small_session();
    session.adjust_brush_radius(-100);
    assert_eq!(session.brush_radius(), 1);
    session.adjust_brush_radius(4);
    assert_eq!(session.brush_radius(), 5);
}

#[test]
fn test_command_dispatch() {
    let mut session = small_session();

    let outcome = session
        .apply(Command::PaintStroke {
            pos: (10.0, 10.0),
            button: ButtonKind::Secondary,
            modifiers: Modifiers {
                probable: true,
                ..Modifiers::default()
            },
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Redraw);
    assert_eq!(
        session.overlay().data[[10, 10]],
        Some(Label::ProbableBackground)
    );

    // Shift turns the same gesture into an erase.
    session
        .apply(Command::PaintStroke {
            pos: (10.0, 10.0),
            button: ButtonKind::Secondary,
            modifiers: Modifiers {
                erase: true,
                ..Modifiers::default()
            },
        })
        .unwrap();
    assert_eq!(session.overlay().data[[10, 10]], None);

    assert_eq!(session.apply(Command::Save).unwrap(), Outcome::Save);
    assert_eq!(session.apply(Command::Quit).unwrap(), Outcome::Quit);

    // Radius-adjust modifier redirects the zoom gesture.
    let before = session.viewport().view;
    session
        .apply(Command::DragZoom {
            anchor: (10.0, 10.0),
            dy: -3.0,
            modifiers: Modifiers {
                adjust_radius: true,
                ..Modifiers::default()
            },
        })
        .unwrap();
    assert_eq!(session.brush_radius(), 3);
    assert_eq!(session.viewport().view, before);
}
