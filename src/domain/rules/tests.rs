// Unit tests for business rules

use super::*;

fn headers(entries: &[(&str, f64)]) -> Vec<CandidateHeader> {
    entries
        .iter()
        .map(|(id, score)| CandidateHeader::new(*id, *score))
        .collect()
}

#[test]
fn test_ranker_sorts_descending() {
    let ranked = CandidateRanker::rank(&headers(&[("100", 7.5), ("200", 9.0)]));
    assert_eq!(ranked, vec!["200", "100"]);
}

#[test]
fn test_ranker_is_stable_for_ties() {
    let ranked = CandidateRanker::rank(&headers(&[
        ("a", 3.0),
        ("b", 5.0),
        ("c", 3.0),
        ("d", 5.0),
        ("e", 0.0),
    ]));
    assert_eq!(ranked, vec!["b", "d", "a", "c", "e"]);
}

#[test]
fn test_ranker_empty_input() {
    assert!(CandidateRanker::rank(&[]).is_empty());
}

#[test]
fn test_ranker_all_zero_keeps_input_order() {
    let ranked = CandidateRanker::rank(&headers(&[("x", 0.0), ("y", 0.0), ("z", 0.0)]));
    assert_eq!(ranked, vec!["x", "y", "z"]);
}

const TIME_MODE: CutMode = CutMode {
    time_based: true,
    frame_based: false,
};

const FRAME_MODE: CutMode = CutMode {
    time_based: false,
    frame_based: true,
};

#[test]
fn test_cut_mode_rejects_missing_representation() {
    assert!(TIME_MODE.check(1, &Segment::from_time(300.0, 20.0)).is_ok());
    assert!(matches!(
        TIME_MODE.check(1, &Segment::from_frames(100, 20)),
        Err(DomainError::Validation(_))
    ));
    assert!(FRAME_MODE.check(1, &Segment::from_time(300.0, 20.0)).is_err());
}

#[test]
fn test_cut_mode_with_both_needs_both() {
    let mode = CutMode::new(true, true);
    assert!(mode.check(1, &Segment::from_time(300.0, 20.0)).is_err());
    assert!(mode.check(1, &Segment::from_frames(7500, 500)).is_err());

    let both = Segment {
        time_start: 300.0,
        time_duration: 20.0,
        frame_start: 7500,
        frame_duration: 500,
    };
    assert!(mode.check(1, &both).is_ok());
}

#[test]
fn test_cut_mode_accepts_extra_representation() {
    let both = Segment {
        time_start: 300.0,
        time_duration: 20.0,
        frame_start: 7500,
        frame_duration: 500,
    };
    assert!(TIME_MODE.check(1, &both).is_ok());
}

#[test]
fn test_cut_mode_rejects_empty_segment() {
    let mode = CutMode::default();
    assert!(mode.check(0, &Segment::default()).is_err());
    assert!(mode.check(0, &Segment::from_frames(0, 25)).is_ok());
}

#[test]
fn test_assembler_accepts_consistent_segments() {
    let mut assembler = CutlistAssembler::new(Cutlist::new("200"), TIME_MODE);
    assembler.push(Segment::from_time(0.0, 30.0)).unwrap();
    assembler.push(Segment::from_time(300.0, 20.0)).unwrap();

    let cutlist = assembler.finish().unwrap();
    assert!(cutlist.time_based);
    assert!(!cutlist.frame_based);
    assert_eq!(cutlist.segments.len(), 2);
}

#[test]
fn test_assembler_discards_everything_on_mismatch() {
    let mut assembler = CutlistAssembler::new(Cutlist::new("1"), TIME_MODE);
    assembler.push(Segment::from_time(0.0, 30.0)).unwrap();
    assembler.push(Segment::from_time(100.0, 30.0)).unwrap();
    assert!(assembler.push(Segment::from_frames(9000, 100)).is_err());
    assert!(matches!(assembler.finish(), Err(DomainError::Validation(_))));
}

#[test]
fn test_assembler_discard_drops_segments() {
    let mut assembler = CutlistAssembler::new(Cutlist::new("1"), FRAME_MODE);
    assembler.push(Segment::from_frames(0, 100)).unwrap();
    assembler.discard();
    assert!(assembler.finish().is_err());
}

#[test]
fn test_assembler_rejects_empty_first_segment() {
    let mut assembler = CutlistAssembler::new(Cutlist::new("1"), CutMode::default());
    assert!(assembler.push(Segment::default()).is_err());
    assert!(assembler.finish().is_err());
}

#[test]
fn test_assembler_without_segments_fails() {
    let assembler = CutlistAssembler::new(Cutlist::new("1"), TIME_MODE);
    assert!(matches!(assembler.finish(), Err(DomainError::Validation(_))));
}

#[test]
fn test_assembler_keeps_metadata() {
    let mut base = Cutlist::new("9");
    base.aspect_ratio = "4:3".to_string();
    base.frames_per_second = 25.0;
    base.time_based = true;
    base.segments.push(Segment::default());

    let mut assembler = CutlistAssembler::new(base, FRAME_MODE);
    assembler.push(Segment::from_frames(0, 100)).unwrap();

    let cutlist = assembler.finish().unwrap();
    assert_eq!(cutlist.aspect_ratio, "4:3");
    assert_eq!(cutlist.frames_per_second, 25.0);
    assert!(cutlist.frame_based);
    assert!(!cutlist.time_based);
    assert_eq!(cutlist.segments, vec![Segment::from_frames(0, 100)]);
}
