// Host-side tests for the caption track and lyric cursor.
// The web crate is wasm-only, so these exercise torus-core directly.

use torus_core::*;

fn two_line_track() -> CaptionTrack {
    CaptionTrack::new(vec![Caption::new(10.0, "A"), Caption::new(20.0, "B")])
}

#[test]
fn jump_past_two_captions_shows_the_last() {
    let track = two_line_track();
    let mut cursor = LyricCursor::new();
    assert!(cursor.advance(&track, 5.0).is_empty());
    let crossed = cursor.advance(&track, 25.0);
    assert_eq!(crossed.as_slice(), &[0, 1]);
    assert_eq!(cursor.current_index(), 2);
    assert_eq!(cursor.displayed_text(&track, IDLE_CAPTION), "B");
}

#[test]
fn seek_counts_captions_at_or_before_target() {
    let track = two_line_track();
    let mut cursor = LyricCursor::new();
    assert_eq!(cursor.seek(&track, 15.0, SeekPolicy::Hold), None);
    assert_eq!(cursor.current_index(), 1);
    cursor.seek(&track, 20.0, SeekPolicy::Hold);
    assert_eq!(cursor.current_index(), 2);
    cursor.seek(&track, 0.0, SeekPolicy::Hold);
    assert_eq!(cursor.current_index(), 0);
    cursor.seek(&track, 999.0, SeekPolicy::Hold);
    assert_eq!(cursor.current_index(), track.len());
}

#[test]
fn seek_hold_keeps_text_until_next_crossing() {
    let track = two_line_track();
    let mut cursor = LyricCursor::new();
    cursor.advance(&track, 12.0);
    cursor.seek(&track, 1.0, SeekPolicy::Hold);
    assert_eq!(cursor.displayed_text(&track, IDLE_CAPTION), "A");
    cursor.advance(&track, 21.0);
    assert_eq!(cursor.displayed_text(&track, IDLE_CAPTION), "B");
}

#[test]
fn seek_repaint_shows_preceding_caption() {
    let track = two_line_track();
    let mut cursor = LyricCursor::new();
    assert_eq!(
        cursor.seek(&track, 15.0, SeekPolicy::Repaint),
        Some(Displayed::Caption(0))
    );
    assert_eq!(cursor.displayed_text(&track, IDLE_CAPTION), "A");
    assert_eq!(
        cursor.seek(&track, 3.0, SeekPolicy::Repaint),
        Some(Displayed::Idle)
    );
    assert_eq!(cursor.displayed_text(&track, IDLE_CAPTION), IDLE_CAPTION);
}

#[test]
fn reset_returns_to_idle_from_any_state() {
    let track = two_line_track();
    let mut cursor = LyricCursor::new();
    cursor.advance(&track, 30.0);
    cursor.reset();
    assert_eq!(cursor.current_index(), 0);
    assert_eq!(cursor.displayed(), Displayed::Idle);
    assert_eq!(cursor.displayed_text(&track, IDLE_CAPTION), IDLE_CAPTION);
}

#[test]
fn index_never_decreases_during_playback() {
    let track = CaptionTrack::parse_lrc(DEMO_CAPTIONS_LRC).unwrap();
    let mut cursor = LyricCursor::new();
    let mut last = 0;
    let mut t = 0.0;
    while t < 60.0 {
        cursor.advance(&track, t);
        assert!(cursor.current_index() >= last);
        last = cursor.current_index();
        t += 0.37;
    }
    assert_eq!(last, track.len());
}

#[test]
fn equal_timestamps_are_both_consumed() {
    let track = CaptionTrack::new(vec![Caption::new(1.0, "x"), Caption::new(1.0, "y")]);
    let mut cursor = LyricCursor::new();
    let crossed = cursor.advance(&track, 1.0);
    assert_eq!(crossed.len(), 2);
    assert_eq!(cursor.displayed_text(&track, ""), "y");
}

#[test]
fn unsorted_track_keeps_given_order() {
    let track = CaptionTrack::new(vec![
        Caption::new(10.0, "a"),
        Caption::new(5.0, "b"),
        Caption::new(12.0, "c"),
    ]);
    assert_eq!(track.inversions(), 1);
    assert_eq!(track.get(1).map(|c| c.text.as_str()), Some("b"));

    // "b" is reachable only once "a" has been crossed
    let mut cursor = LyricCursor::new();
    assert!(cursor.advance(&track, 6.0).is_empty());
    assert_eq!(cursor.advance(&track, 10.0).as_slice(), &[0, 1]);

    let sorted = track.into_sorted();
    assert_eq!(sorted.inversions(), 0);
    assert_eq!(sorted.get(0).map(|c| c.text.as_str()), Some("b"));
}

#[test]
fn empty_track_is_inert() {
    let track = CaptionTrack::default();
    let mut cursor = LyricCursor::new();
    assert!(cursor.advance(&track, 100.0).is_empty());
    cursor.seek(&track, 5.0, SeekPolicy::Repaint);
    assert_eq!(cursor.current_index(), 0);
    assert_eq!(track.last_time(), 0.0);
}

#[test]
fn lrc_parses_stamps_tags_and_blank_lines() {
    let src = "[ti:Song]\n\n[00:01.50] first\n[01:02.25]second\n[00:03.00][00:04.00] twice\n[00:05.00]\n";
    let track = CaptionTrack::parse_lrc(src).unwrap();
    let got: Vec<(f64, &str)> = track
        .captions()
        .iter()
        .map(|c| (c.time, c.text.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (1.5, "first"),
            (62.25, "second"),
            (3.0, "twice"),
            (4.0, "twice"),
            (5.0, ""),
        ]
    );
    // 62.25 precedes 3.0
    assert_eq!(track.inversions(), 1);
}

#[test]
fn lrc_reports_malformed_lines() {
    assert_eq!(
        CaptionTrack::parse_lrc("[00:01.00] ok\nno stamp here"),
        Err(CaptionError::MissingTimestamp { line: 2 })
    );
    assert_eq!(
        CaptionTrack::parse_lrc("[00:75.00] bad"),
        Err(CaptionError::BadTimestamp {
            line: 1,
            stamp: "00:75.00".to_string()
        })
    );
    assert_eq!(
        CaptionTrack::parse_lrc("[00:01.00 open"),
        Err(CaptionError::Unterminated { line: 1 })
    );
}

#[test]
fn demo_track_loads_in_order() {
    let track = CaptionTrack::parse_lrc(DEMO_CAPTIONS_LRC).unwrap();
    assert!(!track.is_empty());
    assert_eq!(track.inversions(), 0);
    assert_eq!(track.get(0).map(|c| c.time), Some(4.0));
    assert_eq!(track.last_time(), 52.0);
}

#[test]
fn string_sink_replaces_text() {
    let mut sink = String::from("old");
    sink.set_text("new");
    assert_eq!(sink, "new");
}

#[test]
fn lrc_with_byte_order_mark_parses() {
    let track = CaptionTrack::parse_lrc("\u{feff}[00:01.00] hi\n[00:02.50] there").unwrap();
    assert_eq!(track.len(), 2);
    assert_eq!(track.get(0), Some(&Caption::new(1.0, "hi")));
    assert_eq!(track.get(1).map(|c| c.time), Some(2.5));
}
