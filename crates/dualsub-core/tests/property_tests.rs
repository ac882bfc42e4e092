//! Property-based tests for parsing, lookup and the sync engine

use dualsub_core::{
    cue::format_timestamp, track::INDEXED_LOOKUP_THRESHOLD, Cue, CueParser, SyncEngine, Track,
    TrackSlot,
};
use proptest::prelude::*;

/// Millisecond values representable in `MM:SS.mmm`
const MAX_TIMESTAMP: u64 = 99 * 60_000 + 59_999;

fn cue_text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ,.!?]{0,20}[A-Za-z.!?]"
}

fn cue() -> impl Strategy<Value = Cue> {
    (0..MAX_TIMESTAMP, 0..5_000u64, cue_text())
        .prop_map(|(start, len, text)| Cue::new(start, (start + len).min(MAX_TIMESTAMP), text))
}

/// Sorted cues with random gaps and overlaps, large enough to be indexed
fn large_sorted_cues() -> impl Strategy<Value = Vec<Cue>> {
    prop::collection::vec((0..400u64, 0..900u64), INDEXED_LOOKUP_THRESHOLD..INDEXED_LOOKUP_THRESHOLD + 200)
        .prop_map(|steps| {
            let mut start = 0;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (gap, len))| {
                    start += gap;
                    Cue::new(start, start + len, format!("cue {i}"))
                })
                .collect()
        })
}

fn linear_first_match(cues: &[Cue], position: u64) -> Option<usize> {
    cues.iter().position(|cue| cue.contains(position))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn indexed_lookup_matches_linear_scan(
        cues in large_sorted_cues(),
        positions in prop::collection::vec(0..500_000u64, 64),
    ) {
        let track = Track::new(cues.clone());
        prop_assert!(track.is_indexed());
        for position in positions {
            prop_assert_eq!(track.find_active_index(position), linear_first_match(&cues, position));
        }
    }
}

proptest! {
    #[test]
    fn parser_never_panics(input in "\\PC*") {
        let doc = CueParser::new().parse_document(&input);
        for cue in &doc.cues {
            prop_assert_eq!(cue.text.trim(), cue.text.as_str());
        }
    }

    #[test]
    fn parser_never_panics_on_timing_like_noise(
        lines in prop::collection::vec("[0-9:. \\-\\->a-z\r\n]{0,30}", 0..20)
    ) {
        let input = lines.join("\n");
        let _ = CueParser::new().parse(&input);
    }

    #[test]
    fn formatted_cues_parse_back(cues in prop::collection::vec(cue(), 0..20)) {
        let mut doc = String::from("WEBVTT\n\n");
        for cue in &cues {
            doc.push_str(&format!(
                "{} --> {}\n{}\n\n",
                format_timestamp(cue.start),
                format_timestamp(cue.end),
                cue.text.trim(),
            ));
        }
        let parsed = CueParser::new().parse(&doc);
        prop_assert_eq!(parsed.len(), cues.len());
        for (parsed, original) in parsed.iter().zip(&cues) {
            prop_assert_eq!(parsed.start, original.start);
            prop_assert_eq!(parsed.end, original.end);
            prop_assert_eq!(parsed.text.as_str(), original.text.trim());
        }
    }

    #[test]
    fn lookup_result_always_contains_position(
        cues in prop::collection::vec(cue(), 0..50),
        position in 0..MAX_TIMESTAMP,
    ) {
        let track = Track::new(cues.clone());
        match track.find_active(position) {
            Some(cue) => prop_assert!(cue.start <= position && position <= cue.end),
            None => prop_assert!(cues.iter().all(|cue| !cue.contains(position))),
        }
        prop_assert_eq!(track.find_active_index(position), linear_first_match(&cues, position));
    }

    #[test]
    fn engine_emits_only_changes(
        primary in prop::collection::vec(cue(), 0..20),
        secondary in prop::collection::vec(cue(), 0..20),
        positions in prop::collection::vec(0..MAX_TIMESTAMP, 1..40),
    ) {
        let mut engine = SyncEngine::new(Some(Track::new(primary)), Some(Track::new(secondary)));
        for position in positions {
            let before = TrackSlot::ALL.map(|slot| engine.active_cue(slot).cloned());
            let tick = engine.on_tick(position);
            for slot in TrackSlot::ALL {
                prop_assert!(tick.iter().filter(|t| t.slot == slot).count() <= 1);
                let changed = before[slot as usize].as_ref() != engine.active_cue(slot);
                prop_assert_eq!(tick.get(slot).is_some(), changed);
            }
            prop_assert!(engine.on_tick(position).is_empty());
        }
    }
}
