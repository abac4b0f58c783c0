#![no_main]
use lawsmith::citations::segment;
use lawsmith::types::RetrievedSection;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let answer = String::from_utf8_lossy(data);
    let retrieved = vec![
        RetrievedSection {
            section_id: Some("3.1".to_string()),
            page: Some(1),
            text: "Source 1: First provision.".to_string(),
            score: Some(0.9),
        },
        RetrievedSection {
            section_id: None,
            page: None,
            text: "Untitled fragment.\nWith a newline.".to_string(),
            score: None,
        },
    ];

    // Should never panic, and the segments must reassemble the answer.
    let result = segment(&answer, &retrieved);
    let rebuilt: String = result.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(rebuilt, answer);
    for seg in &result.segments {
        if let Some(index) = seg.citation_index {
            assert!(index < result.citations.len());
            assert!(seg.citation_reference.is_some());
        }
    }
});
