#![no_main]
use lawsmith::ingestion::paginate;
use lawsmith::sections::parse;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    // Should never panic on any input text.
    let sections = parse(&paginate(&text));
    for section in &sections {
        assert!(!section.section_id.is_empty());
        assert!(
            section
                .section_id
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.')
        );
        assert!(!section.body.is_empty());
        assert!(section.page >= 1);
    }
});
