#![allow(dead_code)]

use msatools::{Alignment, Record};

/// Routes `log` output through the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The four-record alignment used throughout the examples.
pub fn example_alignment() -> Alignment {
    Alignment::new(vec![
        Record::new("A", "MKV-L"),
        Record::new("B", "MKVAL"),
        Record::new("C", "M---L"),
        Record::new("D", "MKVAL"),
    ])
    .expect("valid example alignment")
}

/// A slightly larger alignment with auxiliary fields.
pub fn scored_alignment() -> Alignment {
    let rows = [
        ("query", "--MKVALLT--", 0.98),
        ("hit1", "--MKVALLS--", 0.91),
        ("hit2", "AAMKIALLT--", 0.85),
        ("hit3", "--MRV--LT-C", 0.40),
        ("hit4", "----VALLTGG", 0.77),
        ("hit5", "--WWWWWWW--", 0.12),
        ("hit6", "--MKVALLT--", 0.95),
    ];
    Alignment::new(
        rows.iter()
            .map(|&(id, seq, score)| Record::new(id, seq).with_field("score", score))
            .collect(),
    )
    .expect("valid scored alignment")
}
