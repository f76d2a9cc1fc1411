//! End-to-end: JSON change events through the normalizer into a sink.

use chronica::sink::LogSink;
use chronica::{ActorContext, ChangeEvent, EventNormalizer, MemorySink};

const EVENTS: &str = r#"
{"kind":"option_updated","key":"blogname","old_value":"Old","new_value":"New"}
{"kind":"option_updated","key":"_transient_feed","old_value":"a","new_value":"b"}
{"kind":"option_added","key":"page_for_privacy_policy","value":42}
{"kind":"theme_switched","old_theme":"Twenty Twenty","new_theme":"Twenty Twenty-One"}
{"kind":"system_update_completed","component":"core","action":"update"}
{"kind":"system_update_completed","component":"core","action":"install"}
{"kind":"option_deleted","key":"my_custom_flag"}
"#;

#[test]
fn ingest_pipeline_records_and_suppresses() {
    let sink = MemorySink::new();
    let normalizer = EventNormalizer::new(ActorContext::anonymous());

    let mut inserted = 0usize;
    let mut suppressed = 0usize;
    for line in EVENTS.lines().filter(|line| !line.trim().is_empty()) {
        let event: ChangeEvent = serde_json::from_str(line).expect("parse event");
        match normalizer.normalize(&event) {
            Some(record) => {
                sink.insert(&record).expect("insert");
                inserted += 1;
            }
            None => suppressed += 1,
        }
    }

    assert_eq!(inserted, 5);
    assert_eq!(suppressed, 2);

    let records = sink.records();
    assert_eq!(records[0].message, "Site title was updated from 'Old' to 'New'");
    assert_eq!(
        records[1].message,
        "Privacy policy page was added with value '42'"
    );
    assert!(records
        .iter()
        .any(|r| r.message == "Core update completed successfully"));
    assert!(records.iter().all(|r| r.ip_address == "127.0.0.1"));
    assert!(records.iter().all(|r| r.user_id.is_empty()));
}
