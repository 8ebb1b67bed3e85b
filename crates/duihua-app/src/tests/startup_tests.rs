use crate::profile_log_filter;

#[test]
fn profile_filter_replaces_startup_filter() {
    assert_eq!(profile_log_filter("info", "debug", false), Some("debug"));
}

#[test]
fn unchanged_filter_needs_no_reload() {
    assert_eq!(profile_log_filter("info", "info", false), None);
}

#[test]
fn rust_log_beats_profile_filter() {
    assert_eq!(profile_log_filter("info", "debug", true), None);
}
