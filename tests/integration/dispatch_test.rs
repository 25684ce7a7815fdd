//! Integration tests for the dispatch pipeline.
//!
//! These tests are implemented in:
//! `crates/dockhook-core/tests/dispatch_test.rs`
//! `crates/dockhook-core/tests/trigger_test.rs`
//!
//! Covered scenarios:
//! - `backfill_reports_exists_for_each_running_container`: Running containers are reported as `exists`
//! - `backfill_precedes_live_streaming`: The event feed opens only after the backfill listing
//! - `live_event_feeds_descriptor_to_handler_stdin`: Inspection payload reaches handler stdin verbatim
//! - `skip_inspect_events_bypass_inspection`: Destroy-class events make zero inspect calls
//! - `inspection_failure_still_triggers_handler`: Fail-open inspection degrades to an empty payload
//! - `event_burst_fans_out_without_loss`: Concurrent handlers complete in any order, none dropped
//! - `stream_closure_is_fatal` / `stream_transport_error_is_fatal`: Feed loss ends the dispatcher
//! - `shell_mode_matches_direct_invocation`: Both invocation modes pass the same trailing arguments
//! - `environment_suppression_clears_child_env`: Handlers can run with an empty environment
