// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics facade; without an installed recorder every call is a no-op.

use std::time::Duration;

use metrics::{describe_counter, describe_histogram};

use polymem_core::BackendKind;

/// Registers polymem metric descriptions. Called once at startup.
pub fn register_metrics() {
    describe_counter!(
        "polymem_backend_failures_total",
        "Backend calls that failed or timed out during a fan-out"
    );
    describe_histogram!(
        "polymem_operation_seconds",
        "Wall-clock duration of coordinator operations in seconds"
    );
    describe_counter!(
        "polymem_chunks_stored_total",
        "Chunks stored in every primary view"
    );
}

pub fn record_backend_failure(backend: BackendKind, operation: &'static str) {
    metrics::counter!(
        "polymem_backend_failures_total",
        "backend" => backend.to_string(),
        "operation" => operation
    )
    .increment(1);
}

pub fn record_operation(operation: &'static str, elapsed: Duration) {
    metrics::histogram!("polymem_operation_seconds", "operation" => operation)
        .record(elapsed.as_secs_f64());
}

pub fn record_chunk_stored() {
    metrics::counter!("polymem_chunks_stored_total").increment(1);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };

    use super::*;

    #[derive(Default)]
    struct Capture {
        described: Mutex<Vec<String>>,
        registered: Mutex<Vec<String>>,
    }

    impl Capture {
        fn describe(&self, key: KeyName) {
            self.described.lock().unwrap().push(key.as_str().to_string());
        }

        fn register(&self, key: &Key) {
            self.registered.lock().unwrap().push(key.name().to_string());
        }
    }

    impl Recorder for Capture {
        fn describe_counter(&self, key: KeyName, _: Option<Unit>, _: SharedString) {
            self.describe(key);
        }

        fn describe_gauge(&self, key: KeyName, _: Option<Unit>, _: SharedString) {
            self.describe(key);
        }

        fn describe_histogram(&self, key: KeyName, _: Option<Unit>, _: SharedString) {
            self.describe(key);
        }

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.register(key);
            Counter::noop()
        }

        fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
            self.register(key);
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            self.register(key);
            Histogram::noop()
        }
    }

    #[test]
    fn every_recorded_metric_is_described() {
        let capture = Capture::default();
        metrics::with_local_recorder(&capture, || {
            register_metrics();
            record_backend_failure(BackendKind::Graph, "store_chunk");
            record_operation("retrieve_multi_view", Duration::from_millis(3));
            record_chunk_stored();
        });

        let mut described = capture.described.lock().unwrap().clone();
        let mut registered = capture.registered.lock().unwrap().clone();
        described.sort();
        registered.sort();
        assert_eq!(
            described,
            [
                "polymem_backend_failures_total",
                "polymem_chunks_stored_total",
                "polymem_operation_seconds",
            ]
        );
        assert_eq!(registered, described);
    }

    #[test]
    fn registering_without_a_recorder_is_a_no_op() {
        register_metrics();
        record_chunk_stored();
    }
}
