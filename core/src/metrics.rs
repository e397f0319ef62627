//! Prometheus-tellere for degraderte utfall i analysen.
//! Passive prosess-globale tellere, ingen exporter.

use once_cell::sync::Lazy;
use prometheus::{IntCounter, Registry};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

fn register_counter(name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::new(name, help).expect("gyldig tellernavn");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("teller registrert én gang");
    counter
}

static SEGMENTATION_RELAXED: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "swing_segmentation_relaxed_total",
        "Segmenteringer som måtte falle tilbake til avslappet terskel",
    )
});

static SEGMENTATION_EMPTY: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "swing_segmentation_empty_total",
        "Segmenteringer som endte uten svinger",
    )
});

static STAT_TEST_FALLBACK: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "stat_test_fallback_total",
        "Statistiske tester erstattet med nøytralt resultat",
    )
});

pub fn swing_segmentation_relaxed_total() -> &'static IntCounter {
    &SEGMENTATION_RELAXED
}

pub fn swing_segmentation_empty_total() -> &'static IntCounter {
    &SEGMENTATION_EMPTY
}

pub fn stat_test_fallback_total() -> &'static IntCounter {
    &STAT_TEST_FALLBACK
}
