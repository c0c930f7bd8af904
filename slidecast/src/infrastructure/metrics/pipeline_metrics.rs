// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Cache-hit/miss counters per stage and a run-duration histogram,
//! registered against a caller-supplied `prometheus::Registry` rather than
//! the global default so tests can use an isolated registry per case.

use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};
use slidecast_domain::services::Stage;

pub struct PipelineMetrics {
    cache_hits: IntCounterVec,
    cache_misses: IntCounterVec,
    language_duration_seconds: Histogram,
}

impl PipelineMetrics {
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let cache_hits = IntCounterVec::new(
            Opts::new("slidecast_cache_hits_total", "Cache hits by stage"),
            &["stage"],
        )?;
        let cache_misses = IntCounterVec::new(
            Opts::new("slidecast_cache_misses_total", "Cache misses by stage"),
            &["stage"],
        )?;
        let language_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "slidecast_language_duration_seconds",
            "Wall-clock duration of one language's Translation->Speech->Render->Assembly run",
        ))?;

        registry.register(Box::new(cache_hits.clone()))?;
        registry.register(Box::new(cache_misses.clone()))?;
        registry.register(Box::new(language_duration_seconds.clone()))?;

        Ok(Self {
            cache_hits,
            cache_misses,
            language_duration_seconds,
        })
    }

    pub fn record_cache_hit(&self, stage: Stage) {
        self.cache_hits.with_label_values(&[stage.as_str()]).inc();
    }

    pub fn record_cache_miss(&self, stage: Stage) {
        self.cache_misses.with_label_values(&[stage.as_str()]).inc();
    }

    pub fn observe_language_duration(&self, seconds: f64) {
        self.language_duration_seconds.observe(seconds);
    }
}
