use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Histogram, register_counter, register_counter_vec, register_histogram,
};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("updates_requests_total", "Total number of /updates requests").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "updates_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
    pub static ref GENERATION_FAILURES: CounterVec = register_counter_vec!(
        "updates_generation_failures_total",
        "Degraded result slots by failing stage",
        &["stage"]
    )
    .unwrap();
    pub static ref CACHE_HITS: CounterVec =
        register_counter_vec!("cache_hits_total", "Total cache hits", &["cache"]).unwrap();
    pub static ref CACHE_MISSES: CounterVec =
        register_counter_vec!("cache_misses_total", "Total cache misses", &["cache"]).unwrap();
}
