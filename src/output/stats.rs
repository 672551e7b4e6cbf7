//! Run statistics printed at the end of each stage

use crate::api::FailureKind;
use crate::crawler::{resolve_station_response, StageReport};
use crate::model::{key, City, CityStations};
use std::collections::HashMap;

/// Counters derived from a [`StageReport`]
#[derive(Debug, Clone, PartialEq)]
pub struct StageStatistics {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures_by_kind: HashMap<FailureKind, usize>,
    pub published: usize,
    pub publish_failures: usize,
}

impl StageStatistics {
    pub fn from_report<T>(report: &StageReport<T>) -> Self {
        let mut failures_by_kind = HashMap::new();
        for failure in &report.failures {
            *failures_by_kind.entry(failure.error.kind()).or_insert(0) += 1;
        }

        Self {
            attempted: report.attempted,
            succeeded: report.len(),
            failures_by_kind,
            published: report.published,
            publish_failures: report.publish_failures,
        }
    }

    pub fn failed(&self) -> usize {
        self.failures_by_kind.values().sum()
    }

    /// Percentage of attempted items that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.attempted > 0 {
            (self.succeeded as f64 / self.attempted as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Lists every fetched city as `province-city (code)`
pub fn print_city_summary(cities: &[City]) {
    println!("Fetched {} cities", cities.len());
    for (index, city) in cities.iter().enumerate() {
        println!(
            "{}. {}-{} (code: {})",
            index + 1,
            province_label(city),
            city.display_name(),
            city.code()
        );
    }
}

fn province_label(city: &City) -> String {
    if city.province_name.is_null() {
        "?".to_string()
    } else {
        key::label(&city.province_name)
    }
}

/// Prints the station-list stage outcome, counting stations via the resolver
pub fn print_station_summary(report: &StageReport<CityStations>) {
    let total_stations: usize = report
        .records
        .values()
        .map(|city| resolve_station_response(&city.station_data).len())
        .sum();

    println!("\n=== Station Lists ===");
    println!(
        "Crawl finished: {} stations across {} cities",
        total_stations,
        report.len()
    );
    print_stage_statistics(&StageStatistics::from_report(report), "cities");
}

/// Prints the station-detail stage outcome
pub fn print_detail_summary<T>(report: &StageReport<T>) {
    println!("\n=== Station Details ===");
    println!("Crawl finished: details for {} stations", report.len());
    print_stage_statistics(&StageStatistics::from_report(report), "stations");
}

fn print_stage_statistics(stats: &StageStatistics, noun: &str) {
    println!(
        "Success Rate: {:.1}% ({} / {} {})",
        stats.success_rate(),
        stats.succeeded,
        stats.attempted,
        noun
    );

    if stats.failed() > 0 {
        println!("Failures:");
        let mut counts: Vec<_> = stats.failures_by_kind.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));
        for (kind, count) in counts {
            println!("  {:?}: {}", kind, count);
        }
    }

    if stats.published > 0 || stats.publish_failures > 0 {
        println!(
            "Published: {} ({} failed)",
            stats.published, stats.publish_failures
        );
    }
}
