//! Randomized spatial query workloads.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// The time axis is never randomized: every query covers the full legal
/// range of server timestamps.
pub const TIME_RANGE_MIN: i64 = 0;
pub const TIME_RANGE_MAX: i64 = i32::MAX as i64;

#[derive(thiserror::Error, Debug)]
pub enum InvalidRangeError {
    #[error("latitude range [{min}, {max}] is inverted or outside [-90, 90]")]
    Latitude { min: f64, max: f64 },
    #[error("longitude range [{min}, {max}] is inverted or outside [-180, 180]")]
    Longitude { min: f64, max: f64 },
    #[error("time range [{min}, {max}] is inverted or outside [0, 2^31-1]")]
    Time { min: i64, max: i64 },
}

/// Spatio-temporal bounding box in the server's coordinate system.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_time: i64,
    pub max_time: i64,
}

impl Region {
    /// Degrees-squared coverage of the lat/lon footprint. Not a geodesic
    /// area; only useful as a relative indicator of how much of the space
    /// a query covers.
    pub fn area(&self) -> f64 {
        (self.max_lat - self.min_lat) * (self.max_lon - self.min_lon)
    }

    /// Defensive bounds check for regions that did not come out of
    /// [`WorkloadGenerator`] (which produces valid regions by construction).
    pub fn validate(&self) -> Result<(), InvalidRangeError> {
        if !(self.min_lat <= self.max_lat
            && (-90.0..=90.0).contains(&self.min_lat)
            && (-90.0..=90.0).contains(&self.max_lat))
        {
            return Err(InvalidRangeError::Latitude {
                min: self.min_lat,
                max: self.max_lat,
            });
        }
        if !(self.min_lon <= self.max_lon
            && (-180.0..=180.0).contains(&self.min_lon)
            && (-180.0..=180.0).contains(&self.max_lon))
        {
            return Err(InvalidRangeError::Longitude {
                min: self.min_lon,
                max: self.max_lon,
            });
        }
        if !(self.min_time <= self.max_time
            && self.min_time >= TIME_RANGE_MIN
            && self.max_time <= TIME_RANGE_MAX)
        {
            return Err(InvalidRangeError::Time {
                min: self.min_time,
                max: self.max_time,
            });
        }
        Ok(())
    }
}

/// One randomized query, consumed by exactly one trial.
#[derive(Debug, Clone)]
pub struct QueryWorkload {
    pub structure_name: String,
    pub region: Region,
    /// When set, the server is asked to return OIDs, locations, timestamps
    /// and payloads; when unset, none of them. The four wire flags always
    /// move together.
    pub return_data: bool,
    /// Server-side query lifetime hint, in seconds.
    pub suggested_ttl: i32,
}

/// Draws query regions as two independent uniform samples per axis,
/// ordered into (min, max). The resulting per-axis extent follows the
/// distribution of the difference of two uniforms.
pub struct WorkloadGenerator {
    rng: SmallRng,
}

impl WorkloadGenerator {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_workload(
        &mut self,
        structure_name: &str,
        return_data: bool,
        suggested_ttl: i32,
    ) -> QueryWorkload {
        let (min_lat, max_lat) = ordered(
            self.rng.gen_range(-90.0..=90.0),
            self.rng.gen_range(-90.0..=90.0),
        );
        let (min_lon, max_lon) = ordered(
            self.rng.gen_range(-180.0..=180.0),
            self.rng.gen_range(-180.0..=180.0),
        );

        QueryWorkload {
            structure_name: structure_name.to_string(),
            region: Region {
                min_lat,
                max_lat,
                min_lon,
                max_lon,
                min_time: TIME_RANGE_MIN,
                max_time: TIME_RANGE_MAX,
            },
            return_data,
            suggested_ttl,
        }
    }
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_regions_stay_in_bounds() {
        let mut generator = WorkloadGenerator::with_seed(7);
        for _ in 0..10_000 {
            let w = generator.next_workload("idx", false, 10);
            let r = &w.region;
            assert!(-90.0 <= r.min_lat && r.min_lat <= r.max_lat && r.max_lat <= 90.0);
            assert!(-180.0 <= r.min_lon && r.min_lon <= r.max_lon && r.max_lon <= 180.0);
            assert_eq!(r.min_time, 0);
            assert_eq!(r.max_time, 2_147_483_647);
            assert!(r.area() >= 0.0);
            r.validate().unwrap();
        }
    }

    #[test]
    fn workload_carries_caller_context() {
        let mut generator = WorkloadGenerator::with_seed(1);
        let w = generator.next_workload("my_index", true, 42);
        assert_eq!(w.structure_name, "my_index");
        assert!(w.return_data);
        assert_eq!(w.suggested_ttl, 42);
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = WorkloadGenerator::with_seed(99);
        let mut b = WorkloadGenerator::with_seed(99);
        for _ in 0..100 {
            assert_eq!(
                a.next_workload("x", false, 10).region,
                b.next_workload("x", false, 10).region
            );
        }
    }

    #[test]
    fn validate_rejects_inverted_and_out_of_range() {
        let good = Region {
            min_lat: -10.0,
            max_lat: 10.0,
            min_lon: -20.0,
            max_lon: 20.0,
            min_time: 0,
            max_time: TIME_RANGE_MAX,
        };
        good.validate().unwrap();

        let inverted_lat = Region {
            min_lat: 10.0,
            max_lat: -10.0,
            ..good.clone()
        };
        assert!(matches!(
            inverted_lat.validate(),
            Err(InvalidRangeError::Latitude { .. })
        ));

        let wide_lon = Region {
            min_lon: -200.0,
            ..good.clone()
        };
        assert!(matches!(
            wide_lon.validate(),
            Err(InvalidRangeError::Longitude { .. })
        ));

        let negative_time = Region {
            min_time: -1,
            ..good
        };
        assert!(matches!(
            negative_time.validate(),
            Err(InvalidRangeError::Time { .. })
        ));
    }
}
