//! Uniform-random synthetic input records for the index server.
//!
//! One record per line: a 24-hex-digit OID, latitude, longitude and a
//! timestamp, comma separated. The server's build phase consumes this
//! format directly.

use std::io::Write;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub fn generate_line(rng: &mut impl Rng, oid: u64) -> String {
    let lat = rng.gen_range(-90.0f64..=90.0);
    let lon = rng.gen_range(-180.0f64..=180.0);
    let time = rng.gen_range(1..=i64::from(i32::MAX));
    format!("{oid:024x},{lat},{lon},{time}")
}

pub fn write_records<W: Write>(out: &mut W, count: u64) -> std::io::Result<()> {
    let mut rng = SmallRng::from_entropy();
    write_records_with(out, count, &mut rng)
}

pub fn write_records_with<W: Write>(
    out: &mut W,
    count: u64,
    rng: &mut impl Rng,
) -> std::io::Result<()> {
    for oid in 0..count {
        writeln!(out, "{}", generate_line(rng, oid))?;
    }
    Ok(())
}
