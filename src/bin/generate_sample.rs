use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic Eurostat `nama_10_gdp` export for demos.
#[derive(Parser, Debug)]
#[command(name = "generate-sample")]
struct Args {
    /// Output CSV path
    #[arg(default_value = "nama_10_gdp_1_Data.csv")]
    output: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Column layout of the Eurostat bulk download.
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "TIME")]
    time: i32,
    #[serde(rename = "GEO")]
    geo: &'a str,
    #[serde(rename = "UNIT")]
    unit: &'a str,
    #[serde(rename = "NA_ITEM")]
    na_item: &'a str,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "Flag and Footnotes")]
    flags: &'a str,
}

const CURRENT_PRICES: &str = "Current prices, million euro";
const CHAIN_LINKED: &str = "Chain linked volumes (2010), million euro";

/// (geography, GDP in 2008, million euro)
const GEOGRAPHIES: [(&str, f64); 12] = [
    ("European Union (current composition)", 13_000_000.0),
    ("Euro area (19 countries)", 9_600_000.0),
    ("Belgium", 354_000.0),
    ("Germany", 2_546_000.0),
    ("Spain", 1_116_000.0),
    ("France", 1_997_000.0),
    ("Italy", 1_637_000.0),
    ("Netherlands", 648_000.0),
    ("Austria", 293_000.0),
    ("Portugal", 179_000.0),
    ("Finland", 193_000.0),
    ("Malta", 6_100.0),
];

/// (indicator, share of GDP)
const INDICATORS: [(&str, f64); 6] = [
    ("Gross domestic product at market prices", 1.0),
    ("Final consumption expenditure", 0.76),
    ("Household and NPISH final consumption expenditure", 0.55),
    ("Gross capital formation", 0.21),
    ("Exports of goods and services", 0.45),
    ("Imports of goods and services", 0.42),
];

const YEARS: std::ops::RangeInclusive<i32> = 2008..=2017;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Format like the Eurostat export: `.` groups thousands, `,` marks decimals.
fn eurostat_format(value: f64) -> String {
    let fixed = format!("{:.1}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));

    let mut grouped = String::new();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped},{frac_part}")
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut rows = 0usize;
    for year in YEARS {
        let years_in = f64::from(year - YEARS.start());
        for &(geo, base_gdp) in &GEOGRAPHIES {
            let trend = base_gdp * (1.0 + 0.02 * years_in) * rng.uniform(0.97, 1.03);
            for &(item, share) in &INDICATORS {
                let current = trend * share * rng.uniform(0.95, 1.05);
                let chained = current / (1.0 + 0.015 * years_in);

                // Gaps like the real export: ':' for unavailable, '0,0' for unreported.
                let roll = rng.next_f64();
                let value = if roll < 0.03 {
                    ":".to_string()
                } else if roll < 0.05 {
                    "0,0".to_string()
                } else {
                    eurostat_format(current)
                };

                let units = [
                    (CURRENT_PRICES, value),
                    (CHAIN_LINKED, eurostat_format(chained)),
                ];
                for (unit, text) in units {
                    writer.serialize(Row {
                        time: year,
                        geo,
                        unit,
                        na_item: item,
                        value: text,
                        flags: "",
                    })?;
                    rows += 1;
                }
            }
        }
    }
    writer.flush()?;

    println!("Wrote {rows} rows to {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_eurostat_separators() {
        assert_eq!(eurostat_format(1234.5), "1.234,5");
        assert_eq!(eurostat_format(2_932_470.0), "2.932.470,0");
        assert_eq!(eurostat_format(12.04), "12,0");
        assert_eq!(eurostat_format(-1234.5), "-1.234,5");
    }

    #[test]
    fn rng_is_deterministic() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..10 {
            let v = a.uniform(0.5, 1.5);
            assert_eq!(v, b.uniform(0.5, 1.5));
            assert!((0.5..1.5).contains(&v));
        }
    }
}
