use anyhow::{Context, Result};

/// Countries with a rough baseline hunger score and a yearly trend.
const COUNTRIES: [(&str, f64, f64); 14] = [
    ("Afghanistan", 50.9, -0.6),
    ("Bangladesh", 34.1, -0.7),
    ("Chad", 50.4, -0.3),
    ("Ethiopia", 53.7, -1.2),
    ("Haiti", 41.9, -0.2),
    ("India", 38.4, -0.5),
    ("Kenya", 36.5, -0.6),
    ("Madagascar", 42.7, -0.1),
    ("Niger", 52.1, -0.9),
    ("Nigeria", 40.6, -0.4),
    ("Peru", 20.8, -0.7),
    ("Sierra Leone", 57.5, -1.1),
    ("Somalia", 59.0, -0.2),
    ("Yemen", 41.3, 0.2),
];

const GHI_YEARS: [i32; 4] = [2000, 2008, 2016, 2021];

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform jitter in `[-amplitude, amplitude)`.
    fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

fn round1(v: f64) -> String {
    format!("{:.1}", v.max(0.0))
}

/// Wide table: one row per country, one column per survey year.
fn write_ghi(path: &str, rng: &mut SimpleRng) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;

    let mut header = vec!["Country".to_string()];
    header.extend(GHI_YEARS.iter().map(|y| y.to_string()));
    writer.write_record(&header)?;

    for (i, &(country, base, trend)) in COUNTRIES.iter().enumerate() {
        let mut record = vec![country.to_string()];
        for &year in &GHI_YEARS {
            // Leave a few gaps, like the published tables.
            let missing = (i + year as usize) % 11 == 0;
            let value = base + trend * (year - 2000) as f64 + rng.jitter(1.5);
            record.push(if missing { String::new() } else { round1(value) });
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Long table: one row per country and year with several metrics.
fn write_trends(path: &str, rng: &mut SimpleRng) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "country",
        "year",
        "undernourishment_rate",
        "calorie_supply_per_person",
        "stunting_rate",
        "agri_employment_share",
    ])?;

    for &(country, base, trend) in &COUNTRIES {
        for year in (2000..=2020).step_by(2) {
            let t = (year - 2000) as f64;
            let undernourishment = base * 0.5 + trend * 0.5 * t + rng.jitter(1.0);
            let calories = 2900.0 - base * 15.0 - trend * 10.0 * t + rng.jitter(40.0);
            let stunting = base * 0.8 + trend * 0.6 * t + rng.jitter(1.2);
            let agri = 30.0 + base * 0.5 + trend * 0.4 * t + rng.jitter(2.0);
            writer.write_record([
                country.to_string(),
                year.to_string(),
                round1(undernourishment),
                format!("{:.0}", calories),
                round1(stunting),
                round1(agri),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    write_ghi("ghi_wiki_cleaned.csv", &mut rng)?;
    println!("Wrote ghi_wiki_cleaned.csv ({} countries)", COUNTRIES.len());

    write_trends("output.csv", &mut rng)?;
    println!("Wrote output.csv ({} countries, 2000–2020)", COUNTRIES.len());

    Ok(())
}
