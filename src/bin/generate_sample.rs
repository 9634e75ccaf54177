use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// (site, share of launches, typical payload kg, payload spread kg)
static SITES: [(&str, f64, f64, f64); 4] = [
    ("CCAFS LC-40", 0.46, 2500.0, 1500.0),
    ("VAFB SLC-4E", 0.18, 6000.0, 3500.0),
    ("KSC LC-39A", 0.23, 5500.0, 2500.0),
    ("CCAFS SLC-40", 0.13, 4500.0, 2000.0),
];

const BOOSTERS: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick_site(&mut self) -> &'static (&'static str, f64, f64, f64) {
        let mut roll = self.next_f64();
        for site in &SITES {
            if roll < site.1 {
                return site;
            }
            roll -= site.1;
        }
        &SITES[SITES.len() - 1]
    }
}

fn generate(count: usize, rng: &mut SimpleRng) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let &(site, _, mean, spread) = rng.pick_site();
            // Early flights carried light payloads and failed more often.
            let progress = i as f64 / count.max(1) as f64;
            let payload = rng
                .gauss(mean * (0.4 + progress), spread)
                .clamp(0.0, 15_600.0)
                .round();
            let success = rng.next_f64() < 0.25 + 0.6 * progress;
            let booster = BOOSTERS[((progress * BOOSTERS.len() as f64) as usize).min(BOOSTERS.len() - 1)];

            Row {
                flight_number: i as i64 + 1,
                launch_site: site.to_string(),
                class: i64::from(success),
                payload_mass_kg: payload,
                booster_category: booster.to_string(),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.launch_site.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_category.as_str()),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// Write a synthetic launch table for trying out the dashboard.
#[derive(Debug, Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Output file (.csv or .parquet).
    #[arg(default_value = "spacex_launch_dash.csv")]
    output: PathBuf,

    /// Number of launches to generate.
    #[arg(default_value_t = 56)]
    count: usize,
}

fn main() -> Result<()> {
    let Args {
        output: output_path,
        count,
    } = Args::parse();

    let mut rng = SimpleRng::new(42);
    let rows = generate(count, &mut rng);

    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&output_path, &rows)?,
        "parquet" | "pq" => write_parquet(&output_path, &rows)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    println!("Wrote {} launches to {}", rows.len(), output_path.display());
    Ok(())
}
