use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use kalman_grapher::data::{write_points, DataPoint};
use kalman_grapher::ParserConfig;

/// Seeded Gaussian sensor noise: splitmix64 uniforms through Box-Muller.
struct SensorNoise {
    seed: u64,
    std_dev: f64,
}

impl SensorNoise {
    fn uniform(&mut self) -> f64 {
        self.seed = self.seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.seed;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        // 53 random bits in (0, 1]; never 0 so ln() below stays finite.
        ((z >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    fn sample(&mut self) -> f64 {
        let radius = (-2.0 * self.uniform().ln()).sqrt();
        let angle = std::f64::consts::TAU * self.uniform();
        self.std_dev * radius * angle.cos()
    }
}

/// Scalar Kalman filter with a random-walk process model.
struct Kalman1D {
    estimate: f64,
    variance: f64,
    process_noise: f64,
    measurement_noise: f64,
}

impl Kalman1D {
    fn update(&mut self, measurement: f64) -> f64 {
        self.variance += self.process_noise;
        let gain = self.variance / (self.variance + self.measurement_noise);
        self.estimate += gain * (measurement - self.estimate);
        self.variance *= 1.0 - gain;
        self.estimate
    }
}

fn main() -> Result<()> {
    let noise = 0.25;
    let mut sensor = SensorNoise {
        seed: 42,
        std_dev: noise,
    };
    let mut filter = Kalman1D {
        estimate: 0.0,
        variance: 1.0,
        process_noise: 0.01,
        measurement_noise: noise * noise,
    };

    let mut truth = Vec::new();
    let mut measured = Vec::new();
    let mut estimated = Vec::new();

    for i in 0..200 {
        let t = i as f64 * 0.05;
        let y = t.sin();
        let z = y + sensor.sample();

        truth.push(DataPoint::new("Truth", t, y));
        measured.push(DataPoint::new("Measurement", t, z));
        estimated.push(DataPoint::new("Kalman estimate", t, filter.update(z)));
    }

    let points: Vec<DataPoint> = truth.into_iter().chain(measured).chain(estimated).collect();

    let output_path = "sample_data.txt";
    let file = File::create(output_path).context("creating output file")?;
    let mut out = BufWriter::new(file);
    write_points(&mut out, &points, &ParserConfig::default()).context("writing sample data")?;
    out.flush().context("flushing output file")?;

    println!("Wrote {} points in 3 series to {output_path}", points.len());
    Ok(())
}
