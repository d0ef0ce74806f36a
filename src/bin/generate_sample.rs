use std::path::PathBuf;

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
}

/// Damped oscillator runs: (amplitude, frequency, damping, ambient temperature).
const RUNS: [(f64, f64, f64, f64); 3] = [
    (1.0, 0.8, 0.05, 21.0),
    (1.5, 0.6, 0.10, 23.5),
    (0.7, 1.1, 0.02, 19.0),
];

const SAMPLES: usize = 400;
const DT: f64 = 0.05;

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&out_dir).expect("Failed to create output directory");

    let mut rng = SimpleRng::new(42);

    for (run, &(amp, freq, damping, ambient)) in RUNS.iter().enumerate() {
        let path = out_dir.join(format!("run_{}.csv", run + 1));
        let mut writer = csv::Writer::from_path(&path).expect("Failed to create output file");
        writer
            .write_record(["time", "position", "velocity", "temperature"])
            .expect("Failed to write header");

        let omega = 2.0 * std::f64::consts::PI * freq;
        for i in 0..SAMPLES {
            let t = i as f64 * DT;
            let envelope = amp * (-damping * t).exp();
            let position = envelope * (omega * t).cos() + rng.gauss(0.0, 0.02);
            let velocity = -envelope * (damping * (omega * t).cos() + omega * (omega * t).sin())
                + rng.gauss(0.0, 0.05);
            let temperature = ambient + 0.01 * t + rng.gauss(0.0, 0.1);

            writer
                .write_record([
                    format!("{t:.3}"),
                    format!("{position:.5}"),
                    format!("{velocity:.5}"),
                    format!("{temperature:.3}"),
                ])
                .expect("Failed to write row");
        }
        writer.flush().expect("Failed to flush output file");
        println!("Wrote {SAMPLES} rows to {}", path.display());
    }

    println!(
        "Open them with: csv-plotter \"{}/*.csv\"",
        out_dir.display()
    );
}
