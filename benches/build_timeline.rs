//! Benchmark for building timelines from chart files.

use chainbeet::{
    analysis::{coincident_groups, subdivisions},
    chart::{ParseOptions, parse_chart},
    chart_process::{ScrollConfig, YCalculator},
};
use criterion::{Criterion, Throughput};

struct ChartFile {
    name: String,
    source: String,
}

fn scan_chart_files() -> Vec<ChartFile> {
    let dir = "tests/files";

    std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from)?;

            let source = std::fs::read_to_string(&path).expect("Failed to load test file");

            Some(ChartFile { name, source })
        })
        .collect()
}

/// A dense chart with tempo and speed changes every few beats and long charge groups.
fn generated_chart(beats: u32) -> ChartFile {
    let mut notes = vec![];
    for beat in 0..beats {
        for index in 0..8 {
            let position = (beat + index) % 7;
            notes.push(format!("[{beat}, 7, 8, {position}, {index}, 10]"));
        }
        if beat % 4 == 0 {
            let tempo = 120 + beat % 60;
            notes.push(format!("[{beat}, 2, 1, 0, 0, 2, {tempo}]"));
            notes.push(format!("[{beat}, 2, 2, 0, 1, 3, 1.25]"));
        }
        let code = match beat % 4 {
            0 => 20,
            3 => 21,
            _ => 22,
        };
        notes.push(format!("[{beat}, 7, 1, 6, 0, {code}, 1]"));
    }
    let source = format!(
        r#"{{"info": {{"bpm": 150, "dir": "bench", "delay": 0}}, "notes": [{}]}}"#,
        notes.join(",")
    );
    ChartFile {
        name: format!("generated_{beats}"),
        source,
    }
}

fn bench_build_timeline(c: &mut Criterion) {
    let mut files = scan_chart_files();
    files.push(generated_chart(2000));
    let mut group = c.benchmark_group("build_timeline");

    for file in files.iter() {
        group.throughput(Throughput::Bytes(file.source.len() as u64));
        group.bench_function(&file.name, |b| {
            b.iter(|| parse_chart(std::hint::black_box(&file.source), ParseOptions::default()));
        });
    }

    group.finish();
}

fn bench_analyses(c: &mut Criterion) {
    let file = generated_chart(2000);
    let timeline =
        parse_chart(&file.source, ParseOptions::default()).expect("Failed to build timeline");
    let mut group = c.benchmark_group("analyses");

    group.bench_function("coincident_groups", |b| {
        b.iter(|| coincident_groups(std::hint::black_box(&timeline)));
    });
    group.bench_function("subdivisions", |b| {
        b.iter(|| subdivisions(std::hint::black_box(&timeline)));
    });
    let calc = YCalculator::new(&timeline, ScrollConfig::default());
    let end = timeline.last_time().unwrap_or_default();
    group.bench_function("get_y", |b| {
        b.iter(|| {
            (0..1000)
                .map(|step| calc.get_y(std::hint::black_box(end * f64::from(step) / 1000.0)))
                .fold(0.0, |sum, y| sum + y.as_f64())
        });
    });

    group.finish();
}

fn main() {
    let mut criterion = Criterion::default();
    bench_build_timeline(&mut criterion);
    bench_analyses(&mut criterion);
}
