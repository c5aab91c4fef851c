//! # Controller step benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pursuit_ctrl::pid::{Gain, Pid, PidMode, PidParams, Saturation};
use pursuit_ctrl::pure_pursuit::PurePursuitCtrl;
use util::Pose2;

fn pid_step_benchmark(c: &mut Criterion) {
    let mut pid = Pid::new(PidParams {
        mode: PidMode::Positional,
        gain: Gain::new(1.2, 0.4, 0.05),
        saturation: Some(Saturation {
            min: -1.0,
            max: 1.0
        })
    });

    c.bench_function("pid_step", |b| {
        b.iter(|| pid.step(black_box(1.0), black_box(0.4), black_box(0.01)).unwrap())
    });
}

fn pursuit_step_benchmark(c: &mut Criterion) {
    let mut ctrl = PurePursuitCtrl::new(
        Pid::with_gain(0.8, 0.05, 0.0),
        Pid::with_gain(2.0, 0.0, 0.1)
    );

    // A straight path of closely spaced waypoints
    ctrl.set_path(
        (0..100)
            .map(|i| Pose2::new(i as f64 * 0.05, 0.0, 0.0))
            .collect()
    );

    let current = Pose2::new(1.3, 0.4, 0.2);

    c.bench_function("pursuit_step", |b| {
        b.iter(|| ctrl.step(black_box(50), &current, black_box(0.01)).unwrap())
    });
}

criterion_group!(benches, pid_step_benchmark, pursuit_step_benchmark);
criterion_main!(benches);
