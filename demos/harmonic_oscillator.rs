//! Harmonic oscillator with all three solvers.
//!
//! Steps y'' + ω²y = 0 over one period with a fixed step for Euler and
//! classical Runge-Kutta, and with the recommended step for
//! Runge-Kutta-Fehlberg, then compares with the exact solution.
//!
//! Run with:
//!   RUST_LOG=odestep=debug cargo run --example harmonic_oscillator

use odestep::{
    ClassicalRungeKutta, EquationSet, Euler, FixedStepper, RungeKuttaFehlberg, StepController,
    StepError,
};

/// Simple harmonic oscillator: y'' + ω²y = 0
///
/// State vector: [t, y, y']
struct HarmonicOscillator {
    omega: f64,
}

impl EquationSet<3> for HarmonicOscillator {
    fn len(&self) -> usize {
        2
    }

    fn derivative(&self, index: usize, state: &[f64; 3]) -> f64 {
        match index {
            0 => state[2],
            _ => -self.omega * self.omega * state[1],
        }
    }
}

fn fixed<S: FixedStepper<3>>(
    stepper: &S,
    sys: &HarmonicOscillator,
    period: f64,
    steps: usize,
) -> Result<[f64; 3], StepError> {
    let h = period / steps as f64;
    let mut state = [0.0, 1.0, 0.0];
    for _ in 0..steps {
        state = stepper.step(sys, &state, h)?;
    }
    Ok(state)
}

fn main() -> Result<(), StepError> {
    env_logger::init();

    let omega = 2.0;
    let sys = HarmonicOscillator { omega };

    // One full period: T = 2π/ω
    let period = 2.0 * std::f64::consts::PI / omega;

    println!("Harmonic Oscillator (ω = {omega})");
    println!("  Period:      {period:.6} s");
    println!();

    for (name, yf) in [
        ("Euler", fixed(&Euler, &sys, period, 1000)?),
        ("Classical RK", fixed(&ClassicalRungeKutta, &sys, period, 1000)?),
    ] {
        println!("  {name:<14} y(T) = {:.15}   error: {:.2e}", yf[1], (yf[1] - 1.0).abs());
    }

    // Adaptive: the caller decides when to stop and how to clamp the step
    let solver = RungeKuttaFehlberg::new(
        StepController::default()
            .with_ratio_ceiling(1e10)
            .with_factor_limits(0.2, 5.0),
    );
    let mut state = [0.0, 1.0, 0.0];
    let mut h: f64 = 0.01;
    let mut steps = 0;
    while state[0] < period {
        let step = solver.step(&sys, &state, h.min(period - state[0]), 1e-8)?;
        state = step.state;
        h = step.h_next;
        steps += 1;
    }
    println!(
        "  {:<14} y(T) = {:.15}   error: {:.2e}   ({} steps, ratio ceiling {:e})",
        "Fehlberg 4(5)",
        state[1],
        (state[1] - 1.0).abs(),
        steps,
        solver.controller().ratio_ceiling
    );
    println!();
    println!(
        "  Stages per step: Euler {}, RK {}, RKF45 {}",
        <Euler as FixedStepper<3>>::STAGES,
        <ClassicalRungeKutta as FixedStepper<3>>::STAGES,
        RungeKuttaFehlberg::STAGES,
    );

    Ok(())
}
