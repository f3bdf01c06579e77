//! Exponential decay dy/dt = -y, one step of each solver.
//!
//! Run with:
//!   RUST_LOG=odestep=trace cargo run --example exponential_decay

use odestep::{classical_runge_kutta, euler, runge_kutta_fehlberg, StepError};

fn main() -> Result<(), StepError> {
    env_logger::builder().format_timestamp_secs().init();

    let eqs = [|s: &[f64; 2]| -s[1]];
    let y0 = [0.0, 1.0];
    let h: f64 = 0.1;
    let exact = (-h).exp();

    let e = euler(&eqs, &y0, h)?;
    let rk = classical_runge_kutta(&eqs, &y0, h)?;
    let rkf = runge_kutta_fehlberg(&eqs, &y0, h, 1e-4)?;

    println!("dy/dt = -y, y(0) = 1, h = {h}");
    println!("  exact         y = {exact:.12}");
    println!("  Euler         y = {:.12}   error: {:.2e}", e[1], (e[1] - exact).abs());
    println!("  Classical RK  y = {:.12}   error: {:.2e}", rk[1], (rk[1] - exact).abs());
    println!(
        "  Fehlberg 4(5) y = {:.12}   error: {:.2e}",
        rkf.state[1],
        (rkf.state[1] - exact).abs()
    );
    println!();
    println!("  |y5 - y4|       = {:.2e}", rkf.error);
    println!("  limiting ratio  = {:.3e}", rkf.limiting_ratio);
    println!("  recommended h   = {:.6}", rkf.h_next);

    Ok(())
}
