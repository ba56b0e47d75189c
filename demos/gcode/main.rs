//! Prints the G-code program for a small built-in drawing.
//!
//! Usage:
//! ```text
//! cargo run --example gcode                  # default (mixed)
//! cargo run --example gcode -- sine          # one sine period
//! RUST_LOG=biarc_plot=debug cargo run --example gcode -- s_curve
//! ```

use biarc_plot::diagnostics::TracingDiagnostics;
use biarc_plot::geometry::{CircularArc, CubicBezier, LineSegment, Shape, SineWave};
use biarc_plot::math::Point2;
use biarc_plot::motion::{GcodeConfig, GcodeWriter};
use biarc_plot::operations::{CompileOptions, PathCompiler};

fn pattern(name: &str) -> biarc_plot::Result<Vec<Shape>> {
    let shapes = match name {
        "sine" => vec![SineWave::new(Point2::origin(), 5.0, 20.0)?.into()],
        "s_curve" => vec![CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(-20.0, 10.0),
            Point2::new(40.0, 0.0),
        )
        .into()],
        _ => vec![
            LineSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))?.into(),
            CircularArc::new(
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(10.0, 5.0),
                true,
            )?
            .into(),
            SineWave::new(Point2::new(20.0, 5.0), 3.0, 12.0)?.into(),
            CubicBezier::new(
                Point2::new(0.0, 20.0),
                Point2::new(5.0, 30.0),
                Point2::new(15.0, 30.0),
                Point2::new(20.0, 20.0),
            )
            .into(),
        ],
    };
    Ok(shapes)
}

fn main() -> biarc_plot::Result<()> {
    // Default: WARN for everything, INFO for this crate.
    // Override with RUST_LOG (e.g. RUST_LOG=biarc_plot=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("biarc_plot=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "mixed".to_owned());
    let shapes = pattern(&name)?;

    let compiler = PathCompiler::new(CompileOptions::default())?;
    let instructions = compiler.compile_with(&shapes, &mut TracingDiagnostics)?;

    let writer = GcodeWriter::new(GcodeConfig {
        feed_rate: Some(1000.0),
        ..GcodeConfig::default()
    })?;
    print!("{}", writer.program(&instructions));
    Ok(())
}
