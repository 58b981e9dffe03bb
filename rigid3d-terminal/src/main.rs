/// Rigid3D Terminal - interactive rotation converter
///
/// Reads Euler angles in degrees and prints the rotation matrix, quaternion,
/// angle-axis and recovered angles.
///   rigid3d --order zyx --precision 3
///   rigid3d --eval "30 45 60 yxz"
/// Log verbosity follows RUST_LOG (default: warn).
use clap::Parser;
use rigid3d_core::{Order, GIMBAL_EPSILON};
use rigid3d_terminal::{AppConfig, TerminalApp};
use std::io::{self, stdout};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rigid3d", version, about = "Convert Euler angles between rotation representations")]
struct Args {
    /// Digits after the decimal point
    #[arg(short, long, default_value_t = 6)]
    precision: usize,

    /// Rotation order used when an input line does not name one
    #[arg(short, long, default_value = "XYZ")]
    order: Order,

    /// Gimbal-lock threshold for angle extraction
    #[arg(long, default_value_t = GIMBAL_EPSILON)]
    epsilon: f32,

    /// Evaluate a single line and exit
    #[arg(short, long)]
    eval: Option<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut app = TerminalApp::new(AppConfig {
        precision: args.precision,
        default_order: args.order,
        epsilon: args.epsilon,
    });

    match args.eval {
        Some(line) => {
            if !app.evaluate(&line, &mut stdout())? {
                std::process::exit(2);
            }
            Ok(())
        }
        None => app.run(),
    }
}
