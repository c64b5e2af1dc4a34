use arcdial::config::DEFAULT_TOLERANCE;
use arcdial::{DialConfig, DialState, Point, Sweep};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "arcdial", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Value at the start of the sweep
    #[arg(long, allow_negative_numbers = true, default_value_t = 16.0)]
    min: f64,

    /// Value at the end of the sweep
    #[arg(long, allow_negative_numbers = true, default_value_t = 30.0)]
    max: f64,

    /// Rounding granularity of the value
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Dial shape: semicircle (half, 180) or fullcircle (full, ring, 360)
    #[arg(long, default_value_t = Sweep::Semicircle)]
    sweep: Sweep,

    /// Screen angle of the sweep start in degrees, y pointing down (defaults to the sweep's own)
    #[arg(long, allow_negative_numbers = true)]
    start_angle: Option<f64>,

    #[arg(long, allow_negative_numbers = true, default_value_t = 110.0)]
    cx: f64,

    #[arg(long, allow_negative_numbers = true, default_value_t = 110.0)]
    cy: f64,

    #[arg(long, default_value_t = 85.0)]
    radius: f64,

    /// Accepted distance from the ring in pixels
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Value the dial holds before the pointer lands (defaults to min)
    #[arg(long, allow_negative_numbers = true)]
    initial: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Map a pointer position to a dial value
    Value {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Show where the handle sits for a value
    Position {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// List every value on the step grid with its handle position
    Table,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut state = build_state(&cli)?;

    match cli.command {
        Commands::Value { x, y } => {
            let point = Point::new(x, y);
            match state.resolve(point) {
                Some(_) => {
                    // a tap: start and release in place
                    state.drag_start(point);
                    state.drag_end();
                    println!(
                        "{} (angle {:.2}°)",
                        state.value(),
                        state.handle().angle.to_degrees()
                    );
                }
                None => println!(
                    "rejected: ({}, {}) is off the ring, value stays {}",
                    x,
                    y,
                    state.value()
                ),
            }
        }
        Commands::Position { value } => {
            state.set_value(value);
            print_handle(&state, state.value());
        }
        Commands::Table => {
            for value in state.grid_values() {
                print_handle(&state, value);
            }
        }
    }
    Ok(())
}

fn build_state(cli: &Cli) -> anyhow::Result<DialState> {
    let mut config = DialConfig::new(cli.min, cli.max)
        .with_step(cli.step)
        .with_sweep(cli.sweep)
        .with_ring(Point::new(cli.cx, cli.cy), cli.radius)
        .with_tolerance(cli.tolerance);
    if let Some(degrees) = cli.start_angle {
        config = config.with_start_angle(degrees.to_radians());
    }

    let state = DialState::new(config, cli.initial.unwrap_or(cli.min))?;
    log::debug!("Dial ready: {:?}", state.config());
    Ok(state)
}

fn print_handle(state: &DialState, value: f64) {
    let handle = state.value_to_position(value);
    println!(
        "{:>8} -> ({:.2}, {:.2}) at {:.2}°",
        value,
        handle.point.x,
        handle.point.y,
        handle.angle.to_degrees()
    );
}
