use clap::{Parser, ValueEnum};
use golf_flight_core::core_types::{
    BallProperties, BallState, Construction, Degrees, Environment, Fahrenheit, Feet, Pressure,
    RelativeHumidity, Rpm, SpinState, Yards,
};
use golf_flight_core::flight::{create_estimator, integrate_with, EstimatorKind, ShotEstimator};
use golf_flight_core::physics::{condition_with, resolve_environment_wind};
use golf_flight_core::validation::{
    canonical_weather_cases, load_cases, scenario_cases, ValidationHarness,
};
use golf_flight_core::FlightConfig;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const METERS_PER_SECOND_PER_MPH: f64 = 0.44704;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PressureUnit {
    Hpa,
    Inhg,
    Pa,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Estimator {
    Heuristic,
    Integrated,
}

/// Golf ball flight demo with configurable conditions
#[derive(Parser, Debug)]
#[command(name = "flight-demo")]
#[command(about = "Golf ball flight under real weather", long_about = None)]
struct Args {
    /// Temperature in °F
    #[arg(short, long, default_value_t = 70.0)]
    temperature: f64,

    /// Barometric pressure (unit set by --pressure-unit)
    #[arg(short, long, default_value_t = 1013.25)]
    pressure: f64,

    /// Unit of --pressure
    #[arg(long, value_enum, default_value_t = PressureUnit::Hpa)]
    pressure_unit: PressureUnit,

    /// Course altitude in feet
    #[arg(short, long, default_value_t = 0.0)]
    altitude: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 50.0)]
    humidity: f64,

    /// Wind speed in mph
    #[arg(short, long, default_value_t = 0.0)]
    wind_speed: f64,

    /// Bearing the wind blows from, in degrees (0=North, 90=East)
    #[arg(long, default_value_t = 0.0)]
    wind_from: f64,

    /// Shot bearing in degrees
    #[arg(long, default_value_t = 0.0)]
    heading: f64,

    /// Ball speed in mph
    #[arg(short, long, default_value_t = 156.6)]
    ball_speed: f64,

    /// Launch angle in degrees
    #[arg(short, long, default_value_t = 23.0)]
    launch_angle: f64,

    /// Backspin in rpm
    #[arg(short, long, default_value_t = 2500.0)]
    spin: f64,

    /// Spin axis tilt in degrees (positive curves left)
    #[arg(long, default_value_t = 0.0)]
    spin_tilt: f64,

    /// Ball construction (two-piece, three-piece, four-piece, five-piece)
    #[arg(short, long, default_value = "three-piece")]
    construction: String,

    /// Target distance in yards for the shot adjustment
    #[arg(long, default_value_t = 150.0)]
    target: f64,

    /// Estimator used for the shot adjustment
    #[arg(short, long, value_enum, default_value_t = Estimator::Heuristic)]
    estimator: Estimator,

    /// Print every Nth trajectory point (0 = none)
    #[arg(long, default_value_t = 0)]
    trajectory_every: usize,

    /// JSON file overriding the flight model constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run the validation harness
    #[arg(short, long)]
    validate: bool,

    /// JSON file of validation cases (defaults to the built-in fixtures)
    #[arg(long)]
    cases: Option<PathBuf>,
}

fn environment(args: &Args) -> Environment {
    let pressure = match args.pressure_unit {
        PressureUnit::Hpa => Pressure::Hectopascals(args.pressure),
        PressureUnit::Inhg => Pressure::InchesOfMercury(args.pressure),
        PressureUnit::Pa => Pressure::Pascals(args.pressure),
    };
    Environment::new(
        Fahrenheit::new(args.temperature),
        pressure,
        Feet::new(args.altitude),
        RelativeHumidity::Percent(args.humidity),
    )
    .with_wind_from(args.wind_speed * METERS_PER_SECOND_PER_MPH, args.wind_from)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading flight config from {}", path.display());
            FlightConfig::load(path)?
        }
        None => FlightConfig::default(),
    };

    println!("=== Golf Flight Demo ===\n");

    let env = environment(args);
    let construction: Construction = args.construction.parse()?;
    let props = BallProperties::for_construction(construction);

    let air = condition_with(&env, &config.atmosphere)?;
    println!(
        "Conditions: {}, {}, {} altitude, {} humidity",
        env.temperature, env.pressure, env.altitude, env.humidity
    );
    println!(
        "Air density: {:.4} kg/m³ ({:.1}% of sea-level standard), moisture drag ×{:.3}",
        air.air_density,
        air.corrections.density_ratio * 100.0,
        air.corrections.moisture_drag_factor
    );

    let wind = resolve_environment_wind(&env, args.heading)?;
    println!(
        "Wind: {:.1} mph from {:.0}° → headwind {:.1} m/s, crosswind {:.1} m/s\n",
        args.wind_speed, args.wind_from, wind.headwind, wind.crosswind
    );

    let launch = BallState::launch(
        args.ball_speed * METERS_PER_SECOND_PER_MPH,
        Degrees::new(args.launch_angle),
        args.heading,
        Rpm::new(args.spin),
        props.mass,
    )
    .with_spin(SpinState::tilted(
        Rpm::new(args.spin),
        args.heading,
        Degrees::new(args.spin_tilt),
    ));

    let flight = integrate_with(launch, &env, &props, 0.01, &config)?;
    println!("Ball: {construction}");
    println!("Flight: {}", flight.metrics);
    println!(
        "Landing: {:.1}° descent, {:.0} rpm, {:+.1} yd offline, apex at {:.2} s\n",
        *flight.landing_angle,
        *flight.landing_spin,
        *flight.lateral_deviation.to_yards(),
        flight.apex_time
    );

    if args.trajectory_every > 0 {
        println!("{:>7} {:>9} {:>9} {:>9} {:>8}", "t (s)", "x (m)", "y (m)", "z (m)", "rpm");
        for point in flight.points.iter().step_by(args.trajectory_every) {
            println!(
                "{:>7.2} {:>9.2} {:>9.2} {:>9.2} {:>8.0}",
                point.time, point.position.x, point.position.y, point.position.z, *point.spin_rate
            );
        }
        println!();
    }

    let kind = match args.estimator {
        Estimator::Heuristic => EstimatorKind::Heuristic,
        Estimator::Integrated => EstimatorKind::Integrated,
    };
    let estimator: Box<dyn ShotEstimator> = create_estimator(kind, args.heading, &config);
    let estimate = estimator.estimate(Yards::new(args.target), &env, &props)?;
    let adj = estimate.adjustments;
    println!("Shot adjustment ({}):", estimator.name());
    println!(
        "  {:+.1}% distance, {:+.1} yd aim, {:+.1}% spin, {:+.1}° launch",
        adj.distance_adjustment,
        *adj.trajectory_shift,
        adj.spin_adjustment,
        *adj.launch_angle_adjustment
    );
    if let Some(breakdown) = adj.breakdown {
        println!(
            "  density {:+.1}%, temperature {:+.1}%, altitude {:+.1}%, humidity {:+.1}%, wind {:+.1}%",
            breakdown.density,
            breakdown.temperature,
            breakdown.altitude,
            breakdown.humidity,
            breakdown.wind
        );
    }
    println!(
        "  {:.0} yd plays like {} → {}\n",
        args.target, estimate.plays_like, estimate.club
    );

    if args.validate {
        let cases = match &args.cases {
            Some(path) => load_cases(path)?,
            None => canonical_weather_cases()
                .into_iter()
                .chain(scenario_cases())
                .collect(),
        };
        let harness = ValidationHarness::new(0.05, 0.01, config)?;
        println!("=== Validation ({} cases) ===", cases.len());
        print!("{}", harness.run(&cases));
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
