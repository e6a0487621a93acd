use airshed_core::{
    AttributionEngine, AttributionInput, Coordinate, EmitterCategory, EmitterSet, EngineConfig,
    FireConfidence, FireDetection, FireSet, IndustrialEmitter, Meteorology, Reading,
    StationContext, StrategyKind,
};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;

/// Source attribution demo with configurable scenario and strategy
#[derive(Parser, Debug)]
#[command(name = "airshed-demo")]
#[command(about = "Delhi airshed source attribution demo", long_about = None)]
struct Args {
    /// Attribution strategy (prior_modulation, weighted_scores)
    #[arg(short, long, default_value = "prior_modulation")]
    strategy: String,

    /// Scenario preset (smog-evening, neutral-noon, monsoon-noon, diwali-night)
    #[arg(short = 'p', long, default_value = "smog-evening")]
    scenario: String,

    /// Outfall forecast horizon in hours (1-24)
    #[arg(long, default_value_t = 3)]
    horizon: u32,

    /// Override PM2.5 in µg/m³
    #[arg(long)]
    pm25: Option<f64>,

    /// Override PM10 in µg/m³
    #[arg(long)]
    pm10: Option<f64>,

    /// Override NO2 in µg/m³
    #[arg(long)]
    no2: Option<f64>,

    /// Override SO2 in µg/m³
    #[arg(long)]
    so2: Option<f64>,

    /// Override CO in mg/m³
    #[arg(long)]
    co: Option<f64>,

    /// Override 10 m wind direction in degrees (0=North, 90=East)
    #[arg(short = 'w', long)]
    wind_direction: Option<f64>,

    /// Override 10 m wind speed in m/s
    #[arg(long)]
    wind_speed: Option<f64>,

    /// Override boundary-layer height in m
    #[arg(long)]
    mixing_height: Option<f64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Airshed Source Attribution Demo ===\n");

    let strategy = match args.strategy.parse::<StrategyKind>() {
        Ok(kind) => kind,
        Err(err) => {
            println!("{err}, using prior modulation");
            StrategyKind::PriorModulation
        }
    };

    let engine = match AttributionEngine::new(EngineConfig {
        strategy,
        outfall_horizon_h: args.horizon,
    }) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let scenario = match args.scenario.to_lowercase().as_str() {
        "smog-evening" | "smog" => "smog-evening",
        "neutral-noon" | "neutral" => "neutral-noon",
        "monsoon-noon" | "monsoon" => "monsoon-noon",
        "diwali-night" | "diwali" => "diwali-night",
        other => {
            println!("Unknown scenario '{other}', using smog-evening");
            "smog-evening"
        }
    };
    let (timestamp, mut reading, mut meteorology, fires) = scenario_inputs(scenario);

    // CLI overrides on top of the scenario
    if let Some(v) = args.pm25 {
        reading.pm25 = Some(v);
    }
    if let Some(v) = args.pm10 {
        reading.pm10 = Some(v);
    }
    if let Some(v) = args.no2 {
        reading.no2 = Some(v);
    }
    if let Some(v) = args.so2 {
        reading.so2 = Some(v);
    }
    if let Some(v) = args.co {
        reading.co_mg_m3 = Some(v);
    }
    if let Some(v) = args.wind_direction {
        meteorology.wind_dir_10m_deg = Some(v);
    }
    if let Some(v) = args.wind_speed {
        meteorology.wind_speed_10m_ms = Some(v);
    }
    if let Some(v) = args.mixing_height {
        meteorology.blh_m = Some(v);
    }

    let station = StationContext::new("235", "Anand Vihar", Coordinate::new(28.6469, 77.3164), 1.0);
    let emitters = ncr_emitters();

    println!("Scenario: {scenario}");
    println!(
        "Station: {} ({:.4}°N, {:.4}°E)",
        station.name, station.coordinate.lat_deg, station.coordinate.lon_deg
    );
    println!("Hour: {timestamp}");
    println!(
        "Readings: PM2.5 {}, PM10 {}, NO2 {}, SO2 {} µg/m³, CO {} mg/m³",
        fmt_opt(reading.pm25),
        fmt_opt(reading.pm10),
        fmt_opt(reading.no2),
        fmt_opt(reading.so2),
        fmt_opt(reading.co_mg_m3)
    );
    println!(
        "Wind: {}° at {} m/s, mixing height {} m",
        fmt_opt(meteorology.wind_dir_10m_deg),
        fmt_opt(meteorology.wind_speed_10m_ms),
        fmt_opt(meteorology.blh_m)
    );
    println!("Fire detections in window: {}", fires.len());
    println!("Industrial facilities tracked:");
    for facility in emitters.facilities() {
        println!(
            "  {:<28} weight {:>3.0}  {}",
            facility.name, facility.emission_weight, facility.category
        );
    }

    let input = AttributionInput {
        station: &station,
        timestamp,
        reading,
        meteorology,
        fires: &fires,
        emitters: &emitters,
    };

    let result = engine.attribute(&input);

    println!("\n=== Attribution ({}) ===\n", result.method);
    println!("{}", result.summary);
    println!("Confidence: {} | {}", result.confidence, result.meteorology.mixing_note);
    println!();
    println!("Source             | Share  | Level   | Explanation");
    println!("-------------------|--------|---------|------------");
    for contribution in &result.contributions {
        println!(
            "{:<19}| {:>5.1}% | {:<8}| {}",
            contribution.source,
            contribution.percentage,
            contribution.level.as_str(),
            contribution.explanation
        );
    }

    if !result.top_fire_locations.is_empty() {
        println!("\nTop fire regions upwind:");
        for region in &result.top_fire_locations {
            println!(
                "  {:<12} {:>3} detections, {:>4.0} km",
                region.region, region.fires, region.distance_km
            );
        }
    }

    if !result.top_industries.is_empty() {
        println!("\nNearby industrial areas:");
        for industry in &result.top_industries {
            println!("  {:<28} {:>5.1} km", industry.name, industry.distance_km);
        }
    }

    let track = engine.forecast_outfall(&input);
    if track.is_empty() {
        println!("\nNo outfall forecast: wind unresolved for this hour.");
    } else {
        println!("\n=== Outfall Forecast ({} h) ===\n", track.len());
        println!("Hour | Latitude | Longitude | Distance(km) | Intensity | PM2.5(µg/m³)");
        println!("-----|----------|-----------|--------------|-----------|-------------");
        for point in &track {
            println!(
                "{:>4} | {:>8.4} | {:>9.4} | {:>12.1} | {:>9.3} | {}",
                point.hour,
                point.coordinate.lat_deg,
                point.coordinate.lon_deg,
                point.distance_km,
                point.intensity_factor,
                fmt_opt(point.predicted_pm25)
            );
        }
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |v| format!("{v:.1}"))
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .unwrap()
}

/// Canned station-hours for the demo. Each returns the observation
/// timestamp, the tracer readings, the meteorology, and the fire
/// detections already filtered to the lookback window.
fn scenario_inputs(name: &str) -> (NaiveDateTime, Reading, Meteorology, FireSet) {
    match name {
        // Baseline November noon with every tracer near its long-run mean
        "neutral-noon" => (
            at(2023, 11, 8, 12),
            Reading::new(Some(228.0), None, Some(71.0), Some(15.0), Some(1.5)),
            Meteorology::new(Some(290.0), Some(3.0), None, None, Some(381.0)),
            belt_fires(193, at(2023, 11, 8, 7)),
        ),
        // Clean monsoon afternoon with an easterly and a deep layer
        "monsoon-noon" => (
            at(2023, 7, 17, 14),
            Reading::new(Some(60.0), Some(110.0), Some(45.0), Some(9.0), Some(0.8)),
            Meteorology::new(Some(120.0), Some(4.0), None, None, Some(900.0)),
            FireSet::new(Vec::new()),
        ),
        // Stagnant firework night: extreme fine PM, combustion CO, near-calm air
        "diwali-night" => (
            at(2023, 11, 12, 21),
            Reading::new(Some(2500.0), Some(3000.0), Some(90.0), Some(25.0), Some(3.0)),
            Meteorology::new(Some(120.0), Some(0.5), None, None, Some(150.0)),
            FireSet::new(Vec::new()),
        ),
        // Early-November evening under a shallow layer with the belt alight
        _ => (
            at(2023, 11, 8, 18),
            Reading::new(Some(400.0), Some(550.0), Some(80.0), Some(20.0), Some(2.5)),
            Meteorology::new(Some(290.0), Some(5.0), None, None, Some(200.0)),
            belt_fires(500, at(2023, 11, 8, 13)),
        ),
    }
}

/// Detections clustered on the districts that dominate early-November
/// counts, with a small jitter so the evidence is not degenerate.
fn belt_fires(total: usize, timestamp: NaiveDateTime) -> FireSet {
    let centers = [
        Coordinate::new(30.2458, 75.8421), // Sangrur
        Coordinate::new(30.2110, 74.9455), // Bathinda
        Coordinate::new(29.1492, 75.7217), // Hisar
        Coordinate::new(29.5152, 75.4556), // Fatehabad
    ];
    let fires = (0..total)
        .map(|i| {
            let center = &centers[i % centers.len()];
            let jitter = (i / centers.len()) as f64 * 0.002;
            FireDetection {
                coordinate: Coordinate::new(center.lat_deg + jitter, center.lon_deg - jitter),
                frp_mw: 35.0 + (i % 7) as f64 * 12.0,
                timestamp,
                confidence: FireConfidence::Nominal,
            }
        })
        .collect();
    FireSet::new(fires)
}

/// A small slice of the NCR facility inventory around the station.
fn ncr_emitters() -> EmitterSet {
    EmitterSet::new(vec![
        IndustrialEmitter::new(
            "Sahibabad Industrial Area",
            Coordinate::new(28.6832, 77.4333),
            60.0,
            EmitterCategory::HeavyIndustry,
        ),
        IndustrialEmitter::new(
            "Patparganj Industrial Area",
            Coordinate::new(28.6337, 77.3079),
            40.0,
            EmitterCategory::LightIndustry,
        ),
        IndustrialEmitter::new(
            "Okhla Phase II",
            Coordinate::new(28.5310, 77.2680),
            45.0,
            EmitterCategory::WasteProcessing,
        ),
        IndustrialEmitter::new(
            "Wazirpur Industrial Area",
            Coordinate::new(28.7010, 77.1660),
            50.0,
            EmitterCategory::HeavyIndustry,
        ),
        IndustrialEmitter::new(
            "Badarpur Thermal Station",
            Coordinate::new(28.5021, 77.3035),
            70.0,
            EmitterCategory::Power,
        ),
    ])
}
