//! Basic example demonstrating correlated anomaly detection
//!
//! Run with: RUST_LOG=anomaly_core=debug cargo run --example basic -p anomaly

use anomaly::{
    alerts_for, AnomalyPipeline, CorrelationAnalyzer, MetricHierarchy, PipelineConfig,
    ThresholdContext, Tier,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anomaly_core=info".into()),
        )
        .init();

    println!("=== anomaly Basic Examples ===\n");

    // Periodic CPU load with two incidents
    let mut cpu: Vec<f64> = (0..120)
        .map(|i| 50.0 + 8.0 * (i as f64 / 10.0).sin() + ((i * 37) % 11) as f64 * 0.3)
        .collect();
    cpu[45] += 35.0;
    cpu[100] += 42.0;

    // Latency follows CPU three samples later
    let latency: Vec<f64> = (0..cpu.len())
        .map(|t| if t >= 3 { 2.0 * cpu[t - 3] + 5.0 } else { 105.0 })
        .collect();
    let disk: Vec<f64> = (0..cpu.len()).map(|i| ((i * 53) % 17) as f64).collect();

    // 1. Metric hierarchy
    let mut hierarchy = MetricHierarchy::new();
    hierarchy.add("cpu_usage", Tier::Critical, cpu.clone());
    hierarchy.add("request_latency", Tier::Warning, latency.clone());
    hierarchy.add("disk_io", Tier::Info, disk);
    hierarchy.reclassify("disk_io", Tier::Warning);
    for tier in Tier::ALL {
        println!("{:>8}: {:?}", tier.as_str(), hierarchy.names(tier));
    }

    // 2. Lagged correlation
    println!("\n1. Lag profile (latency trailing cpu)");
    let analyzer = CorrelationAnalyzer::new(&latency, &cpu);
    for (lag, coefficient) in analyzer.lagged_profile(5)? {
        println!("   lag {}: {:.3}", lag, coefficient);
    }

    // 3. Pipeline
    println!("\n2. Pipeline (normal context)");
    let result = AnomalyPipeline::new(&cpu, &hierarchy).process()?;
    println!("   Prediction: {:?}", result.prediction);
    for pair in &result.correlation_analysis {
        println!("   {} ~ {}: {:.3}", pair.critical, pair.warning, pair.coefficient);
    }
    println!("   Threshold: {:.2}", result.threshold);
    println!("   Anomalies: {:?}", result.anomalies);
    println!("   Redundant: {:?}", result.filtered_anomalies);

    for alert in alerts_for(&cpu, &result) {
        println!("   [{:?}] {}", alert.severity, alert.message);
    }

    // 4. Heightened context with a longer horizon
    println!("\n3. Pipeline (heightened context, 5-step forecast)");
    let config = PipelineConfig::builder()
        .context(ThresholdContext::Heightened)
        .forecast_steps(5)
        .build()?;
    println!("{}", config.to_json()?);
    let result = AnomalyPipeline::with_config(&cpu, &hierarchy, config)?.process()?;
    println!("   Prediction: {:?}", result.prediction);
    println!("   Anomalies: {:?}", result.anomalies);

    println!("\n=== Examples Complete ===");
    Ok(())
}
