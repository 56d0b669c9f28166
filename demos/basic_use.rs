use weatherscope::{Metric, WeatherScope, WeatherScopeError};

#[tokio::main]
async fn main() -> Result<(), WeatherScopeError> {
    // Default seed cities, 10 historical + 7 forecast days, 10 minute TTL.
    let engine = WeatherScope::builder().build()?;

    let feed = engine.refresh().call().await;

    let mut ranked: Vec<_> = feed.iter().collect();
    ranked.sort_by(|a, b| {
        b.metric(Metric::AvgMax)
            .total_cmp(&a.metric(Metric::AvgMax))
    });

    println!("Cities ranked by mean daily maximum over the window:");
    for city in ranked {
        println!(
            "  {:<12} now {:>5.1} °C, avg max {:>5.1} °C, avg min {:>5.1} °C ({} days)",
            city.name,
            city.current,
            city.avg_max,
            city.avg_min,
            city.series.len()
        );
    }

    Ok(())
}
