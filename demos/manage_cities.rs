use weatherscope::{Segment, WeatherScope, WeatherScopeError};

#[tokio::main]
async fn main() -> Result<(), WeatherScopeError> {
    // Start empty and build the registry by searching.
    let mut engine = WeatherScope::builder().cities(vec![]).build()?;

    for query in ["pune", "hyderabad", "ahmedabad"] {
        let added = engine.add_city_by_search(query).await?;
        println!("Added {} at ({:.4}, {:.4})", added.name, added.lat, added.lon);
    }

    let removed = engine.remove_cities(["Ahmedabad", "Surat"]);
    println!("Removed {} city/cities", removed);

    // Force a fetch even if a cached entry would still be live.
    let feed = engine.refresh().force(true).call().await;

    for city in &feed {
        let historical = city
            .series
            .iter()
            .filter(|r| r.segment == Segment::Historical)
            .count();
        println!(
            "{}: {} historical / {} forecast days, current {:.1} °C",
            city.name,
            historical,
            city.series.len() - historical,
            city.current
        );
    }

    Ok(())
}
