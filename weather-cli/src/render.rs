use weather_core::{SearchPhase, SearchView, WeatherReading};

const ABSOLUTE_ZERO_C: f64 = -273.15;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin + ABSOLUTE_ZERO_C
}

/// Nearest of the 16 compass points for a bearing in degrees.
pub fn compass_point(degrees: f64) -> &'static str {
    let sector = (degrees.rem_euclid(360.0) / 22.5 + 0.5).floor() as usize;
    COMPASS_POINTS[sector % COMPASS_POINTS.len()]
}

fn whole(value: f64) -> i64 {
    value.round() as i64
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_reading(reading: &WeatherReading) -> String {
    let condition = reading.primary_condition();
    let wind = reading.wind();

    let description = capitalize_words(condition.description());
    let temperature = whole(kelvin_to_celsius(reading.temperature_kelvin()));
    let feels_like = whole(kelvin_to_celsius(reading.feels_like_kelvin()));

    let lines = [
        reading.location().to_string(),
        format!("{} ({description})", condition.summary()),
        format!("Temperature  {temperature}°C"),
        format!("Feels like   {feels_like}°C"),
        format!("Humidity     {}%", whole(reading.humidity_percent())),
        format!(
            "Wind         {} m/s {} ({}°)",
            whole(wind.speed_meters_per_second()),
            compass_point(wind.direction_degrees()),
            whole(wind.direction_degrees()),
        ),
        format!("Icon         {}", condition.icon_url()),
    ];

    lines.join("\n")
}

pub fn render_view(view: &SearchView) -> String {
    match (view.phase(), view.result(), view.error()) {
        (SearchPhase::Loading, _, _) => "Searching...".to_string(),
        (SearchPhase::Success, Some(reading), _) => render_reading(reading),
        (SearchPhase::Failure, _, Some(message)) => format!("Error: {message}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use weather_core::{
        FetchError, SearchSession, TransportError, WeatherProvider,
        provider::openweather::parse_current,
    };

    const LONDON: &str = r#"{"name":"London","main":{"temp":283.0,"humidity":70,"feels_like":281.5},"weather":[{"main":"Clouds","description":"overcast clouds","icon":"04d"}],"wind":{"speed":3.6,"deg":200}}"#;

    #[derive(Debug)]
    struct FixedProvider(Option<&'static str>);

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        async fn request(&self, _city: &str) -> Result<WeatherReading, FetchError> {
            match self.0 {
                Some(body) => parse_current(body),
                None => Err(TransportError::Status(404).into()),
            }
        }
    }

    #[test]
    fn converts_kelvin_to_celsius() {
        assert!((kelvin_to_celsius(273.15)).abs() < 1e-9);
        assert_eq!(whole(kelvin_to_celsius(283.0)), 10);
        assert_eq!(whole(kelvin_to_celsius(273.0)), 0);
        assert_eq!(whole(kelvin_to_celsius(263.15)), -10);
    }

    #[test]
    fn compass_points() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(359.0), "N");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(200.0), "SSW");
        assert_eq!(compass_point(-90.0), "W");
    }

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("overcast clouds"), "Overcast Clouds");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn renders_reading_in_celsius() {
        let reading = parse_current(LONDON).expect("valid body");
        let out = render_reading(&reading);

        assert!(out.starts_with("London\n"));
        assert!(out.contains("Clouds (Overcast Clouds)"));
        assert!(out.contains("Temperature  10°C"));
        assert!(out.contains("Feels like   8°C"));
        assert!(out.contains("Humidity     70%"));
        assert!(out.contains("Wind         4 m/s SSW (200°)"));
        assert!(out.contains("https://openweathermap.org/img/wn/04d@2x.png"));
    }

    #[test]
    fn idle_view_renders_nothing() {
        assert_eq!(render_view(&SearchView::default()), "");
    }

    #[tokio::test]
    async fn renders_session_outcomes() {
        let session = SearchSession::new(FixedProvider(Some(LONDON)));
        session.search("London").await.expect("not in flight");
        assert!(render_view(&session.view()).starts_with("London"));

        let session = SearchSession::new(FixedProvider(None));
        session.search("Atlantis").await.expect("not in flight");
        assert_eq!(render_view(&session.view()), "Error: City not found");

        session.search(" ").await.expect("not in flight");
        assert_eq!(render_view(&session.view()), "Error: City is required");
    }
}
