pub mod temperature {
    /// Wind chill applies at or below this temperature (°F).
    pub const WIND_CHILL_MAX_TEMP: f64 = 50.0;
    /// ...and at or above this wind speed (mph).
    pub const WIND_CHILL_MIN_WIND: f64 = 3.0;
    /// Heat index applies at or above this temperature (°F).
    pub const HEAT_INDEX_MIN_TEMP: f64 = 80.0;
    /// ...and at or above this relative humidity (%).
    pub const HEAT_INDEX_MIN_HUMIDITY: f64 = 40.0;

    /// NWS wind chill, °F and mph.
    pub fn wind_chill(temp_f: f64, wind_mph: f64) -> f64 {
        let w = wind_mph.powf(0.16);
        35.74 + 0.6215 * temp_f - 35.75 * w + 0.4275 * temp_f * w
    }

    /// Rothfusz regression for the heat index, °F and percent humidity.
    pub fn heat_index(temp_f: f64, humidity: f64) -> f64 {
        let t = temp_f;
        let h = humidity;
        -42.379 + 2.04901523 * t + 10.14333127 * h
            - 0.22475541 * t * h
            - 0.00683783 * t * t
            - 0.05481717 * h * h
            + 0.00122874 * t * t * h
            + 0.00085282 * t * h * h
            - 0.00000199 * t * t * h * h
    }

    /// Apparent temperature, rounded to a tenth of a degree.
    ///
    /// `None` when any input is missing or neither wind chill nor heat index
    /// applies.
    pub fn feels_like(temp_f: Option<f64>, wind_mph: Option<f64>, humidity: Option<f64>) -> Option<f64> {
        let (t, w, h) = (temp_f?, wind_mph?, humidity?);
        let value = if t <= WIND_CHILL_MAX_TEMP && w >= WIND_CHILL_MIN_WIND {
            wind_chill(t, w)
        } else if t >= HEAT_INDEX_MIN_TEMP && h >= HEAT_INDEX_MIN_HUMIDITY {
            heat_index(t, h)
        } else {
            return None;
        };
        Some(round_tenths(value))
    }

    /// Round on the decimal value, so `0.35` (stored just below) gives `0.3`.
    fn round_tenths(value: f64) -> f64 {
        format!("{value:.1}").parse().unwrap_or(value)
    }

    #[test]
    fn test_feels_like() {
        assert_eq!(feels_like(Some(40.0), Some(10.0), Some(50.0)), Some(33.6));
        assert_eq!(feels_like(Some(90.0), Some(5.0), Some(60.0)), Some(99.7));
        assert_eq!(feels_like(Some(65.0), Some(5.0), Some(50.0)), None);
        assert_eq!(feels_like(None, Some(5.0), Some(50.0)), None);
    }

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(33.6425), 33.6);
        assert_eq!(round_tenths(99.6777), 99.7);
        assert_eq!(round_tenths(0.35), 0.3);
        assert_eq!(round_tenths(-1.26), -1.3);
    }

    #[test]
    fn test_feels_like_boundaries() {
        assert_eq!(feels_like(Some(50.0), Some(3.0), Some(90.0)), Some(round_tenths(wind_chill(50.0, 3.0))));
        assert_eq!(feels_like(Some(50.0), Some(2.9), Some(90.0)), None);
        assert_eq!(feels_like(Some(80.0), Some(0.0), Some(40.0)), Some(round_tenths(heat_index(80.0, 40.0))));
        assert_eq!(feels_like(Some(80.0), Some(0.0), Some(39.0)), None);
    }
}

pub mod direction {
    const COMPASS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];

    /// 16-point compass label for a bearing, `None` for a non-finite bearing.
    pub fn degrees_to_compass(deg: f64) -> Option<&'static str> {
        if !deg.is_finite() {
            return None;
        }
        let deg = (deg % 360.0) + 360.0;
        let val = (deg / 22.5 + 0.5) as usize;
        let idx = val % 16;
        Some(COMPASS[idx])
    }

    #[test]
    fn test_degrees_to_compass() {
        assert_eq!(degrees_to_compass(0.0), Some("N"));
        assert_eq!(degrees_to_compass(359.0), Some("N"));
        assert_eq!(degrees_to_compass(45.0), Some("NE"));
        assert_eq!(degrees_to_compass(90.0), Some("E"));
        assert_eq!(degrees_to_compass(180.0), Some("S"));
        assert_eq!(degrees_to_compass(270.0), Some("W"));
        assert_eq!(degrees_to_compass(360.0), Some("N"));
        assert_eq!(degrees_to_compass(11.25), Some("NNE"));
        assert_eq!(degrees_to_compass(-90.0), Some("W"));
        assert_eq!(degrees_to_compass(f64::NAN), None);
    }
}
