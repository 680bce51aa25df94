use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use wground::config::Config;
use wground::report::print_current;
use wground::{pws, Error};

/// Serve one canned HTTP response on a local port and return its base URL.
fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header == "\r\n" || header.is_empty() {
                break;
            }
        }
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        request_line
    });
    (format!("http://{addr}"), handle)
}

fn config(base_url: String) -> Config {
    Config {
        station_id: "KMAHANOV10".to_string(),
        api_key: "secret".to_string(),
        base_url,
        color: false,
        ..Config::default()
    }
}

const BODY: &str = r#"{
  "observations": [
    {
      "stationID": "KMAHANOV10",
      "obsTimeUtc": "2019-02-19T15:06:41Z",
      "obsTimeLocal": "2019-02-19 10:06:41",
      "neighborhood": "1505Broadway",
      "softwareType": "Rainwise IP-100",
      "country": "US",
      "humidity": 71,
      "winddir": 45,
      "imperial": {
        "temp": 90,
        "dewpt": 79,
        "windSpeed": 5,
        "windGust": 8,
        "pressure": 30.09,
        "precipRate": 0.0,
        "precipTotal": 0.0
      }
    }
  ]
}"#;

#[test]
fn fetches_and_prints_report() {
    let (base_url, server) = serve_once("200 OK", BODY);
    let mut out = Vec::new();
    let obs = print_current(&config(base_url), &mut out).unwrap();
    assert!(obs.is_some());

    let request = server.join().unwrap();
    assert!(request.starts_with(
        "GET /v2/pws/observations/current?stationId=KMAHANOV10&format=json&units=e&apiKey=secret "
    ));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Location:          1505Broadway, US (KMAHANOV10)\n"));
    assert!(text.contains("Temperature:       90.0°\n"));
    assert!(text.contains("Humidity:          71%\n"));
    assert!(text.contains("Wind:              NE @ 5.0 mph (Gusts @ 8.0 mph)\n"));
    // no daily max in the body, so the current gust stands in
    assert!(text.contains("Max Gust:          8.0 mph\n"));
    assert!(text.contains("Precip Total:      0.0 in\n"));
    assert!(!text.contains("Feels like:        N/A"));
}

#[test]
fn http_error_is_reported_not_raised() {
    let (base_url, server) = serve_once("401 Unauthorized", r#"{"errors":[]}"#);
    let mut out = Vec::new();
    let obs = print_current(&config(base_url), &mut out).unwrap();
    server.join().unwrap();

    assert!(obs.is_none());
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Error fetching weather data: "));
    assert!(text.contains("401"));
}

#[test]
fn missing_imperial_block_is_a_parse_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"observations":[{"stationID":"KMAHANOV10"}]}"#);
    let err = pws::current_observation(&config(base_url)).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, Error::MissingKey("imperial")));
    assert_eq!(err.to_string(), "Error parsing weather data: Missing key 'imperial'");
}

#[test]
fn connection_failure_is_a_fetch_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = pws::current_observation(&config(format!("http://{addr}"))).unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
    assert!(err.to_string().starts_with("Error fetching weather data: "));
}
