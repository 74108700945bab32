//! Upload payload assembly.
//!
//! Serializes a state snapshot into the collector's JSON body and frames it
//! as a complete HTTP/1.1 request. Everything is built into fixed-capacity
//! strings; capacities are sized for the worst-case field widths, and an
//! overflow is reported as an error rather than truncated.

use core::fmt::Write;

use heapless::String;

use crate::error::Error;
use crate::state::Snapshot;

/// Capacity of the serialized JSON body.
pub const BODY_CAPACITY: usize = 128;

/// Capacity of the framed request, headers included.
pub const REQUEST_CAPACITY: usize = 256;

/// Serializes a snapshot into the collector's JSON body.
///
/// Floats are rendered with two decimals, the flame state as `0`/`1`.
pub fn json_body(snapshot: &Snapshot, device_id: &str) -> Result<String<BODY_CAPACITY>, Error> {
    let mut body = String::new();
    write!(
        body,
        "{{\"temperature\": {:.2}, \"humidity\": {:.2}, \"flame\": {}, \"device_id\": \"{}\"}}",
        snapshot.temperature,
        snapshot.humidity,
        u8::from(snapshot.flame_detected),
        device_id,
    )
    .map_err(|_| Error::BodyOverflow)?;
    Ok(body)
}

/// Frames the snapshot as a complete `POST /predict` request.
///
/// Headers are CRLF-terminated and `Content-Length` is the exact byte length
/// of the body. The request is written onto the connection in a single call,
/// so the whole frame is assembled up front.
pub fn http_request(
    host: &str,
    snapshot: &Snapshot,
    device_id: &str,
) -> Result<String<REQUEST_CAPACITY>, Error> {
    let body = json_body(snapshot, device_id)?;
    let mut request = String::new();
    write!(
        request,
        "POST /predict HTTP/1.1\r\n\
         Host: {}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        host,
        body.len(),
        body,
    )
    .map_err(|_| Error::RequestOverflow)?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temperature: f32, humidity: f32, flame_detected: bool) -> Snapshot {
        Snapshot {
            temperature,
            humidity,
            flame_detected,
            alarm_active: flame_detected,
        }
    }

    #[test]
    fn body_matches_collector_format_exactly() {
        let body = json_body(&snapshot(23.45, 60.12, true), "pico_01").unwrap();
        assert_eq!(
            body.as_str(),
            "{\"temperature\": 23.45, \"humidity\": 60.12, \"flame\": 1, \"device_id\": \"pico_01\"}"
        );
    }

    #[test]
    fn flame_clear_serializes_as_zero() {
        let body = json_body(&snapshot(19.0, 40.5, false), "pico_01").unwrap();
        assert!(body.as_str().contains("\"flame\": 0"));
    }

    #[test]
    fn request_frames_headers_and_body() {
        let request = http_request("192.168.1.50", &snapshot(23.45, 60.12, true), "pico_01")
            .unwrap();

        let (head, body) = request.as_str().split_once("\r\n\r\n").unwrap();
        let mut lines = head.split("\r\n");
        assert_eq!(lines.next(), Some("POST /predict HTTP/1.1"));
        assert_eq!(lines.next(), Some("Host: 192.168.1.50"));
        assert_eq!(lines.next(), Some("Content-Type: application/json"));

        let content_length = lines
            .next()
            .and_then(|line| line.strip_prefix("Content-Length: "))
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap();
        assert_eq!(content_length, body.len());

        assert_eq!(lines.next(), Some("Connection: close"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn content_length_tracks_body_width() {
        // Negative temperature widens the body; the header must follow.
        let request = http_request("10.0.0.2", &snapshot(-12.5, 100.0, false), "pico_01").unwrap();
        let (head, body) = request.as_str().split_once("\r\n\r\n").unwrap();
        let content_length: usize = head
            .split("\r\n")
            .find_map(|line| line.strip_prefix("Content-Length: "))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(content_length, body.len());
    }

    #[test]
    fn oversized_device_id_is_rejected() {
        let long_id = [b'x'; BODY_CAPACITY];
        let device_id = core::str::from_utf8(&long_id).unwrap();
        let result = json_body(&snapshot(20.0, 50.0, false), device_id);
        assert_eq!(result.unwrap_err(), Error::BodyOverflow);
    }
}
