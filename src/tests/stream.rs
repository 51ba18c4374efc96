use std::sync::{Arc, Mutex};

use super::fixtures::*;
use crate::{
    ChecksumMode, Error, NmeaParser, ParserConfig,
    nmea_content::{FixQuality, PositionFix, SentenceKind, Status, Talker},
};

fn collect_errors(parser: &NmeaParser) -> Arc<Mutex<Vec<(Error, String)>>> {
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);
    parser.on_error(move |error, tag| sink.lock().unwrap().push((*error, tag.to_string())));
    errors
}

#[test]
fn test_gga_sentence() {
    let parser = NmeaParser::new();
    parser.process_buffer(GPGGA.as_bytes()).unwrap();

    let fix = parser.gga(Talker::Gps).unwrap();
    assert_eq!((fix.hour, fix.minute, fix.second), (14, 54, 16));
    assert!((fix.latitude - (33.0 + 50.10959 / 60.0)).abs() < 1e-9);
    assert!((fix.longitude + 117.853_811_7).abs() < 1e-7);
    assert_eq!(fix.fix_quality, FixQuality::GpsSps);
    assert_eq!(fix.satellites_in_use, 9);
    assert_eq!(fix.hdop, 0.85);
    assert_eq!(fix.altitude_msl, 70.3);
    assert_eq!(fix.geoidal_separation, -32.7);
    assert_eq!(parser.rx_count(Talker::Gps, SentenceKind::Gga), Some(1));
}

#[test]
fn test_bad_checksum_leaves_record_untouched() {
    let parser = NmeaParser::new();
    let errors = collect_errors(&parser);

    parser.process_buffer(GPGGA_BAD_CHECKSUM.as_bytes()).unwrap();

    assert_eq!(
        *errors.lock().unwrap(),
        [(
            Error::ChecksumMismatch {
                expected: 0x5B,
                found: 0x5C
            },
            "GPGGA".to_string()
        )]
    );
    assert_eq!(parser.gga(Talker::Gps), Some(PositionFix::default()));
    assert_eq!(parser.rx_count(Talker::Gps, SentenceKind::Gga), Some(0));
}

#[test]
fn test_missing_checksum_is_accepted() {
    let with_checksum = NmeaParser::new();
    with_checksum.process_buffer(GPGGA.as_bytes()).unwrap();

    let without_checksum = NmeaParser::new();
    without_checksum
        .process_buffer(GPGGA_NO_CHECKSUM.as_bytes())
        .unwrap();

    assert_eq!(
        with_checksum.gga(Talker::Gps),
        without_checksum.gga(Talker::Gps)
    );
}

#[test]
fn test_required_checksum_rejects_missing_checksum() {
    let parser = NmeaParser::with_config(ParserConfig {
        checksum: ChecksumMode::Required,
    });
    let errors = collect_errors(&parser);

    parser
        .process_buffer(GPGGA_NO_CHECKSUM.as_bytes())
        .unwrap();
    parser.process_buffer(GPRMC.as_bytes()).unwrap();

    assert_eq!(
        *errors.lock().unwrap(),
        [(Error::ChecksumMissing, "GPGGA".to_string())]
    );
    assert_eq!(parser.rx_count(Talker::Gps, SentenceKind::Gga), Some(0));
    assert_eq!(parser.rmc(Talker::Gps).unwrap().status, Status::Active);
}

#[test]
fn test_split_sentence() {
    let parser = NmeaParser::new();
    let (head, tail) = GPGGA.as_bytes().split_at(31);

    parser.process_buffer(head).unwrap();
    assert_eq!(parser.rx_count(Talker::Gps, SentenceKind::Gga), Some(0));

    parser.process_buffer(tail).unwrap();
    assert_eq!(parser.gga(Talker::Gps).unwrap().satellites_in_use, 9);
}

#[test]
fn test_byte_by_byte() {
    let parser = NmeaParser::new();
    for byte in GPRMC.bytes() {
        parser.process_buffer(&[byte]).unwrap();
    }

    let rmc = parser.rmc(Talker::Gps).unwrap();
    assert_eq!(rmc.status, Status::Active);
    assert_eq!((rmc.day, rmc.month, rmc.year), (23, 3, 2024));
    assert_eq!(rmc.speed_knots, 0.012);
    assert_eq!(rmc.track_angle, 0.0);
    assert_eq!(rmc.magnetic_variation, 0.0);
}

#[test]
fn test_trash_between_sentences() {
    let parser = NmeaParser::new();
    let errors = collect_errors(&parser);

    let mut input = b"\x00\xff binary noise \r\n".to_vec();
    input.extend_from_slice(GPGGA.as_bytes());
    input.extend_from_slice(b"#@!\n\n\r");
    input.extend_from_slice(GPGSA.as_bytes());
    input.extend_from_slice(b"\xb5\x62\x01\x07");

    parser.process_buffer(&input).unwrap();

    assert!(errors.lock().unwrap().is_empty());
    assert_eq!(parser.rx_count(Talker::Gps, SentenceKind::Gga), Some(1));
    assert_eq!(parser.rx_count(Talker::Gps, SentenceKind::Gsa), Some(1));
}

#[test]
fn test_overflow_recovers() {
    let parser = NmeaParser::new();
    let errors = collect_errors(&parser);

    let mut input = format!("$GPGGA,{}\r\n", "1,".repeat(200)).into_bytes();
    input.extend_from_slice(format!("${}\r\n", "G".repeat(40)).as_bytes());
    input.extend_from_slice(GPGGA.as_bytes());

    parser.process_buffer(&input).unwrap();

    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].0, Error::ReceiveBufferOverflow);
    assert_eq!(errors[0].1, "GPGGA");
    assert_eq!(errors[1].0, Error::CommandBufferOverflow);
    assert_eq!(parser.gga(Talker::Gps).unwrap().satellites_in_use, 9);
}

#[test]
fn test_decode_error_does_not_stop_processing() {
    let parser = NmeaParser::new();
    let mut input = GPGSV_GROUP[0].as_bytes().to_vec();
    input.extend_from_slice(GPGSV_OUT_OF_RANGE.as_bytes());
    input.extend_from_slice(GPGGA.as_bytes());

    assert_eq!(
        parser.process_buffer(&input),
        Err(Error::TooManySatellites { index: 60 })
    );

    assert_eq!(parser.gsv(Talker::Gps).unwrap().satellites[0].prn, 1);
    assert_eq!(parser.gga(Talker::Gps).unwrap().satellites_in_use, 9);

    // The error belongs to the call that hit it
    assert_eq!(parser.process_buffer(GPRMC.as_bytes()), Ok(()));
}

#[test]
fn test_unsupported_sentences_are_ignored() {
    let parser = NmeaParser::new();
    let errors = collect_errors(&parser);

    parser
        .process_buffer(b"$GPZDA,145416.00,23,03,2024,00,00*63\r\n$GLGGA,1,2,3\r")
        .unwrap();

    assert!(errors.lock().unwrap().is_empty());
    assert_eq!(parser.gga(Talker::Glonass), None);
    assert_eq!(parser.rx_count(Talker::Glonass, SentenceKind::Gga), None);
}

#[test]
fn test_sentence_without_payload() {
    let parser = NmeaParser::new();
    let errors = collect_errors(&parser);

    parser.process_buffer(GPGGA.as_bytes()).unwrap();
    parser.process_buffer(b"$GPGGA*7C\r\n").unwrap();

    assert!(errors.lock().unwrap().is_empty());
    assert_eq!(parser.rx_count(Talker::Gps, SentenceKind::Gga), Some(2));

    let fix = parser.gga(Talker::Gps).unwrap();
    assert_eq!(fix.satellites_in_use, 0);
    assert_eq!(fix.altitude_msl, 0.0);
}

#[test]
fn test_gga_unit_fields_are_skipped() {
    let parser = NmeaParser::new();
    parser
        .process_buffer(b"$GPGGA,001043.00,3345.12000,S,15112.50000,E,2,12,0.98,12.0,M,21.3,M,2.5,0123\r")
        .unwrap();

    let fix = parser.gga(Talker::Gps).unwrap();
    assert_eq!(fix.altitude_msl, 12.0);
    assert_eq!(fix.geoidal_separation, 21.3);
    assert_eq!(fix.differential_age, 2.5);
    assert_eq!(fix.differential_station_id, 123);
}
