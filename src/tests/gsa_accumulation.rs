use super::fixtures::*;
use crate::{
    NmeaParser,
    nmea_content::{FixMode, Talker},
};

fn active(parser: &NmeaParser, talker: Talker) -> Vec<u16> {
    parser.gsa(talker).unwrap().active_prns().collect()
}

#[test]
fn test_consecutive_gsa_sentences_append() {
    let parser = NmeaParser::new();
    parser.process_buffer(GNGSA_FIRST.as_bytes()).unwrap();
    parser.process_buffer(GNGSA_SECOND.as_bytes()).unwrap();

    assert_eq!(
        active(&parser, Talker::Gnss),
        [1u16, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 65, 66, 67, 68]
    );

    let gsa = parser.gsa(Talker::Gnss).unwrap();
    assert_eq!(gsa.satellites.len(), 24);
    assert_eq!(gsa.fix_mode, FixMode::Fix3D);
}

#[test]
fn test_gga_restarts_accumulation() {
    let parser = NmeaParser::new();
    let mut input = Vec::new();
    for sentence in [GNGSA_FIRST, GNGSA_SECOND, GNGGA, GNGSA_AFTER_GGA] {
        input.extend_from_slice(sentence.as_bytes());
    }
    parser.process_buffer(&input).unwrap();

    assert_eq!(active(&parser, Talker::Gnss), [70u16, 71]);

    let gsa = parser.gsa(Talker::Gnss).unwrap();
    assert_eq!(gsa.satellites.len(), 12);
    assert_eq!(gsa.pdop, 1.1);
    assert_eq!(gsa.vdop, 0.9);
}

#[test]
fn test_other_talker_gga_does_not_restart() {
    let parser = NmeaParser::new();
    parser.process_buffer(GNGSA_FIRST.as_bytes()).unwrap();
    parser.process_buffer(GPGGA.as_bytes()).unwrap();
    parser.process_buffer(GNGSA_AFTER_GGA.as_bytes()).unwrap();

    let prns = active(&parser, Talker::Gnss);
    assert_eq!(prns.len(), 14);
    assert_eq!(prns[12..], [70u16, 71]);
}

#[test]
fn test_bad_gga_does_not_restart() {
    let parser = NmeaParser::new();
    parser.process_buffer(GNGSA_FIRST.as_bytes()).unwrap();

    // Same GNGGA, corrupted checksum
    let corrupted = GNGGA.replace("*47", "*48");
    parser.process_buffer(corrupted.as_bytes()).unwrap();
    parser.process_buffer(GNGSA_AFTER_GGA.as_bytes()).unwrap();

    assert_eq!(active(&parser, Talker::Gnss).len(), 14);
}
