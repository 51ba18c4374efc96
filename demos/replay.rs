//! Replays a receiver capture through the parser and prints the resulting records.
//!
//! ```text
//! cargo run --example replay -- capture.nmea
//! RUST_LOG=debug cargo run --example replay
//! ```
//!
//! Without an argument a short built-in capture is replayed.

use std::{
    env, fs,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
};

use nmea0183_stream::{
    NmeaParser,
    nmea_content::{SentenceKind, Talker},
};

const SAMPLE: &str = "\
$GPGGA,145416.00,3350.10959,N,11751.22870,W,1,09,0.85,70.3,M,-32.7,M,,*5B\r\n\
$GPRMC,145416.00,A,3350.10959,N,11751.22870,W,0.012,,230324,,,A*6B\r\n\
$GPGSA,A,3,06,25,12,19,05,24,02,29,,,,,1.79,0.94,1.52*06\r\n\
$GPGSV,1,1,04,03,10,100,20,06,20,200,30,09,30,300,40,16,40,010,50*73\r\n\
$GLGSV,1,1,02,65,30,045,40,72,60,270,35*62\r\n\
$GPGGA,145416.00,3350.10959,N,11751.22870,W,1,09,0.85,70.3,M,-32.7,M,,*5C\r\n";

const TALKERS: [Talker; 6] = [
    Talker::Gps,
    Talker::Glonass,
    Talker::Galileo,
    Talker::Beidou,
    Talker::Qzss,
    Talker::Gnss,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let input = match env::args().nth(1) {
        Some(path) => fs::read(path)?,
        None => SAMPLE.as_bytes().to_vec(),
    };

    let parser = NmeaParser::new();
    let sentences = Arc::new(AtomicU32::new(0));

    parser.on_error(|error, tag| eprintln!("dropped ${tag}: {error}"));
    parser.on_sentence({
        let sentences = Arc::clone(&sentences);
        move |_, _| {
            sentences.fetch_add(1, Ordering::Relaxed);
        }
    });

    // Serial ports deliver small reads; mimic that
    for chunk in input.chunks(32) {
        if let Err(error) = parser.process_buffer(chunk) {
            eprintln!("decode error: {error}");
        }
    }

    println!("{} sentences decoded", sentences.load(Ordering::Relaxed));

    for talker in TALKERS {
        let received = |kind| parser.rx_count(talker, kind).unwrap_or(0) > 0;

        if received(SentenceKind::Gga) && let Some(fix) = parser.gga(talker) {
            println!(
                "{}GGA {:02}:{:02}:{:02} {:.6},{:.6} alt {:.1} m, {} sats, {:?}",
                talker.id(),
                fix.hour,
                fix.minute,
                fix.second,
                fix.latitude,
                fix.longitude,
                fix.altitude_msl,
                fix.satellites_in_use,
                fix.fix_quality,
            );
        }

        if received(SentenceKind::Rmc) && let Some(rmc) = parser.rmc(talker) {
            println!(
                "{}RMC {:?} {:04}-{:02}-{:02} {:.3} kn",
                talker.id(),
                rmc.status,
                rmc.year,
                rmc.month,
                rmc.day,
                rmc.speed_knots,
            );
        }

        if received(SentenceKind::Gsa) && let Some(gsa) = parser.gsa(talker) {
            let prns: Vec<u16> = gsa.active_prns().collect();
            println!(
                "{}GSA {:?} PDOP {:.2} active {prns:?}",
                talker.id(),
                gsa.fix_mode,
                gsa.pdop,
            );
        }

        if received(SentenceKind::Gsv) && let Some(gsv) = parser.gsv(talker) {
            println!("{}GSV {} in view", talker.id(), gsv.satellites_in_view);
            for satellite in gsv.visible() {
                println!(
                    "  PRN {:3} el {:4.1} az {:5.1} snr {}",
                    satellite.prn, satellite.elevation, satellite.azimuth, satellite.snr,
                );
            }
        }
    }

    Ok(())
}
