use std::{
    env,
    io::{self, Read},
    time::Duration,
};

use telemetry_codec::{
    mavlink::{self, Message},
    nmea::{self, sentences::LazySentence},
};

fn main() {
    let path = env::args().nth(1).expect("no serial port supplied");
    let baud_rate = env::args()
        .nth(2)
        .map(|s| s.parse().expect("invalid baud rate"))
        .unwrap_or(57_600);
    let mut port = serialport::new(path, baud_rate)
        .timeout(Duration::from_millis(20))
        .open()
        .expect("failed to open serial port");

    let mut buf = [0; 1024];
    let mut binary: mavlink::Framer = mavlink::Framer::default();
    let mut text: nmea::Framer = nmea::Framer::default();
    loop {
        match port.read(buf.as_mut_slice()) {
            Ok(n) => {
                for &byte in &buf[..n] {
                    match binary.push(byte) {
                        Some(Ok(view)) => match Message::decode_verified(&view) {
                            Ok(message) => println!("{:?}", message),
                            Err(err) => eprintln!("{} (message {})", err, view.message_id()),
                        },
                        Some(Err(err)) => eprintln!("{err}"),
                        None => {}
                    }

                    match text.push(byte) {
                        Some(Ok(view)) => match LazySentence::bind(&view) {
                            Some(LazySentence::Gga(gga)) => println!("{:?}", gga.parse()),
                            Some(LazySentence::Rmc(rmc)) => println!("{:?}", rmc.parse()),
                            Some(sentence) => println!("{:?}", sentence),
                            None => println!("{}{} {:?}", view.talker(), view.sentence_id(), view.fields()),
                        },
                        Some(Err(err)) => eprintln!("{err}"),
                        None => {}
                    }
                }
            }
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => (),
            Err(e) => {
                eprintln!("{}", e);
                break;
            }
        }
    }
}
