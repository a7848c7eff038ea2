// src/test.rs
//
// End-to-end tests over loopback UDP.

use std::io;
use std::net::UdpSocket;
use std::time::Duration;

use crate::config::GeneratorConfig;
use crate::emitter::create_emitter;
use crate::message::{EEG_ADDRESS, EegPacket};
use crate::osc::OscMessage;
use crate::pacing::PacingMode;
use crate::progress::Progress;
use crate::receiver::Receiver;
use crate::shutdown::Shutdown;
use crate::sink::LOCALHOST;

const FREQUENCY: f64 = 500.0;

fn listener() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind((LOCALHOST, 0)).unwrap();
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    let port = socket.local_addr().unwrap().port();
    (socket, port)
}

fn bounded_config(port: u16, ticks: u64) -> GeneratorConfig {
    let mut config = GeneratorConfig::new(port, FREQUENCY, PacingMode::Corrected).unwrap();
    config.limit = Some(ticks);
    config.progress = false;
    config
}

#[test]
fn test_ten_periods_yield_ten_datagrams() {
    let (socket, port) = listener();
    let config = bounded_config(port, 10);

    let mut emitter = create_emitter(&config).unwrap();
    let stats = emitter.run(&Shutdown::new(), config.limit, &mut Progress::disabled(io::sink()));
    assert_eq!(stats.ticks, 10);
    assert_eq!(stats.failed, 0);

    let mut buf = [0u8; 256];
    for i in 0..10 {
        let (len, _) = socket.recv_from(&mut buf).unwrap();
        let msg = OscMessage::decode(&buf[..len]).unwrap();

        assert_eq!(msg.address, EEG_ADDRESS);
        assert_eq!(msg.args.len(), 6);

        let values: Vec<f32> = msg.args.iter().map(|a| a.as_f32().unwrap()).collect();
        for pair in values.windows(2) {
            assert!((pair[1] - pair[0] - 3.0).abs() < 1e-5, "datagram {i}: {values:?}");
        }
        assert!((values[0] - emitter.table()[i]).abs() < 1e-6);
    }
}

#[test]
fn test_corrected_pacing_approximates_frequency() {
    let (socket, port) = listener();
    let config = bounded_config(port, 25);
    assert_eq!(config.interval, Duration::from_millis(2));

    let mut emitter = create_emitter(&config).unwrap();
    let start = std::time::Instant::now();
    emitter.run(&Shutdown::new(), config.limit, &mut Progress::disabled(io::sink()));

    // 25 sleeps of 2ms each; sleep never returns early
    assert!(start.elapsed() >= Duration::from_millis(50));

    let mut buf = [0u8; 256];
    for _ in 0..25 {
        socket.recv_from(&mut buf).unwrap();
    }
}

#[test]
fn test_runs_without_listener() {
    // Grab a free port, then release it so nothing is listening
    let port = {
        let (_socket, port) = listener();
        port
    };

    let mut config = bounded_config(port, 3000);
    config.interval = Duration::ZERO;

    let mut emitter = create_emitter(&config).unwrap();
    let stats = emitter.run(&Shutdown::new(), config.limit, &mut Progress::disabled(io::sink()));

    assert_eq!(stats.ticks, 3000);
    assert_eq!(stats.sent + stats.failed, 3000);
    assert_eq!(emitter.cursor().index(), 0);
}

#[test]
fn test_emitter_to_receiver() {
    let mut receiver = Receiver::bind(0).unwrap();
    let port = receiver.local_addr().unwrap().port();
    let config = bounded_config(port, 5);

    let mut emitter = create_emitter(&config).unwrap();
    emitter.run(&Shutdown::new(), config.limit, &mut Progress::disabled(io::sink()));

    let mut received = Vec::new();
    while received.len() < 5 {
        match receiver.recv_sample().unwrap() {
            Some(sample) => received.push(sample),
            None => panic!("receiver timed out after {} samples", received.len()),
        }
    }

    for (i, sample) in received.iter().enumerate() {
        assert_eq!(sample.packet, EegPacket::from_base(emitter.table()[i]));
    }
    assert!(received.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}
