//! Integration tests for the send → air → receive → dispatch pipeline.

use super::mock_hw::{Callback, MockDevice, MockRadio, MockSerial, RecordingHandler};

use radiopacket::adapters::log_sink::{LogPacketHandler, LogSerialPort};
use radiopacket::adapters::loopback::LoopbackRadio;
use radiopacket::app::events::PacketProperty;
use radiopacket::app::service::RadioService;
use radiopacket::config::RadioConfig;
use radiopacket::{Error, PacketType, RawPacket};

fn device() -> MockDevice {
    MockDevice {
        time_ms: 4321,
        serial: 0x0BAD_CAFE,
    }
}

#[test]
fn named_value_to_json_with_serial_disabled() {
    let mut tx = RadioService::default();
    let mut rx = RadioService::default();
    let mut radio = MockRadio::new();
    let mut serial = MockSerial::default();

    let sent = tx.send_value("temp", 23.0, &mut radio, &device()).unwrap();
    assert_eq!(sent.packet_type(), Some(PacketType::Value));

    radio.echo(-42);
    assert!(rx.write_value_to_serial(&mut radio, &mut serial).unwrap());
    assert_eq!(serial.out, "{\"t\":4321,\"s\":0,\"n\":\"temp\",\"v\":23}\r\n");
}

#[test]
fn serial_number_appears_once_enabled() {
    let mut config = RadioConfig::default();
    config.transmit_serial_number = true;
    let mut tx = RadioService::new(config);
    let mut radio = MockRadio::new();

    tx.send_number(5.5, &mut radio, &device()).unwrap();
    let raw = RawPacket::get_packet(radio.sent[0]);
    assert_eq!(raw.packet_type(), Some(PacketType::Double));
    assert_eq!(raw.serial(), 0x0BAD_CAFE);
}

#[test]
fn every_payload_kind_is_dispatched() {
    let mut tx = RadioService::default();
    let mut rx = RadioService::new(RadioConfig {
        max_packets_per_poll: 16,
        ..RadioConfig::default()
    });
    let mut radio = MockRadio::new();
    let dev = device();

    tx.send_number(7.0, &mut radio, &dev).unwrap();
    tx.send_value("lux", 0.25, &mut radio, &dev).unwrap();
    tx.send_string("hello", &mut radio, &dev).unwrap();
    tx.send_buffer(&[1, 2, 3], &mut radio, &dev).unwrap();
    radio.echo(-70);

    let mut handler = RecordingHandler::default();
    assert_eq!(rx.poll(&mut radio, &mut handler), 4);

    let header = Callback::Packet {
        time: 4321,
        serial: 0,
        signal: -70,
    };
    assert_eq!(
        handler.calls,
        [
            header.clone(),
            Callback::Number(7.0),
            header.clone(),
            Callback::Value("lux".into(), 0.25),
            header.clone(),
            Callback::Text("hello".into()),
            header,
            Callback::Buffer(vec![1, 2, 3]),
        ]
    );
    assert_eq!(rx.received_buffer(), &[1, 2, 3]);
    assert_eq!(rx.received_packet(PacketProperty::SignalStrength), -70);
}

#[test]
fn malformed_frames_are_skipped_by_poll() {
    let mut rx = RadioService::default();
    let mut radio = MockRadio::new();
    radio.deliver(&[0u8; 5], -10);
    radio.deliver(&radiopacket::RadioPacket::number(1.0).to_bytes(), -20);

    let mut handler = RecordingHandler::default();
    assert_eq!(rx.poll(&mut radio, &mut handler), 1);
    assert_eq!(rx.dropped_count(), 1);
    assert_eq!(rx.received_number(), 1.0);
}

#[test]
fn write_value_to_serial_reports_bad_frames() {
    let mut rx = RadioService::default();
    let mut radio = MockRadio::new();
    let mut serial = MockSerial::default();
    radio.deliver(&[0u8; 30], 0);

    assert!(matches!(
        rx.write_value_to_serial(&mut radio, &mut serial),
        Err(Error::Frame(_))
    ));
    assert!(serial.out.is_empty());
    assert!(!rx.write_value_to_serial(&mut radio, &mut serial).unwrap());
}

#[test]
fn loopback_radio_end_to_end() {
    let mut svc = RadioService::default();
    let mut radio = LoopbackRadio::<8>::new(-30);
    let dev = device();

    svc.send_string("ping", &mut radio, &dev).unwrap();
    svc.send_number(-3.0, &mut radio, &dev).unwrap();
    assert_eq!(radio.pending(), 2);

    let mut handler = LogPacketHandler::new();
    assert_eq!(svc.poll(&mut radio, &mut handler), 2);
    assert_eq!(svc.received_number(), -3.0);
    assert_eq!(svc.received_time(), 4321);
    assert_eq!(svc.received_serial(), 0);

    let mut console = LogSerialPort::new();
    svc.write_received_packet_to_serial(&mut console).unwrap();
    assert_eq!(console.lines_written(), 1);
}

#[test]
fn no_packet_means_zero_properties_and_no_output() {
    let svc = RadioService::default();
    let mut serial = MockSerial::default();
    assert_eq!(svc.received_packet(PacketProperty::Time), 0);
    assert_eq!(svc.received_string(), "");
    svc.write_received_packet_to_serial(&mut serial).unwrap();
    assert!(serial.out.is_empty());
}
