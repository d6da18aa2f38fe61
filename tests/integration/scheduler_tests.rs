//! Scheduler orchestration tests: channel gating, listener lifecycle and the
//! one-write-per-tick contract, driven entirely through mock ports.

use reddust_object::app::events::AppEvent;
use reddust_object::colour::{BLUE, RED};
use reddust_object::config::SystemConfig;
use reddust_object::connectivity::{ConnectivityEvent, ConnectivityState};
use reddust_object::error::{Error, LineError, OscError, TransportError};
use rosc::OscType;

use crate::mock_hw::Rig;

fn connected_rig() -> Rig {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.wifi.connected = true;
    rig
}

// ── Serial path ───────────────────────────────────────────────

#[test]
fn serial_line_sets_pixel_on_same_tick() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.hw.inject(b"1.0,5\n");

    assert_eq!(rig.tick(0), BLUE);
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::SerialSample { value, colour } if *value == 1.0 && *colour == BLUE
        )),
        1
    );
    assert_eq!(rig.scheduler.serial().colour(), BLUE);
}

#[test]
fn only_latest_line_in_a_burst_is_applied() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.hw.inject(b"1.0,1\n0.5,2\n0.0,3\n");

    assert_eq!(rig.tick(0), RED);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::SerialSample { .. })), 1);
}

#[test]
fn rejected_line_keeps_previous_colour() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.hw.inject(b"0.0,1\n");
    rig.tick(0);

    rig.hw.inject(b"abc,2\n");
    assert_eq!(rig.tick(10), RED);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::SerialRejected(LineError::NotNumeric))
    );
}

#[test]
fn stale_partial_line_is_reported_once() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.hw.inject(b"0.5");
    rig.run(0, 2000, 100);

    assert_eq!(rig.sink.count(|e| *e == AppEvent::SerialStaleLine), 1);
    assert!(rig.scheduler.serial().pending_bytes() == 0);
}

#[test]
fn serial_activity_edges_are_emitted() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.hw.inject(b"0.5,1\n");
    rig.run(0, 2500, 100);

    let activity: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::SerialActivity { active } => Some(*active),
            _ => None,
        })
        .collect();
    assert_eq!(activity, vec![true, false]);
}

// ── OSC path ──────────────────────────────────────────────────

#[test]
fn osc_listener_opens_on_connect() {
    let mut rig = connected_rig();
    rig.tick(0);

    assert_eq!(rig.osc.opens, vec![8000]);
    assert!(rig.sink.events.contains(&AppEvent::OscListening { port: 8000 }));
    assert!(rig.scheduler.osc().is_listening());
}

#[test]
fn osc_value_becomes_pixel_after_flash() {
    let mut rig = connected_rig();
    rig.tick(0);
    rig.osc.push_float(1.0);

    rig.tick(100);
    assert_eq!(rig.scheduler.osc().colour(), Some(BLUE));
    // Still inside the 200 ms connect flash.
    assert_eq!(rig.hw.last_frame(), Some((0, 255, 0)));
    assert_eq!(rig.tick(200), BLUE);
}

#[test]
fn one_datagram_per_tick() {
    let mut rig = connected_rig();
    rig.tick(0);
    rig.osc.push_float(0.0);
    rig.osc.push_float(1.0);

    rig.tick(10);
    assert_eq!(rig.osc.queue.len(), 1);
    assert_eq!(rig.scheduler.osc().colour(), Some(RED));
    rig.tick(20);
    assert!(rig.osc.queue.is_empty());
    assert_eq!(rig.scheduler.osc().colour(), Some(BLUE));
}

#[test]
fn osc_is_not_read_while_serial_active() {
    let mut rig = connected_rig();
    rig.hw.inject(b"0.5,1\n");
    rig.osc.push_float(0.0);

    rig.run(0, 2000, 100);
    assert_eq!(rig.osc.queue.len(), 1, "datagram must stay queued");
    assert_eq!(rig.scheduler.osc().colour(), None);

    rig.tick(2001);
    assert!(rig.osc.queue.is_empty());
    assert_eq!(rig.scheduler.osc().colour(), Some(RED));
}

#[test]
fn osc_is_not_read_while_disconnected() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.osc.push_float(0.5);
    rig.run(0, 1000, 100);

    assert!(rig.osc.opens.is_empty());
    assert_eq!(rig.osc.queue.len(), 1);
    assert_eq!(rig.scheduler.connectivity_state(), ConnectivityState::Connecting);
}

#[test]
fn foreign_and_malformed_datagrams_are_discarded() {
    let mut rig = connected_rig();
    rig.tick(0);
    rig.osc
        .push_message("/red_dust/object_2", vec![OscType::Float(0.0)]);
    rig.osc
        .push_message(crate::mock_hw::OSC_ADDRESS, vec![OscType::Int(1)]);
    rig.osc.push_raw(b"garbage!");

    rig.run(10, 30, 10);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::OscDiscarded(Error::Osc(OscError::AddressMismatch)))
    );
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::OscDiscarded(Error::Osc(OscError::NotAFloat)))
    );
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::OscDiscarded(Error::Osc(OscError::Malformed)))
    );
    assert_eq!(rig.scheduler.osc().colour(), None);
}

#[test]
fn bind_failure_is_reported_and_nothing_is_consumed() {
    let mut rig = connected_rig();
    rig.osc.fail_open = true;
    rig.osc.push_float(0.5);
    rig.run(0, 500, 100);

    assert!(
        rig.sink
            .events
            .contains(&AppEvent::OscListenFailed(TransportError::BindFailed))
    );
    assert!(!rig.scheduler.osc().is_listening());
    assert_eq!(rig.osc.queue.len(), 1);
}

#[test]
fn listener_is_rebound_on_reconnect() {
    let mut rig = connected_rig();
    rig.tick(0);
    rig.wifi.connected = false;
    rig.tick(1000);
    rig.wifi.connected = true;
    rig.tick(2000);

    assert_eq!(rig.osc.opens, vec![8000, 8000]);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::Connectivity(ConnectivityEvent::JustReconnected))
    );
}

// ── Pixel contract ────────────────────────────────────────────

#[test]
fn every_tick_writes_and_shows_once() {
    let mut rig = connected_rig();
    rig.hw.inject(b"0.3,1\n");
    rig.osc.push_float(0.7);
    rig.run(0, 4900, 100);

    assert_eq!(rig.scheduler.tick_count(), 50);
    assert_eq!(rig.hw.frames.len(), 50);
    assert_eq!(rig.hw.set_calls, 50);
}

#[test]
fn indication_change_is_emitted_only_on_change() {
    let mut config = SystemConfig::default();
    config.wifi_enabled = false;
    let mut rig = Rig::new(&config);
    rig.run(0, 3000, 100);

    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::IndicationChanged { .. })),
        1
    );
}

#[test]
fn start_announces_policy() {
    let rig = Rig::new(&SystemConfig::default());
    assert!(matches!(
        rig.sink.events.first(),
        Some(AppEvent::Started {
            wifi_enabled: true,
            ..
        })
    ));
}
