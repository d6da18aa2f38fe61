//! End-to-end pixel timelines.
//!
//! Each test scripts the mocks over simulated uptime and checks the colour
//! latched at specific instants.

use reddust_object::app::events::AppEvent;
use reddust_object::colour::{BLACK, BLUE, GREEN, RED, YELLOW};
use reddust_object::config::{ArbitrationPolicy, SystemConfig};
use reddust_object::connectivity::{ConnectivityEvent, ConnectivityState};
use reddust_object::presenter::Indication;

use crate::mock_hw::Rig;

const QUARTER: (u8, u8, u8) = (191, 0, 64);

#[test]
fn provisioning_blinks_blue_then_flashes_green_on_join() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.wifi.provisioning = true;

    assert_eq!(rig.tick(0), BLUE);
    assert_eq!(rig.tick(500), BLUE);
    assert_eq!(rig.tick(1000), BLACK);
    assert_eq!(rig.tick(1500), BLACK);
    assert_eq!(rig.tick(2000), BLUE);
    assert_eq!(rig.scheduler.indication(), Some(Indication::Provisioning));
    assert_eq!(rig.wifi.joins, 0, "no joins while the portal is up");

    rig.wifi.provisioning = false;
    rig.wifi.connected = true;
    assert_eq!(rig.tick(2100), GREEN);
    assert_eq!(rig.tick(2299), GREEN);
    assert_eq!(rig.tick(2300), BLACK);
    assert_eq!(rig.scheduler.indication(), Some(Indication::Dark));
    assert_eq!(rig.osc.opens, vec![8000]);
}

#[test]
fn isolation_red_holds_while_joining() {
    let mut config = SystemConfig::default();
    config.policy = ArbitrationPolicy::IsolationRed;
    let mut rig = Rig::new(&config);

    let frames = rig.run(0, 20_000, 100);
    assert!(frames.iter().all(|&f| f == RED));
    // Immediate first attempt, then one every 10 s.
    assert_eq!(rig.wifi.joins, 3);
    assert_eq!(rig.scheduler.indication(), Some(Indication::Isolated));
}

#[test]
fn isolation_red_overrides_provisioning_portal() {
    let mut config = SystemConfig::default();
    config.policy = ArbitrationPolicy::IsolationRed;
    let mut rig = Rig::new(&config);
    rig.wifi.provisioning = true;

    for t in [0, 500, 1000, 1500] {
        assert_eq!(rig.tick(t), RED, "t={t}");
    }
    assert_eq!(rig.scheduler.connectivity_state(), ConnectivityState::Provisioning);
    assert_eq!(rig.scheduler.indication(), Some(Indication::Isolated));
}

#[test]
fn isolation_red_replaces_link_loss_visuals() {
    let mut config = SystemConfig::default();
    config.policy = ArbitrationPolicy::IsolationRed;
    let mut rig = Rig::new(&config);
    rig.wifi.connected = true;
    assert_eq!(rig.tick(0), GREEN);
    assert_eq!(rig.tick(200), BLACK);

    rig.wifi.connected = false;
    let frames = rig.run(1000, 4000, 100);
    assert!(frames.iter().all(|&f| f == RED));
    assert_eq!(rig.scheduler.connectivity_state(), ConnectivityState::Reconnecting);
    assert_eq!(rig.scheduler.indication(), Some(Indication::Isolated));
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::IndicationChanged {
                to: Indication::DisconnectedFlash | Indication::Reconnecting,
                ..
            }
        )),
        0
    );

    rig.wifi.connected = true;
    assert_eq!(rig.tick(4100), GREEN);
}

#[test]
fn isolation_red_yields_to_serial() {
    let mut config = SystemConfig::default();
    config.policy = ArbitrationPolicy::IsolationRed;
    let mut rig = Rig::new(&config);

    assert_eq!(rig.tick(0), RED);
    rig.hw.inject(b"0.25,1\n");
    assert_eq!(rig.tick(100), QUARTER);
}

#[test]
fn serial_receiving_beats_connect_flash() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.wifi.connected = true;
    rig.hw.inject(b"0.25,1\n");

    assert_eq!(rig.tick(0), QUARTER);
    assert_eq!(rig.scheduler.indication(), Some(Indication::SerialColour));
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::Connectivity(ConnectivityEvent::JustConnected))
    );
}

#[test]
fn quiet_serial_blinks_blue() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.hw.inject(b"0.25,1\n");

    assert_eq!(rig.tick(0), QUARTER);
    assert_eq!(rig.tick(100), QUARTER);
    assert_eq!(rig.tick(150), BLUE);
    assert_eq!(rig.scheduler.indication(), Some(Indication::SerialIdle));
    assert_eq!(rig.tick(1150), BLACK);
    assert_eq!(rig.tick(2150), BLUE);

    // Fresh data snaps straight back to the value colour.
    rig.hw.inject(b"1.0,2\n");
    assert_eq!(rig.tick(2200), BLUE);
    assert_eq!(rig.scheduler.indication(), Some(Indication::SerialColour));
}

#[test]
fn wifi_disabled_without_serial_is_solid_blue() {
    let mut config = SystemConfig::default();
    config.wifi_enabled = false;
    let mut rig = Rig::new(&config);

    let frames = rig.run(0, 5_000, 100);
    assert!(frames.iter().all(|&f| f == BLUE));
    assert_eq!(rig.wifi.joins, 0);
    assert_eq!(rig.scheduler.connectivity_state(), ConnectivityState::NotSetUp);
    assert_eq!(rig.scheduler.indication(), Some(Indication::AwaitingSerial));
}

#[test]
fn disconnect_flashes_red_then_blinks_yellow_until_rejoin() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.wifi.connected = true;
    assert_eq!(rig.tick(0), GREEN);
    assert_eq!(rig.tick(200), BLACK);

    rig.wifi.connected = false;
    assert_eq!(rig.tick(1000), RED);
    assert_eq!(rig.wifi.joins, 1, "disconnect edge retries immediately");
    assert_eq!(rig.tick(1100), RED);
    assert_eq!(rig.tick(1200), YELLOW);
    assert_eq!(rig.scheduler.indication(), Some(Indication::Reconnecting));
    assert_eq!(rig.tick(2100), YELLOW);
    assert_eq!(rig.tick(2200), BLACK);

    rig.run(2300, 11_000, 100);
    assert_eq!(rig.wifi.joins, 2);

    rig.wifi.connected = true;
    assert_eq!(rig.tick(11_500), GREEN);
    assert_eq!(rig.tick(11_700), BLACK);
    assert_eq!(rig.osc.opens, vec![8000, 8000]);
}

#[test]
fn osc_colour_persists_until_replaced() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.wifi.connected = true;
    rig.tick(0);

    rig.osc.push_float(0.25);
    rig.tick(300);
    assert_eq!(rig.run(400, 3_000, 100).last(), Some(&QUARTER));

    rig.osc.push_float(1.0);
    assert_eq!(rig.tick(3_100), BLUE);
    assert_eq!(rig.scheduler.indication(), Some(Indication::OscColour));
}

#[test]
fn repeated_ticks_at_same_instant_are_stable() {
    let mut rig = Rig::new(&SystemConfig::default());
    rig.wifi.provisioning = true;

    let first = rig.tick(700);
    for _ in 0..5 {
        assert_eq!(rig.tick(700), first);
    }
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::IndicationChanged { .. })),
        1
    );
}
