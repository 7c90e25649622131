// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[test]
fn default_is_offline() {
    assert_eq!(NetworkStatus::default(), NetworkStatus::offline());
    assert!(!NetworkStatus::default().is_connected);
}

#[test]
fn strength_order() {
    assert!(LinkStrength::Excellent > LinkStrength::Good);
    assert!(LinkStrength::Good > LinkStrength::Fair);
    assert!(LinkStrength::Fair > LinkStrength::Poor);
}

#[parameterized(
    poor = { "poor", LinkStrength::Poor },
    fair = { "Fair", LinkStrength::Fair },
    good = { "good", LinkStrength::Good },
    excellent = { "EXCELLENT", LinkStrength::Excellent },
)]
fn parse_strength(input: &str, expected: LinkStrength) {
    assert_eq!(input.parse::<LinkStrength>().unwrap(), expected);
}

#[test]
fn parse_strength_rejects_unknown() {
    assert!(matches!(
        "great".parse::<LinkStrength>(),
        Err(Error::InvalidStrength(_))
    ));
}

#[parameterized(
    offline = { NetworkStatus::offline(), true },
    poor = { NetworkStatus::online(LinkStrength::Poor), true },
    fair = { NetworkStatus::online(LinkStrength::Fair), false },
    good = { NetworkStatus::online(LinkStrength::Good), false },
)]
fn degraded_links(status: NetworkStatus, degraded: bool) {
    assert_eq!(status.is_degraded(), degraded);
}

#[test]
fn display() {
    assert_eq!(NetworkStatus::offline().to_string(), "disconnected");
    assert_eq!(
        NetworkStatus::online(LinkStrength::Good).to_string(),
        "connected (good link)"
    );
    let metered = NetworkStatus {
        is_expensive: true,
        ..NetworkStatus::online(LinkStrength::Fair)
    };
    assert_eq!(metered.to_string(), "connected (fair link, metered)");
}

#[test]
fn serde_round_trip_field_names() {
    let value = serde_json::to_value(NetworkStatus::online(LinkStrength::Good)).unwrap();
    assert_eq!(value["is_connected"], true);
    assert_eq!(value["strength"], "good");
    assert_eq!(value["is_expensive"], false);
}
