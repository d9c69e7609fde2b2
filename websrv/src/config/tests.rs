// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::net::Ipv6Addr;

use super::*;

#[test]
fn admin_routes_are_disabled_by_default() {
    let network = NetworkConfig::default();
    assert!(network.endpoint.ip_addr.is_loopback());
    assert!(!network.admin_routes_enabled());
}

#[test]
fn admin_routes_require_loopback_endpoint() {
    let mut network = NetworkConfig {
        admin_routes: true,
        ..Default::default()
    };
    assert!(network.admin_routes_enabled());
    network.endpoint.ip_addr = IpAddr::V6(Ipv6Addr::UNSPECIFIED);
    assert!(!network.admin_routes_enabled());
}
