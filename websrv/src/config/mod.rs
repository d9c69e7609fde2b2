// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    path::PathBuf,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use url::Url;

use genreguide_usecases::track::{
    TracksCacheConfig,
    cache::{DEFAULT_MAX_CAPACITY, DEFAULT_TIME_TO_LIVE},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Config {
    pub(crate) network: NetworkConfig,
    pub(crate) store: StoreConfig,
    pub(crate) cache: CacheConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NetworkConfig {
    pub(crate) endpoint: EndpointConfig,

    /// Serve `POST /shutdown` and `POST /cache/invalidate`
    ///
    /// Only honored for loopback endpoints. Both routes are
    /// unauthenticated.
    #[serde(default)]
    pub(crate) admin_routes: bool,
}

impl NetworkConfig {
    pub(crate) fn admin_routes_enabled(&self) -> bool {
        self.admin_routes && self.endpoint.ip_addr.is_loopback()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EndpointConfig {
    pub(crate) ip_addr: IpAddr,
    pub(crate) port: u16,
}

pub(crate) const ENDPOINT_PORT_EPHEMERAL: u16 = 0;

impl EndpointConfig {
    pub(crate) const fn loopback() -> Self {
        Self {
            ip_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: ENDPOINT_PORT_EPHEMERAL,
        }
    }

    pub(crate) const fn socket_addr(self) -> SocketAddr {
        let Self { ip_addr, port } = self;
        SocketAddr::new(ip_addr, port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::loopback()
    }
}

pub(crate) const DEFAULT_STORE_POOL_MAX_SIZE: NonZeroU32 = NonZeroU32::new(8).unwrap();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoreConfig {
    /// Redis connection URL
    ///
    /// The volatile in-memory store is used if absent.
    pub(crate) url: Option<Url>,

    /// Initial contents of the in-memory store
    pub(crate) seed_file: Option<PathBuf>,

    pub(crate) pool_max_size: NonZeroU32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            seed_file: None,
            pool_max_size: DEFAULT_STORE_POOL_MAX_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CacheConfig {
    pub(crate) max_capacity: u64,
    pub(crate) time_to_live_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
            time_to_live_secs: DEFAULT_TIME_TO_LIVE.as_secs(),
        }
    }
}

impl From<CacheConfig> for TracksCacheConfig {
    fn from(from: CacheConfig) -> Self {
        let CacheConfig {
            max_capacity,
            time_to_live_secs,
        } = from;
        Self {
            max_capacity,
            time_to_live: Duration::from_secs(time_to_live_secs),
        }
    }
}

#[cfg(test)]
mod tests;
