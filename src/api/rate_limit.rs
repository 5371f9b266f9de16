//! Per-client request throttling

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::error::AppError;

/// Idle buckets are swept after this many checks
const PRUNE_EVERY: u64 = 1024;

/// Keyed limiter shared by every request; one bucket per peer address
#[derive(Clone)]
pub struct ClientLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    checks: Arc<AtomicU64>,
}

impl ClientLimiter {
    pub fn new(quota: Quota) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            checks: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn per_minute(requests: u32) -> Self {
        let requests = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        Self::new(Quota::per_minute(requests))
    }

    /// Record one request from `ip`, returning false once its quota is spent
    pub fn check(&self, ip: IpAddr) -> bool {
        let allowed = self.limiter.check_key(&ip).is_ok();
        if (self.checks.fetch_add(1, Ordering::Relaxed) + 1) % PRUNE_EVERY == 0 {
            self.prune();
        }
        allowed
    }

    /// Drop buckets that have fully refilled
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked
    pub fn tracked(&self) -> usize {
        self.limiter.len()
    }
}

/// Requests without connection info (in-process callers) share one bucket
pub async fn limit(
    State(limiter): State<ClientLimiter>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = connect_info
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !limiter.check(ip) {
        return AppError::TooManyRequests.into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    fn client(n: u32) -> IpAddr {
        IpAddr::V4(Ipv4Addr::from(0x0a00_0000 + n))
    }

    fn short_quota() -> ClientLimiter {
        ClientLimiter::new(Quota::with_period(Duration::from_millis(200)).unwrap())
    }

    #[test]
    fn test_prune_forgets_refilled_clients() {
        let limiter = short_quota();
        for n in 0..100 {
            limiter.check(client(n));
        }
        assert_eq!(limiter.tracked(), 100);

        thread::sleep(Duration::from_millis(400));
        limiter.prune();
        assert_eq!(limiter.tracked(), 0);
    }

    #[test]
    fn test_checks_sweep_idle_clients() {
        let limiter = short_quota();
        for n in 0..PRUNE_EVERY as u32 {
            limiter.check(client(n));
        }
        thread::sleep(Duration::from_millis(400));

        let busy = client(u32::MAX >> 8);
        for _ in 0..PRUNE_EVERY {
            limiter.check(busy);
        }
        assert_eq!(limiter.tracked(), 1);
    }

    #[test]
    fn test_prune_keeps_limited_clients() {
        let limiter = ClientLimiter::per_minute(1);
        let ip = client(1);
        assert!(limiter.check(ip));
        limiter.prune();
        assert_eq!(limiter.tracked(), 1);
        assert!(!limiter.check(ip));
    }

    #[test]
    fn test_quota_is_per_client() {
        let limiter = ClientLimiter::per_minute(2);
        let a: IpAddr = "10.0.0.1".parse().unwrap();
        let b: IpAddr = "10.0.0.2".parse().unwrap();

        assert!(limiter.check(a));
        assert!(limiter.check(a));
        assert!(!limiter.check(a));
        assert!(limiter.check(b));
    }

    #[test]
    fn test_zero_quota_still_allows_one_request() {
        let limiter = ClientLimiter::per_minute(0);
        let ip: IpAddr = "127.0.0.1".parse().unwrap();
        assert!(limiter.check(ip));
        assert!(!limiter.check(ip));
    }
}
