//! Client-data seam.
//!
//! A real deployment would query the practice's CRM here. The console only
//! needs two numbers from it, so the seam is a small trait with a seeded
//! in-memory implementation, and the snapshot falls back to fixed demo
//! numbers whenever the source fails.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

/// Numbers shown when the client book is unreachable.
const FALLBACK_TOTAL_CLIENTS: u32 = 6;
const FALLBACK_OVERDUE_REVIEWS: u32 = 2;

#[async_trait]
pub trait ClientDataSource: Send + Sync {
    async fn total_clients(&self) -> Result<u32>;
    async fn overdue_reviews(&self) -> Result<u32>;
}

#[derive(Debug, Clone)]
pub struct ClientRecord {
    pub name: String,
    pub review_overdue: bool,
}

/// In-memory client book backing the demo.
pub struct DemoBook {
    clients: Vec<ClientRecord>,
}

impl DemoBook {
    pub fn new(clients: Vec<ClientRecord>) -> Self {
        Self { clients }
    }

    /// The book every demo starts with: six households, two of them overdue
    /// for their annual review.
    pub fn seeded() -> Self {
        let record = |name: &str, review_overdue| ClientRecord {
            name: name.to_string(),
            review_overdue,
        };

        Self::new(vec![
            record("Alvarez Family Trust", false),
            record("B. Okafor", true),
            record("Chen Retirement Account", false),
            record("D. Whitfield", false),
            record("E. & M. Rossi", true),
            record("Faruqi Holdings", false),
        ])
    }
}

#[async_trait]
impl ClientDataSource for DemoBook {
    async fn total_clients(&self) -> Result<u32> {
        Ok(self.clients.len() as u32)
    }

    async fn overdue_reviews(&self) -> Result<u32> {
        Ok(self.clients.iter().filter(|c| c.review_overdue).count() as u32)
    }
}

/// Counts the page shows, gathered once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PracticeSnapshot {
    pub total_clients: u32,
    pub overdue_reviews: u32,
}

impl PracticeSnapshot {
    /// Query the source, falling back to the fixed demo numbers if either
    /// count is unavailable.
    pub async fn gather(source: &dyn ClientDataSource) -> Self {
        let total = source.total_clients().await;
        let overdue = source.overdue_reviews().await;

        match (total, overdue) {
            (Ok(total_clients), Ok(overdue_reviews)) => Self {
                total_clients,
                overdue_reviews,
            },
            (Err(e), _) | (_, Err(e)) => {
                warn!("Client data source unavailable, using fallback counts: {}", e);
                Self::fallback()
            }
        }
    }

    pub fn fallback() -> Self {
        Self {
            total_clients: FALLBACK_TOTAL_CLIENTS,
            overdue_reviews: FALLBACK_OVERDUE_REVIEWS,
        }
    }

    /// Share of clients whose reviews are up to date, as a whole percentage.
    pub fn compliance_rate(&self) -> u32 {
        if self.total_clients == 0 {
            return 100;
        }
        let current = self.total_clients.saturating_sub(self.overdue_reviews);
        ((current as f64 / self.total_clients as f64) * 100.0).round() as u32
    }
}
