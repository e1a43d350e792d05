//! Dashboard API client methods

use reqwest::Method;

use super::VolantClient;
use super::error::ClientError;
use crate::types::DashboardSummary;

impl VolantClient {
    /// Storefront counters shown on the admin dashboard
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ClientError> {
        let req = self.request(Method::GET, "/dashboard/summary");
        self.execute_data(req).await
    }
}
