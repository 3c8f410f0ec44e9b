use std::rc::Rc;

use ems_core::ChartData;

use crate::api::ApiClient;
use crate::screen::{Lifecycle, Screen};
use crate::transport::Transport;

/// Category totals and status counts; read-only.
pub struct AdminCharts<T> {
    api: ApiClient<T>,
    charts: Screen<ChartData>,
}

impl<T: Transport> AdminCharts<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            charts: Screen::new(Lifecycle::new()),
        }
    }

    pub fn lifecycle(&self) -> Rc<Lifecycle> {
        self.charts.lifecycle().clone()
    }

    pub fn screen(&self) -> &Screen<ChartData> {
        &self.charts
    }

    pub async fn load(&self) {
        self.charts.load(self.api.dashboard_charts()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::client_as;
    use crate::screen::ScreenState;
    use crate::transport::Method;
    use ems_core::Role;
    use serde_json::json;

    #[tokio::test]
    async fn loads_chart_series() {
        let (mock, api) = client_as(Role::Admin);
        mock.respond(
            Method::Get,
            "/dashboard/charts",
            200,
            json!({
                "categorySummary": [{ "category": "Travel", "_sum": { "amount": 300 } }],
                "statusSummary": [{ "status": "PENDING", "_count": { "_all": 2 } }]
            }),
        );

        let charts = AdminCharts::new(api);
        charts.load().await;

        let data = charts.screen().data().unwrap();
        assert_eq!(data.by_category[0].value, 300.0);
        assert_eq!(data.by_status[0].name, "PENDING");
    }

    #[tokio::test]
    async fn load_failure_is_contained() {
        let (mock, api) = client_as(Role::Admin);
        mock.respond(Method::Get, "/dashboard/charts", 403, json!({}));

        let charts = AdminCharts::new(api);
        charts.load().await;

        assert_eq!(
            charts.screen().snapshot(),
            ScreenState::LoadError("You are not allowed to do that.".into())
        );
    }
}
